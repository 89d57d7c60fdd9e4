use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Venus cycle vocabulary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VenusColor {
    White,
    Blue,
    Black,
    Red,
}

impl VenusColor {
    pub const ALL: [VenusColor; 4] = [
        VenusColor::White,
        VenusColor::Blue,
        VenusColor::Black,
        VenusColor::Red,
    ];

    pub fn name(self) -> &'static str {
        match self {
            VenusColor::White => "White",
            VenusColor::Blue => "Blue",
            VenusColor::Black => "Black",
            VenusColor::Red => "Red",
        }
    }
}

impl fmt::Display for VenusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One step of the Venus cycle, e.g. `Red_3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VenusInterval {
    pub color: VenusColor,
    /// 1..=5
    pub position: u8,
}

const fn iv(color: VenusColor, position: u8) -> VenusInterval {
    VenusInterval { color, position }
}

/// The 20 intervals in cycle order. Colors advance one step per interval
/// while the position drops by one, wrapping 1 → 5.
pub const VENUS_CYCLE: [VenusInterval; 20] = {
    use VenusColor::*;
    [
        iv(White, 1),
        iv(Blue, 5),
        iv(Black, 4),
        iv(Red, 3),
        iv(White, 2),
        iv(Blue, 1),
        iv(Black, 5),
        iv(Red, 4),
        iv(White, 3),
        iv(Blue, 2),
        iv(Black, 1),
        iv(Red, 5),
        iv(White, 4),
        iv(Blue, 3),
        iv(Black, 2),
        iv(Red, 1),
        iv(White, 5),
        iv(Blue, 4),
        iv(Black, 3),
        iv(Red, 2),
    ]
};

impl fmt::Display for VenusInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.color, self.position)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVenusError(pub String);

impl FromStr for VenusInterval {
    type Err = ParseVenusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseVenusError(s.to_string());
        let (color, position) = s.split_once('_').ok_or_else(err)?;
        let color = VenusColor::ALL
            .into_iter()
            .find(|c| c.name() == color)
            .ok_or_else(err)?;
        let position: u8 = position.parse().map_err(|_| err())?;
        if !(1..=5).contains(&position) {
            return Err(err());
        }
        Ok(VenusInterval { color, position })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_matches_published_order() {
        let labels: Vec<String> = VENUS_CYCLE.iter().map(|v| v.to_string()).collect();
        assert_eq!(
            labels,
            [
                "White_1", "Blue_5", "Black_4", "Red_3", "White_2", "Blue_1", "Black_5", "Red_4",
                "White_3", "Blue_2", "Black_1", "Red_5", "White_4", "Blue_3", "Black_2", "Red_1",
                "White_5", "Blue_4", "Black_3", "Red_2",
            ]
        );
    }

    #[test]
    fn cycle_has_twenty_distinct_entries_five_per_color() {
        let mut sorted = VENUS_CYCLE.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 20);
        for color in VenusColor::ALL {
            assert_eq!(VENUS_CYCLE.iter().filter(|v| v.color == color).count(), 5);
        }
    }

    #[test]
    fn parses_labels() {
        assert_eq!(
            "Red_3".parse::<VenusInterval>(),
            Ok(VenusInterval {
                color: VenusColor::Red,
                position: 3
            })
        );
        for bad in ["Red_0", "Red_6", "Green_1", "Red3", "red_3", ""] {
            assert!(bad.parse::<VenusInterval>().is_err(), "{bad}");
        }
    }
}
