use std::fmt;
use std::str::FromStr;

use super::error::DataError;

// ---------------------------------------------------------------------------
// Zodiac vocabulary
// ---------------------------------------------------------------------------

/// The twelve signs, declared in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modality {
    Cardinal,
    Fix,
    Mutable,
}

impl ZodiacSign {
    /// Calendar order, ARIES through PISCES.
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "ARIES",
            ZodiacSign::Taurus => "TAURUS",
            ZodiacSign::Gemini => "GEMINI",
            ZodiacSign::Cancer => "CANCER",
            ZodiacSign::Leo => "LEO",
            ZodiacSign::Virgo => "VIRGO",
            ZodiacSign::Libra => "LIBRA",
            ZodiacSign::Scorpio => "SCORPIO",
            ZodiacSign::Sagittarius => "SAGITTARIUS",
            ZodiacSign::Capricorn => "CAPRICORN",
            ZodiacSign::Aquarius => "AQUARIUS",
            ZodiacSign::Pisces => "PISCES",
        }
    }

    /// Element and modality of the sign.
    ///
    /// Elements rotate fire, earth, air, water and modalities rotate
    /// cardinal, fix, mutable along the calendar order.
    pub fn classify(self) -> (Element, Modality) {
        let i = self as usize;
        (Element::ALL[i % 4], Modality::ALL[i % 3])
    }
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Fire, Element::Earth, Element::Air, Element::Water];

    pub fn name(self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Earth => "earth",
            Element::Air => "air",
            Element::Water => "water",
        }
    }
}

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Cardinal, Modality::Fix, Modality::Mutable];

    pub fn name(self) -> &'static str {
        match self {
            Modality::Cardinal => "cardinal",
            Modality::Fix => "fix",
            Modality::Mutable => "mutable",
        }
    }
}

impl FromStr for ZodiacSign {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZodiacSign::ALL
            .into_iter()
            .find(|sign| sign.name() == s)
            .ok_or_else(|| DataError::UnknownSign(s.to_string()))
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a sign by name. Names are the upper-case forms used in the data
/// file (`"LEO"`); anything else is [`DataError::UnknownSign`].
pub fn classify(sign: &str) -> Result<(Element, Modality), DataError> {
    sign.parse::<ZodiacSign>().map(ZodiacSign::classify)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_table() {
        use Element::*;
        use Modality::*;
        let expected = [
            ("ARIES", Fire, Cardinal),
            ("TAURUS", Earth, Fix),
            ("GEMINI", Air, Mutable),
            ("CANCER", Water, Cardinal),
            ("LEO", Fire, Fix),
            ("VIRGO", Earth, Mutable),
            ("LIBRA", Air, Cardinal),
            ("SCORPIO", Water, Fix),
            ("SAGITTARIUS", Fire, Mutable),
            ("CAPRICORN", Earth, Cardinal),
            ("AQUARIUS", Air, Fix),
            ("PISCES", Water, Mutable),
        ];
        for (name, element, modality) in expected {
            assert_eq!(classify(name), Ok((element, modality)), "{name}");
        }
    }

    #[test]
    fn every_element_modality_pair_appears_once() {
        let mut pairs: Vec<_> = ZodiacSign::ALL.iter().map(|s| s.classify()).collect();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), 12);
    }

    #[test]
    fn unknown_sign_is_an_error() {
        assert_eq!(
            classify("UNKNOWN"),
            Err(DataError::UnknownSign("UNKNOWN".into()))
        );
        assert!(classify("aries").is_err());
        assert!(classify("").is_err());
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for sign in ZodiacSign::ALL {
            assert_eq!(sign.to_string().parse::<ZodiacSign>(), Ok(sign));
        }
    }
}
