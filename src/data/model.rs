use std::collections::BTreeMap;
use std::fmt;

use super::sign::ZodiacSign;
use super::venus::VenusInterval;

// ---------------------------------------------------------------------------
// CellValue – a single pass-through cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as read from the source file.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.2}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Guess the type of a textual cell (CSV).
    pub fn guess(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }

    /// Numeric view of the cell. `Null` reads as NaN, text yields `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Null => Some(f64::NAN),
            _ => None,
        }
    }

    /// Textual view of the cell, used for categorical columns.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::String(s) => s.clone(),
            CellValue::Null => String::new(),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Metric – the ten numeric performance columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    GamesPlayed,
    Points,
    Rebounds,
    Assists,
    FieldGoal,
    ThreePoint,
    FreeThrow,
    EffectiveFieldGoal,
    Efficiency,
    WinShares,
}

impl Metric {
    pub const COUNT: usize = 10;

    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::GamesPlayed,
        Metric::Points,
        Metric::Rebounds,
        Metric::Assists,
        Metric::FieldGoal,
        Metric::ThreePoint,
        Metric::FreeThrow,
        Metric::EffectiveFieldGoal,
        Metric::Efficiency,
        Metric::WinShares,
    ];

    /// Column name in the source file.
    pub fn column(self) -> &'static str {
        match self {
            Metric::GamesPlayed => "gp",
            Metric::Points => "pts",
            Metric::Rebounds => "rbs",
            Metric::Assists => "ast",
            Metric::FieldGoal => "fg",
            Metric::ThreePoint => "fg3",
            Metric::FreeThrow => "ft",
            Metric::EffectiveFieldGoal => "efg",
            Metric::Efficiency => "per",
            Metric::WinShares => "ws",
        }
    }

    /// Slider label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::GamesPlayed => "Games Played",
            Metric::Points => "Points per Game",
            Metric::Rebounds => "Rebounds per Game",
            Metric::Assists => "Assists per Game",
            Metric::FieldGoal => "Field Goal Percentage",
            Metric::ThreePoint => "3 Pointers Percentage",
            Metric::FreeThrow => "Free Throw Percentage",
            Metric::EffectiveFieldGoal => "Effective Field Goal Percentage",
            Metric::Efficiency => "Player Efficiency Rating",
            Metric::WinShares => "Win Shares",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// CelestialBody – one sign column per body
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CelestialBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    Ascendant,
    Midheaven,
}

impl CelestialBody {
    pub const COUNT: usize = 13;

    /// Every sign column present in the input file.
    pub const ALL: [CelestialBody; CelestialBody::COUNT] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
        CelestialBody::Uranus,
        CelestialBody::Neptune,
        CelestialBody::Pluto,
        CelestialBody::NorthNode,
        CelestialBody::Ascendant,
        CelestialBody::Midheaven,
    ];

    /// Bodies offered in the horoscope selector. The Venus sign is loaded but
    /// not offered; Venus is explored through the cycle tab instead.
    pub const SELECTABLE: [CelestialBody; 12] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mercury,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
        CelestialBody::Uranus,
        CelestialBody::Neptune,
        CelestialBody::Pluto,
        CelestialBody::NorthNode,
        CelestialBody::Ascendant,
        CelestialBody::Midheaven,
    ];

    pub fn column(self) -> &'static str {
        match self {
            CelestialBody::Sun => "sun",
            CelestialBody::Moon => "moon",
            CelestialBody::Mercury => "mercury",
            CelestialBody::Venus => "venus",
            CelestialBody::Mars => "mars",
            CelestialBody::Jupiter => "jupiter",
            CelestialBody::Saturn => "saturn",
            CelestialBody::Uranus => "uranus",
            CelestialBody::Neptune => "neptune",
            CelestialBody::Pluto => "pluto",
            CelestialBody::NorthNode => "nn",
            CelestialBody::Ascendant => "asc",
            CelestialBody::Midheaven => "mc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Venus => "Venus",
            CelestialBody::Mars => "Mars",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Saturn => "Saturn",
            CelestialBody::Uranus => "Uranus",
            CelestialBody::Neptune => "Neptune",
            CelestialBody::Pluto => "Pluto",
            CelestialBody::NorthNode => "North Node",
            CelestialBody::Ascendant => "ASC",
            CelestialBody::Midheaven => "MC",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// Categorical – a vocabulary value, or the raw text when it is not one
// ---------------------------------------------------------------------------

/// A categorical cell. Out-of-vocabulary values are kept verbatim so they can
/// be counted as unclassified instead of failing the load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Categorical<T> {
    Known(T),
    Unknown(String),
}

impl<T> Categorical<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Categorical::Known(v) => Some(v),
            Categorical::Unknown(_) => None,
        }
    }
}

impl<T: std::str::FromStr> Categorical<T> {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<T>() {
            Ok(v) => Categorical::Known(v),
            Err(_) => Categorical::Unknown(raw.to_string()),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Categorical<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Categorical::Known(v) => write!(f, "{v}"),
            Categorical::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Player – one row of the table
// ---------------------------------------------------------------------------

/// A single individual (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Performance metrics, indexed by [`Metric::index`].
    pub metrics: [f64; Metric::COUNT],
    /// Sign per body, indexed by [`CelestialBody::index`].
    pub signs: [Categorical<ZodiacSign>; CelestialBody::COUNT],
    pub venus_cycle: Categorical<VenusInterval>,
    /// Pass-through columns (name, team, ...) keyed by column name.
    pub extra: BTreeMap<String, CellValue>,
}

impl Player {
    pub fn metric(&self, metric: Metric) -> f64 {
        self.metrics[metric.index()]
    }

    pub fn sign(&self, body: CelestialBody) -> &Categorical<ZodiacSign> {
        &self.signs[body.index()]
    }
}

// ---------------------------------------------------------------------------
// PlayerTable – the loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed table. Derived tables (filter output) are value copies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerTable {
    pub players: Vec<Player>,
    /// Ordered pass-through column names, as they appeared in the source.
    pub extra_columns: Vec<String>,
}

impl PlayerTable {
    pub fn new(players: Vec<Player>, extra_columns: Vec<String>) -> Self {
        PlayerTable {
            players,
            extra_columns,
        }
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Largest observed value of a metric, ignoring NaN cells.
    pub fn metric_max(&self, metric: Metric) -> Option<f64> {
        self.players
            .iter()
            .map(|p| p.metric(metric))
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
    }

    /// Count of rows whose sign or Venus cell is outside the vocabulary.
    pub fn out_of_vocabulary_rows(&self) -> usize {
        self.players
            .iter()
            .filter(|p| {
                p.venus_cycle.known().is_none() || p.signs.iter().any(|s| s.known().is_none())
            })
            .count()
    }
}
