// Player records as handed over by the roster provider.
//
// The optimizer only ever borrows these; nothing in this crate mutates a
// `Player`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

/// Stable player identifier. Roster providers hand out either numeric or
/// string keys, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerId {
    Int(i64),
    Text(String),
}

impl PlayerId {
    /// Parse a raw identifier string. Integer-looking input becomes
    /// `PlayerId::Int`, anything else is kept verbatim (trimmed).
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => PlayerId::Int(n),
            Err(_) => PlayerId::Text(trimmed.to_string()),
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::Int(n) => write!(f, "{n}"),
            PlayerId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for PlayerId {
    fn from(n: i64) -> Self {
        PlayerId::Int(n)
    }
}

impl From<i32> for PlayerId {
    fn from(n: i32) -> Self {
        PlayerId::Int(i64::from(n))
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Stats bag
// ---------------------------------------------------------------------------

/// Raw accumulated counters for a player. Every field is optional; an absent
/// (or non-finite) counter reads as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Plate appearances.
    #[serde(default)]
    pub pa: Option<f64>,
    /// Hits.
    #[serde(default)]
    pub h: Option<f64>,
    /// Walks.
    #[serde(default)]
    pub bb: Option<f64>,
    /// Strikeouts.
    #[serde(default)]
    pub so: Option<f64>,
    /// Extra-base hits.
    #[serde(default)]
    pub xbh: Option<f64>,
    /// Reached on error.
    #[serde(default)]
    pub roe: Option<f64>,
    /// Speed rating, nominally 0-10.
    #[serde(default)]
    pub spd: Option<f64>,

    // Inputs for the composite rating.
    #[serde(default)]
    pub ba: Option<f64>,
    #[serde(default)]
    pub obp: Option<f64>,
    #[serde(default)]
    pub slg: Option<f64>,
    #[serde(default)]
    pub rbi: Option<f64>,
    #[serde(default)]
    pub games: Option<f64>,
    #[serde(default, alias = "qab")]
    pub qab_pct: Option<f64>,
}

/// Read an optional counter, treating missing and non-finite values as 0.
pub(crate) fn counter(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub jersey: Option<u32>,
    #[serde(default)]
    pub stats: PlayerStats,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, stats: PlayerStats) -> Self {
        Player {
            id: id.into(),
            first_name: String::new(),
            last_name: String::new(),
            jersey: None,
            stats,
        }
    }

    /// "First Last", falling back to the id when both name parts are empty.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.id.to_string()
        } else {
            full.to_string()
        }
    }
}
