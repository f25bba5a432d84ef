// Roster snapshot import from CSV.
//
// Header-driven: `id` is required, everything else is optional. Header names
// are matched case-insensitively and a few spreadsheet spellings (`QAB%`,
// `First Name`) are folded onto the canonical column names.

use std::io::Read;
use std::path::Path;

use dugout_lineup::{Player, PlayerId, PlayerStats};
use serde::Deserialize;
use tracing::warn;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV row (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawRosterRow {
    id: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    jersey: Option<u32>,
    #[serde(default)]
    pa: Option<f64>,
    #[serde(default)]
    h: Option<f64>,
    #[serde(default)]
    bb: Option<f64>,
    #[serde(default)]
    so: Option<f64>,
    #[serde(default)]
    xbh: Option<f64>,
    #[serde(default)]
    roe: Option<f64>,
    #[serde(default)]
    spd: Option<f64>,
    #[serde(default)]
    ba: Option<f64>,
    #[serde(default)]
    obp: Option<f64>,
    #[serde(default)]
    slg: Option<f64>,
    #[serde(default)]
    rbi: Option<f64>,
    #[serde(default)]
    games: Option<f64>,
    #[serde(default)]
    qab_pct: Option<f64>,
}

impl RawRosterRow {
    fn into_player(self) -> Player {
        Player {
            id: PlayerId::parse(&self.id),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            jersey: self.jersey,
            stats: PlayerStats {
                pa: self.pa,
                h: self.h,
                bb: self.bb,
                so: self.so,
                xbh: self.xbh,
                roe: self.roe,
                spd: self.spd,
                ba: self.ba,
                obp: self.obp,
                slg: self.slg,
                rbi: self.rbi,
                games: self.games,
                qab_pct: self.qab_pct,
            },
        }
    }
}

/// Fold a raw header onto the canonical column name.
fn canonical_header(raw: &str) -> String {
    let lower = raw.trim().to_lowercase().replace([' ', '-'], "_");
    match lower.as_str() {
        "qab" | "qab%" | "qab_%" => "qab_pct".to_string(),
        "avg" => "ba".to_string(),
        "g" | "gp" => "games".to_string(),
        "k" => "so".to_string(),
        "first" | "firstname" => "first_name".to_string(),
        "last" | "lastname" => "last_name".to_string(),
        "number" | "num" | "#" => "jersey".to_string(),
        _ => lower,
    }
}

// ---------------------------------------------------------------------------
// Reader-based loader (enables testing without temp files)
// ---------------------------------------------------------------------------

fn load_roster_from_reader<R: Read>(rdr: R) -> Result<Vec<Player>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);

    let headers: csv::StringRecord = reader.headers()?.iter().map(canonical_header).collect();
    reader.set_headers(headers);

    let mut players = Vec::new();
    for result in reader.deserialize::<RawRosterRow>() {
        match result {
            Ok(raw) => {
                if raw.id.trim().is_empty() {
                    warn!("skipping roster row with empty id");
                    continue;
                }
                players.push(raw.into_player());
            }
            Err(e) => {
                warn!("skipping malformed roster row: {}", e);
            }
        }
    }
    Ok(players)
}

// ---------------------------------------------------------------------------
// Public path-based loader
// ---------------------------------------------------------------------------

/// Load a roster snapshot from a CSV file. An empty result is an error.
pub fn load_roster(path: &Path) -> Result<Vec<Player>, RosterError> {
    let file = std::fs::File::open(path).map_err(|e| RosterError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let players = load_roster_from_reader(file).map_err(|e| RosterError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;

    if players.is_empty() {
        return Err(RosterError::Validation(format!(
            "roster CSV {} produced zero valid rows",
            path.display()
        )));
    }

    Ok(players)
}
