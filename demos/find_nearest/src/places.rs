//! Candidate loading.
//!
//! Stands in for a places lookup: candidates come from a CSV or JSON file
//! instead of a remote API.
//!
//! # CSV format
//!
//! ```csv
//! id,name,lat,lng,address
//! mc-1,McDonald's Holandeses,-2.510814,-44.3028,Av. dos Holandeses
//! mc-4,No position yet,,,Rua Grande
//! ```
//!
//! # JSON format
//!
//! An array of `{ "id", "name", "lat", "lng", "address"? }` objects.
//!
//! In both formats a coordinate that is empty, missing, or not a number is
//! loaded as `None`; graph assembly then drops that candidate.  Numeric
//! strings (`"-2.51"`) are accepted in JSON.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Deserializer};

use nr_graph::Candidate;

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CsvPlace {
    id:      String,
    #[serde(default)]
    name:    String,
    #[serde(deserialize_with = "csv::invalid_option")]
    lat:     Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    lng:     Option<f64>,
    #[serde(default)]
    address: Option<String>,
}

#[derive(Deserialize)]
struct JsonPlace {
    id:      String,
    #[serde(default)]
    name:    String,
    #[serde(default, deserialize_with = "lenient_coord")]
    lat:     Option<f64>,
    #[serde(default, deserialize_with = "lenient_coord")]
    lng:     Option<f64>,
    #[serde(default)]
    address: Option<String>,
}

fn lenient_coord<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde_json::Value),
    }

    Ok(match Option::<Raw>::deserialize(de)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        Some(Raw::Other(_)) | None => None,
    })
}

fn non_empty(address: Option<String>) -> Option<String> {
    address.filter(|a| !a.trim().is_empty())
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load candidates from `path`, picking the format from the extension.
pub fn load_candidates(path: &Path) -> Result<Vec<Candidate>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let candidates = match ext.as_deref() {
        Some("csv") => read_csv(file),
        Some("json") => read_json(file),
        _ => bail!("unsupported places file {} (expected .csv or .json)", path.display()),
    };
    candidates.with_context(|| format!("reading {}", path.display()))
}

/// Parse CSV candidates from any `Read` source.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Candidate>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut out = Vec::new();
    for (row, record) in csv_reader.deserialize::<CsvPlace>().enumerate() {
        // Header is line 1.
        let p = record.with_context(|| format!("row {}", row + 2))?;
        out.push(Candidate {
            id: p.id,
            name: p.name,
            lat: p.lat,
            lng: p.lng,
            address: non_empty(p.address),
        });
    }
    Ok(out)
}

/// Parse a JSON array of candidates from any `Read` source.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<Candidate>> {
    let places: Vec<JsonPlace> = serde_json::from_reader(reader)?;
    Ok(places
        .into_iter()
        .map(|p| Candidate {
            id: p.id,
            name: p.name,
            lat: p.lat,
            lng: p.lng,
            address: non_empty(p.address),
        })
        .collect())
}
