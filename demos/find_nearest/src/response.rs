//! Result payload shaping.
//!
//! Turns a search result into the JSON document a front end renders: the
//! winning place, the path, a travel-time estimate, one direction per hop,
//! and a few numbers about the search itself.

use std::time::Duration;

use serde::Serialize;

use nr_core::{Category, NodeId};
use nr_graph::{Algorithm, Candidate, Graph, Nearest};

// ── Payload types ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct FindNearestResponse {
    pub success: bool,
    pub nearest: Candidate,
    pub distance_km: f64,
    pub estimated_minutes: u64,
    pub path: Vec<PathNode>,
    pub directions: Vec<DirectionStep>,
    pub algorithm_info: AlgorithmInfo,
    /// Candidates offered to the search, before filtering.
    pub candidates: usize,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PathNode {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub category: Category,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DirectionStep {
    pub instruction: String,
    pub distance_km: f64,
    pub duration_minutes: u64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AlgorithmInfo {
    pub algorithm: Algorithm,
    pub nodes_explored: usize,
    pub path_length: usize,
    pub execution_ms: f64,
}

/// Body sent when nothing was found or the request was unusable.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { success: false, error: error.into() }
    }
}

// ── Shaping ───────────────────────────────────────────────────────────────────

/// Whole minutes to cover `distance_km` at `speed_kmh`, rounded to nearest.
pub fn estimated_minutes(distance_km: f64, speed_kmh: f64) -> u64 {
    (distance_km / speed_kmh * 60.0).round() as u64
}

/// One instruction per hop along `path`, then an arrival line.
pub fn directions(graph: &Graph, path: &[NodeId], speed_kmh: f64) -> Vec<DirectionStep> {
    let mut steps: Vec<DirectionStep> = path
        .windows(2)
        .filter_map(|pair| {
            let next = graph.location(pair[1])?;
            let distance_km = graph.edge_weight(pair[0], pair[1])?;
            Some(DirectionStep {
                instruction: format!("Head to {} ({distance_km:.2} km)", next.name),
                distance_km,
                duration_minutes: estimated_minutes(distance_km, speed_kmh),
            })
        })
        .collect();

    if let Some(dest) = path.last().and_then(|&id| graph.location(id)) {
        steps.push(DirectionStep {
            instruction: format!("Arrive at {}", dest.name),
            distance_km: 0.0,
            duration_minutes: 0,
        });
    }
    steps
}

impl FindNearestResponse {
    pub fn new(nearest: &Nearest, candidates: usize, speed_kmh: f64, elapsed: Duration) -> Self {
        let Nearest { candidate, result, graph } = nearest;

        let path = result
            .locations(graph)
            .into_iter()
            .map(|loc| PathNode {
                id: loc.key.clone(),
                name: loc.name.clone(),
                lat: loc.pos.lat,
                lng: loc.pos.lon,
                category: loc.category,
            })
            .collect();

        Self {
            success: true,
            nearest: candidate.clone(),
            distance_km: result.total_distance_km,
            estimated_minutes: estimated_minutes(result.total_distance_km, speed_kmh),
            path,
            directions: directions(graph, &result.path, speed_kmh),
            algorithm_info: AlgorithmInfo {
                algorithm: result.stats.algorithm,
                nodes_explored: result.stats.nodes_settled,
                path_length: result.hops(),
                execution_ms: elapsed.as_secs_f64() * 1_000.0,
            },
            candidates,
        }
    }
}
