//! Per-request graph assembly.
//!
//! [`assemble`] turns a user coordinate plus a list of candidate places into
//! a star graph: the user in the middle, one spoke per candidate, no
//! candidate-to-candidate edges.  The graph does not model roads; it answers
//! "which candidate is closest in a straight line, one hop away".
//!
//! Node order is fixed: the user is `NodeId(0)`, candidates follow in input
//! order.  Equidistant candidates therefore resolve to the one listed first.

use log::{info, warn};

use nr_core::{Category, GeoPoint, NodeId};

use crate::graph::Graph;
use crate::search::{Algorithm, PathResult};

// ── Inputs ────────────────────────────────────────────────────────────────────

/// A place returned by a places lookup.
///
/// Coordinates are optional because lookups do return records without a
/// usable position; those are dropped during assembly.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub address: Option<String>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lat: Some(lat),
            lng: Some(lng),
            address: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Position, if both coordinates are present and finite.
    pub fn position(&self) -> Option<GeoPoint> {
        let pos = GeoPoint::new(self.lat?, self.lng?);
        pos.is_finite().then_some(pos)
    }
}

/// Assembly knobs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AssemblyConfig {
    /// Only connect candidates at most this far (km) from the user.
    /// `None` connects every candidate.
    pub radius_km: Option<f64>,

    /// Key of the user node.  Candidates using the same id are dropped.
    pub user_key: String,

    /// Display name of the user node.
    pub user_name: String,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            radius_km: None,
            user_key:  "user".to_owned(),
            user_name: "You".to_owned(),
        }
    }
}

impl AssemblyConfig {
    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }
}

// ── Outputs ───────────────────────────────────────────────────────────────────

/// What happened to each candidate during assembly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssemblyReport {
    /// Added as a node and connected to the user.
    pub accepted: usize,
    /// Dropped: missing or non-finite coordinates.
    pub invalid: usize,
    /// Dropped: id already used by an earlier candidate or by the user.
    pub duplicate: usize,
    /// Added as a node but left unconnected (outside the radius).
    pub out_of_range: usize,
}

/// An assembled star graph.
#[derive(Debug)]
pub struct StarGraph {
    pub graph: Graph,
    /// Handle of the user node (always `NodeId(0)`).
    pub user: NodeId,
    pub report: AssemblyReport,
    /// Input index of the candidate behind each node, by `NodeId`.  `None`
    /// for the user node.
    pub sources: Vec<Option<usize>>,
}

impl StarGraph {
    /// The candidate that became node `id`.
    pub fn candidate<'c>(&self, candidates: &'c [Candidate], id: NodeId) -> Option<&'c Candidate> {
        let index = (*self.sources.get(id.index())?)?;
        candidates.get(index)
    }
}

/// Winner of a [`find_nearest`] query.
#[derive(Debug)]
pub struct Nearest {
    pub candidate: Candidate,
    pub result: PathResult,
    /// The graph the search ran on, for resolving `result.path`.
    pub graph: Graph,
}

// ── Assembly ──────────────────────────────────────────────────────────────────

/// Build the star graph for one request.
pub fn assemble(user: GeoPoint, candidates: &[Candidate], config: &AssemblyConfig) -> StarGraph {
    let mut graph = Graph::with_capacity(candidates.len() + 1);
    let mut report = AssemblyReport::default();
    let mut sources = Vec::with_capacity(candidates.len() + 1);

    let user_id = graph.add_node(&config.user_key, &config.user_name, user, Category::User);
    sources.push(None);

    for (index, candidate) in candidates.iter().enumerate() {
        let Some(pos) = candidate.position() else {
            warn!("skipping candidate {:?}: missing or non-numeric coordinates", candidate.id);
            report.invalid += 1;
            continue;
        };
        if graph.node_id(&candidate.id).is_some() {
            warn!("skipping candidate {:?}: duplicate id", candidate.id);
            report.duplicate += 1;
            continue;
        }

        let id = graph.add_node(&candidate.id, &candidate.name, pos, Category::PointOfInterest);
        sources.push(Some(index));
        let distance_km = user.distance_km(pos);

        // A NaN radius admits nobody.
        let within = |radius: f64| distance_km <= radius;
        if config.radius_km.is_some_and(|radius| !within(radius)) {
            report.out_of_range += 1;
            continue;
        }

        // Both handles were just issued by this graph and the haversine
        // weight of two finite points is finite, so this cannot fail.
        if graph.connect(user_id, id, Some(distance_km)).is_ok() {
            report.accepted += 1;
        }
    }

    info!(
        "assembled star graph: {} accepted, {} out of range, {} invalid, {} duplicate",
        report.accepted, report.out_of_range, report.invalid, report.duplicate
    );

    StarGraph { graph, user: user_id, report, sources }
}

/// Assemble a star graph and return the nearest reachable candidate.
///
/// `None` when no candidate is connected (empty input, all invalid, or all
/// outside the radius).
pub fn find_nearest(
    user: GeoPoint,
    candidates: &[Candidate],
    config: &AssemblyConfig,
    algorithm: Algorithm,
) -> Option<Nearest> {
    let star = assemble(user, candidates, config);

    let result = algorithm
        .finder()
        .nearest_of_category(&star.graph, star.user, Category::PointOfInterest)?;

    let candidate = star.candidate(candidates, result.destination)?.clone();
    Some(Nearest { candidate, result, graph: star.graph })
}

/// Try [`find_nearest`] with each radius in turn and return the first hit.
///
/// Mirrors a places lookup that widens its search circle when the first
/// attempt comes back empty.  An empty `radii_km` means a single attempt
/// without a radius.
pub fn find_nearest_expanding(
    user: GeoPoint,
    candidates: &[Candidate],
    radii_km: &[f64],
    algorithm: Algorithm,
) -> Option<Nearest> {
    if radii_km.is_empty() {
        return find_nearest(user, candidates, &AssemblyConfig::default(), algorithm);
    }
    radii_km.iter().find_map(|&radius| {
        let config = AssemblyConfig::default().with_radius_km(radius);
        let found = find_nearest(user, candidates, &config, algorithm);
        if found.is_none() {
            info!("nothing within {radius} km, widening");
        }
        found
    })
}
