//! Location graph representation.
//!
//! # Data layout
//!
//! Nodes live in an arena (`Vec<Location>`) indexed by [`NodeId`]; the handle
//! of a node is its insertion position.  Outgoing edges of node `n` are the
//! list `adjacency[n]`.  Callers address nodes by their own string keys; a
//! hash index maps each key to its handle.
//!
//! Edges are undirected: inserting `a — b` stores `a → b` on `a`'s list and
//! `b → a` on `b`'s list with the same weight.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `NodeId`, for
//! snapping an arbitrary coordinate onto the graph.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use nr_core::{Category, GeoPoint, NodeId};

use crate::{GraphError, GraphResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone, PartialEq)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Good enough to rank
    /// nodes within a city; exact distances come from `GeoPoint::distance_km`.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── Location / Edge ───────────────────────────────────────────────────────────

/// A labelled point: one vertex of the graph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Caller-assigned key, unique within a graph.
    pub key: String,
    /// Display label.
    pub name: String,
    pub pos: GeoPoint,
    pub category: Category,
}

/// One directed half of an undirected edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub to: NodeId,
    /// Travel cost in kilometres.  Never negative.
    pub weight_km: f64,
}

/// Handle for the node appended after `len` existing ones.  `None` once the
/// `u32` space is used up; `NodeId::INVALID` is never issued.
pub(crate) fn next_handle(len: usize) -> Option<NodeId> {
    NodeId::try_from(len).ok().filter(|id| id.is_valid())
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Weighted undirected graph of [`Location`]s.
///
/// Built per query and thrown away afterwards; there is no removal API.
#[derive(Default)]
pub struct Graph {
    nodes:     Vec<Location>,
    adjacency: Vec<Vec<Edge>>,
    by_key:    FxHashMap<String, NodeId>,
    edge_count: usize,
    spatial_idx: RTree<NodeEntry>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for the expected number of nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            adjacency: Vec::with_capacity(nodes),
            by_key:    FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
            ..Self::default()
        }
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Insert a node, or overwrite the node already stored under `key`.
    ///
    /// Overwriting keeps the handle and every edge already attached to it;
    /// stored edge weights are not recomputed from the new position.
    ///
    /// # Panics
    ///
    /// If the graph already holds `u32::MAX` nodes.
    pub fn add_node(
        &mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        pos: GeoPoint,
        category: Category,
    ) -> NodeId {
        let key = key.into();
        let location = Location { key, name: name.into(), pos, category };

        if let Some(&id) = self.by_key.get(&location.key) {
            let old = self.nodes[id.index()].pos;
            if old != pos {
                self.unindex(id, old);
                self.index(id, pos);
            }
            self.nodes[id.index()] = location;
            return id;
        }

        let Some(id) = next_handle(self.nodes.len()) else {
            panic!("graph is full: {} nodes", self.nodes.len());
        };
        self.by_key.insert(location.key.clone(), id);
        self.nodes.push(location);
        self.adjacency.push(Vec::new());
        self.index(id, pos);
        id
    }

    // Non-finite positions stay out of the R-tree.
    fn index(&mut self, id: NodeId, pos: GeoPoint) {
        if pos.is_finite() {
            self.spatial_idx.insert(NodeEntry { point: [pos.lat, pos.lon], id });
        }
    }

    fn unindex(&mut self, id: NodeId, pos: GeoPoint) {
        if pos.is_finite() {
            self.spatial_idx.remove(&NodeEntry { point: [pos.lat, pos.lon], id });
        }
    }

    /// Connect the nodes stored under keys `a` and `b`.
    ///
    /// With `weight == None` the haversine distance between the two positions
    /// is used.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownNode`] if either key is absent (nothing is
    /// inserted), [`GraphError::InvalidWeight`] for a negative or non-finite
    /// weight.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: Option<f64>) -> GraphResult<()> {
        let from = self.require(a)?;
        let to = self.require(b)?;
        self.connect(from, to, weight)
    }

    /// Like [`add_edge`](Self::add_edge) but addressed by handle.
    pub fn connect(&mut self, a: NodeId, b: NodeId, weight: Option<f64>) -> GraphResult<()> {
        let (Some(from), Some(to)) = (self.location(a), self.location(b)) else {
            let missing = if self.location(a).is_none() { a } else { b };
            return Err(GraphError::UnknownNode(missing.to_string()));
        };

        let weight_km = weight.unwrap_or_else(|| from.pos.distance_km(to.pos));
        if !weight_km.is_finite() || weight_km < 0.0 {
            return Err(GraphError::InvalidWeight {
                from: from.key.clone(),
                to: to.key.clone(),
                weight: weight_km,
            });
        }

        self.adjacency[a.index()].push(Edge { to: b, weight_km });
        self.adjacency[b.index()].push(Edge { to: a, weight_km });
        self.edge_count += 2;
        Ok(())
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.by_key.get(key).copied()
    }

    pub fn node(&self, key: &str) -> Option<&Location> {
        self.node_id(key).map(|id| &self.nodes[id.index()])
    }

    pub fn location(&self, id: NodeId) -> Option<&Location> {
        self.nodes.get(id.index())
    }

    /// Handle for `key`, or [`GraphError::UnknownNode`].
    pub fn require(&self, key: &str) -> GraphResult<NodeId> {
        self.node_id(key)
            .ok_or_else(|| GraphError::UnknownNode(key.to_owned()))
    }

    /// All nodes in insertion (= `NodeId`) order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &Location> + '_ {
        self.nodes.iter()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edge entries (twice the number of `add_edge` calls).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Outgoing edges of `node`, in insertion order.  Empty for an unknown handle.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> &[Edge] {
        self.adjacency.get(node.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `(neighbour key, weight)` pairs for the node stored under `key`.
    /// Empty for an unknown key.
    pub fn neighbors(&self, key: &str) -> Vec<(&str, f64)> {
        let Some(id) = self.node_id(key) else {
            return Vec::new();
        };
        self.out_edges(id)
            .iter()
            .map(|e| (self.nodes[e.to.index()].key.as_str(), e.weight_km))
            .collect()
    }

    /// Weight of the lightest `a → b` entry, if the two are adjacent.
    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.out_edges(a)
            .iter()
            .filter(|e| e.to == b)
            .map(|e| e.weight_km)
            .min_by(f64::total_cmp)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The node closest to `pos`.  `None` for a graph without any node at a
    /// finite position.
    pub fn nearest_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }

    /// Up to `k` nodes closest to `pos`, nearest first.
    pub fn k_nearest_nodes(&self, pos: GeoPoint, k: usize) -> Vec<NodeId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .take(k)
            .map(|e| e.id)
            .collect()
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Graph with {} nodes, {} edges", self.node_count(), self.edge_count)
    }
}
