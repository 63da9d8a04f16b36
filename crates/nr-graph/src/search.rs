//! Nearest-by-category search.
//!
//! # Pluggability
//!
//! Engines implement [`PathFinder`]: given a start handle and a target
//! predicate, return the path to the first node the engine *settles* that
//! satisfies the predicate.  "First settled" matters: Dijkstra settles nodes
//! in non-decreasing distance order, so the first match is the nearest one,
//! and nodes beyond it are never expanded.
//!
//! Two engines ship here:
//!
//! | Engine           | Settles nodes by          | Result                    |
//! |------------------|---------------------------|---------------------------|
//! | [`Dijkstra`]     | accumulated weight (km)   | lightest path             |
//! | [`BreadthFirst`] | hop count                 | fewest-edges path         |
//!
//! # Outcomes
//!
//! A search that finds nothing returns `None` (`Ok(None)` from the keyed
//! helpers).  Only an unknown start key is an error.
//!
//! # Tie-breaking
//!
//! Dijkstra's heap is keyed by `(distance, NodeId)`.  Handles follow
//! insertion order, so among equally distant candidates the one inserted
//! first wins, every run.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::str::FromStr;

use log::{debug, trace};

use nr_core::{Category, NodeId};

use crate::graph::{Graph, Location};
use crate::{GraphError, GraphResult};

// ── PathResult ────────────────────────────────────────────────────────────────

/// Counters describing how much work a search did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    pub algorithm: Algorithm,
    /// Nodes removed from the frontier and finalised.
    pub nodes_settled: usize,
}

/// A successful search: the matched node and how to get there.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    /// The matched terminal node.
    pub destination: NodeId,
    /// Sum of edge weights along `path`, in kilometres.
    pub total_distance_km: f64,
    /// Start to destination, both inclusive.
    pub path: Vec<NodeId>,
    pub stats: SearchStats,
}

impl PathResult {
    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// `true` if the start node itself matched.
    pub fn is_trivial(&self) -> bool {
        self.path.len() <= 1
    }

    /// Resolve the path handles against `graph`.
    pub fn locations<'g>(&self, graph: &'g Graph) -> Vec<&'g Location> {
        self.path.iter().filter_map(|&id| graph.location(id)).collect()
    }

    /// Walk the path again and add up consecutive edge weights.
    ///
    /// `None` if two consecutive path nodes are not adjacent in `graph`.
    pub fn replayed_distance_km(&self, graph: &Graph) -> Option<f64> {
        path_weight(graph, &self.path)
    }
}

fn path_weight(graph: &Graph, path: &[NodeId]) -> Option<f64> {
    path.windows(2)
        .try_fold(0.0, |acc, pair| Some(acc + graph.edge_weight(pair[0], pair[1])?))
}

// ── Algorithm ─────────────────────────────────────────────────────────────────

/// Selectable search engine, as named in requests and config files.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    #[default]
    Dijkstra,
    #[cfg_attr(feature = "serde", serde(alias = "bfs"))]
    BreadthFirst,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Dijkstra     => "dijkstra",
            Algorithm::BreadthFirst => "breadth-first",
        }
    }

    /// Run this engine from the node stored under `start` towards the nearest
    /// node of category `target`.
    pub fn search(
        self,
        graph: &Graph,
        start: &str,
        target: Category,
    ) -> GraphResult<Option<PathResult>> {
        let start = graph.require(start)?;
        Ok(self.finder().nearest_of_category(graph, start, target))
    }

    /// The engine implementing this algorithm.
    pub fn finder(self) -> &'static dyn PathFinder {
        match self {
            Algorithm::Dijkstra     => &Dijkstra,
            Algorithm::BreadthFirst => &BreadthFirst,
        }
    }
}

impl FromStr for Algorithm {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra"              => Ok(Algorithm::Dijkstra),
            "breadth-first" | "bfs" => Ok(Algorithm::BreadthFirst),
            _ => Err(GraphError::UnknownAlgorithm(s.to_owned())),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Target test applied to each node as it is settled.
pub type TargetFn<'a> = dyn Fn(NodeId, &Location) -> bool + 'a;

/// Pluggable search engine.
pub trait PathFinder {
    fn algorithm(&self) -> Algorithm;

    /// Search from `start` until a settled node satisfies `is_target`.
    ///
    /// Returns `None` when no reachable node matches, or when `start` is not
    /// a handle of `graph`.
    fn search(&self, graph: &Graph, start: NodeId, is_target: &TargetFn<'_>) -> Option<PathResult>;

    /// Nearest node whose category is `target`.
    fn nearest_of_category(&self, graph: &Graph, start: NodeId, target: Category) -> Option<PathResult> {
        self.search(graph, start, &|_, loc| loc.category == target)
    }
}

// ── Keyed entry points ────────────────────────────────────────────────────────

/// Lightest path from the node stored under `start` to the nearest node of
/// category `target`.
///
/// # Errors
///
/// [`GraphError::UnknownNode`] if `start` is not in the graph.
pub fn shortest_path_to_category(
    graph: &Graph,
    start: &str,
    target: Category,
) -> GraphResult<Option<PathResult>> {
    Algorithm::Dijkstra.search(graph, start, target)
}

/// Fewest-hops path from `start` to the nearest node of category `target`.
pub fn fewest_hops_to_category(
    graph: &Graph,
    start: &str,
    target: Category,
) -> GraphResult<Option<PathResult>> {
    Algorithm::BreadthFirst.search(graph, start, target)
}

/// Lightest path between two keyed nodes.
///
/// # Errors
///
/// [`GraphError::UnknownNode`] if either key is not in the graph.
pub fn shortest_path(graph: &Graph, from: &str, to: &str) -> GraphResult<Option<PathResult>> {
    let from = graph.require(from)?;
    let to = graph.require(to)?;
    Ok(Dijkstra.search(graph, from, &|id, _| id == to))
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

/// Label-setting shortest path over non-negative kilometre weights.
pub struct Dijkstra;

/// Heap entry.  Ordered so that `BinaryHeap` (a max-heap) pops the smallest
/// distance first, then the smallest handle.
#[derive(Copy, Clone, PartialEq)]
struct State {
    dist: f64,
    node: NodeId,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PathFinder for Dijkstra {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn search(&self, graph: &Graph, start: NodeId, is_target: &TargetFn<'_>) -> Option<PathResult> {
        graph.location(start)?;

        let n = graph.node_count();
        let mut dist    = vec![f64::INFINITY; n];
        let mut prev    = vec![NodeId::INVALID; n];
        let mut settled = vec![false; n];
        let mut nodes_settled = 0;

        dist[start.index()] = 0.0;
        let mut heap = BinaryHeap::new();
        heap.push(State { dist: 0.0, node: start });

        while let Some(State { dist: cost, node }) = heap.pop() {
            // Stale entry: a shorter label was pushed after this one.
            if settled[node.index()] || cost > dist[node.index()] {
                continue;
            }
            settled[node.index()] = true;
            nodes_settled += 1;

            let Some(loc) = graph.location(node) else { continue };
            trace!("settled {} ({}) at {cost:.4} km", loc.key, loc.category);

            if is_target(node, loc) {
                let stats = SearchStats { algorithm: Algorithm::Dijkstra, nodes_settled };
                debug!("dijkstra reached {} at {cost:.4} km after {nodes_settled} settled", loc.key);
                return Some(PathResult {
                    destination: node,
                    total_distance_km: cost,
                    path: reconstruct(&prev, node),
                    stats,
                });
            }

            for edge in graph.out_edges(node) {
                let next = edge.to.index();
                if settled[next] {
                    continue;
                }
                let candidate = cost + edge.weight_km;
                if candidate < dist[next] {
                    dist[next] = candidate;
                    prev[next] = node;
                    heap.push(State { dist: candidate, node: edge.to });
                }
            }
        }

        debug!("dijkstra exhausted after {nodes_settled} settled; no match");
        None
    }
}

// ── BreadthFirst ──────────────────────────────────────────────────────────────

/// Hop-count search: ignores weights while exploring, then reports the
/// summed weight of the path it found.
pub struct BreadthFirst;

impl PathFinder for BreadthFirst {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BreadthFirst
    }

    fn search(&self, graph: &Graph, start: NodeId, is_target: &TargetFn<'_>) -> Option<PathResult> {
        graph.location(start)?;

        let n = graph.node_count();
        let mut prev    = vec![NodeId::INVALID; n];
        let mut visited = vec![false; n];
        let mut nodes_settled = 0;

        visited[start.index()] = true;
        let mut queue = VecDeque::from([start]);

        while let Some(node) = queue.pop_front() {
            nodes_settled += 1;
            let Some(loc) = graph.location(node) else { continue };
            trace!("dequeued {} ({})", loc.key, loc.category);

            if is_target(node, loc) {
                let path = reconstruct(&prev, node);
                let total_distance_km = path_weight(graph, &path)?;
                debug!("breadth-first reached {} in {} hops", loc.key, path.len() - 1);
                return Some(PathResult {
                    destination: node,
                    total_distance_km,
                    path,
                    stats: SearchStats { algorithm: Algorithm::BreadthFirst, nodes_settled },
                });
            }

            for edge in graph.out_edges(node) {
                if !visited[edge.to.index()] {
                    visited[edge.to.index()] = true;
                    prev[edge.to.index()] = node;
                    queue.push_back(edge.to);
                }
            }
        }

        debug!("breadth-first exhausted after {nodes_settled} nodes; no match");
        None
    }
}

// ── Path reconstruction ───────────────────────────────────────────────────────

fn reconstruct(prev: &[NodeId], to: NodeId) -> Vec<NodeId> {
    let mut path = vec![to];
    let mut cur = to;
    while prev[cur.index()].is_valid() {
        cur = prev[cur.index()];
        path.push(cur);
    }
    path.reverse();
    path
}
