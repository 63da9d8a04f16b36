//! `nr-graph` — location graph, nearest-category search, and graph assembly.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`graph`]    | `Graph` (arena + adjacency lists + R-tree), `Location`, `Edge` |
//! | [`search`]   | `PathFinder` trait, `Dijkstra`, `BreadthFirst`, `PathResult`  |
//! | [`assembly`] | `assemble` (star topology), `find_nearest`, `Candidate`       |
//! | [`error`]    | `GraphError`, `GraphResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |
//!
//! # Example
//!
//! ```
//! use nr_core::{Category, GeoPoint};
//! use nr_graph::{Graph, shortest_path_to_category};
//!
//! let mut g = Graph::new();
//! g.add_node("me", "You", GeoPoint::new(-2.5297, -44.3028), Category::User);
//! g.add_node("poi", "Burger place", GeoPoint::new(-2.5250, -44.3000), Category::PointOfInterest);
//! g.add_edge("me", "poi", None).unwrap();
//!
//! let found = shortest_path_to_category(&g, "me", Category::PointOfInterest)
//!     .unwrap()
//!     .expect("reachable");
//! assert_eq!(found.path.len(), 2);
//! ```

pub mod assembly;
pub mod error;
pub mod graph;
pub mod search;


pub use assembly::{
    AssemblyConfig, AssemblyReport, Candidate, Nearest, StarGraph, assemble, find_nearest,
    find_nearest_expanding,
};
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, Graph, Location};
pub use search::{
    Algorithm, BreadthFirst, Dijkstra, PathFinder, PathResult, SearchStats,
    fewest_hops_to_category, shortest_path, shortest_path_to_category,
};
