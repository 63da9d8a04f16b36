//! `nr-core` — foundational types for the nearest-route workspace.
//!
//! This crate is a dependency of every other `nr-*` crate.  It has no `nr-*`
//! dependencies and a single required external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `NodeId`                                              |
//! | [`geo`]      | `GeoPoint`, `EARTH_RADIUS_KM`, haversine distance     |
//! | [`category`] | `Category` enum                                       |
//! | [`error`]    | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod category;
pub mod error;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use category::Category;
pub use error::{CoreError, CoreResult};
pub use geo::{EARTH_RADIUS_KM, GeoPoint, haversine_km};
pub use ids::NodeId;
