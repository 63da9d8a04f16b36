//! Node category tag.
//!
//! Search engines stop on the first settled node whose category matches the
//! requested one, so this is the "what are we looking for" half of every query.

use std::str::FromStr;

use crate::CoreError;

/// What a graph node represents.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Category {
    /// Plain waypoint with no special meaning.
    #[default]
    GenericNode,
    /// A searchable destination (a restaurant, a shop…).
    PointOfInterest,
    /// The search origin.
    User,
    /// A road junction.
    Intersection,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::GenericNode,
        Category::PointOfInterest,
        Category::User,
        Category::Intersection,
    ];

    /// Kebab-case tag, as used in input files and JSON payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::GenericNode     => "generic-node",
            Category::PointOfInterest => "point-of-interest",
            Category::User            => "user",
            Category::Intersection    => "intersection",
        }
    }
}

impl FromStr for Category {
    type Err = CoreError;

    /// Accepts the kebab-case tags plus the legacy `node` and `mcdonalds`
    /// spellings.  Matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic-node" | "node"           => Ok(Category::GenericNode),
            "point-of-interest" | "mcdonalds" => Ok(Category::PointOfInterest),
            "user"                            => Ok(Category::User),
            "intersection"                    => Ok(Category::Intersection),
            _ => Err(CoreError::UnknownCategory(s.to_owned())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
