use std::collections::HashMap;

use unordered_pair::UnorderedPair;

use crate::area::AreaId;
use crate::door::DoorDirection;

/// An edge in a board's area adjacency graph.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AreaConnection {
    /// Two areas joined directly. Undirected semantically, though the two
    /// endpoints are stored in the order they were declared.
    Normal {
        /// First endpoint.
        area_a: AreaId,
        /// Second endpoint.
        area_b: AreaId,
    },
    /// A potential exit from an indoor area toward the tile border, not yet
    /// connected to anything. Resolved against the neighboring tile during
    /// assembly.
    Edge {
        /// The indoor area the door leaves from.
        area_a: AreaId,
        /// Which wall slot the door sits on.
        direction: DoorDirection,
    },
}

impl AreaConnection {
    /// A normal connection between `area_a` and `area_b`.
    pub fn between(area_a: AreaId, area_b: AreaId) -> Self {
        Self::Normal { area_a, area_b }
    }

    /// An edge connection from `area_a` toward the wall slot `direction`.
    pub fn edge(area_a: AreaId, direction: DoorDirection) -> Self {
        Self::Edge { area_a, direction }
    }

    /// The first endpoint, present for both variants.
    pub fn area_a(&self) -> AreaId {
        match self {
            Self::Normal { area_a, .. } | Self::Edge { area_a, .. } => *area_a,
        }
    }

    /// Whether this is an unresolved exit toward the tile border.
    pub fn is_edge(&self) -> bool {
        matches!(self, Self::Edge { .. })
    }

    /// Both endpoints as an unordered pair, or `None` for an edge connection.
    pub fn endpoints(&self) -> Option<UnorderedPair<AreaId>> {
        match self {
            Self::Normal { area_a, area_b } => Some(UnorderedPair(*area_a, *area_b)),
            Self::Edge { .. } => None,
        }
    }

    /// Whether either endpoint references `id`.
    pub fn references(&self, id: AreaId) -> bool {
        match self {
            Self::Normal { area_a, area_b } => *area_a == id || *area_b == id,
            Self::Edge { area_a, .. } => *area_a == id,
        }
    }

    /// Rewrite any endpoint found in `map` to its replacement id, leaving
    /// other endpoints untouched.
    pub(crate) fn remap(&self, map: &HashMap<AreaId, AreaId>) -> Self {
        let swap = |id: &AreaId| map.get(id).copied().unwrap_or(*id);
        match self {
            Self::Normal { area_a, area_b } => Self::Normal {
                area_a: swap(area_a),
                area_b: swap(area_b),
            },
            Self::Edge { area_a, direction } => Self::Edge {
                area_a: swap(area_a),
                direction: *direction,
            },
        }
    }
}
