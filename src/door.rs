use strum::{Display, EnumString, VariantArray};

use crate::location::{AreaLocation, Direction};

/// Wall-relative slot of a potential exit from an indoor area toward the tile
/// border.
///
/// Each wall carries three slots. The left/right (or top/bottom) sub-position
/// is observer-relative per wall: `NorthLeft` and `SouthLeft` sit on the same
/// vertical line, so they face each other across two stacked tiles.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, VariantArray, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum DoorDirection {
    NorthLeft,
    NorthCenter,
    NorthRight,
    SouthLeft,
    SouthCenter,
    SouthRight,
    EastTop,
    EastCenter,
    EastBottom,
    WestTop,
    WestCenter,
    WestBottom,
}

impl DoorDirection {
    /// Advance this slot by a 90° clockwise rotation of its tile.
    ///
    /// Each slot moves one wall clockwise, keeping its sub-position, so the
    /// twelve slots split into three 4-cycles and four rotations restore the
    /// original slot.
    pub fn rotate(&self) -> Self {
        match self {
            Self::NorthLeft => Self::EastTop,
            Self::NorthCenter => Self::EastCenter,
            Self::NorthRight => Self::EastBottom,
            Self::EastTop => Self::SouthRight,
            Self::EastCenter => Self::SouthCenter,
            Self::EastBottom => Self::SouthLeft,
            Self::SouthRight => Self::WestBottom,
            Self::SouthCenter => Self::WestCenter,
            Self::SouthLeft => Self::WestTop,
            Self::WestBottom => Self::NorthLeft,
            Self::WestCenter => Self::NorthCenter,
            Self::WestTop => Self::NorthRight,
        }
    }

    /// The slot directly across the tile boundary: the wall flips to the
    /// facing wall and the sub-position is kept, since sub-positions are
    /// observer-relative per wall.
    pub fn opposite(&self) -> Self {
        match self {
            Self::NorthLeft => Self::SouthLeft,
            Self::NorthCenter => Self::SouthCenter,
            Self::NorthRight => Self::SouthRight,
            Self::SouthLeft => Self::NorthLeft,
            Self::SouthCenter => Self::NorthCenter,
            Self::SouthRight => Self::NorthRight,
            Self::EastTop => Self::WestTop,
            Self::EastCenter => Self::WestCenter,
            Self::EastBottom => Self::WestBottom,
            Self::WestTop => Self::EastTop,
            Self::WestCenter => Self::EastCenter,
            Self::WestBottom => Self::EastBottom,
        }
    }

    /// The street slot this door would connect to on a tile placed against
    /// its wall.
    ///
    /// A north door meets the neighbor's bottom edge and a south door its top
    /// edge, sub-position for sub-position. East and west doors all resolve to
    /// the neighbor's single middle slot on the facing edge.
    pub fn to_street_location(&self) -> AreaLocation {
        match self {
            Self::NorthLeft => AreaLocation::BottomLeftStreet,
            Self::NorthCenter => AreaLocation::BottomMiddleStreet,
            Self::NorthRight => AreaLocation::BottomRightStreet,
            Self::SouthLeft => AreaLocation::TopLeftStreet,
            Self::SouthCenter => AreaLocation::TopMiddleStreet,
            Self::SouthRight => AreaLocation::TopRightStreet,
            Self::EastTop | Self::EastCenter | Self::EastBottom => AreaLocation::MiddleLeftStreet,
            Self::WestTop | Self::WestCenter | Self::WestBottom => AreaLocation::MiddleRightStreet,
        }
    }

    /// The cardinal direction of the wall this slot sits on.
    pub fn toward(&self) -> Direction {
        match self {
            Self::NorthLeft | Self::NorthCenter | Self::NorthRight => Direction::North,
            Self::SouthLeft | Self::SouthCenter | Self::SouthRight => Direction::South,
            Self::EastTop | Self::EastCenter | Self::EastBottom => Direction::East,
            Self::WestTop | Self::WestCenter | Self::WestBottom => Direction::West,
        }
    }
}
