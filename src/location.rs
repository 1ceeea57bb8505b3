use strum::{Display, EnumString, VariantArray};

/// A point in a board's pixel coordinate space.
///
/// Board geometry lives in the same coordinate space as the backing image, so
/// coordinates are pixels with the origin at the board's top-left corner.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Point {
    /// Horizontal coordinate, growing rightward.
    pub x: i32,
    /// Vertical coordinate, growing downward.
    pub y: i32,
}

impl Point {
    /// Construct a point from its coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Compass direction from one grid cell to a neighboring cell.
///
/// Used to address the neighbor a street border slot must mirror against, and
/// the target cell of an edge connection during assembly.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, VariantArray)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// The grid cell reached by stepping one cell in this direction from
    /// `(col, row)`.
    ///
    /// The result may be out of range on any side; callers decide whether an
    /// out-of-range neighbor is an error or simply an open edge.
    pub fn offset_from(&self, col: i32, row: i32) -> (i32, i32) {
        match self {
            Self::North => (col, row - 1),
            Self::South => (col, row + 1),
            Self::East => (col + 1, row),
            Self::West => (col - 1, row),
            Self::NorthEast => (col + 1, row - 1),
            Self::NorthWest => (col - 1, row - 1),
            Self::SouthEast => (col + 1, row + 1),
            Self::SouthWest => (col - 1, row + 1),
        }
    }
}

/// The fixed perimeter slot a border area occupies on a tile, or [`Other`](AreaLocation::Other)
/// for interior areas.
///
/// A tile's perimeter carries up to eight street slots: one per corner and one
/// in the middle of each edge. Two adjacent tiles align when the slots facing
/// each other are both occupied (see [`AreaLocation::mirrors`]).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, VariantArray, EnumString, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AreaLocation {
    TopLeftStreet,
    TopMiddleStreet,
    TopRightStreet,
    MiddleLeftStreet,
    MiddleRightStreet,
    BottomLeftStreet,
    BottomMiddleStreet,
    BottomRightStreet,
    Other,
}

impl AreaLocation {
    /// All eight border slots, excluding [`Other`](Self::Other).
    pub fn street_locations() -> impl Iterator<Item = Self> {
        Self::VARIANTS.iter().copied().filter(Self::is_street)
    }

    /// Whether this is one of the eight border slots.
    pub fn is_street(&self) -> bool {
        !matches!(self, Self::Other)
    }

    /// Advance this slot by a 90° clockwise rotation of its tile.
    ///
    /// The corner slots and the edge-middle slots each form a 4-cycle;
    /// [`Other`](Self::Other) is a fixed point.
    pub fn rotate(&self) -> Self {
        match self {
            Self::TopLeftStreet => Self::TopRightStreet,
            Self::TopMiddleStreet => Self::MiddleRightStreet,
            Self::TopRightStreet => Self::BottomRightStreet,
            Self::MiddleLeftStreet => Self::TopMiddleStreet,
            Self::MiddleRightStreet => Self::BottomMiddleStreet,
            Self::BottomLeftStreet => Self::TopLeftStreet,
            Self::BottomMiddleStreet => Self::MiddleLeftStreet,
            Self::BottomRightStreet => Self::BottomLeftStreet,
            Self::Other => Self::Other,
        }
    }

    /// The neighbors a street area at this slot must mirror against: for each
    /// entry, the grid cell in `Direction` must either be empty (an open edge)
    /// or hold a board with a street area at the paired slot.
    ///
    /// Corner slots meet up to three neighbors (two edges plus the diagonal);
    /// edge-middle slots meet exactly one. Interior areas mirror nothing.
    pub fn mirrors(&self) -> &'static [(Direction, AreaLocation)] {
        match self {
            Self::TopLeftStreet => &[
                (Direction::North, Self::BottomLeftStreet),
                (Direction::West, Self::TopRightStreet),
                (Direction::NorthWest, Self::BottomRightStreet),
            ],
            Self::TopRightStreet => &[
                (Direction::North, Self::BottomRightStreet),
                (Direction::East, Self::TopLeftStreet),
                (Direction::NorthEast, Self::BottomLeftStreet),
            ],
            Self::BottomLeftStreet => &[
                (Direction::South, Self::TopLeftStreet),
                (Direction::West, Self::BottomRightStreet),
                (Direction::SouthWest, Self::TopRightStreet),
            ],
            Self::BottomRightStreet => &[
                (Direction::South, Self::TopRightStreet),
                (Direction::East, Self::BottomLeftStreet),
                (Direction::SouthEast, Self::TopLeftStreet),
            ],
            Self::MiddleLeftStreet => &[(Direction::West, Self::MiddleRightStreet)],
            Self::MiddleRightStreet => &[(Direction::East, Self::MiddleLeftStreet)],
            Self::TopMiddleStreet => &[(Direction::North, Self::BottomMiddleStreet)],
            Self::BottomMiddleStreet => &[(Direction::South, Self::TopMiddleStreet)],
            Self::Other => &[],
        }
    }
}
