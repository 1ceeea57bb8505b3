use std::fmt::{Display, Formatter};
use std::str::FromStr;

use strum::{Display as StrumDisplay, EnumString};
use uuid::Uuid;

use crate::config::TileConfig;
use crate::location::{AreaLocation, Point};

/// Stable identifier for an [`Area`].
///
/// Ids are unique across boards, survive rotation and translation, and are
/// replaced whenever an area is split or merged.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct AreaId(Uuid);

impl AreaId {
    /// Allocate a new id, distinct from every id allocated before.
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for AreaId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AreaId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

/// The kind of terrain an [`Area`] represents.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, EnumString, StrumDisplay)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AreaType {
    /// An open street zone, usually a border slot shared with a neighbor tile.
    Street,
    /// A lit room interior.
    IndoorLight,
    /// A dark room interior.
    IndoorDark,
    /// Outdoor terrain that is neither street nor room.
    Outdoor,
    /// The result of collapsing mirrored street borders during assembly.
    StreetMerge,
}

impl AreaType {
    /// Whether this is one of the two room interiors. Only indoor areas may
    /// carry edge connections.
    pub fn is_indoor(&self) -> bool {
        matches!(self, Self::IndoorLight | Self::IndoorDark)
    }
}

/// An axis-aligned rectangle in a board's local coordinate space.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Area {
    /// This area's stable id.
    pub id: AreaId,
    /// Top-left corner of the rectangle.
    pub top_left: Point,
    /// Rectangle width in pixels.
    pub width: u32,
    /// Rectangle height in pixels.
    pub height: u32,
    /// Terrain kind.
    pub area_type: AreaType,
    /// Border slot this area occupies, or [`AreaLocation::Other`] for
    /// interior areas.
    pub area_location: AreaLocation,
}

impl Area {
    /// Construct an area with a fresh id.
    pub fn new(top_left: Point, width: u32, height: u32, area_type: AreaType, area_location: AreaLocation) -> Self {
        Self {
            id: AreaId::fresh(),
            top_left,
            width,
            height,
            area_type,
            area_location,
        }
    }

    /// Construct a lit interior area spanning `top_left` to `bottom_right`.
    pub fn indoor(top_left: Point, bottom_right: Point) -> Self {
        Self::new(
            top_left,
            (bottom_right.x - top_left.x).max(0) as u32,
            (bottom_right.y - top_left.y).max(0) as u32,
            AreaType::IndoorLight,
            AreaLocation::Other,
        )
    }

    /// Construct the street border area occupying `location`, with the slot
    /// geometry taken from `config`.
    ///
    /// Corners are `corner_size` squares; edge-middle slots span `middle_size`
    /// along the edge. Returns `None` for [`AreaLocation::Other`], which has
    /// no fixed geometry.
    pub fn border(location: AreaLocation, config: &TileConfig) -> Option<Self> {
        let corner = config.corner_size;
        let middle = config.middle_size;
        let far = (corner + middle) as i32;

        let (top_left, width, height) = match location {
            AreaLocation::TopLeftStreet => (Point::new(0, 0), corner, corner),
            AreaLocation::TopMiddleStreet => (Point::new(corner as i32, 0), middle, corner),
            AreaLocation::TopRightStreet => (Point::new(far, 0), corner, corner),
            AreaLocation::MiddleLeftStreet => (Point::new(0, corner as i32), corner, middle),
            AreaLocation::MiddleRightStreet => (Point::new(far, corner as i32), corner, middle),
            AreaLocation::BottomLeftStreet => (Point::new(0, far), corner, corner),
            AreaLocation::BottomMiddleStreet => (Point::new(corner as i32, far), middle, corner),
            AreaLocation::BottomRightStreet => (Point::new(far, far), corner, corner),
            AreaLocation::Other => return None,
        };

        Some(Self::new(top_left, width, height, AreaType::Street, location))
    }

    /// Bottom-right corner of the rectangle.
    pub fn bottom_right(&self) -> Point {
        Point::new(self.top_left.x + self.width as i32, self.top_left.y + self.height as i32)
    }

    /// Whether `point` lies strictly inside the rectangle. Points on the
    /// boundary are outside, so two areas sharing an edge do not contain each
    /// other's corners.
    pub fn contains_point(&self, point: Point) -> bool {
        let bottom_right = self.bottom_right();
        point.x > self.top_left.x && point.x < bottom_right.x && point.y > self.top_left.y && point.y < bottom_right.y
    }

    /// Whether this area overlaps `candidate`, judged by whether this
    /// rectangle contains the candidate's top-left or bottom-right corner.
    ///
    /// This corner check is a deliberately cheap approximation and misses
    /// configurations where neither of those corners falls inside the other
    /// rectangle, such as a large candidate fully containing this area.
    pub fn overlaps(&self, candidate: &Area) -> bool {
        self.contains_point(candidate.top_left) || self.contains_point(candidate.bottom_right())
    }

    /// Translate the rectangle by `(dx, dy)`.
    pub fn shift(&mut self, dx: i32, dy: i32) {
        self.top_left.x += dx;
        self.top_left.y += dy;
    }
}
