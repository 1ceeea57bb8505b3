use image::imageops;
use image::RgbaImage;
use itertools::Itertools;
use log::{debug, info};
use unordered_pair::UnorderedPair;

use crate::area::{Area, AreaId};
use crate::config::TileConfig;
use crate::connection::AreaConnection;
use crate::door::DoorDirection;
use crate::error::BoardError;
use crate::location::{AreaLocation, Point};

/// One tile, or the composed mission: a rectangular image region subdivided
/// into [`Area`]s joined by [`AreaConnection`]s.
///
/// A board is exclusively owned by whichever grid cell or collection holds
/// it; rotation and area mutation always happen in place on the owner's
/// reference.
#[derive(Clone)]
pub struct Board {
    board_id: String,
    width: u32,
    height: u32,
    image: Option<RgbaImage>,
    areas: Vec<Area>,
    connections: Vec<AreaConnection>,
    rotation: u8,
}

impl Board {
    /// Construct a board with no areas or connections.
    pub fn new(board_id: impl Into<String>, image: Option<RgbaImage>, width: u32, height: u32) -> Self {
        Self {
            board_id: board_id.into(),
            width,
            height,
            image,
            areas: Vec::new(),
            connections: Vec::new(),
            rotation: 0,
        }
    }

    /// Construct a square tile board, the usual shape of a loaded tile scan.
    pub fn square(board_id: impl Into<String>, image: Option<RgbaImage>, size: u32) -> Self {
        Self::new(board_id, image, size, size)
    }

    /// This board's stable id; for tiles, the tile name.
    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    /// Board width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Board height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The backing raster, if one was loaded.
    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    /// Quarter turns applied to this board since construction, modulo 4.
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// All areas, in placement order.
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    /// All connections, in placement order.
    pub fn connections(&self) -> &[AreaConnection] {
        &self.connections
    }

    /// Append an area. Overlap against existing areas is not checked here;
    /// callers that need the no-overlap invariant ask [`Self::is_overlap`]
    /// first.
    pub fn add_area(&mut self, area: Area) {
        self.areas.push(area);
    }

    /// Remove the area with the given id, if present. Connections referencing
    /// it are left dangling for the caller to repair.
    pub fn remove_area(&mut self, id: AreaId) {
        self.areas.retain(|area| area.id != id);
    }

    /// Look up an area by id.
    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.areas.iter().find(|area| area.id == id)
    }

    /// The area occupying the given border slot, if any.
    pub fn area_at_location(&self, location: AreaLocation) -> Option<&Area> {
        self.areas.iter().find(|area| area.area_location == location)
    }

    /// Whether any area occupies the given border slot.
    pub fn has_area_location(&self, location: AreaLocation) -> bool {
        self.area_at_location(location).is_some()
    }

    /// The first area, in placement order, strictly containing `point`.
    pub fn area_at_point(&self, point: Point) -> Option<&Area> {
        self.areas.iter().find(|area| area.contains_point(point))
    }

    /// Whether `candidate` collides with an existing area, judged by the
    /// corner-containment check of [`Area::overlaps`]. The check is a known
    /// approximation and can miss overlaps where neither tested corner falls
    /// inside an existing area.
    pub fn is_overlap(&self, candidate: &Area) -> bool {
        self.overlap_with(candidate).is_some()
    }

    /// The first existing area, in placement order, that `candidate` collides
    /// with.
    pub fn overlap_with(&self, candidate: &Area) -> Option<&Area> {
        self.areas.iter().find(|area| area.overlaps(candidate))
    }

    /// Append a connection.
    ///
    /// An edge connection must leave from an indoor area: the referenced area
    /// must exist ([`BoardError::UnknownArea`]) and be indoor
    /// ([`BoardError::InvalidAreaType`]). The board is unchanged on error.
    pub fn add_connection(&mut self, connection: AreaConnection) -> Result<(), BoardError> {
        if connection.is_edge() {
            let area = self
                .area(connection.area_a())
                .ok_or(BoardError::UnknownArea(connection.area_a()))?;
            if !area.area_type.is_indoor() {
                return Err(BoardError::InvalidAreaType);
            }
        }
        self.connections.push(connection);
        Ok(())
    }

    /// Append a connection whose endpoints were validated by the caller.
    pub(crate) fn push_connection(&mut self, connection: AreaConnection) {
        self.connections.push(connection);
    }

    /// Remove every normal connection joining `area_a` and `area_b`, in
    /// either endpoint order.
    pub fn remove_connection(&mut self, area_a: AreaId, area_b: AreaId) {
        let target = UnorderedPair(area_a, area_b);
        self.connections.retain(|connection| connection.endpoints() != Some(target));
    }

    /// Remove every edge connection leaving `area_a` through the wall slot
    /// `direction`.
    pub fn remove_edge_connection(&mut self, area_a: AreaId, direction: DoorDirection) {
        self.connections
            .retain(|connection| *connection != AreaConnection::edge(area_a, direction));
    }

    /// Install the street border area at `location`, replacing any area
    /// already occupying that slot.
    ///
    /// Placing a street border redefines the tile's interior layout, so every
    /// interior indoor area and its connections are deleted as a side effect.
    /// No-op for [`AreaLocation::Other`].
    pub fn add_area_location(&mut self, location: AreaLocation, config: &TileConfig) {
        let Some(border) = Area::border(location, config) else {
            return;
        };

        // one area per slot
        if let Some(existing) = self.area_at_location(location) {
            let id = existing.id;
            self.remove_area(id);
        }

        let stale = self
            .areas
            .iter()
            .filter(|area| area.area_location == AreaLocation::Other && area.area_type.is_indoor())
            .map(|area| area.id)
            .collect_vec();
        for id in &stale {
            self.connections.retain(|connection| !connection.references(*id));
            self.remove_area(*id);
        }

        info!(
            "installed street area {} at {location} on board {}, dropping {} interior areas",
            border.id,
            self.board_id,
            stale.len()
        );
        self.add_area(border);
    }

    /// Split the interior area `id` at the horizontal line `y`, replacing it
    /// with a top and a bottom area under fresh ids.
    ///
    /// Connections referencing the removed id become dangling and are the
    /// caller's responsibility to repair. Returns the (top, bottom) ids.
    pub fn split_area_horizontal(&mut self, id: AreaId, y: i32) -> Result<(AreaId, AreaId), BoardError> {
        let area = self.area(id).ok_or(BoardError::UnknownArea(id))?;
        if area.area_location != AreaLocation::Other {
            return Err(BoardError::NotInterior(id));
        }
        let (top_left, bottom_right) = (area.top_left, area.bottom_right());

        let top = Area::indoor(top_left, Point::new(bottom_right.x, y));
        let bottom = Area::indoor(Point::new(top_left.x, y), bottom_right);
        let ids = (top.id, bottom.id);

        self.remove_area(id);
        self.add_area(top);
        self.add_area(bottom);
        info!("split area {id} horizontally into {} (top) and {} (bottom)", ids.0, ids.1);
        Ok(ids)
    }

    /// Split the interior area `id` at the vertical line `x`, replacing it
    /// with a left and a right area under fresh ids. Same contract as
    /// [`Self::split_area_horizontal`]; returns the (left, right) ids.
    pub fn split_area_vertical(&mut self, id: AreaId, x: i32) -> Result<(AreaId, AreaId), BoardError> {
        let area = self.area(id).ok_or(BoardError::UnknownArea(id))?;
        if area.area_location != AreaLocation::Other {
            return Err(BoardError::NotInterior(id));
        }
        let (top_left, bottom_right) = (area.top_left, area.bottom_right());

        let left = Area::indoor(top_left, Point::new(x, bottom_right.y));
        let right = Area::indoor(Point::new(x, top_left.y), bottom_right);
        let ids = (left.id, right.id);

        self.remove_area(id);
        self.add_area(left);
        self.add_area(right);
        info!("split area {id} vertically into {} (left) and {} (right)", ids.0, ids.1);
        Ok(ids)
    }

    /// Translate every area by `(dx, dy)`.
    pub fn shift_areas(&mut self, dx: i32, dy: i32) {
        for area in &mut self.areas {
            area.shift(dx, dy);
        }
    }

    /// Rotate the board 90° clockwise about its own center, in place: area
    /// rectangles, border slots, edge-connection wall slots, the board's own
    /// dimensions, and the backing image all advance together.
    ///
    /// There is no stored original orientation; four rotations restore the
    /// starting geometry exactly.
    pub fn rotate(&mut self) {
        let prior_height = self.height as i32;
        for area in &mut self.areas {
            let Point { x: old_x, y: old_y } = area.top_left;
            area.top_left = Point::new(prior_height - (old_y + area.height as i32), old_x);
            std::mem::swap(&mut area.width, &mut area.height);
            area.area_location = area.area_location.rotate();
        }

        for connection in &mut self.connections {
            if let AreaConnection::Edge { direction, .. } = connection {
                *direction = direction.rotate();
            }
        }

        std::mem::swap(&mut self.width, &mut self.height);
        if let Some(image) = self.image.take() {
            self.image = Some(imageops::rotate90(&image));
        }
        self.rotation = (self.rotation + 1) % 4;

        debug!(
            "rotated board {} to {} quarter turns, street slots now {:?}",
            self.board_id,
            self.rotation,
            self.areas
                .iter()
                .filter(|area| area.area_location.is_street())
                .map(|area| area.area_location)
                .collect_vec()
        );
    }

    /// Fill the space not yet claimed by any area with interior indoor areas.
    ///
    /// The nine region midpoints of the tile are scanned top-left to
    /// bottom-right; for each point not already inside an area, a maximal
    /// rectangle is grown between the surrounding areas and tile edges. A
    /// candidate that still collides with an existing area is clipped against
    /// the first collision rather than rejected.
    pub fn fill_available_areas(&mut self, config: &TileConfig) {
        for point in config.exploring_points() {
            if self.area_at_point(point).is_some() {
                continue;
            }

            let mut candidate = self.maximize_area(point, config.probe_step as i32);
            if let Some(collision_x) = self.overlap_with(&candidate).map(|area| area.top_left.x) {
                // clip to stop at the collision's left edge; the scan order
                // puts the collision to the candidate's right
                let bottom_right = Point::new(collision_x, candidate.bottom_right().y);
                candidate = Area::indoor(candidate.top_left, bottom_right);
            }
            debug!(
                "filled available area {} at {:?} on board {}",
                candidate.id, candidate.top_left, self.board_id
            );
            self.add_area(candidate);
        }
    }

    /// Grow the largest rectangle around `origin` bounded by the nearest
    /// area in each cardinal direction, probing in `step`-sized increments.
    fn maximize_area(&self, origin: Point, step: i32) -> Area {
        let left = self
            .scan_from(origin, -1, 0, step, |p| p.x > step)
            .map(|area| area.bottom_right().x)
            .unwrap_or(0);
        let top = self
            .scan_from(origin, 0, -1, step, |p| p.y > step)
            .map(|area| area.bottom_right().y)
            .unwrap_or(0);
        let right = self
            .scan_from(origin, 1, 0, step, |p| p.x < self.width as i32 - step)
            .map(|area| area.top_left.x)
            .unwrap_or(self.width as i32);
        let bottom = self
            .scan_from(origin, 0, 1, step, |p| p.y < self.height as i32 - step)
            .map(|area| area.top_left.y)
            .unwrap_or(self.height as i32);

        Area::indoor(Point::new(left, top), Point::new(right, bottom))
    }

    /// Walk from `origin` one `step` at a time along `(dx, dy)` until a probe
    /// lands inside an area or `in_range` rejects the current position.
    fn scan_from(&self, origin: Point, dx: i32, dy: i32, step: i32, in_range: impl Fn(Point) -> bool) -> Option<&Area> {
        let mut check = origin;
        loop {
            if let Some(area) = self.area_at_point(check) {
                return Some(area);
            }
            if !in_range(check) {
                return None;
            }
            check.x += dx * step;
            check.y += dy * step;
        }
    }
}
