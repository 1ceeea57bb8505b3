//! Tile geometry configuration.
//!
//! Every tile in a mission shares one [`TileConfig`]: the pixel size of a
//! tile and how its perimeter splits into corner and edge-middle street
//! slots. The defaults describe the standard 250×250 tile scans with a
//! 75/100/75 perimeter split.

use serde::Deserialize;

use crate::location::Point;

/// Tile geometry shared by every board placed in a grid.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct TileConfig {
    /// Tile width in pixels.
    pub tile_width: u32,
    /// Tile height in pixels. Tiles are square in practice, but width and
    /// height are kept separate so the assembled mission can reuse the type.
    pub tile_height: u32,
    /// Side length of the four corner street slots.
    pub corner_size: u32,
    /// Length of the edge-middle street slots along the tile edge.
    pub middle_size: u32,
    /// Step used when probing free space while auto-filling interior areas.
    pub probe_step: u32,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            tile_width: 250,
            tile_height: 250,
            corner_size: 75,
            middle_size: 100,
            probe_step: 75,
        }
    }
}

impl TileConfig {
    /// Parse a configuration from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The midpoints of the nine regions the corner/middle split divides a
    /// tile into, scanned top-left to bottom-right when auto-filling interior
    /// areas.
    pub(crate) fn exploring_points(&self) -> [Point; 9] {
        let c = self.corner_size as i32;
        let m = self.middle_size as i32;
        let stops = [c / 2, c + m / 2, c + m + c / 2];

        let mut points = [Point::default(); 9];
        for (i, &y) in stops.iter().enumerate() {
            for (j, &x) in stops.iter().enumerate() {
                points[i * 3 + j] = Point::new(x, y);
            }
        }
        points
    }
}
