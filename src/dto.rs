//! Value objects interchanged with the persistence collaborator.
//!
//! Tiles are stored on disk as JSON records with string-tagged enums:
//! area types and border slots upper-case (`"INDOOR_LIGHT"`,
//! `"TOP_LEFT_STREET"`), door directions lower-case (`"east_center"`). A
//! [`TileDto`] plus an optionally pre-loaded image convert into a
//! [`Board`]; tag and id parsing is fallible and reported as
//! [`BoardError::Parse`].

use std::str::FromStr;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::area::{Area, AreaId, AreaType};
use crate::board::Board;
use crate::config::TileConfig;
use crate::connection::AreaConnection;
use crate::door::DoorDirection;
use crate::error::BoardError;
use crate::location::{AreaLocation, Point};

/// One persisted tile: identity, provenance, and its areas and connections.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileDto {
    /// Game edition the tile belongs to.
    pub edition: String,
    /// Collection within the edition.
    pub collection: String,
    /// Path of the tile's scan on disk; loading it is the caller's concern.
    pub image_path: String,
    /// The tile's display name, also used as its board id.
    pub tile_name: String,
    /// Persisted areas.
    #[serde(default)]
    pub areas: Vec<AreaDto>,
    /// Persisted connections.
    #[serde(default)]
    pub connections: Vec<ConnectionDto>,
}

/// One persisted area rectangle.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaDto {
    /// Area id as a UUID string.
    pub id: String,
    /// Top-left x coordinate.
    pub x: i32,
    /// Top-left y coordinate.
    pub y: i32,
    /// Rectangle width.
    pub width: u32,
    /// Rectangle height.
    pub height: u32,
    /// Upper-case [`AreaType`] tag.
    pub area_type: String,
    /// Upper-case [`AreaLocation`] tag.
    pub area_location: String,
}

/// One persisted connection. `direction` present and non-empty marks an edge
/// connection, in which case `area_b` is absent.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDto {
    /// First endpoint id.
    pub area_a: String,
    /// Second endpoint id, for normal connections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_b: Option<String>,
    /// Lower-case [`DoorDirection`] tag, for edge connections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

impl TileDto {
    /// Parse a tile record from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build the tile's board: every persisted area and connection parsed and
    /// installed, with `image` as the backing raster if the caller loaded
    /// one.
    pub fn into_board(self, image: Option<RgbaImage>, config: &TileConfig) -> Result<Board, BoardError> {
        let mut board = Board::new(self.tile_name, image, config.tile_width, config.tile_height);
        for area in self.areas {
            board.add_area(area.try_into()?);
        }
        for connection in self.connections {
            board.add_connection(connection.try_into()?)?;
        }
        Ok(board)
    }
}

fn parse_id(tag: &str) -> Result<AreaId, BoardError> {
    AreaId::from_str(tag).map_err(|_| BoardError::Parse(tag.to_string()))
}

impl TryFrom<AreaDto> for Area {
    type Error = BoardError;

    fn try_from(dto: AreaDto) -> Result<Self, Self::Error> {
        Ok(Area {
            id: parse_id(&dto.id)?,
            top_left: Point::new(dto.x, dto.y),
            width: dto.width,
            height: dto.height,
            area_type: AreaType::from_str(&dto.area_type).map_err(|_| BoardError::Parse(dto.area_type.clone()))?,
            area_location: AreaLocation::from_str(&dto.area_location)
                .map_err(|_| BoardError::Parse(dto.area_location.clone()))?,
        })
    }
}

impl TryFrom<ConnectionDto> for AreaConnection {
    type Error = BoardError;

    fn try_from(dto: ConnectionDto) -> Result<Self, Self::Error> {
        let area_a = parse_id(&dto.area_a)?;
        match dto.direction.as_deref() {
            Some(tag) if !tag.is_empty() => {
                let direction = DoorDirection::from_str(tag).map_err(|_| BoardError::Parse(tag.to_string()))?;
                Ok(AreaConnection::edge(area_a, direction))
            }
            _ => {
                let area_b = dto.area_b.as_deref().ok_or_else(|| BoardError::Parse("missing areaB".to_string()))?;
                Ok(AreaConnection::between(area_a, parse_id(area_b)?))
            }
        }
    }
}
