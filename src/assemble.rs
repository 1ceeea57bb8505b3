use std::collections::{HashMap, HashSet};

use image::{imageops, RgbaImage};
use log::info;
use serde::Serialize;
use uuid::Uuid;

use crate::area::{Area, AreaId, AreaType};
use crate::board::Board;
use crate::config::TileConfig;
use crate::connection::AreaConnection;
use crate::door::DoorDirection;
use crate::error::AssembleError;
use crate::grid::Grid;
use crate::location::{AreaLocation, Point};

/// Per-cell tile metadata kept alongside the assembled board, enough for a
/// persistence layer to redraw or regenerate the mission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileEntry {
    /// The placed tile's name.
    pub tile_name: String,
    /// Quarter turns applied to the tile before assembly.
    pub rotation: u8,
    /// Grid column the tile occupies.
    pub col: usize,
    /// Grid row the tile occupies.
    pub row: usize,
}

/// A fully assembled mission: the composed board plus the per-cell tile
/// metadata it was built from.
pub struct Mission {
    /// The composed board, with translated areas, merged border streets, and
    /// remapped connections.
    pub board: Board,
    /// One entry per grid cell, scanned row-major.
    pub tiles: Vec<TileEntry>,
}

/// Stitch a complete, valid grid of tiles into one mission board.
///
/// Every tile's areas are translated to mission coordinates, mirrored border
/// areas collapse into fresh-id merge areas, connections are remapped onto
/// the merged ids, edge connections resolve against the neighboring tile, and
/// tile images are blitted into one background raster.
///
/// An incomplete grid or one with mismatched street borders is rejected
/// before any work happens; callers gate the operation on
/// [`Grid::is_complete_and_valid`].
pub fn assemble(grid: &Grid, config: &TileConfig) -> Result<Mission, AssembleError> {
    if !grid.is_complete() {
        return Err(AssembleError::GridIncomplete);
    }
    if !grid.validate() {
        return Err(AssembleError::GridInvalid);
    }

    let (tile_w, tile_h) = (config.tile_width as i32, config.tile_height as i32);

    // one fresh id per merge group; merging never reuses a member's id
    let groups = grid.get_areas_to_merge();
    let mut remap: HashMap<AreaId, AreaId> = HashMap::new();
    let groups: Vec<(AreaId, HashSet<AreaId>)> = groups
        .into_iter()
        .map(|group| {
            let fresh = AreaId::fresh();
            for &member in &group {
                remap.insert(member, fresh);
            }
            (fresh, group)
        })
        .collect();

    let mut areas: Vec<Area> = Vec::new();
    for (col, row, board) in grid.placed() {
        let (dx, dy) = (col as i32 * tile_w, row as i32 * tile_h);
        for area in board.areas() {
            if remap.contains_key(&area.id) {
                continue;
            }
            let mut shifted = area.clone();
            shifted.shift(dx, dy);
            areas.push(shifted);
        }
    }
    for (fresh, group) in &groups {
        areas.push(merged_area(grid, *fresh, group, tile_w, tile_h));
    }

    let mut connections: Vec<AreaConnection> = Vec::new();
    for (col, row, board) in grid.placed() {
        for connection in board.connections() {
            match *connection {
                AreaConnection::Normal { .. } => {
                    let remapped = connection.remap(&remap);
                    if let AreaConnection::Normal { area_a, area_b } = remapped {
                        // purely internal to a merge
                        if area_a == area_b {
                            continue;
                        }
                    }
                    connections.push(remapped);
                }
                AreaConnection::Edge { area_a, direction } => {
                    if let Some(resolved) = resolve_edge(grid, col, row, area_a, direction, &remap) {
                        connections.push(resolved);
                    }
                }
            }
        }
    }

    info!(
        "assembled {}x{} grid: {} areas ({} merge groups), {} connections",
        grid.width(),
        grid.height(),
        areas.len(),
        groups.len(),
        connections.len()
    );

    let image = compose_image(grid, config);
    let mut board = Board::new(
        Uuid::new_v4().to_string(),
        image,
        grid.width() as u32 * config.tile_width,
        grid.height() as u32 * config.tile_height,
    );
    for area in areas {
        board.add_area(area);
    }
    for connection in connections {
        board.push_connection(connection);
    }

    let tiles = grid
        .placed()
        .map(|(col, row, tile)| TileEntry {
            tile_name: tile.board_id().to_string(),
            rotation: tile.rotation(),
            col,
            row,
        })
        .collect();

    Ok(Mission { board, tiles })
}

/// Collapse one merge group into a single area spanning the union footprint
/// of its members, in mission coordinates.
fn merged_area(grid: &Grid, fresh: AreaId, group: &HashSet<AreaId>, tile_w: i32, tile_h: i32) -> Area {
    let mut min = Point::new(i32::MAX, i32::MAX);
    let mut max = Point::new(i32::MIN, i32::MIN);

    for (col, row, board) in grid.placed() {
        for area in board.areas().iter().filter(|area| group.contains(&area.id)) {
            let top_left = Point::new(area.top_left.x + col as i32 * tile_w, area.top_left.y + row as i32 * tile_h);
            min.x = min.x.min(top_left.x);
            min.y = min.y.min(top_left.y);
            max.x = max.x.max(top_left.x + area.width as i32);
            max.y = max.y.max(top_left.y + area.height as i32);
        }
    }

    Area {
        id: fresh,
        top_left: min,
        width: (max.x - min.x) as u32,
        height: (max.y - min.y) as u32,
        area_type: AreaType::StreetMerge,
        area_location: AreaLocation::Other,
    }
}

/// Resolve an edge connection leaving `(col, row)` through `direction` into a
/// normal connection against the neighboring tile.
///
/// The neighbor's street slot on the facing edge wins; failing that, the
/// first edge connection on the neighbor pointing back through the opposite
/// slot. An edge connection with no counterpart is dropped from the mission.
/// Doors matched from both sides each resolve once, so an indoor-to-indoor
/// door yields one connection from each tile's perspective.
fn resolve_edge(
    grid: &Grid,
    col: usize,
    row: usize,
    area_a: AreaId,
    direction: DoorDirection,
    remap: &HashMap<AreaId, AreaId>,
) -> Option<AreaConnection> {
    let lookup = |id: AreaId| remap.get(&id).copied().unwrap_or(id);

    let (ncol, nrow) = direction.toward().offset_from(col as i32, row as i32);
    if ncol < 0 || nrow < 0 || ncol as usize >= grid.width() || nrow as usize >= grid.height() {
        return None;
    }
    let target = grid.get(ncol as usize, nrow as usize)?;

    if let Some(street) = target.area_at_location(direction.to_street_location()) {
        return Some(AreaConnection::between(lookup(area_a), lookup(street.id)));
    }

    let opposite = direction.opposite();
    target.connections().iter().find_map(|connection| match connection {
        AreaConnection::Edge { area_a: other, direction } if *direction == opposite => {
            Some(AreaConnection::between(lookup(area_a), lookup(*other)))
        }
        _ => None,
    })
}

/// Blit each tile's image into its cell of one mission-sized canvas. `None`
/// when no placed tile carries an image.
fn compose_image(grid: &Grid, config: &TileConfig) -> Option<RgbaImage> {
    let mut canvas = RgbaImage::new(
        grid.width() as u32 * config.tile_width,
        grid.height() as u32 * config.tile_height,
    );

    let mut any = false;
    for (col, row, board) in grid.placed() {
        if let Some(image) = board.image() {
            imageops::overlay(
                &mut canvas,
                image,
                col as i64 * config.tile_width as i64,
                row as i64 * config.tile_height as i64,
            );
            any = true;
        }
    }

    any.then_some(canvas)
}
