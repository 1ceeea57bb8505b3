#![warn(missing_docs)]

//! # `quadrille`
//!
//! A board geometry engine for assembling square map tiles into the larger
//! "mission" boards of a tile-based tabletop game.
//!
//! Each tile is a square image subdivided into rectangular [`Area`]s
//! (streets, rooms, outdoor terrain) joined by [`AreaConnection`]s. Build a
//! [`Board`] per tile, usually from a persisted [`dto::TileDto`] record,
//! place the boards into a [`Grid`], and rotate them in place with
//! [`Board::rotate`] until [`Grid::validate`] reports that the street borders
//! of every pair of adjacent tiles mirror one another. Once the grid is
//! complete and valid, [`assemble`] stitches it into a single mission
//! board: tile coordinates are translated into mission space, border street
//! areas that coincide at tile boundaries collapse into fresh merge areas,
//! every connection is remapped accordingly, unresolved door exits are
//! matched against the neighboring tile, and the tile images are composited
//! into one background raster.
//!
//! The engine is synchronous and single-threaded; boards are exclusively
//! owned by whichever grid cell or collection holds them, and every mutation
//! happens in place on the owner's reference. Recoverable domain-rule
//! violations surface as [`BoardError`]/[`AssembleError`]; out-of-range grid
//! access is a caller bug and panics.

pub use area::{Area, AreaId, AreaType};
pub use assemble::{assemble, Mission, TileEntry};
pub use board::Board;
pub use config::TileConfig;
pub use connection::AreaConnection;
pub use door::DoorDirection;
pub use error::{AssembleError, BoardError};
pub use grid::Grid;
pub use location::{AreaLocation, Direction, Point};

pub(crate) mod area;
pub(crate) mod assemble;
pub(crate) mod board;
pub mod config;
pub(crate) mod connection;
pub(crate) mod door;
pub mod dto;
pub(crate) mod error;
pub(crate) mod grid;
pub(crate) mod location;
mod tests;
