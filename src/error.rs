use thiserror::Error;

use crate::area::AreaId;

/// Domain-rule violations reported by [`Board`](crate::Board) mutations.
///
/// These are recoverable, caller-facing errors; the board is left unchanged
/// when one is returned. Caller invariant violations such as out-of-range
/// grid access panic instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// An edge connection referenced an area that is not indoor.
    #[error("only indoor areas can carry edge connections")]
    InvalidAreaType,
    /// An operation referenced an area id not present on this board.
    #[error("no area {0} on this board")]
    UnknownArea(AreaId),
    /// A split was requested on a border area; only interior areas may be
    /// split.
    #[error("area {0} occupies a border slot and cannot be split")]
    NotInterior(AreaId),
    /// A loaded record carried a malformed id or an unrecognized enum tag.
    #[error("unrecognized value {0:?}")]
    Parse(String),
}

/// Reasons [`assemble`](crate::assemble()) rejects a grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssembleError {
    /// At least one grid cell holds no board.
    #[error("grid has empty cells")]
    GridIncomplete,
    /// Adjacent tiles have mismatched street borders.
    #[error("adjacent tiles have mismatched street borders")]
    GridInvalid,
}
