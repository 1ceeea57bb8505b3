use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use log::info;
use ndarray::Array2;
use petgraph::unionfind::UnionFind;

use crate::area::{Area, AreaId};
use crate::board::Board;
use crate::connection::AreaConnection;
use crate::location::{AreaLocation, Direction};

/// A fixed-size arrangement of optional [`Board`]s, addressed by
/// `(col, row)`.
///
/// The grid validates street-border adjacency after each placement or
/// rotation and, once complete and valid, feeds [`assemble`](crate::assemble())
/// the merge groups of border areas that coincide at tile boundaries.
pub struct Grid {
    // stored (row, col), matching ndarray's row-major convention
    cells: Array2<Option<Board>>,
}

impl Grid {
    /// Construct an empty grid with `width` columns and `height` rows. The
    /// size is fixed; to resize, build a new grid and re-place the boards.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_shape_simple_fn((height, width), || None),
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Place `board` at `(col, row)`, replacing whatever the cell held.
    ///
    /// Panics if the cell is out of range; the grid size is fixed at
    /// construction, so an out-of-range index is a caller bug.
    pub fn set(&mut self, col: usize, row: usize, board: Board) {
        self.cells[(row, col)] = Some(board);
    }

    /// The board at `(col, row)`, if the cell is occupied.
    ///
    /// Panics if the cell is out of range.
    pub fn get(&self, col: usize, row: usize) -> Option<&Board> {
        self.cells[(row, col)].as_ref()
    }

    /// Mutable access to the board at `(col, row)`, for in-place rotation and
    /// area edits on a placed board.
    ///
    /// Panics if the cell is out of range.
    pub fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut Board> {
        self.cells[(row, col)].as_mut()
    }

    /// Remove and return the board at `(col, row)`, leaving the cell empty.
    ///
    /// Panics if the cell is out of range.
    pub fn take(&mut self, col: usize, row: usize) -> Option<Board> {
        self.cells[(row, col)].take()
    }

    /// Whether every cell holds a board.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Check street-border adjacency for every placed board.
    ///
    /// Each street area must mirror against the neighbors listed by
    /// [`AreaLocation::mirrors`]: an out-of-range or empty neighbor cell is
    /// vacuously fine (an open edge is never a failure), but an occupied
    /// neighbor must hold a street area at the expected mirrored slot, or a
    /// door through the facing wall that resolves onto this street during
    /// assembly. This is a local, per-tile check independent of
    /// completeness.
    pub fn validate(&self) -> bool {
        let mut valid = true;
        for (col, row, board) in self.placed() {
            for location in AreaLocation::street_locations() {
                if !board.has_area_location(location) {
                    continue;
                }
                for &(direction, mirror) in location.mirrors() {
                    if !self.mirror_holds(col, row, location, direction, mirror) {
                        info!("street {location} at ({col},{row}) is not mirrored by {mirror} to its {direction:?}");
                        valid = false;
                    }
                }
            }
        }
        valid
    }

    /// Conjunction of [`Self::is_complete`] and [`Self::validate`]; gates
    /// assembly.
    pub fn is_complete_and_valid(&self) -> bool {
        self.is_complete() && self.validate()
    }

    /// Group the border areas that coincide at tile boundaries and must
    /// collapse into one area in the assembled mission.
    ///
    /// A group contains the areas at mutually-mirrored slots of adjacent
    /// cells where both sides are actually present. Grouping is transitive:
    /// at a four-tile corner where each pair of neighboring corner slots
    /// mirrors, all participating areas land in a single group.
    pub fn get_areas_to_merge(&self) -> Vec<HashSet<AreaId>> {
        let border_ids = self
            .placed()
            .flat_map(|(_, _, board)| {
                AreaLocation::street_locations().filter_map(|location| board.area_at_location(location))
            })
            .map(|area| area.id)
            .collect_vec();
        let index: HashMap<AreaId, usize> = border_ids.iter().copied().enumerate().map(|(i, id)| (id, i)).collect();

        let mut partition: UnionFind<usize> = UnionFind::new(border_ids.len());
        for (col, row, board) in self.placed() {
            for location in AreaLocation::street_locations() {
                let Some(area) = board.area_at_location(location) else {
                    continue;
                };
                for &(direction, mirror) in location.mirrors() {
                    if let Some(neighbour) = self.neighbour_area(col, row, direction, mirror) {
                        partition.union(index[&area.id], index[&neighbour.id]);
                    }
                }
            }
        }

        let labels = partition.into_labeling();
        let mut groups: HashMap<usize, HashSet<AreaId>> = HashMap::new();
        for (i, id) in border_ids.into_iter().enumerate() {
            groups.entry(labels[i]).or_default().insert(id);
        }
        groups.into_values().filter(|group| group.len() > 1).collect_vec()
    }

    /// Every occupied cell as `(col, row, board)`, scanned row-major.
    pub(crate) fn placed(&self) -> impl Iterator<Item = (usize, usize, &Board)> {
        self.cells
            .indexed_iter()
            .filter_map(|((row, col), cell)| cell.as_ref().map(|board| (col, row, board)))
    }

    /// The street area at slot `location` on the board one step in
    /// `direction` from `(col, row)`, if that cell is in range, occupied, and
    /// holds such an area.
    pub(crate) fn neighbour_area(
        &self,
        col: usize,
        row: usize,
        direction: Direction,
        location: AreaLocation,
    ) -> Option<&Area> {
        let (ncol, nrow) = direction.offset_from(col as i32, row as i32);
        if ncol < 0 || nrow < 0 || ncol as usize >= self.width() || nrow as usize >= self.height() {
            return None;
        }
        self.get(ncol as usize, nrow as usize)?.area_at_location(location)
    }

    /// Whether the mirror requirement for the street at `location` on
    /// `(col, row)` holds toward `direction`: vacuously true when the
    /// neighbor cell is out of range or empty, otherwise the neighbor must
    /// hold the `expected` slot or a door facing back onto `location`.
    fn mirror_holds(
        &self,
        col: usize,
        row: usize,
        location: AreaLocation,
        direction: Direction,
        expected: AreaLocation,
    ) -> bool {
        let (ncol, nrow) = direction.offset_from(col as i32, row as i32);
        if ncol < 0 || nrow < 0 || ncol as usize >= self.width() || nrow as usize >= self.height() {
            return true;
        }
        let Some(board) = self.get(ncol as usize, nrow as usize) else {
            return true;
        };
        if board.has_area_location(expected) {
            return true;
        }
        // a street slot may also face a door on the neighbor's facing wall;
        // assembly resolves that pairing into a direct connection
        board.connections().iter().any(|connection| match connection {
            AreaConnection::Edge { direction: door, .. } => {
                door.to_street_location() == location
                    && door.toward().offset_from(ncol, nrow) == (col as i32, row as i32)
            }
            _ => false,
        })
    }
}
