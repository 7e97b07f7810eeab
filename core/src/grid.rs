use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square board of [`Cell`]s addressed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_safe: CellCount,
}

/// Only the cells are trusted, counters are rebuilt from them.
#[derive(Deserialize)]
struct RawGrid {
    cells: Array2<Cell>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GameError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        let (rows, cols) = raw.cells.dim();
        if rows != cols || rows > usize::from(Coord::MAX) {
            return Err(GameError::InvalidBoardShape);
        }
        if rows == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mut grid = Self {
            cells: raw.cells,
            mine_count: 0,
            revealed_safe: 0,
        };
        for (coords, &cell) in grid.iter() {
            if cell.is_revealed() && cell.is_flagged() {
                log::debug!("Cell at {:?} is both revealed and flagged", coords);
                return Err(GameError::InconsistentCells);
            }
            if !cell.is_mine() && cell.adjacent_mines() != grid.count_adjacent_mines(coords) {
                log::debug!("Cell at {:?} has a wrong mine count", coords);
                return Err(GameError::InconsistentCells);
            }
        }

        let mine_count = grid.iter().filter(|(_, cell)| cell.is_mine()).count();
        let revealed_safe = grid
            .iter()
            .filter(|(_, cell)| !cell.is_mine() && cell.is_revealed())
            .count();
        // at most 255 * 255 cells, so both fit
        grid.mine_count = mine_count as CellCount;
        grid.revealed_safe = revealed_safe as CellCount;

        if grid.mine_count >= grid.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(grid)
    }
}

impl Grid {
    /// Board where every cell is hidden, unflagged and safe.
    pub fn new(size: Coord) -> Self {
        Self {
            cells: Array2::default((size, size).to_nd_index()),
            mine_count: 0,
            revealed_safe: 0,
        }
    }

    /// Board with mines at exactly the given coordinates, duplicates are ignored.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if size == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mut grid = Self::new(size);
        for &coords in mine_coords {
            let coords = grid.validate_coords(coords)?;
            grid.place_mine(coords);
        }

        if grid.mine_count >= grid.total_cells() {
            return Err(GameError::TooManyMines);
        }

        grid.fill_adjacent_counts();
        Ok(grid)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord {
        // only ever built from a `Coord` side
        self.cells.nrows() as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe
    }

    /// Every cell is either a mine or revealed
    pub fn all_safe_revealed(&self) -> bool {
        self.revealed_safe == self.safe_cell_count()
    }

    /// Bounds-checked lookup, `None` outside the board.
    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    pub(crate) fn get_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        self.cells.get_mut(coords.to_nd_index())
    }

    /// In-bounds Moore neighbours of an in-bounds cell, row by row.
    ///
    /// The iterator does not borrow the grid, so it can drive mutation of it.
    pub fn neighbors(&self, (row, col): Coord2) -> impl Iterator<Item = Coord2> + use<> {
        let last = self.size().saturating_sub(1);
        let rows = row.saturating_sub(1)..=row.saturating_add(1).min(last);
        let cols = col.saturating_sub(1)..=col.saturating_add(1).min(last);
        rows.flat_map(move |r| cols.clone().map(move |c| (r, c)))
            .filter(move |&pos| pos != (row, col))
    }

    /// Counts mines around `coords` from the current layout.
    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        // at most 8 neighbours
        self.neighbors(coords)
            .filter(|&pos| self[pos].is_mine())
            .count() as u8
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn row(&self, row: Coord) -> impl Iterator<Item = &Cell> {
        self.cells.row(row.into()).into_iter()
    }

    /// Marks a mine, returns `false` if there was one already.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        let Some(cell) = self.get_mut(coords) else {
            return false;
        };
        if cell.mine {
            return false;
        }
        cell.mine = true;
        self.mine_count += 1;
        true
    }

    /// Stores the neighbour mine count on every safe cell.
    pub(crate) fn fill_adjacent_counts(&mut self) {
        let size = self.size();
        for row in 0..size {
            for col in 0..size {
                let coords = (row, col);
                if self[coords].is_mine() {
                    continue;
                }
                let count = self.count_adjacent_mines(coords);
                if let Some(cell) = self.get_mut(coords) {
                    cell.adjacent_mines = count;
                }
            }
        }
    }

    pub(crate) fn mark_revealed(&mut self, coords: Coord2) {
        let Some(cell) = self.get_mut(coords) else {
            return;
        };
        if cell.revealed {
            return;
        }
        cell.revealed = true;
        cell.flagged = false;
        if !cell.mine {
            self.revealed_safe += 1;
        }
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_blank() {
        let grid = Grid::new(4);
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.total_cells(), 16);
        assert!(grid.iter().all(|(_, &cell)| cell == Cell::default()));
    }

    #[test]
    fn lookup_outside_is_absent() {
        let grid = Grid::new(3);
        assert!(grid.get((2, 2)).is_some());
        assert!(grid.get((3, 0)).is_none());
        assert!(grid.get((0, 3)).is_none());
        assert!(grid.get((Coord::MAX, Coord::MAX)).is_none());
    }

    #[test]
    fn from_mine_coords_counts_neighbors() {
        let grid = Grid::from_mine_coords(3, &[(0, 0), (2, 2)]).unwrap();
        assert_eq!(grid.mine_count(), 2);
        assert_eq!(grid[(1, 1)].adjacent_mines(), 2);
        assert_eq!(grid[(0, 1)].adjacent_mines(), 1);
        assert_eq!(grid[(0, 2)].adjacent_mines(), 0);
        assert_eq!(grid[(2, 0)].adjacent_mines(), 0);
    }

    #[test]
    fn from_mine_coords_ignores_duplicates() {
        let grid = Grid::from_mine_coords(2, &[(0, 0), (0, 0)]).unwrap();
        assert_eq!(grid.mine_count(), 1);
    }

    #[test]
    fn from_mine_coords_rejects_bad_input() {
        assert_eq!(
            Grid::from_mine_coords(2, &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            Grid::from_mine_coords(1, &[(0, 0)]),
            Err(GameError::TooManyMines)
        );
        assert_eq!(Grid::from_mine_coords(0, &[]), Err(GameError::EmptyBoard));
    }

    #[test]
    fn corner_has_three_neighbors() {
        let grid = Grid::new(3);
        let neighbors: alloc::vec::Vec<_> = grid.neighbors((0, 0)).collect();
        assert_eq!(neighbors, [(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn center_has_eight_neighbors() {
        assert_eq!(Grid::new(3).neighbors((1, 1)).count(), 8);
        assert_eq!(Grid::new(3).neighbors((2, 2)).count(), 3);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(Grid::new(1).neighbors((0, 0)).count(), 0);
    }

    #[test]
    fn deserialization_rebuilds_counters() {
        let mut grid = Grid::from_mine_coords(2, &[(0, 0)]).unwrap();
        grid.reveal((1, 1));
        let mut json = serde_json::to_value(&grid).unwrap();
        json["mine_count"] = 9.into();
        json["revealed_safe"] = 0.into();

        let loaded: Grid = serde_json::from_value(json).unwrap();

        assert_eq!(loaded, grid);
        assert_eq!(loaded.mine_count(), 1);
        assert_eq!(loaded.revealed_safe_count(), 1);
        assert!(!loaded.all_safe_revealed());
    }

    #[test]
    fn deserialization_rejects_non_square_board() {
        let json = serde_json::json!({
            "cells": serde_json::to_value(Array2::<Cell>::default([1, 2])).unwrap(),
        });
        let err = serde_json::from_value::<Grid>(json).unwrap_err();
        assert!(err.to_string().contains("square"), "{}", err);
    }

    #[test]
    fn deserialization_rejects_inconsistent_cells() {
        let grid = Grid::from_mine_coords(2, &[(0, 0)]).unwrap();

        let mut wrong_count = serde_json::to_value(&grid).unwrap();
        let cells = wrong_count["cells"]["data"].as_array_mut().unwrap();
        cells[3]["adjacent_mines"] = 0.into();
        assert!(serde_json::from_value::<Grid>(wrong_count).is_err());

        let mut flagged_and_revealed = serde_json::to_value(&grid).unwrap();
        let cells = flagged_and_revealed["cells"]["data"].as_array_mut().unwrap();
        cells[1]["revealed"] = true.into();
        cells[1]["flagged"] = true.into();
        assert!(serde_json::from_value::<Grid>(flagged_and_revealed).is_err());
    }

    #[test]
    fn deserialization_rejects_full_and_empty_boards() {
        let mut full = Array2::<Cell>::default([1, 1]);
        full[[0, 0]].mine = true;
        let json = serde_json::json!({ "cells": serde_json::to_value(full).unwrap() });
        assert!(serde_json::from_value::<Grid>(json).is_err());

        let json = serde_json::json!({
            "cells": serde_json::to_value(Array2::<Cell>::default([0, 0])).unwrap(),
        });
        assert!(serde_json::from_value::<Grid>(json).is_err());
    }

    #[test]
    fn row_iterates_columns() {
        let grid = Grid::from_mine_coords(2, &[(1, 0)]).unwrap();
        let mines: alloc::vec::Vec<_> = grid.row(1).map(|cell| cell.is_mine()).collect();
        assert_eq!(mines, [true, false]);
    }
}
