use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::*;

impl Grid {
    /// Reveals the cell at `coords`, flooding through zero-count regions.
    ///
    /// Revealed, flagged and out-of-bounds cells are left alone. Hitting a mine only exposes that
    /// mine.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        self.reveal_ordered(coords, |_| {})
    }

    /// Same as [`Grid::reveal`], `order` may permute each batch of neighbours before they are
    /// queued. The final revealed set does not depend on it.
    pub(crate) fn reveal_ordered<F>(&mut self, coords: Coord2, order: F) -> RevealOutcome
    where
        F: FnMut(&mut [Coord2]),
    {
        use RevealOutcome::*;

        let Some(&cell) = self.get(coords) else {
            log::trace!("Ignoring reveal outside the board at {:?}", coords);
            return NoChange;
        };

        if !cell.is_hidden() {
            return NoChange;
        }

        if cell.is_mine() {
            self.mark_revealed(coords);
            log::debug!("Mine revealed at {:?}", coords);
            return HitMine;
        }

        let opened = self.flood_reveal(coords, order);
        log::debug!("Revealed {} cells from {:?}", opened, coords);

        if self.all_safe_revealed() {
            Won
        } else {
            Revealed
        }
    }

    /// Worklist flood from a safe hidden cell, returns how many cells were revealed.
    ///
    /// Only zero-count cells expand. Flagged cells are never revealed and block the cascade.
    fn flood_reveal<F>(&mut self, start: Coord2, mut order: F) -> usize
    where
        F: FnMut(&mut [Coord2]),
    {
        let mut visited = BTreeSet::from([start]);
        let mut to_visit = Vec::from([start]);
        let mut batch = Vec::with_capacity(8);
        let mut opened = 0;

        while let Some(visit_coords) = to_visit.pop() {
            let cell = self[visit_coords];

            // skip flagged or already revealed cells
            if !cell.is_hidden() {
                log::trace!("Skipping cell at {:?}", visit_coords);
                continue;
            }

            self.mark_revealed(visit_coords);
            opened += 1;
            log::trace!(
                "Flood revealed cell at {:?}, mine count: {}",
                visit_coords,
                cell.adjacent_mines()
            );

            // a zero-count cell has no mine neighbours, so this never queues a mine
            if cell.is_mine() || cell.adjacent_mines() != 0 {
                continue;
            }

            batch.clear();
            batch.extend(
                self.neighbors(visit_coords)
                    .filter(|&pos| self[pos].is_hidden())
                    .filter(|pos| !visited.contains(pos)),
            );
            order(batch.as_mut_slice());

            for &pos in &batch {
                visited.insert(pos);
                to_visit.push(pos);
            }
        }

        opened
    }

    /// Flips the flag on an unrevealed cell.
    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        let Some(cell) = self.get_mut(coords) else {
            log::trace!("Ignoring flag outside the board at {:?}", coords);
            return FlagOutcome::NoChange;
        };

        if cell.revealed {
            return FlagOutcome::NoChange;
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            FlagOutcome::Placed
        } else {
            FlagOutcome::Removed
        }
    }
}
