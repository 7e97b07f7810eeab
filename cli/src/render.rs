use std::fmt::{self, Write};

use sapper_core::{GameSession, Grid, VisibleCell};

/// Character for a single cell.
///
/// | Cell          | Char |
/// | ------------- | ---- |
/// | `Hidden`      | `#`  |
/// | `Flagged`     | `F`  |
/// | `Mine`        | `*`  |
/// | `Revealed(0)` | `.`  |
/// | `Revealed(n)` | `n`  |
fn cell_char(cell: VisibleCell) -> char {
    match cell {
        VisibleCell::Hidden => '#',
        VisibleCell::Flagged => 'F',
        VisibleCell::Mine => '*',
        VisibleCell::Revealed(0) => '.',
        VisibleCell::Revealed(n) => char::from_digit(n.into(), 10).unwrap_or('?'),
    }
}

pub(crate) fn grid(out: &mut impl Write, grid: &Grid) -> fmt::Result {
    let width = grid.size().saturating_sub(1).to_string().len();

    write!(out, "{:width$} ", "")?;
    for col in 0..grid.size() {
        write!(out, " {:>width$}", col)?;
    }
    writeln!(out)?;

    for row in 0..grid.size() {
        write!(out, "{:>width$} ", row)?;
        for cell in grid.row(row) {
            write!(out, " {:>width$}", cell_char(cell.visible()))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub(crate) fn session(out: &mut impl Write, session: &GameSession) -> fmt::Result {
    let Some(board) = session.grid() else {
        return writeln!(out, "Select difficulty: easy, medium, hard or custom SIZE MINES");
    };

    writeln!(out, "Mines: {}", session.mines_left())?;
    grid(out, board)?;
    if session.phase().is_final() {
        writeln!(out, "{}", session.end_message())?;
        writeln!(out, "Type restart or menu to play again")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_revealed_and_hidden_cells() {
        let board = Grid::from_mine_coords(3, &[(1, 1)]).unwrap();
        let mut session = GameSession::from_grid(board).unwrap();
        session.reveal((0, 0));
        session.toggle_flag((2, 2));

        let mut out = String::new();
        grid(&mut out, session.grid().unwrap()).unwrap();

        assert_eq!(out, "   0 1 2\n0  1 # #\n1  # # #\n2  # # F\n");
    }

    #[test]
    fn menu_when_not_started() {
        let mut out = String::new();
        session(&mut out, &GameSession::new()).unwrap();
        assert!(out.starts_with("Select difficulty"));
    }

    #[test]
    fn end_message_after_loss() {
        let board = Grid::from_mine_coords(2, &[(0, 0)]).unwrap();
        let mut game = GameSession::from_grid(board).unwrap();
        game.reveal((0, 0));

        let mut out = String::new();
        session(&mut out, &game).unwrap();
        assert!(out.contains("Game Over!"));
        assert!(out.contains("0  * #"));
    }
}
