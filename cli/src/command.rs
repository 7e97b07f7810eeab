use anyhow::{Context, bail};
use sapper_core::{Coord, Coord2, Difficulty, GameConfig};

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Start(GameConfig),
    Reveal(Coord2),
    Flag(Coord2),
    /// Restart and back-to-menu both drop the current game
    Reset,
    Help,
    Quit,
}

impl Command {
    pub(crate) fn parse(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            bail!("empty command");
        };
        let args: Vec<&str> = words.collect();

        let command = match head.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(parse_coords(&args)?),
            "f" | "flag" => Self::Flag(parse_coords(&args)?),
            "restart" | "menu" | "m" => Self::Reset,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            "custom" | "c" => {
                let [size, mines] = args[..] else {
                    bail!("usage: custom SIZE MINES");
                };
                let size = size.parse().context("could not parse size")?;
                let mines = mines.parse().context("could not parse mine count")?;
                Self::Start(GameConfig::new(size, mines)?)
            }
            other => Self::Start(other.parse::<Difficulty>()?.config()),
        };
        Ok(command)
    }
}

fn parse_coords(args: &[&str]) -> anyhow::Result<Coord2> {
    let [row, col] = args[..] else {
        bail!("expected ROW COL");
    };
    let row: Coord = row.parse().context("could not parse row")?;
    let col: Coord = col.parse().context("could not parse col")?;
    Ok((row, col))
}

pub(crate) const HELP: &str = "\
USAGE:
\teasy | medium | hard    \tStart a game with a preset
\tcustom SIZE MINES       \tStart a SIZE x SIZE game
\tr, reveal ROW COL       \tReveal a cell
\tf, flag ROW COL         \tPlace or remove a flag
\trestart, menu           \tDrop the current game
\th, help                 \tPrints help information
\tq, quit                 \tLeave";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reveal_and_flag() {
        assert_eq!(Command::parse("r 1 2").unwrap(), Command::Reveal((1, 2)));
        assert_eq!(Command::parse("FLAG 0 7").unwrap(), Command::Flag((0, 7)));
    }

    #[test]
    fn parses_presets_and_custom() {
        assert_eq!(
            Command::parse("medium").unwrap(),
            Command::Start(Difficulty::Medium.config())
        );
        assert_eq!(
            Command::parse("custom 5 3").unwrap(),
            Command::Start(GameConfig::new(5, 3).unwrap())
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("r 1").is_err());
        assert!(Command::parse("r a b").is_err());
        assert!(Command::parse("custom 2 4").is_err());
        assert!(Command::parse("expert").is_err());
    }

    #[test]
    fn restart_and_menu_both_reset() {
        assert_eq!(Command::parse("restart").unwrap(), Command::Reset);
        assert_eq!(Command::parse("menu").unwrap(), Command::Reset);
    }
}
