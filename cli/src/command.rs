use anyhow::{Context, bail};
use pathgame_core::{Coord, Coord2, SessionEvent};

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Event(SessionEvent),
    Show,
    Json,
    Help,
    Quit,
}

pub(crate) const HELP: &str = "\
Commands:
  m <row> <col>   mark a cell as part of your route
  u <row> <col>   remove a mark
  t <row> <col>   toggle a mark
  e               evaluate your route against the shortest path
  r               reset and start a new round
  s               show the grid
  j               print the round as JSON
  h               show this help
  q               quit";

pub(crate) fn parse_command(line: &str) -> anyhow::Result<Command> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(Command::Show);
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "m" | "mark" => Command::Event(SessionEvent::Mark(parse_coords(&mut words)?)),
        "u" | "unmark" => Command::Event(SessionEvent::Unmark(parse_coords(&mut words)?)),
        "t" | "toggle" => Command::Event(SessionEvent::ToggleMark(parse_coords(&mut words)?)),
        "e" | "eval" | "evaluate" => Command::Event(SessionEvent::Evaluate),
        "r" | "reset" => Command::Event(SessionEvent::Reset),
        "s" | "show" => Command::Show,
        "j" | "json" => Command::Json,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => bail!("unknown command {other:?}, try 'h' for help"),
    };

    if let Some(extra) = words.next() {
        bail!("unexpected argument {extra:?}");
    }
    Ok(command)
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let row = parse_axis(words.next(), "row")?;
    let col = parse_axis(words.next(), "column")?;
    Ok((row, col))
}

fn parse_axis(word: Option<&str>, axis: &str) -> anyhow::Result<Coord> {
    let word = word.with_context(|| format!("missing {axis}"))?;
    word.parse()
        .with_context(|| format!("invalid {axis} {word:?}"))
}
