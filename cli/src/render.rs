use core::fmt::Write;

use pathgame_core::{CellView, EvaluationResult, SessionState, Snapshot};

fn glyph(view: CellView) -> char {
    match view {
        CellView::Empty => '.',
        CellView::Start => 'S',
        CellView::End => 'E',
        CellView::Obstacle => '#',
        CellView::Marked => 'x',
        CellView::OnPath => 'o',
        CellView::MarkedOnPath => '*',
    }
}

/// Text picture of the grid followed by the status line.
pub(crate) fn render(snapshot: &Snapshot) -> String {
    let (rows, cols) = snapshot.size;
    let mut out = String::new();

    out.push_str("    ");
    for col in 0..cols {
        let _ = write!(out, "{:>3}", col);
    }
    out.push('\n');

    for row in 0..rows {
        let _ = write!(out, "{:>3} ", row);
        for col in 0..cols {
            let _ = write!(out, "{:>3}", snapshot.view_at((row, col)).map_or(' ', glyph));
        }
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&status(snapshot));
    out
}

fn status(snapshot: &Snapshot) -> String {
    match (snapshot.state, snapshot.result) {
        (SessionState::Ended, Some(result)) => format!(
            "Your route compared to the shortest path:\n\
             Blocks placed: {} vs. shortest path length: {}\n\
             Press r to reset the game and start a new one",
            result.mark_count, result.optimal_length
        ),
        _ => format!(
            "Round {} | Blocks placed: {}\nPress e to evaluate your route",
            snapshot.round, snapshot.mark_count
        ),
    }
}

/// The message shown after an evaluation.
pub(crate) fn verdict(result: &EvaluationResult) -> &'static str {
    if !result.valid {
        "Invalid path! Make sure your marks connect S and E."
    } else if result.player_wins {
        "Congratulations! You found the shortest path!"
    } else {
        "You lose! The computer found a better path."
    }
}
