use matchpairs_core as game;
use std::fmt::Write;

pub(crate) const HELP: &str = "p: play/restart, <n>: flip card n, q: quit";

const CELL_WIDTH: usize = 6;

fn cell(number: usize, card: &game::CardView) -> String {
    let face = if card.is_face_up() { card.label } else { "··" };
    format!("{:>2} {:^width$}", number, face, width = CELL_WIDTH)
}

/// Text rendering of a snapshot: stats, bests and the card grid.
pub(crate) fn board(snapshot: &game::Snapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Match Pairs · {}    [{}]",
        snapshot.mode_label,
        snapshot.start_label()
    );
    let _ = writeln!(
        out,
        "Time {}  Moves {}  Matched {}/{}    Best time {}  Best moves {}",
        snapshot.elapsed_display(),
        snapshot.move_count,
        snapshot.matched_pairs,
        snapshot.total_pairs,
        snapshot.best_time_display(),
        snapshot.best_moves_display(),
    );

    let mut number = 0;
    for row in snapshot.rows() {
        let line: Vec<String> = row
            .iter()
            .map(|card| {
                number += 1;
                cell(number, card)
            })
            .collect();
        let _ = writeln!(out, "{}", line.join(" | "));
    }

    match snapshot.phase {
        game::Phase::Countdown => {
            let _ = writeln!(out, ">>> {} <<<", snapshot.countdown);
        }
        game::Phase::Won => {
            let _ = writeln!(
                out,
                "Cleared in {} moves, {}",
                snapshot.move_count,
                snapshot.elapsed_display()
            );
        }
        game::Phase::Idle => {
            let _ = writeln!(out, "{}", HELP);
        }
        game::Phase::Preview | game::Phase::Playing => {}
    }
    out
}
