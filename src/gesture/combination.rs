// RoundWatch — Combination Detector
//
// Scans the three most recent commands for one of the fixed sequences. A
// sequence only counts when its first command is younger than the window.

use crate::config::{DudPattern, GestureConfig};
use crate::events::{Combination, Command};

use super::history::EdgeHistory;

type Rule = (Combination, [Command; 3]);

fn rules(dud: DudPattern) -> [Rule; 4] {
    use Command::*;
    let dud_sequence = match dud {
        DudPattern::AsObserved => [TiltUp, TiltDown, TiltUp],
        DudPattern::DownUpDown => [TiltDown, TiltUp, TiltDown],
    };
    [
        (Combination::Lrl, [TwistLeft, TwistRight, TwistLeft]),
        (Combination::Rlr, [TwistRight, TwistLeft, TwistRight]),
        (Combination::Udu, [TiltUp, TiltDown, TiltUp]),
        (Combination::Dud, dud_sequence),
    ]
}

/// Returns the combination expressed by `history` at `now_ms`, or
/// `Combination::None`.
///
/// Rules are checked in the order LRL, RLR, UDU, DUD and a later match
/// replaces an earlier one. With `DudPattern::AsObserved` that means
/// tilt-up/down/up reports `Dud`.
pub fn detect(history: &EdgeHistory<Command>, now_ms: u32, config: &GestureConfig) -> Combination {
    let oldest = history.oldest();
    if now_ms.wrapping_sub(oldest.at_ms) >= config.combination_window_ms {
        return Combination::None;
    }

    let sequence = history.values();
    rules(config.dud_pattern)
        .iter()
        .filter(|(_, pattern)| *pattern == sequence)
        .map(|(combination, _)| *combination)
        .last()
        .unwrap_or(Combination::None)
}
