// RoundWatch — Flick Command Debouncer
//
// A command is a tilt immediately followed by its opposite (a flick). The
// pair is read from the two oldest slots of the tilt history, so the command
// is raised once the flick has been followed by any further edge, usually the
// return to rest.

use crate::events::{Command, TiltState};

use super::history::EdgeHistory;

/// Map an ordered pair of tilt states to the flick command it represents.
/// Only the six antiparallel pairs produce a command.
pub fn flick(first: TiltState, second: TiltState) -> Command {
    use TiltState::*;
    match (first, second) {
        (TiltLeft, TiltRight) => Command::TiltLeft,
        (TiltRight, TiltLeft) => Command::TiltRight,
        (TiltUp, TiltDown) => Command::TiltUp,
        (TiltDown, TiltUp) => Command::TiltDown,
        (TwistLeft, TwistRight) => Command::TwistLeft,
        (TwistRight, TwistLeft) => Command::TwistRight,
        _ => Command::None,
    }
}

/// The command currently expressed by `history`, if any.
pub fn from_history(history: &EdgeHistory<TiltState>) -> Command {
    let [first, second, _] = history.entries();
    flick(first.value, second.value)
}
