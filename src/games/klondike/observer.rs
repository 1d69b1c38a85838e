//! State-change notifications for the presentation layer.

use crate::core::state::GameState;
use crate::zones::Board;

/// Everything a renderer needs after a committed mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateChanged {
    pub board: Board,
    pub score: u32,
    pub move_count: u32,
    pub foundation_card_count: u32,
    pub elapsed_secs: u64,
    pub paused: bool,
    pub completed: bool,
}

impl StateChanged {
    #[must_use]
    pub fn capture(board: &Board, state: &GameState) -> Self {
        Self {
            board: board.clone(),
            score: state.score,
            move_count: state.move_count,
            foundation_card_count: state.foundation_card_count,
            elapsed_secs: state.elapsed_secs,
            paused: state.paused,
            completed: state.completed,
        }
    }
}

/// Receives notifications from a session. Observers only read.
pub trait StateObserver {
    fn on_state_changed(&mut self, change: &StateChanged);

    /// Advisory: the board has no legal action left.
    fn on_blocked(&mut self) {}
}

impl<F> StateObserver for F
where
    F: FnMut(&StateChanged),
{
    fn on_state_changed(&mut self, change: &StateChanged) {
        self(change);
    }
}
