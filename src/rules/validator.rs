//! Move legality.
//!
//! Pure checks: nothing here mutates. A failed check names its reason so
//! the caller can give feedback without guessing.

use crate::cards::{Card, CardId};
use crate::core::error::MoveRejection;
use crate::core::state::GameState;
use crate::zones::Pile;

/// Check a card against a destination, wherever the card sits in its
/// source pile.
///
/// Fails if the game is not in play, if source and destination are the
/// same pile, if the card is face-down, or if the destination refuses it.
pub fn validate_placement(
    state: &GameState,
    card: &Card,
    from: &Pile,
    to: &Pile,
) -> Result<(), MoveRejection> {
    if !state.is_playing() {
        return Err(MoveRejection::GameNotPlaying);
    }
    if from.id() == to.id() {
        return Err(MoveRejection::InvalidDestination);
    }
    if !card.is_face_up() {
        return Err(MoveRejection::CardFaceDown);
    }
    to.check_accept(card)
}

/// Validate moving the single card `card`, which must be the top of `from`.
pub fn validate_move(
    state: &GameState,
    card: CardId,
    from: &Pile,
    to: &Pile,
) -> Result<(), MoveRejection> {
    if !state.is_playing() {
        return Err(MoveRejection::GameNotPlaying);
    }
    let top = from
        .top_card()
        .filter(|top| top.id() == card)
        .ok_or(MoveRejection::CardNotAvailable)?;
    validate_placement(state, top, from, to)
}

/// Validate moving `cards` (bottom to top) as a unit.
///
/// `from` must be a tableau, and `cards` must be exactly the validated run
/// starting at the first card's index and reaching the top of `from`. The
/// first card must then be placeable on `to`. A run longer than one card
/// can never go to a foundation.
///
/// Returns the index in `from` where the run starts.
pub fn validate_multi_move(
    state: &GameState,
    cards: &[CardId],
    from: &Pile,
    to: &Pile,
) -> Result<usize, MoveRejection> {
    if !state.is_playing() {
        return Err(MoveRejection::GameNotPlaying);
    }
    let first = *cards.first().ok_or(MoveRejection::NotSequential)?;
    if !from.id().is_tableau() {
        return Err(MoveRejection::InvalidSource);
    }
    if cards.len() > 1 && to.id().is_foundation() {
        return Err(MoveRejection::InvalidDestination);
    }

    let start = from.position_of(first).ok_or(MoveRejection::CardNotAvailable)?;
    let bottom = &from.cards()[start];
    if !bottom.is_face_up() {
        return Err(MoveRejection::CardFaceDown);
    }

    let run = from.valid_sequence(start);
    let reaches_top = start + run.len() == from.len();
    let matches = run.len() == cards.len() && run.iter().zip(cards).all(|(c, id)| c.id() == *id);
    if !reaches_top || !matches {
        return Err(MoveRejection::NotSequential);
    }

    validate_placement(state, bottom, from, to)?;
    Ok(start)
}
