//! Mutating operations on a board.
//!
//! Every function here validates first and mutates only on success, then
//! appends one `MoveRecord` to the state's history. Card count is checked
//! with `debug_assert!` after each mutation.
//!
//! Undo runs on clones of the board and state and commits only if every
//! inversion in the step matched the piles, so a failed undo leaves the
//! game untouched.

use smallvec::SmallVec;
use tracing::debug;

use super::detection::find_auto_completable;
use super::hint::CandidateMove;
use super::validator::{validate_move, validate_multi_move};
use crate::cards::CardId;
use crate::core::action::MoveRecord;
use crate::core::error::{DrawError, MoveRejection, UndoError};
use crate::core::state::GameState;
use crate::zones::{Board, PileId};

/// Result of a committed card move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Moved cards, bottom to top.
    pub cards: SmallVec<[CardId; 4]>,
    pub from: PileId,
    pub to: PileId,
    /// The move put the last card on the foundations.
    pub completed: bool,
}

/// Result of a draw request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Cards moved to the waste, in draw order.
    Drawn(SmallVec<[CardId; 3]>),
    /// The stock was empty; this many waste cards were turned back.
    Recycled(usize),
}

/// Result of an undo step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UndoOutcome {
    /// Inverted records, most recent first.
    pub reverted: Vec<MoveRecord>,
    /// Piles whose contents changed.
    pub changed: Vec<PileId>,
}

fn check_piles(from: PileId, to: PileId) -> Result<(), MoveRejection> {
    if !Board::contains_pile(from) {
        return Err(MoveRejection::InvalidSource);
    }
    if !Board::contains_pile(to) {
        return Err(MoveRejection::InvalidDestination);
    }
    Ok(())
}

/// Apply the foundation counters for `count` cards leaving `from` for `to`.
/// Returns true if the foundations just became full.
fn adjust_foundation_count(state: &mut GameState, from: PileId, to: PileId, count: usize) -> bool {
    let mut full = false;
    for _ in 0..count {
        if from.is_foundation() {
            state.remove_from_foundation();
        }
        if to.is_foundation() {
            full = state.add_to_foundation();
        }
    }
    full
}

/// Move the top card of `from` onto `to`.
pub fn execute_single_move(
    state: &mut GameState,
    board: &mut Board,
    card: CardId,
    from: PileId,
    to: PileId,
) -> Result<MoveOutcome, MoveRejection> {
    check_piles(from, to)?;
    validate_move(state, card, board.pile(from), board.pile(to))?;

    let total = board.total_cards();
    let moved = board.pile_mut(from).pop().ok_or(MoveRejection::CardNotAvailable)?;
    board.pile_mut(to).push(moved);
    debug_assert_eq!(board.total_cards(), total);

    let full = adjust_foundation_count(state, from, to, 1);
    state.record(MoveRecord::Single { card, from, to });
    if full {
        state.complete();
    }

    Ok(MoveOutcome {
        cards: SmallVec::from_slice(&[card]),
        from,
        to,
        completed: state.completed,
    })
}

/// Move the run `cards` (bottom to top) from a tableau onto `to`.
pub fn execute_multi_move(
    state: &mut GameState,
    board: &mut Board,
    cards: &[CardId],
    from: PileId,
    to: PileId,
) -> Result<MoveOutcome, MoveRejection> {
    check_piles(from, to)?;
    let start = validate_multi_move(state, cards, board.pile(from), board.pile(to))?;

    let total = board.total_cards();
    let run = board.pile_mut(from).split_off(start);
    let count = run.len();
    board.pile_mut(to).extend(run);
    debug_assert_eq!(board.total_cards(), total);

    let full = adjust_foundation_count(state, from, to, count);
    let ids: SmallVec<[CardId; 4]> = SmallVec::from_slice(cards);
    state.record(MoveRecord::Multi {
        cards: ids.clone(),
        from,
        to,
    });
    if full {
        state.complete();
    }

    Ok(MoveOutcome {
        cards: ids,
        from,
        to,
        completed: state.completed,
    })
}

/// Draw up to `draw_count` cards from the stock, or recycle the waste if
/// the stock is empty.
pub fn draw_from_stock(state: &mut GameState, board: &mut Board) -> Result<DrawOutcome, DrawError> {
    if !state.is_playing() {
        return Err(DrawError::GameNotPlaying);
    }
    if board.stock().is_empty() {
        return recycle_waste_to_stock(state, board).map(DrawOutcome::Recycled);
    }

    let total = board.total_cards();
    let n = state.settings.draw_count.get().min(board.stock().len());
    let mut drawn: SmallVec<[CardId; 3]> = SmallVec::new();
    for _ in 0..n {
        let Some(mut card) = board.stock_mut().pop() else {
            break;
        };
        card.turn_face_up();
        drawn.push(card.id());
        board.waste_mut().push(card);
    }
    debug_assert_eq!(board.total_cards(), total);

    state.record(MoveRecord::Draw {
        cards: drawn.clone(),
    });
    Ok(DrawOutcome::Drawn(drawn))
}

/// Turn the whole waste back into the stock, face-down, so that the next
/// draws repeat the original order.
///
/// Returns the number of cards moved.
pub fn recycle_waste_to_stock(state: &mut GameState, board: &mut Board) -> Result<usize, DrawError> {
    if !state.is_playing() {
        return Err(DrawError::GameNotPlaying);
    }
    if !board.stock().is_empty() {
        return Err(DrawError::StockNotEmpty);
    }
    if board.waste().is_empty() {
        return Err(DrawError::NoCardsLeft);
    }

    let mut cards = board.waste_mut().take_all();
    let count = cards.len();
    cards.reverse();
    for card in &mut cards {
        card.turn_face_down();
    }
    board.stock_mut().extend(cards);

    state.record(MoveRecord::Recycle { count });
    Ok(count)
}

/// Turn up the face-down top card of a tableau.
pub fn flip_card(state: &mut GameState, board: &mut Board, pile: PileId) -> Result<CardId, MoveRejection> {
    if !state.is_playing() {
        return Err(MoveRejection::GameNotPlaying);
    }
    if !pile.is_tableau() || !Board::contains_pile(pile) {
        return Err(MoveRejection::InvalidSource);
    }
    let card = board
        .pile_mut(pile)
        .top_card_mut()
        .filter(|c| !c.is_face_up())
        .ok_or(MoveRejection::CardNotAvailable)?;
    card.turn_face_up();
    let id = card.id();

    state.record(MoveRecord::Flip { card: id, pile });
    Ok(id)
}

/// Flip every face-down tableau top, recording each flip.
pub fn flip_exposed_cards(state: &mut GameState, board: &mut Board) -> Vec<(PileId, CardId)> {
    let mut flipped = Vec::new();
    for i in 0..board.tableaus().len() {
        let pile = board.tableau_mut(i);
        let id = pile.id();
        if let Some(card) = pile.top_card_mut().filter(|c| !c.is_face_up()) {
            card.turn_face_up();
            let card_id = card.id();
            state.record(MoveRecord::Flip { card: card_id, pile: id });
            flipped.push((id, card_id));
        }
    }
    flipped
}

/// Move every auto-completable card to a foundation, flipping exposed
/// tableau cards as it goes, until nothing more moves.
///
/// Returns the moves made, in order.
pub fn execute_auto_complete(state: &mut GameState, board: &mut Board) -> Vec<CandidateMove> {
    let mut made = Vec::new();
    while state.is_playing() {
        let Some(next) = find_auto_completable(board).into_iter().next() else {
            break;
        };
        if execute_single_move(state, board, next.card, next.from, next.to).is_err() {
            break;
        }
        made.push(next);
        flip_exposed_cards(state, board);
    }
    if !made.is_empty() {
        debug!(moved = made.len(), completed = state.completed, "auto-complete finished");
    }
    made
}

/// Revert the latest user action together with any flips recorded after
/// it. Flips are never undone on their own, so a history holding only
/// flips has nothing to undo.
pub fn undo(state: &mut GameState, board: &mut Board) -> Result<UndoOutcome, UndoError> {
    if !state.is_playing() {
        return Err(UndoError::GameNotPlaying);
    }
    if !state.settings.allow_undo {
        return Err(UndoError::Disabled);
    }
    if state.history.is_empty() {
        return Err(UndoError::NothingToUndo);
    }

    let mut next_board = board.clone();
    let mut next_state = state.clone();
    let mut reverted = Vec::new();
    let mut changed: Vec<PileId> = Vec::new();

    let mut reached_move = false;
    while let Some(entry) = next_state.pop_entry() {
        revert(&mut next_state, &mut next_board, &entry.record, &mut changed)?;
        let counted = entry.record.counts_as_move();
        reverted.push(entry.record);
        if counted {
            reached_move = true;
            break;
        }
    }
    if !reached_move {
        return Err(UndoError::NothingToUndo);
    }
    debug_assert_eq!(next_board.total_cards(), board.total_cards());

    *board = next_board;
    *state = next_state;
    debug!(records = reverted.len(), moves = state.move_count, "undo applied");
    Ok(UndoOutcome { reverted, changed })
}

fn mark(changed: &mut Vec<PileId>, ids: &[PileId]) {
    for id in ids {
        if !changed.contains(id) {
            changed.push(*id);
        }
    }
}

fn top_ids_match(board: &Board, pile: PileId, ids: &[CardId]) -> bool {
    let cards = board.pile(pile).cards();
    cards.len() >= ids.len()
        && cards[cards.len() - ids.len()..]
            .iter()
            .zip(ids)
            .all(|(c, id)| c.id() == *id)
}

fn revert(
    state: &mut GameState,
    board: &mut Board,
    record: &MoveRecord,
    changed: &mut Vec<PileId>,
) -> Result<(), UndoError> {
    match record {
        MoveRecord::Single { card, from, to } => {
            revert_move(state, board, std::slice::from_ref(card), *from, *to)?;
            mark(changed, &[*from, *to]);
        }
        MoveRecord::Multi { cards, from, to } => {
            revert_move(state, board, cards, *from, *to)?;
            mark(changed, &[*from, *to]);
        }
        MoveRecord::Draw { cards } => {
            if !top_ids_match(board, PileId::Waste, cards) {
                return Err(UndoError::HistoryMismatch);
            }
            let start = board.waste().len() - cards.len();
            let mut drawn = board.waste_mut().split_off(start);
            drawn.reverse();
            for card in &mut drawn {
                card.turn_face_down();
            }
            board.stock_mut().extend(drawn);
            mark(changed, &[PileId::Stock, PileId::Waste]);
        }
        MoveRecord::Recycle { count } => {
            if board.stock().len() != *count || !board.waste().is_empty() {
                return Err(UndoError::HistoryMismatch);
            }
            let mut cards = board.stock_mut().take_all();
            cards.reverse();
            for card in &mut cards {
                card.turn_face_up();
            }
            board.waste_mut().extend(cards);
            mark(changed, &[PileId::Stock, PileId::Waste]);
        }
        MoveRecord::Flip { card, pile } => {
            if !Board::contains_pile(*pile) {
                return Err(UndoError::HistoryMismatch);
            }
            let top = board
                .pile_mut(*pile)
                .top_card_mut()
                .filter(|c| c.id() == *card && c.is_face_up())
                .ok_or(UndoError::HistoryMismatch)?;
            top.turn_face_down();
            mark(changed, &[*pile]);
        }
    }
    Ok(())
}

fn revert_move(
    state: &mut GameState,
    board: &mut Board,
    cards: &[CardId],
    from: PileId,
    to: PileId,
) -> Result<(), UndoError> {
    if !Board::contains_pile(from) || !Board::contains_pile(to) || !top_ids_match(board, to, cards) {
        return Err(UndoError::HistoryMismatch);
    }
    let start = board.pile(to).len() - cards.len();
    let run = board.pile_mut(to).split_off(start);
    board.pile_mut(from).extend(run);
    // Undo runs the counters backwards: cards leave `to` for `from`.
    adjust_foundation_count(state, to, from, cards.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};
    use crate::core::action::HistoryEntry;
    use crate::core::config::{DrawCount, Settings};

    fn up(suit: Suit, rank: u8) -> Card {
        Card::face_up(suit, Rank::new(rank).unwrap())
    }

    fn down(suit: Suit, rank: u8) -> Card {
        Card::new(suit, Rank::new(rank).unwrap())
    }

    fn playing(settings: Settings) -> GameState {
        let mut state = GameState::new(settings);
        state.start();
        state
    }

    #[test]
    fn test_single_move_to_foundation() {
        let mut state = playing(Settings::default());
        let mut board = Board::new();
        board.waste_mut().push(up(Suit::Hearts, 1));

        let outcome = execute_single_move(
            &mut state,
            &mut board,
            up(Suit::Hearts, 1).id(),
            PileId::Waste,
            PileId::Foundation(0),
        )
        .unwrap();

        assert_eq!(outcome.cards.as_slice(), &[up(Suit::Hearts, 1).id()]);
        assert!(!outcome.completed);
        assert_eq!(board.foundation(0).len(), 1);
        assert!(board.waste().is_empty());
        assert_eq!(state.foundation_card_count, 1);
        assert_eq!(state.move_count, 1);
        assert_eq!(state.score, 510);
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut state = playing(Settings::default());
        let mut board = Board::new();
        board.waste_mut().push(up(Suit::Diamonds, 3));
        let before = board.clone();

        let result = execute_single_move(
            &mut state,
            &mut board,
            up(Suit::Diamonds, 3).id(),
            PileId::Waste,
            PileId::Foundation(0),
        );

        assert_eq!(result, Err(MoveRejection::WrongDestinationRank));
        assert_eq!(board, before);
        assert!(state.history.is_empty());
        assert_eq!(state.move_count, 0);
    }

    #[test]
    fn test_unknown_pile_rejected() {
        let mut state = playing(Settings::default());
        let mut board = Board::new();
        board.waste_mut().push(up(Suit::Spades, 13));

        assert_eq!(
            execute_single_move(&mut state, &mut board, up(Suit::Spades, 13).id(), PileId::Waste, PileId::Tableau(7)),
            Err(MoveRejection::InvalidDestination)
        );
        assert_eq!(
            execute_single_move(&mut state, &mut board, up(Suit::Spades, 13).id(), PileId::Foundation(9), PileId::Tableau(0)),
            Err(MoveRejection::InvalidSource)
        );
    }

    #[test]
    fn test_multi_move_run() {
        let mut state = playing(Settings::default());
        let mut board = Board::new();
        board
            .tableau_mut(0)
            .extend([down(Suit::Clubs, 9), up(Suit::Spades, 6), up(Suit::Diamonds, 5), up(Suit::Clubs, 4)]);
        board.tableau_mut(1).push(up(Suit::Hearts, 7));
        let run = [up(Suit::Spades, 6).id(), up(Suit::Diamonds, 5).id(), up(Suit::Clubs, 4).id()];

        execute_multi_move(&mut state, &mut board, &run, PileId::Tableau(0), PileId::Tableau(1)).unwrap();

        assert_eq!(board.tableau(0).len(), 1);
        let ids: Vec<CardId> = board.tableau(1).cards().iter().map(Card::id).collect();
        assert_eq!(ids, [&[up(Suit::Hearts, 7).id()][..], &run[..]].concat());
        assert_eq!(state.move_count, 1);

        let flipped = flip_exposed_cards(&mut state, &mut board);
        assert_eq!(flipped, vec![(PileId::Tableau(0), down(Suit::Clubs, 9).id())]);
        assert!(board.tableau(0).top_card().unwrap().is_face_up());
        assert_eq!(state.move_count, 1);
        assert_eq!(state.history.len(), 2);
    }

    #[test]
    fn test_draw_three_in_order() {
        let mut state = playing(Settings::default().with_draw_count(DrawCount::Three));
        let mut board = Board::new();
        // Top of the stock is the last element.
        board.stock_mut().extend([down(Suit::Clubs, 5), down(Suit::Clubs, 4), down(Suit::Clubs, 3), down(Suit::Clubs, 2)]);

        let outcome = draw_from_stock(&mut state, &mut board).unwrap();

        let expected: SmallVec<[CardId; 3]> = SmallVec::from_slice(&[
            down(Suit::Clubs, 2).id(),
            down(Suit::Clubs, 3).id(),
            down(Suit::Clubs, 4).id(),
        ]);
        assert_eq!(outcome, DrawOutcome::Drawn(expected));
        assert_eq!(board.waste().top_card().unwrap().id(), down(Suit::Clubs, 4).id());
        assert!(board.waste().cards().iter().all(|c| c.is_face_up()));
        assert_eq!(board.stock().len(), 1);

        // Fewer left than the draw count.
        let outcome = draw_from_stock(&mut state, &mut board).unwrap();
        assert_eq!(outcome, DrawOutcome::Drawn(SmallVec::from_slice(&[down(Suit::Clubs, 5).id()])));
    }

    #[test]
    fn test_draw_recycles_when_stock_empty() {
        let mut state = playing(Settings::default().with_draw_count(DrawCount::One));
        let mut board = Board::new();
        board.stock_mut().extend([down(Suit::Clubs, 3), down(Suit::Clubs, 2)]);

        draw_from_stock(&mut state, &mut board).unwrap();
        draw_from_stock(&mut state, &mut board).unwrap();
        assert!(board.stock().is_empty());

        assert_eq!(draw_from_stock(&mut state, &mut board), Ok(DrawOutcome::Recycled(2)));
        assert_eq!(board.stock().cards(), &[down(Suit::Clubs, 3), down(Suit::Clubs, 2)]);
        assert!(board.waste().is_empty());
        assert_eq!(state.move_count, 3);
    }

    #[test]
    fn test_draw_with_nothing_left() {
        let mut state = playing(Settings::default());
        let mut board = Board::new();
        assert_eq!(draw_from_stock(&mut state, &mut board), Err(DrawError::NoCardsLeft));
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_recycle_requires_empty_stock() {
        let mut state = playing(Settings::default());
        let mut board = Board::new();
        board.stock_mut().push(down(Suit::Clubs, 2));
        board.waste_mut().push(up(Suit::Clubs, 3));

        assert_eq!(recycle_waste_to_stock(&mut state, &mut board), Err(DrawError::StockNotEmpty));
    }

    #[test]
    fn test_not_playing() {
        let mut state = GameState::default();
        let mut board = Board::new();
        board.stock_mut().push(down(Suit::Clubs, 2));

        assert_eq!(draw_from_stock(&mut state, &mut board), Err(DrawError::GameNotPlaying));
        assert_eq!(undo(&mut state, &mut board), Err(UndoError::GameNotPlaying));
        assert_eq!(flip_card(&mut state, &mut board, PileId::Tableau(0)), Err(MoveRejection::GameNotPlaying));
    }

    #[test]
    fn test_flip_card() {
        let mut state = playing(Settings::default());
        let mut board = Board::new();
        board.tableau_mut(3).push(down(Suit::Hearts, 8));

        assert_eq!(flip_card(&mut state, &mut board, PileId::Tableau(3)), Ok(down(Suit::Hearts, 8).id()));
        assert_eq!(
            flip_card(&mut state, &mut board, PileId::Tableau(3)),
            Err(MoveRejection::CardNotAvailable)
        );
        assert_eq!(flip_card(&mut state, &mut board, PileId::Waste), Err(MoveRejection::InvalidSource));
        assert_eq!(state.move_count, 0);
    }

    #[test]
    fn test_undo_move_with_flip() {
        let mut state = playing(Settings::default());
        let mut board = Board::new();
        board.tableau_mut(0).extend([down(Suit::Clubs, 9), up(Suit::Hearts, 1)]);
        let before = board.clone();

        execute_single_move(&mut state, &mut board, up(Suit::Hearts, 1).id(), PileId::Tableau(0), PileId::Foundation(0))
            .unwrap();
        flip_exposed_cards(&mut state, &mut board);

        let outcome = undo(&mut state, &mut board).unwrap();

        assert_eq!(outcome.reverted.len(), 2);
        assert!(matches!(outcome.reverted[0], MoveRecord::Flip { .. }));
        assert!(outcome.changed.contains(&PileId::Foundation(0)));
        assert_eq!(board, before);
        assert_eq!(state.move_count, 0);
        assert_eq!(state.foundation_card_count, 0);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_undo_refuses_lone_flips() {
        let mut state = playing(Settings::default());
        let mut board = Board::new();
        board.tableau_mut(0).push(up(Suit::Clubs, 9));
        state.history.push_back(HistoryEntry::new(
            MoveRecord::Flip {
                card: up(Suit::Clubs, 9).id(),
                pile: PileId::Tableau(0),
            },
            0,
        ));
        let board_before = board.clone();
        let state_before = state.clone();

        assert_eq!(undo(&mut state, &mut board), Err(UndoError::NothingToUndo));
        assert_eq!(board, board_before);
        assert_eq!(state, state_before);
    }

    #[test]
    fn test_undo_draw_and_recycle() {
        let mut state = playing(Settings::default().with_draw_count(DrawCount::Three));
        let mut board = Board::new();
        board.stock_mut().extend([down(Suit::Clubs, 5), down(Suit::Clubs, 4), down(Suit::Clubs, 3), down(Suit::Clubs, 2)]);
        let start = board.clone();

        draw_from_stock(&mut state, &mut board).unwrap();
        draw_from_stock(&mut state, &mut board).unwrap();
        let drained = board.clone();
        draw_from_stock(&mut state, &mut board).unwrap(); // recycle

        undo(&mut state, &mut board).unwrap();
        assert_eq!(board, drained);

        undo(&mut state, &mut board).unwrap();
        undo(&mut state, &mut board).unwrap();
        assert_eq!(board, start);
        assert_eq!(undo(&mut state, &mut board), Err(UndoError::NothingToUndo));
    }

    #[test]
    fn test_undo_disabled() {
        let mut state = playing(Settings::default().with_undo(false));
        let mut board = Board::new();
        board.stock_mut().push(down(Suit::Clubs, 2));
        draw_from_stock(&mut state, &mut board).unwrap();

        assert_eq!(undo(&mut state, &mut board), Err(UndoError::Disabled));
        assert_eq!(board.waste().len(), 1);
    }

    #[test]
    fn test_undo_mismatch_leaves_game_untouched() {
        let mut state = playing(Settings::default());
        let mut board = Board::new();
        board.waste_mut().push(up(Suit::Hearts, 1));
        execute_single_move(&mut state, &mut board, up(Suit::Hearts, 1).id(), PileId::Waste, PileId::Foundation(0))
            .unwrap();

        // Tamper with the board behind the history's back.
        let card = board.foundation_mut(0).pop().unwrap();
        board.foundation_mut(1).push(card);
        let board_before = board.clone();
        let state_before = state.clone();

        assert_eq!(undo(&mut state, &mut board), Err(UndoError::HistoryMismatch));
        assert_eq!(board, board_before);
        assert_eq!(state, state_before);
    }

    #[test]
    fn test_auto_complete_finishes_game() {
        let mut state = playing(Settings::default());
        let mut board = Board::new();
        // Each suit runs King (bottom) to Ace (top) down one column.
        for (i, suit) in Suit::ALL.iter().enumerate() {
            board
                .tableau_mut(i)
                .extend((1..=13).rev().map(|r| up(*suit, r)));
        }
        board.check_conservation().unwrap();

        let made = execute_auto_complete(&mut state, &mut board);

        assert_eq!(made.len(), 52);
        assert!(state.completed);
        assert_eq!(board.foundation_total(), 52);
        assert_eq!(state.foundation_card_count, 52);
        assert!(board.tableaus().iter().all(|p| p.is_empty()));
    }
}
