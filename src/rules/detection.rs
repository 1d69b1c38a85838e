//! Board-level queries: win, blocked, pending flips, analysis.

use serde::{Deserialize, Serialize};

use super::hint::{find_foundation_moves, CandidateMove, HintAdvisor};
use crate::cards::{CardId, DECK_SIZE};
use crate::zones::{Board, Pile, PileId};

const CARDS_PER_SUIT: usize = 13;

/// True iff every foundation holds a full suit.
#[must_use]
pub fn is_complete(foundations: &[Pile]) -> bool {
    foundations.iter().map(Pile::len).sum::<usize>() == DECK_SIZE
        && foundations.iter().all(|p| p.len() == CARDS_PER_SUIT)
}

/// No legal move or flip, and nothing left to draw or recycle.
#[must_use]
pub fn is_blocked(board: &Board) -> bool {
    board.stock().is_empty()
        && board.waste().is_empty()
        && HintAdvisor::find_legal_moves(board).is_empty()
}

/// Every tableau whose top card is face-down, with that card.
#[must_use]
pub fn find_cards_to_flip(tableaus: &[Pile]) -> Vec<(PileId, CardId)> {
    tableaus
        .iter()
        .filter_map(|pile| {
            pile.top_card()
                .filter(|card| !card.is_face_up())
                .map(|card| (pile.id(), card.id()))
        })
        .collect()
}

/// Face-up non-foundation tops that can go to a foundation right now.
#[must_use]
pub fn find_auto_completable(board: &Board) -> Vec<CandidateMove> {
    find_foundation_moves(board)
}

/// Counts describing a board position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub total_cards: usize,
    pub face_up_cards: usize,
    pub foundation_cards: usize,
    pub face_down_cards: usize,
    /// Face-up cards that are the top of their pile.
    pub available_cards: usize,
    /// Legal moves and flips.
    pub possible_moves: usize,
}

#[must_use]
pub fn analyze(board: &Board) -> Analysis {
    let mut analysis = Analysis {
        foundation_cards: board.foundation_total(),
        possible_moves: HintAdvisor::find_legal_moves(board).len(),
        ..Analysis::default()
    };

    for pile in board.all_piles() {
        analysis.total_cards += pile.len();
        let face_up = pile.cards().iter().filter(|c| c.is_face_up()).count();
        analysis.face_up_cards += face_up;
        analysis.face_down_cards += pile.len() - face_up;
        if pile.top_card().is_some_and(|c| c.is_face_up()) {
            analysis.available_cards += 1;
        }
    }
    analysis
}
