//! Hint advisor: enumerate legal moves and pick a good one.
//!
//! The ordering is a heuristic, not a solver. It keeps foundations moving,
//! reveals hidden cards early, and only falls back to the stock when the
//! layout offers nothing.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Rank};
use crate::zones::{Board, Pile, PileId};

/// A legal card move found on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateMove {
    /// The moved card (bottom card of a run).
    pub card: CardId,
    pub from: PileId,
    pub to: PileId,
    /// Cards moved; more than one only for tableau runs.
    pub count: usize,
    /// The move would leave a face-down card on top of `from`.
    pub exposes_face_down: bool,
}

/// A suggested action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hint {
    Move(CandidateMove),
    /// Turn up the face-down top of a tableau.
    Flip { pile: PileId, card: CardId },
    DrawFromStock,
    RecycleWaste,
}

/// Read-only scanner over a board.
pub struct HintAdvisor;

impl HintAdvisor {
    /// Every legal move and flip, in scan order: foundation moves, waste to
    /// tableau, tableau to tableau, flips.
    ///
    /// Foundation cards are never proposed as sources. A King-led run
    /// already at the bottom of its column is not proposed for an empty
    /// column, since that changes nothing.
    #[must_use]
    pub fn find_legal_moves(board: &Board) -> Vec<Hint> {
        let mut hints = Vec::new();

        for candidate in find_foundation_moves(board) {
            hints.push(Hint::Move(candidate));
        }

        if let Some(card) = board.waste().top_card().filter(|c| c.is_face_up()) {
            for to in board.tableaus() {
                if to.can_accept(card) {
                    hints.push(Hint::Move(CandidateMove {
                        card: card.id(),
                        from: PileId::Waste,
                        to: to.id(),
                        count: 1,
                        exposes_face_down: false,
                    }));
                }
            }
        }

        for from in board.tableaus() {
            let Some(run_start) = from.movable_run_start() else {
                continue;
            };
            for start in run_start..from.len() {
                let card = &from.cards()[start];
                for to in board.tableaus() {
                    if to.id() == from.id() {
                        continue;
                    }
                    if start == 0 && to.is_empty() {
                        continue;
                    }
                    if to.can_accept(card) {
                        hints.push(Hint::Move(CandidateMove {
                            card: card.id(),
                            from: from.id(),
                            to: to.id(),
                            count: from.len() - start,
                            exposes_face_down: exposes_face_down(from, start),
                        }));
                    }
                }
            }
        }

        for (pile, card) in board.face_down_tableau_tops() {
            hints.push(Hint::Flip {
                pile,
                card: card.id(),
            });
        }

        hints
    }

    /// Pick one action, in priority order:
    ///
    /// 1. a foundation move, Aces and Twos first
    /// 2. a flip
    /// 3. a tableau placement: King into an empty column, then a tableau
    ///    move that exposes a face-down card, then waste to tableau, then
    ///    any other tableau move
    /// 4. draw from the stock
    /// 5. recycle the waste
    ///
    /// `None` means the board is blocked.
    #[must_use]
    pub fn suggest_best_move(board: &Board) -> Option<Hint> {
        let hints = Self::find_legal_moves(board);
        let moves: Vec<&CandidateMove> = hints
            .iter()
            .filter_map(|h| match h {
                Hint::Move(m) => Some(m),
                _ => None,
            })
            .collect();

        let to_foundation: Vec<&CandidateMove> =
            moves.iter().copied().filter(|m| m.to.is_foundation()).collect();
        if let Some(m) = to_foundation
            .iter()
            .find(|m| m.card.rank <= Rank::TWO)
            .or_else(|| to_foundation.first())
        {
            return Some(Hint::Move(**m));
        }

        if let Some(flip) = hints.iter().find(|h| matches!(h, Hint::Flip { .. })) {
            return Some(*flip);
        }

        let to_tableau: Vec<&CandidateMove> =
            moves.iter().copied().filter(|m| m.to.is_tableau()).collect();
        let pick = to_tableau
            .iter()
            .find(|m| board.pile(m.to).is_empty())
            .or_else(|| to_tableau.iter().find(|m| m.from.is_tableau() && m.exposes_face_down))
            .or_else(|| to_tableau.iter().find(|m| m.from == PileId::Waste))
            .or_else(|| to_tableau.first());
        if let Some(m) = pick {
            return Some(Hint::Move(**m));
        }

        if !board.stock().is_empty() {
            return Some(Hint::DrawFromStock);
        }
        if !board.waste().is_empty() {
            return Some(Hint::RecycleWaste);
        }
        None
    }
}

/// Every face-up waste or tableau top that fits a foundation.
#[must_use]
pub fn find_foundation_moves(board: &Board) -> Vec<CandidateMove> {
    let mut found = Vec::new();
    let sources = std::iter::once(board.waste()).chain(board.tableaus().iter());

    for from in sources {
        let Some(card) = from.top_card().filter(|c| c.is_face_up()) else {
            continue;
        };
        for to in board.foundations() {
            if to.can_accept(card) {
                found.push(CandidateMove {
                    card: card.id(),
                    from: from.id(),
                    to: to.id(),
                    count: 1,
                    exposes_face_down: exposes_face_down(from, from.len() - 1),
                });
            }
        }
    }
    found
}

fn exposes_face_down(from: &Pile, start: usize) -> bool {
    from.id().is_tableau() && start > 0 && !from.cards()[start - 1].is_face_up()
}
