//! Move records: what a committed mutation did.
//!
//! Every successful mutating operation appends one `MoveRecord` to the
//! history. Each variant carries enough to invert it exactly, which is
//! what undo does.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::zones::PileId;

/// A committed mutation of the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveRecord {
    /// One card moved from the top of `from` to the top of `to`.
    Single { card: CardId, from: PileId, to: PileId },

    /// A tableau run moved as a unit. `cards` is bottom to top.
    Multi {
        cards: SmallVec<[CardId; 4]>,
        from: PileId,
        to: PileId,
    },

    /// Cards drawn from stock to waste, in draw order (the last one is
    /// the new waste top).
    Draw { cards: SmallVec<[CardId; 3]> },

    /// The whole waste turned back into the stock.
    Recycle { count: usize },

    /// A face-down tableau top turned face up.
    Flip { card: CardId, pile: PileId },
}

impl MoveRecord {
    /// True for user-initiated operations that count toward the move
    /// penalty. Flips are bookkeeping and do not.
    #[must_use]
    pub fn counts_as_move(&self) -> bool {
        !matches!(self, MoveRecord::Flip { .. })
    }

    /// Short type name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            MoveRecord::Single { .. } => "card_move",
            MoveRecord::Multi { .. } => "multi_card_move",
            MoveRecord::Draw { .. } => "stock_to_waste",
            MoveRecord::Recycle { .. } => "waste_to_stock",
            MoveRecord::Flip { .. } => "card_flip",
        }
    }
}

/// A history entry: the record plus the move counter at commit time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub record: MoveRecord,

    /// `move_count` right after this record was committed.
    pub move_number: u32,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(record: MoveRecord, move_number: u32) -> Self {
        Self {
            record,
            move_number,
        }
    }
}
