//! The full set of piles for one game.
//!
//! `Board` owns the stock, waste, four foundations and seven tableaus.
//! All mutation in a game goes through the rule executor, which works on a
//! `&mut Board`; readers (hints, detection, observers) borrow it shared.
//!
//! ## Usage
//!
//! ```
//! use klondike_engine::zones::{Board, PileId};
//!
//! let board = Board::new();
//! assert_eq!(board.all_piles().count(), 13);
//! assert!(board.pile(PileId::Tableau(6)).is_empty());
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::pile::{Pile, PileId};
use crate::cards::{Card, CardId, DECK_SIZE};

/// Number of foundation piles.
pub const FOUNDATION_COUNT: usize = 4;

/// Number of tableau columns.
pub const TABLEAU_COUNT: usize = 7;

/// All thirteen piles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    stock: Pile,
    waste: Pile,
    foundations: [Pile; FOUNDATION_COUNT],
    tableaus: [Pile; TABLEAU_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a board with every pile empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stock: Pile::new(PileId::Stock),
            waste: Pile::new(PileId::Waste),
            foundations: std::array::from_fn(|i| Pile::new(PileId::Foundation(i as u8))),
            tableaus: std::array::from_fn(|i| Pile::new(PileId::Tableau(i as u8))),
        }
    }

    /// Every pile id in board order: stock, waste, foundations, tableaus.
    pub fn pile_ids() -> impl Iterator<Item = PileId> {
        [PileId::Stock, PileId::Waste]
            .into_iter()
            .chain((0..FOUNDATION_COUNT as u8).map(PileId::Foundation))
            .chain((0..TABLEAU_COUNT as u8).map(PileId::Tableau))
    }

    #[must_use]
    pub fn stock(&self) -> &Pile {
        &self.stock
    }

    pub fn stock_mut(&mut self) -> &mut Pile {
        &mut self.stock
    }

    #[must_use]
    pub fn waste(&self) -> &Pile {
        &self.waste
    }

    pub fn waste_mut(&mut self) -> &mut Pile {
        &mut self.waste
    }

    #[must_use]
    pub fn foundations(&self) -> &[Pile] {
        &self.foundations
    }

    #[must_use]
    pub fn tableaus(&self) -> &[Pile] {
        &self.tableaus
    }

    /// Tableau column by index. Panics if `index >= 7`.
    #[must_use]
    pub fn tableau(&self, index: usize) -> &Pile {
        &self.tableaus[index]
    }

    pub fn tableau_mut(&mut self, index: usize) -> &mut Pile {
        &mut self.tableaus[index]
    }

    /// Foundation by index. Panics if `index >= 4`.
    #[must_use]
    pub fn foundation(&self, index: usize) -> &Pile {
        &self.foundations[index]
    }

    pub fn foundation_mut(&mut self, index: usize) -> &mut Pile {
        &mut self.foundations[index]
    }

    /// Get a pile by id.
    ///
    /// Panics on an out-of-range foundation or tableau index.
    #[must_use]
    pub fn pile(&self, id: PileId) -> &Pile {
        match id {
            PileId::Stock => &self.stock,
            PileId::Waste => &self.waste,
            PileId::Foundation(i) => &self.foundations[i as usize],
            PileId::Tableau(i) => &self.tableaus[i as usize],
        }
    }

    pub fn pile_mut(&mut self, id: PileId) -> &mut Pile {
        match id {
            PileId::Stock => &mut self.stock,
            PileId::Waste => &mut self.waste,
            PileId::Foundation(i) => &mut self.foundations[i as usize],
            PileId::Tableau(i) => &mut self.tableaus[i as usize],
        }
    }

    /// True if `id` names a pile on this board.
    #[must_use]
    pub fn contains_pile(id: PileId) -> bool {
        match id {
            PileId::Stock | PileId::Waste => true,
            PileId::Foundation(i) => (i as usize) < FOUNDATION_COUNT,
            PileId::Tableau(i) => (i as usize) < TABLEAU_COUNT,
        }
    }

    /// Iterate over every pile in board order.
    pub fn all_piles(&self) -> impl Iterator<Item = &Pile> {
        [&self.stock, &self.waste]
            .into_iter()
            .chain(self.foundations.iter())
            .chain(self.tableaus.iter())
    }

    /// Locate a card: its pile and index within it.
    #[must_use]
    pub fn find_card(&self, id: CardId) -> Option<(PileId, usize)> {
        self.all_piles()
            .find_map(|pile| pile.position_of(id).map(|idx| (pile.id(), idx)))
    }

    /// Total cards across the four foundations.
    #[must_use]
    pub fn foundation_total(&self) -> usize {
        self.foundations.iter().map(Pile::len).sum()
    }

    /// Total cards across every pile.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.all_piles().map(Pile::len).sum()
    }

    /// Verify the pile set holds exactly the 52 distinct cards and every
    /// pile sits in its own slot.
    pub fn check_conservation(&self) -> Result<(), String> {
        for (pile, expected) in self.all_piles().zip(Self::pile_ids()) {
            if pile.id() != expected {
                return Err(format!("pile {} stored in slot for {}", pile.id(), expected));
            }
        }

        let mut seen = FxHashSet::default();
        for card in self.all_piles().flat_map(Pile::cards) {
            if !seen.insert(card.id()) {
                return Err(format!("card {} appears more than once", card.id()));
            }
        }

        if seen.len() != DECK_SIZE {
            return Err(format!("expected {} cards, found {}", DECK_SIZE, seen.len()));
        }
        Ok(())
    }

    /// Cards currently showing face-down on top of a tableau.
    pub fn face_down_tableau_tops(&self) -> impl Iterator<Item = (PileId, &Card)> {
        self.tableaus.iter().filter_map(|pile| {
            pile.top_card()
                .filter(|card| !card.is_face_up())
                .map(|card| (pile.id(), card))
        })
    }
}
