//! Undo integration tests.
//!
//! Undo must restore the exact previous board for every kind of record,
//! including the auto-flip that follows a move, and must leave the game
//! untouched when it refuses.

use klondike_engine::cards::{Card, Deck, Rank, Suit};
use klondike_engine::core::{DrawCount, EngineError, GameRng, GameState, MoveRecord, Settings, UndoError};
use klondike_engine::games::klondike::{KlondikeGameBuilder, MoveRequest, Request, Response};
use klondike_engine::persist::GameSnapshot;
use klondike_engine::rules::Hint;
use klondike_engine::zones::{Board, PileId};

fn up(suit: Suit, rank: u8) -> Card {
    Card::face_up(suit, Rank::new(rank).unwrap())
}

fn down(suit: Suit, rank: u8) -> Card {
    Card::new(suit, Rank::new(rank).unwrap())
}

fn resume(board: Board, settings: Settings) -> klondike_engine::KlondikeGame {
    let mut filled = board;
    for card in Deck::generate().cards() {
        if filled.find_card(card.id()).is_none() {
            filled.stock_mut().push(*card);
        }
    }
    let mut state = GameState::new(settings);
    state.start();
    state.foundation_card_count = filled.foundation_total() as u32;
    KlondikeGameBuilder::new().resume(GameSnapshot {
        saved_at: 0,
        state,
        board: filled,
        rng: GameRng::new(0).state(),
        deal: None,
    })
}

// =============================================================================
// Exact inversion
// =============================================================================

/// A run move and the flip it caused are reverted by one undo.
#[test]
fn test_undo_run_move_and_flip() {
    let mut board = Board::new();
    board
        .tableau_mut(0)
        .extend([down(Suit::Hearts, 12), up(Suit::Spades, 6), up(Suit::Diamonds, 5)]);
    board.tableau_mut(1).push(up(Suit::Hearts, 7));
    let mut game = resume(board, Settings::default());
    let before = game.board().clone();

    let report = game
        .move_cards(MoveRequest::new(up(Suit::Spades, 6).id(), PileId::Tableau(0), PileId::Tableau(1)))
        .unwrap();
    assert_eq!(report.flipped.len(), 1);

    let outcome = game.undo().unwrap();

    assert_eq!(game.board(), &before);
    assert_eq!(outcome.reverted.len(), 2);
    assert!(matches!(outcome.reverted[1], MoveRecord::Multi { .. }));
    assert_eq!(game.state().move_count, 0);
    assert!(game.state().history.is_empty());
}

/// Undoing a foundation move restores the counter and the score.
#[test]
fn test_undo_foundation_move_restores_score() {
    let mut board = Board::new();
    board.waste_mut().push(up(Suit::Clubs, 1));
    let mut game = resume(board, Settings::default());
    let score_before = game.state().score;

    game.move_cards(MoveRequest::new(up(Suit::Clubs, 1).id(), PileId::Waste, PileId::Foundation(2)))
        .unwrap();
    assert_eq!(game.state().foundation_card_count, 1);
    assert!(game.state().score > score_before);

    game.undo().unwrap();
    assert_eq!(game.state().foundation_card_count, 0);
    assert_eq!(game.state().score, score_before);
    assert_eq!(game.board().waste().top_card().unwrap().id(), up(Suit::Clubs, 1).id());
}

/// A full stock cycle of draws and a recycle can be undone back to the deal.
#[test]
fn test_undo_draws_and_recycle_back_to_deal() {
    for draw_count in [DrawCount::One, DrawCount::Three] {
        let mut game = KlondikeGameBuilder::new()
            .seed(31)
            .settings(Settings::default().with_draw_count(draw_count))
            .build();
        let dealt = game.board().clone();

        let mut ops = 0;
        while !game.board().stock().is_empty() {
            game.draw().unwrap();
            ops += 1;
        }
        // Recycle.
        game.draw().unwrap();
        ops += 1;
        // Draw again after the recycle.
        game.draw().unwrap();
        ops += 1;

        for _ in 0..ops {
            game.undo().unwrap();
        }
        assert_eq!(game.board(), &dealt);
        assert_eq!(game.state().move_count, 0);
        assert_eq!(game.undo(), Err(UndoError::NothingToUndo));
    }
}

/// Playing hints for a while and undoing everything returns to the deal.
#[test]
fn test_undo_random_play_back_to_start() {
    let mut game = KlondikeGameBuilder::new().seed(8).build();
    let dealt = game.board().clone();

    let mut done = 0;
    for _ in 0..60 {
        let Ok(Some(hint)) = game.hint() else {
            break;
        };
        let applied = match hint {
            Hint::Move(m) => game.move_cards(MoveRequest::new(m.card, m.from, m.to)).is_ok(),
            Hint::Flip { pile, .. } => game.flip(pile).is_ok(),
            Hint::DrawFromStock | Hint::RecycleWaste => game.draw().is_ok(),
        };
        assert!(applied, "hint {:?} was not playable", hint);
        if game.state().completed {
            return;
        }
        done += 1;
    }
    assert!(done > 0);

    while game.undo().is_ok() {}
    assert_eq!(game.board(), &dealt);
    assert_eq!(game.state().move_count, 0);
}

// =============================================================================
// Refusals
// =============================================================================

/// Undo refuses when disabled, and the session reports it as an engine error.
#[test]
fn test_undo_disabled() {
    let mut game = KlondikeGameBuilder::new()
        .seed(4)
        .settings(Settings::default().with_undo(false))
        .build();
    game.draw().unwrap();
    let board = game.board().clone();

    assert_eq!(game.handle(Request::Undo), Err(EngineError::Undo(UndoError::Disabled)));
    assert_eq!(game.board(), &board);
}

/// Nothing to undo on a fresh deal.
#[test]
fn test_undo_nothing() {
    let mut game = KlondikeGameBuilder::new().seed(4).build();
    assert_eq!(game.undo(), Err(UndoError::NothingToUndo));
}

/// History is bounded; undo stops at the oldest kept entry.
#[test]
fn test_undo_bounded_by_history() {
    let mut game = KlondikeGameBuilder::new()
        .seed(12)
        .settings(Settings::default().with_draw_count(DrawCount::One).with_max_history(3))
        .build();

    for _ in 0..5 {
        game.draw().unwrap();
    }
    assert_eq!(game.state().history.len(), 3);

    for _ in 0..3 {
        let response = game.handle(Request::Undo).unwrap();
        assert!(matches!(response, Response::Undone(_)));
    }
    assert_eq!(game.undo(), Err(UndoError::NothingToUndo));
    assert_eq!(game.board().waste().len(), 2);
    assert_eq!(game.state().move_count, 2);
}

/// When the history bound evicts a move, the flip it caused goes too, so
/// undo never turns that card back down on its own.
#[test]
fn test_undo_never_reverts_orphaned_flip() {
    let mut board = Board::new();
    board
        .tableau_mut(0)
        .extend([down(Suit::Clubs, 9), up(Suit::Hearts, 1)]);
    let mut game = resume(board, Settings::default().with_max_history(1));

    let report = game
        .move_cards(MoveRequest::new(up(Suit::Hearts, 1).id(), PileId::Tableau(0), PileId::Foundation(0)))
        .unwrap();
    assert_eq!(report.flipped.len(), 1);
    let after_move = game.board().clone();

    assert_eq!(game.undo(), Err(UndoError::NothingToUndo));
    assert_eq!(game.board(), &after_move);
    assert!(game.board().tableau(0).top_card().unwrap().is_face_up());
    assert_eq!(game.board().foundation(0).len(), 1);
    assert_eq!(game.state().move_count, 1);
}
