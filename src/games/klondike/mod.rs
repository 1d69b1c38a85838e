//! Klondike session.
//!
//! `KlondikeGame` owns one board and its state and is the only entry point
//! a host needs: it turns requests into executor calls, flips exposed
//! cards after each move, keeps lifetime statistics and notifies
//! observers after every committed change.
//!
//! ```
//! use klondike_engine::games::klondike::{KlondikeGameBuilder, Request};
//!
//! let mut game = KlondikeGameBuilder::new().seed(42).build();
//! game.handle(Request::Draw).unwrap();
//! assert_eq!(game.state().move_count, 1);
//! ```

mod game;
mod observer;
mod request;

pub use game::{KlondikeGame, KlondikeGameBuilder};
pub use observer::{StateChanged, StateObserver};
pub use request::{MoveReport, MoveRequest, Request, Response};
