//! Game sessions built on the engine.

pub mod klondike;
