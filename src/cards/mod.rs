//! Image catalog, cards and the shuffled board.
//!
//! ## Catalog
//!
//! An ordered list of image pairs. A tier with `n` pairs uses the first
//! `n` entries.
//!
//! ## Board
//!
//! The dealt, shuffled sequence of cards for one game. Cards are
//! immutable; face-up state is tracked by the engine.

pub mod board;
pub mod catalog;

pub use board::{Board, Card};
pub use catalog::{ImageCatalog, ImageId, ImagePair};
