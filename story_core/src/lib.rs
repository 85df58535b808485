//! # Story Core (WordForge)
//!
//! The engine behind the WordForge story canvas. This crate owns the mutable
//! board state - visible cards, the plot archive, the creative basket - and
//! the merge/split state machine that folds plots into chapters and unfolds
//! them again, plus the data contract of the external plot-generation call.
//!
//! ## Core Components
//!
//! - **board**: card collection, plot archive, basket, and the `StoryBoard`
//!   orchestrator the UI layer talks to
//! - **merge_split**: the pure transformation engine for chapter folding
//! - **generation**: request assembly and response parsing for the external
//!   text-generation collaborator
//!
//! ## Design Philosophy
//!
//! - **Owned state**: all mutation goes through one `StoryBoard` value; there
//!   is no process-global store
//! - **Forgiving operations**: inapplicable merges, splits, and toggles are
//!   observable no-ops, never hard failures
//! - **Lossless folding**: every plot card ever created stays retrievable
//!   from the archive, so splitting a chapter restores its plots intact

pub mod board;
pub mod generation;
pub mod merge_split;

pub use board::*;
pub use generation::*;
pub use merge_split::*;
