//! Building blocks shared by the pages

pub mod debounce;
pub mod roster;

pub use debounce::Debouncer;
pub use roster::{LoadState, Roster};
