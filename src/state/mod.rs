//! Table view state machine (pure).
//!
//! All state transitions are pure functions testable without a widget.

pub mod reducer;
pub mod selectors;
pub mod store;
pub mod view_state;

// Re-export for convenience
pub use reducer::{reduce, reduce_raw};
pub use store::TableStore;
pub use view_state::TableViewState;
