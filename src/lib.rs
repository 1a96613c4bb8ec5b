//! tablesync
//!
//! Keeps a data-grid widget and an application-side state store in agreement.
//!
//! The store holds the table's view state (hidden columns and rows, column filters,
//! column settings and the attached widget) and changes only through the pure
//! [`state::reduce`] function. [`sync::TableView`] mounts a store next to a widget and
//! runs the effects that push view settings and filters into the widget, and import the
//! widget's own state when it attaches.
//!
//! Layout follows a pure core / impure shell split: `model`, `state` and `sync` are
//! deterministic and testable without I/O; `config`, `logging` and the binary do the I/O.

pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod sync;
pub mod widget;

// Action scripts and state snapshots for the driver
pub mod integration;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
