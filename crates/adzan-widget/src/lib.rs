//! Adzan widget host.
//!
//! Wires the Competition and Media contexts to a terminal: configuration,
//! page navigation, the JSON preference file, the tokio-backed scheduler and
//! the single serialized event loop that every input and timer passes
//! through.

pub mod audio;
pub mod config;
pub mod error;
pub mod feedback;
pub mod navigation;
pub mod preferences;
pub mod runtime;
pub mod state;
pub mod terminal;
