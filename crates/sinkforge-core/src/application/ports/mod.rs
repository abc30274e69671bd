//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world; the
//! adapters crate implements them. The only driven port here is document
//! storage — everything else the core does is pure.

pub mod output;

pub use output::ConfigStore;
