//! Application layer: use-case orchestration over the domain.
//!
//! Services load the documents through the [`ConfigStore`] port, delegate
//! every business rule to `crate::domain`, and persist the result. No
//! business logic lives here.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::ConfigStore;
pub use services::{SinkGroupInfo, SinkGroupService};
