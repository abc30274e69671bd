//! Application services.

pub mod sink_service;

pub use sink_service::{SinkGroupInfo, SinkGroupService};
