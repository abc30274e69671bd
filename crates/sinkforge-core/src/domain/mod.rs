//! Domain layer: document models and the pure operations over them.
//!
//! Everything here is I/O-free. Documents come in as typed values, every
//! operation is a pure function or an in-place transform with checked
//! preconditions, and persistence is left to the application layer's ports.

pub mod deduce;
pub mod error;
pub mod mutate;
pub mod resolve;
pub mod resolved;
pub mod sink;
pub mod source;
pub mod validate;

pub use error::DomainError;
pub use resolved::{ResolvedSinkGroup, ResolvedSinkServer, RESOLVED_FROM_KEY, SOURCE_REF_KEY};
pub use sink::{
    sink_name_for, DatabaseRecord, EnvBinding, InheritedServer, KafkaTopology, ServiceSources,
    SinkGroup, SinkGroups, SinkPattern, SinkServer, StandaloneServer, SINK_PREFIX,
};
pub use source::{SourceGroup, SourceGroups, SourcePattern, SourceServer, SourceService};
pub use validate::ValidationReport;
