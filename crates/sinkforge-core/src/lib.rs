//! Sinkforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the sinkforge
//! CDC configuration tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         sinkforge-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │          (SinkGroupService)             │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │         (Driven: ConfigStore)           │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    sinkforge-adapters (Infrastructure)  │
//! │    (YamlConfigStore, MemoryConfigStore) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Domain Layer (Pure Logic)         │
//! │  (SourceGroup, SinkGroup, resolution,   │
//! │   deduction, validation, mutation)      │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sinkforge_core::prelude::*;
//!
//! // Adapters implement the ConfigStore port.
//! let service = SinkGroupService::new(store);
//!
//! // Derive inherited sink groups from every eligible source group.
//! let outcome = service.scaffold()?;
//!
//! // Fully-resolved view: deduction applied, source_refs dereferenced.
//! let resolved = service.resolve("sink_asma")?;
//! ```

// Domain layer (stable, well-defined API)
pub mod domain;

// Application layer (orchestration logic)
pub mod application;

// Top-level error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ports::ConfigStore, ApplicationError, SinkGroupInfo, SinkGroupService,
    };
    pub use crate::domain::{
        mutate::{AddServerSpec, ScaffoldOutcome, ScaffoldSkip, SkipReason, StandaloneCreated, StandaloneSpec},
        DatabaseRecord, DomainError, EnvBinding, KafkaTopology, ResolvedSinkGroup,
        ResolvedSinkServer, ServiceSources, SinkGroup, SinkGroups, SinkPattern, SinkServer,
        SourceGroup, SourceGroups, SourcePattern, ValidationReport,
    };
    pub use crate::error::{CoreError, CoreResult, ErrorCategory};
}
