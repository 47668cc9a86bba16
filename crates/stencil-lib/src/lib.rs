//! Core domain library for the stencil microservice scaffold.
//!
//! This crate holds everything that does not depend on a transport: the
//! `Example` entity and its validation rules, the generic in-memory keyed
//! store, the repository port and its in-memory adapter, the use-case layer,
//! and the health-check aggregator with its built-in probes.
//!
//! Service binaries assemble these pieces with plain constructor calls; there
//! is no service locator or global registry anywhere in the crate.

pub mod error;
pub mod example;
pub mod health;
pub mod probes;
pub mod repository;
pub mod store;
pub mod usecase;

pub use error::{Error, Result};
pub use example::{EntityChecker, Example, ExampleService};
pub use health::{CheckResult, HealthCheck, HealthManager, HealthStatus};
pub use probes::{HttpCheck, MemoryCheck};
pub use repository::{ExampleRepository, MemoryExampleRepository};
pub use store::{HasId, MemoryStore, StoreError};
pub use usecase::Examples;
