// # zdns-core
//
// Core library for administering an authoritative BIND nameserver through
// its command-line tools over a remote session.
//
// ## Architecture Overview
//
// - **RemoteShell**: Trait for running commands on, and pushing files to, the nameserver
// - **ZoneFile / UpdateScript**: Renderers for the two uploaded artifacts
// - **ZoneManager**: create/delete/pause/thaw/flush/sync/reload/status of zones
// - **RecordBatchManager**: dynamic-update add/delete of record batches
//
// ## Design Principles
//
// 1. **Explicit session**: Managers hold the session they were given; no globals
// 2. **Fail closed**: Invalid input never reaches the remote shell
// 3. **Fire-and-fail**: No retries, no rollback; the caller owns retry policy
// 4. **Scoped artifacts**: Temporary files are removed on every return path

pub mod batch;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod traits;
pub mod transfer;
pub mod zone;

// Re-export core types for convenience
pub use batch::RecordBatchManager;
pub use config::ServerTarget;
pub use error::{Error, Result};
pub use model::{BatchOperation, DomainBatch, Record, RecordType, Zone, ZoneOperation};
pub use traits::{CommandOutput, RemoteShell};
pub use zone::ZoneManager;
