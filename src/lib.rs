pub mod audit; // Append-only audit log store
pub mod catalog; // Static goal catalog
pub mod config;
pub mod entries; // Date-keyed goal entry store
pub mod progress; // Pure progress derivation
pub mod roster; // Provider-side patient roster logic
pub mod state; // Shared dashboard state
pub mod storage; // Durable key/value persistence

pub use audit::{AuditAction, AuditRecord};
pub use catalog::{GoalCatalog, GoalDefinition};
pub use state::{DashboardState, SaveOutcome, StateError};
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
