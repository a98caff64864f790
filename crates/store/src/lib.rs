//! Storage backends for prompt templates, refinement phrases and the
//! trigger log.

pub mod in_memory;
pub mod seed;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use in_memory::InMemoryStore;
pub use seed::{RefinementSeed, SeedFile, SeedSummary};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
