//! Adapters layer: Concrete implementations of ports.
//!
//! - `memory`: in-session `ClinicStore`
//! - `mock`: random `DiagnosisSuggester`
//! - `directory`: fixed staff table for login
//! - `seed`: bundled demo records
//! - `sanitize`: PII filtering for logs

pub mod directory;
pub mod memory;
pub mod mock;
pub mod sanitize;
pub mod seed;

pub use directory::StaticDirectory;
pub use memory::InMemoryStore;
pub use mock::RandomSuggester;
pub use seed::SeedData;
