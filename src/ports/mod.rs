//! Ports layer: Trait definitions at the application's seams.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the use cases and their collaborators (state container,
//! suggestion strategy, staff directory).

mod directory;
mod store;
mod suggester;

pub use directory::UserDirectory;
pub use store::ClinicStore;
pub use suggester::{DiagnosisSuggester, Suggestion};
