// Passbox — Library root
//
// Re-exports the store, generator, and CLI modules.

pub mod cli;
pub mod error;
pub mod generator;
pub mod store;

pub use error::{PassboxError, Result};
