// Internal modules
pub mod config;
pub mod document;
pub mod expand;
#[macro_use]
pub mod logging;
pub mod params;
pub mod pipeline;
pub mod utils;

// Re-export key types for library consumers
pub use document::{Document, DocumentError};
pub use expand::{generate, Expansion};
pub use params::parser::parse_line;
pub use params::{Component, LineKind, ParamLine, Purpose, Warning};
pub use pipeline::{process_source, GenerationOutput, PipelineError};
