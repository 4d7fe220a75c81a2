//! Source document layer: tag grammar, comment-aware reading, structural
//! parsing and block template assembly

pub mod error;
pub mod parser;
pub mod reader;
pub mod render;
pub mod tags;
pub mod types;

pub use error::{DocumentError, DocumentResult};
pub use parser::{parse_document, DEFAULT_PARENT_CONTROL_FUNCTION, PARENT_CONTROL_FUNCTION_ATTR};
pub use reader::LineReader;
pub use render::block_template;
pub use tags::{parse_close_tag, parse_open_tag, Attribute, BlockTag, OpenTag, TopTag};
pub use types::{Block, Document, PurposeSection};
