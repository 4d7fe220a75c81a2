//! Purpose expansion: template substitution over the cartesian product of
//! parameter lines

pub mod choice;
pub mod generator;
pub mod template;

pub use choice::{render_value, res_component_for_ordinal, Choice};
pub use generator::{generate, Expansion};
pub use template::{param_tag, substitute, FINALLY_TAG, PARAMS_TAG, PURPOSE_NUMBER_TAG};
