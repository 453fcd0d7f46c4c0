//! Document model types for structured issue text.
//!
//! This module defines the typed tree that the parser builds from the
//! tracker's JSON payload and that the renderer walks. The tree is a closed
//! tagged union: every recognized `type` tag has its own variant, anything
//! else lands in [`Node::Unknown`].

mod attrs;
mod input;
mod node;

pub use attrs::{PanelType, TaskState};
pub use input::Input;
pub use node::Node;
