//! Virtual filesystem for memfs
//!
//! - `VirtualFs`: flat path-keyed table plus the current-directory cursor
//! - `Node`: a directory or a text file

mod memory;
mod node;

pub use memory::{Listing, VirtualFs};
pub use node::{Node, NodeKind};
