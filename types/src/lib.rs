//! Domain types for memoravel.
//!
//! This crate contains pure value types with no IO and no async. An [`Entry`]
//! is one conversational turn: a [`Role`], optional content, and an open bag
//! of extension attributes (tool-call identifiers and the like).

mod entry;
mod role;

pub use entry::{Content, Entry};
pub use role::Role;
