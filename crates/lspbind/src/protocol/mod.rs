//! Protocol records.
//!
//! A representative part of the language server protocol: the basic
//! structures, the progress mixins, markup, text synchronization and
//! completion. Every record binds with [`Bind`](crate::Bind) and serializes
//! with `serde` using the wire names.
mod basic;
mod completion;
mod markup;
mod progress;
mod sync;

pub use basic::*;
pub use completion::*;
pub use markup::*;
pub use progress::*;
pub use sync::*;
