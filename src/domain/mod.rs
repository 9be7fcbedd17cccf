//! Domain types for task representation.
//!
//! [`Task`] is the plain record served by the remote todo feed, identified by
//! an integer. [`TaskItem`] is the UUID-identified item the manager orders and
//! relays, carrying an optional creation timestamp.

pub mod item;
pub mod record;

pub use item::*;
pub use record::*;
