//! Domain types and scheduling rules for Slotbook.
//!
//! Nothing in here talks to a database or to HTTP. Storage backends
//! implement the traits in [`store`], and the API crate drives them.

pub mod conflict;
pub mod errors;
pub mod models;
pub mod store;
pub mod time;
pub mod validation;
