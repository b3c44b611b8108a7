//! Configuration loader and schema types.
//!
//! Settings cover the card's placeholder text, the engine's notification
//! interval, how the song library is discovered, and an optional explicit
//! song list.

mod load;
mod schema;

pub use schema::*;
