//! Controller module: exposes the `PlaybackController` used by the runtime.
//!
//! The controller lives in `controller::model` and is generic over the engine
//! and every display surface so it can run against terminal widgets or test
//! doubles.

mod model;

pub use model::*;
