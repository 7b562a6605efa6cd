//! Hook system: typed hook points, base handlers, per-point index, and
//! the sequential dispatcher.

pub mod definitions;
pub mod dispatcher;
pub mod handler;
pub mod registry;
