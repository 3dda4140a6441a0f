//! Core data models for the search system.

pub mod location;

pub use location::{Coordinates, Location};
