//! Step definitions for record adapter scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
