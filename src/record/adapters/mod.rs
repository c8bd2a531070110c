//! Adapter implementations for record ports.

pub mod memory;
