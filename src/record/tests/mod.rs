//! Unit tests for the record subsystem.
