//! Extensions to the standard library that are useful across the engine.

pub mod chars;
