//! Core data structures for the snare world.

pub mod effect;
pub mod entity;
pub mod id;
