//! Grid invaders: a terminal Space-Invaders style shooter.
//!
//! The library holds the whole simulation; the binary only draws frames and
//! feeds keys in.

pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod geometry;
pub mod input;
