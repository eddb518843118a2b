//! In-memory simulation of an asteroid-dodging arcade game: a spaceship
//! slides along the bottom of the world, falling asteroids cost lives,
//! falling goodies score points, and a layered starfield scrolls behind
//! everything for parallax.
//!
//! The library is the simulation only.  Rendering and raw input live in
//! the binary and talk to the core through three mutating entry points
//! (`compute::update`, `compute::apply_input`, `compute::start_new_game`)
//! plus read access to the `entities::GameWorld` snapshot.

pub mod compute;
pub mod config;
pub mod entities;
