//! Asteroids-style arcade shooter: entity model, update pass and render pass.
//!
//! Game logic (`compute`) never touches the terminal; it only mutates a
//! [`world::World`] and is drawn through the [`display::Surface`] trait.

pub mod canvas;
pub mod collision;
pub mod compute;
pub mod constants;
pub mod display;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod world;
