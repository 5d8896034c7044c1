//! Budget Run game library crate.
//!
//! The simulation (map, entities, scoring, rendering into a draw list) builds without any
//! native libraries. The SDL2 window lives behind the `sdl` feature.

#[cfg(feature = "sdl")]
pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod excuse;
pub mod formatter;
pub mod game;
pub mod hud;
pub mod input;
pub mod map;
#[cfg(feature = "sdl")]
pub mod platform;
pub mod systems;
