//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod clock;
pub mod collision;
pub mod components;
pub mod ghost;
pub mod item;
pub mod movement;
pub mod render;

pub use self::clock::*;
pub use self::collision::*;
pub use self::components::*;
pub use self::ghost::*;
pub use self::item::*;
pub use self::movement::*;
pub use self::render::*;
