//! Host input: swipe gestures and, with the `sdl` feature, keyboard bindings.

pub mod swipe;

pub use swipe::{classify_swipe, SwipeTracker};

#[cfg(feature = "sdl")]
pub use keyboard::Bindings;

#[cfg(feature = "sdl")]
mod keyboard {
    use std::collections::HashMap;

    use sdl2::keyboard::Keycode;

    use crate::events::GameCommand;
    use crate::map::direction::Direction;
    use crate::systems::components::Difficulty;

    #[derive(Debug, Clone)]
    pub struct Bindings {
        key_bindings: HashMap<Keycode, GameCommand>,
    }

    impl Default for Bindings {
        fn default() -> Self {
            let mut key_bindings = HashMap::new();

            // Player movement
            key_bindings.insert(Keycode::Up, GameCommand::MovePlayer(Direction::Up));
            key_bindings.insert(Keycode::W, GameCommand::MovePlayer(Direction::Up));
            key_bindings.insert(Keycode::Down, GameCommand::MovePlayer(Direction::Down));
            key_bindings.insert(Keycode::S, GameCommand::MovePlayer(Direction::Down));
            key_bindings.insert(Keycode::Left, GameCommand::MovePlayer(Direction::Left));
            key_bindings.insert(Keycode::A, GameCommand::MovePlayer(Direction::Left));
            key_bindings.insert(Keycode::Right, GameCommand::MovePlayer(Direction::Right));
            key_bindings.insert(Keycode::D, GameCommand::MovePlayer(Direction::Right));

            // Session
            key_bindings.insert(Keycode::R, GameCommand::StartGame);
            key_bindings.insert(Keycode::Return, GameCommand::StartGame);
            key_bindings.insert(Keycode::Num1, GameCommand::SetDifficulty(Difficulty::Easy));
            key_bindings.insert(Keycode::Num2, GameCommand::SetDifficulty(Difficulty::Normal));
            key_bindings.insert(Keycode::Num3, GameCommand::SetDifficulty(Difficulty::Hard));
            key_bindings.insert(Keycode::Escape, GameCommand::Exit);
            key_bindings.insert(Keycode::Q, GameCommand::Exit);

            Self { key_bindings }
        }
    }

    impl Bindings {
        pub fn command(&self, key: Keycode) -> Option<GameCommand> {
            self.key_bindings.get(&key).copied()
        }
    }
}
