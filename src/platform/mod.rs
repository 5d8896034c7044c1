//! Desktop platform layer: frame pacing and the SDL2 canvas backend.

use std::time::Duration;

pub mod canvas;

/// Sleeps until the next frame. Spins for precision while the window has focus.
pub fn sleep(duration: Duration, focused: bool) {
    if focused {
        spin_sleep::sleep(duration);
    } else {
        std::thread::sleep(duration);
    }
}
