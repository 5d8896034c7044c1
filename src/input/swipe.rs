use glam::Vec2;

use crate::constants::input::SWIPE_THRESHOLD;
use crate::map::direction::Direction;

/// Maps a swipe displacement to a direction.
///
/// The larger axis wins, with ties going to the vertical axis. The winning displacement
/// must exceed the threshold, otherwise the gesture is treated as a tap.
pub fn classify_swipe(delta: Vec2) -> Option<Direction> {
    if delta.x.abs() > delta.y.abs() {
        (delta.x.abs() > SWIPE_THRESHOLD).then(|| if delta.x > 0.0 { Direction::Right } else { Direction::Left })
    } else {
        (delta.y.abs() > SWIPE_THRESHOLD).then(|| if delta.y > 0.0 { Direction::Down } else { Direction::Up })
    }
}

/// Tracks a single touch or drag from press to release.
#[derive(Debug, Default, Clone, Copy)]
pub struct SwipeTracker {
    start: Option<Vec2>,
}

impl SwipeTracker {
    pub fn begin(&mut self, position: Vec2) {
        self.start = Some(position);
    }

    /// Finishes the gesture. Releases without a matching press are ignored.
    pub fn end(&mut self, position: Vec2) -> Option<Direction> {
        let start = self.start.take()?;
        classify_swipe(position - start)
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }
}
