//! Replays a [`DrawList`] onto an SDL2 canvas using `SDL2_gfx` primitives.

use glam::Vec2;
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::error::{GameError, GameResult};
use crate::systems::render::{DrawCommand, DrawList, Rgba};

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::RGBA(color.r, color.g, color.b, color.a)
    }
}

fn px(value: f32) -> i16 {
    value.round().clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

/// Draws every command of `list`, shifted by `origin`.
///
/// `Clear` fills the whole window so letterbox bars share the background color.
pub fn present_draw_list(canvas: &mut Canvas<Window>, list: &DrawList, origin: Vec2) -> GameResult<()> {
    for command in list.commands() {
        draw_command(canvas, command, origin).map_err(GameError::Sdl)?;
    }
    Ok(())
}

fn draw_command(canvas: &mut Canvas<Window>, command: &DrawCommand, origin: Vec2) -> Result<(), String> {
    match *command {
        DrawCommand::Clear(color) => {
            canvas.set_draw_color(Color::from(color));
            canvas.clear();
            Ok(())
        }
        DrawCommand::FillRect { origin: at, size, color } => {
            let (a, b) = (origin + at, origin + at + size);
            canvas.box_(px(a.x), px(a.y), px(b.x).saturating_sub(1), px(b.y).saturating_sub(1), Color::from(color))
        }
        DrawCommand::StrokeRect { origin: at, size, color } => {
            let (a, b) = (origin + at, origin + at + size);
            canvas.rectangle(px(a.x), px(a.y), px(b.x), px(b.y), Color::from(color))
        }
        DrawCommand::FillRoundedRect {
            origin: at,
            size,
            radius,
            color,
        } => {
            let (a, b) = (origin + at, origin + at + size);
            canvas.rounded_box(px(a.x), px(a.y), px(b.x), px(b.y), px(radius), Color::from(color))
        }
        DrawCommand::FillCircle { center, radius, color } => {
            let c = origin + center;
            canvas.filled_circle(px(c.x), px(c.y), px(radius.max(1.0)), Color::from(color))
        }
        DrawCommand::FillTriangle { points, color } => {
            let [a, b, c] = points.map(|point| origin + point);
            canvas.filled_trigon(px(a.x), px(a.y), px(b.x), px(b.y), px(c.x), px(c.y), Color::from(color))
        }
        DrawCommand::Line { from, to, color } => {
            let (a, b) = (origin + from, origin + to);
            canvas.thick_line(px(a.x), px(a.y), px(b.x), px(b.y), 2, Color::from(color))
        }
    }
}
