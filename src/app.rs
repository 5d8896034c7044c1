use std::time::{Duration, Instant};

use glam::Vec2;
use sdl2::event::{Event, WindowEvent};
use sdl2::mouse::MouseButton;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::{EventPump, Sdl};
use tracing::{debug, info, trace, warn};

use crate::config::GameConfig;
use crate::constants::{CANVAS_SIZE, LOOP_TIME};
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, SessionEvent};
use crate::excuse::{CannedExcuses, ExcuseLookup};
use crate::formatter;
use crate::game::Game;
use crate::hud::SessionHud;
use crate::input::{Bindings, SwipeTracker};
use crate::platform;
use crate::platform::canvas::present_draw_list;
use crate::systems::render::{fit_surface, Viewport};

/// Main application wrapper that manages SDL initialization, window lifecycle, and the game loop.
pub struct App {
    pub game: Game,
    canvas: Canvas<Window>,
    event_pump: EventPump,
    bindings: Bindings,
    swipe: SwipeTracker,
    hud: SessionHud,
    excuse: Option<ExcuseLookup>,
    excuse_timeout: Duration,
    viewport: Viewport,
    epoch: Instant,
    focused: bool,
    title: String,
    // Keep SDL alive for the app lifetime
    _sdl_context: Sdl,
}

impl App {
    /// Initializes SDL, creates the window, and sets up an idle game.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails, or propagates
    /// errors from `Game::new()`.
    pub fn new(config: &GameConfig) -> GameResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(GameError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
        let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;

        let width = (CANVAS_SIZE.x as f32 * config.scale).round() as u32;
        let height = (CANVAS_SIZE.y as f32 * config.scale).round() as u32;
        trace!(width, height, scale = config.scale, "Creating game window");
        let window = video_subsystem
            .window("Budget Run", width, height)
            .resizable()
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        debug!(renderer = canvas.info().name, "Canvas renderer initialized");

        let mut game = Game::new(config.difficulty)?;
        let viewport = Self::viewport_for(&canvas);
        game.resize(viewport.size);

        info!("Application initialization completed successfully");
        Ok(App {
            game,
            canvas,
            event_pump,
            bindings: Bindings::default(),
            swipe: SwipeTracker::default(),
            hud: SessionHud::default(),
            excuse: None,
            excuse_timeout: config.excuse_timeout(),
            viewport,
            epoch: Instant::now(),
            focused: true,
            title: String::new(),
            _sdl_context: sdl_context,
        })
    }

    fn viewport_for(canvas: &Canvas<Window>) -> Viewport {
        let (width, height) = canvas.window().drawable_size();
        fit_surface(Vec2::new(width as f32, height as f32))
    }

    fn window_point(&self, x: f32, y: f32) -> Vec2 {
        let (width, height) = self.canvas.window().drawable_size();
        Vec2::new(x * width as f32, y * height as f32)
    }

    fn command(&mut self, command: GameCommand) {
        trace!(?command, "Handling command");
        if command == GameCommand::StartGame {
            self.excuse = None;
            self.hud.session_started();
        }
        self.game.handle_command(command);
    }

    /// Handles pending window events. Returns `false` when the app should quit.
    fn handle_events(&mut self) -> bool {
        let events: Vec<Event> = self.event_pump.poll_iter().collect();
        for event in events {
            match event {
                Event::Quit { .. } => {
                    info!("Exit requested. Exiting...");
                    return false;
                }
                Event::Window { win_event, .. } => match win_event {
                    WindowEvent::FocusGained => self.focused = true,
                    WindowEvent::FocusLost => self.focused = false,
                    WindowEvent::Resized(..) | WindowEvent::SizeChanged(..) => {
                        self.viewport = Self::viewport_for(&self.canvas);
                        self.game.resize(self.viewport.size);
                        debug!(viewport = ?self.viewport, "Window resized");
                    }
                    _ => {}
                },
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    if let Some(command) = self.bindings.command(key) {
                        self.command(command);
                    }
                }
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => self.swipe.begin(Vec2::new(x as f32, y as f32)),
                Event::MouseButtonUp {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => {
                    if let Some(direction) = self.swipe.end(Vec2::new(x as f32, y as f32)) {
                        self.command(GameCommand::MovePlayer(direction));
                    }
                }
                Event::FingerDown { x, y, .. } => {
                    let point = self.window_point(x, y);
                    self.swipe.begin(point);
                }
                Event::FingerUp { x, y, .. } => {
                    let point = self.window_point(x, y);
                    if let Some(direction) = self.swipe.end(point) {
                        self.command(GameCommand::MovePlayer(direction));
                    }
                }
                _ => {}
            }
        }

        !self.game.exit_requested()
    }

    fn update_title(&mut self) {
        let title = self.hud.title(self.game.difficulty(), self.game.speed_multiplier());
        if title != self.title {
            if let Err(e) = self.canvas.window_mut().set_title(&title) {
                warn!("Failed to set window title: {e}");
            }
            self.title = title;
        }
    }

    /// Executes a single frame: input, simulation, excuse polling, drawing, then pacing.
    ///
    /// # Returns
    ///
    /// `true` if the game should continue running, `false` if the game requested exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();
        formatter::increment_tick();

        if !self.handle_events() {
            return false;
        }

        let now_ms = self.epoch.elapsed().as_secs_f64() * 1000.0;
        for event in self.game.tick(now_ms) {
            event.dispatch(&mut self.hud);
            if let SessionEvent::GameOver { final_score } = event {
                self.excuse = Some(ExcuseLookup::spawn(
                    CannedExcuses::default(),
                    final_score,
                    self.excuse_timeout,
                ));
            }
        }

        if let Some(text) = self.excuse.as_mut().and_then(|lookup| lookup.poll()).map(str::to_string) {
            info!(excuse = %text, "Excuse ready");
            self.hud.set_excuse(&text);
            self.excuse = None;
        }

        if let Err(e) = present_draw_list(&mut self.canvas, self.game.draw_list(), self.viewport.origin) {
            warn!("Failed to draw frame: {e}");
        }
        self.canvas.present();
        self.update_title();

        if start.elapsed() < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                platform::sleep(time, self.focused);
            }
        } else {
            warn!(behind = ?(start.elapsed() - LOOP_TIME), "Game loop behind schedule");
        }

        true
    }
}
