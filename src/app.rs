//! Frame driver
//!
//! Each frame runs strictly in order: poll input, detect resize, advance the
//! angles, rasterize, composite, present. The pacing sleep follows `present`.

use crate::animation::Animation;
use crate::buffer::{buffer_dimensions, RenderBuffer};
use crate::compositor::{composite, TextGrid};
use crate::config::AppConfig;
use crate::error::TorusError;
use crate::rasterizer::Rasterizer;
use crate::terminal::{parse_key_event, Action, Surface};
use log::{debug, info, trace, warn};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Outcome of a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStatus {
    Continue,
    Quit,
}

pub struct App {
    config: AppConfig,
    rasterizer: Rasterizer,
    animation: Animation,
    buffer: RenderBuffer,
    /// Terminal size the buffer was built for, `(cols, rows)`
    terminal_size: Option<(u16, u16)>,
    frames: u64,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, TorusError> {
        config.validate()?;
        Ok(Self {
            rasterizer: Rasterizer::new(config.render.clone()),
            animation: Animation::new(&config.animation),
            buffer: RenderBuffer::new(0, 0),
            terminal_size: None,
            frames: 0,
            config,
        })
    }

    pub fn buffer(&self) -> &RenderBuffer {
        &self.buffer
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Recreate the render buffer if the terminal size changed.
    ///
    /// Returns whether a new buffer was built.
    pub fn resize(&mut self, cols: u16, rows: u16) -> bool {
        if self.terminal_size == Some((cols, rows)) {
            return false;
        }
        let (width, height) = buffer_dimensions(cols, rows, &self.config.viewport);
        debug!(
            "terminal {}x{} -> render buffer {}x{}",
            cols, rows, width, height
        );
        self.buffer = RenderBuffer::new(width, height);
        self.terminal_size = Some((cols, rows));
        true
    }

    /// Advance by `dt` and produce the composited frame for a `cols` x `rows` terminal
    pub fn render_frame(&mut self, cols: u16, rows: u16, dt: Duration) -> TextGrid {
        self.resize(cols, rows);
        self.animation.advance(dt);
        self.rasterizer
            .render(&mut self.buffer, self.animation.angles());
        self.frames += 1;
        composite(&self.buffer, cols as usize, rows as usize)
    }

    /// Run one frame against `surface`
    pub fn step<S: Surface>(&mut self, surface: &mut S, dt: Duration) -> Result<FrameStatus, TorusError> {
        while let Some(key) = surface.poll_key()? {
            match parse_key_event(key) {
                Action::Quit => return Ok(FrameStatus::Quit),
                Action::Pause => {
                    self.animation.toggle_pause();
                    debug!("paused: {}", self.animation.is_paused());
                }
                Action::None => {}
            }
        }

        let (cols, rows) = surface.size()?;
        let grid = self.render_frame(cols, rows, dt);

        match surface.present(&grid) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Err(e.into()),
            Err(e) => warn!("failed to present frame {}: {}", self.frames, e),
        }
        Ok(FrameStatus::Continue)
    }

    /// Drive frames until a quit key arrives
    pub fn run<S: Surface>(&mut self, surface: &mut S) -> Result<(), TorusError> {
        let frame_delay = self.config.animation.frame_delay();
        info!(
            "starting render loop (spin {}/{} rad/s, delay {:?})",
            self.config.animation.spin_x, self.config.animation.spin_y, frame_delay
        );

        let mut last_tick = Instant::now();
        loop {
            let now = Instant::now();
            let dt = now - last_tick;
            last_tick = now;

            if self.step(surface, dt)? == FrameStatus::Quit {
                break;
            }
            trace!("frame {} took {:?}", self.frames, last_tick.elapsed());

            if !frame_delay.is_zero() {
                std::thread::sleep(frame_delay);
            }
        }

        info!("quit after {} frames", self.frames);
        Ok(())
    }
}

/// Render `frames` frames at a fixed `step` and write each to `out/frame_XXX.txt`
pub fn dump_frames(
    config: AppConfig,
    cols: u16,
    rows: u16,
    frames: u32,
    step: Duration,
    out: &Path,
) -> Result<Vec<PathBuf>, TorusError> {
    let mut app = App::new(config)?;
    std::fs::create_dir_all(out)?;

    let mut written = Vec::with_capacity(frames as usize);
    for frame in 0..frames {
        // First frame shows the starting pose
        let dt = if frame == 0 { Duration::ZERO } else { step };
        let grid = app.render_frame(cols, rows, dt);

        let path = out.join(format!("frame_{:03}.txt", frame));
        std::fs::write(&path, grid.to_string())?;
        info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
