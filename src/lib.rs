//! Real-time ASCII torus renderer
//!
//! This library samples a rotating torus, projects it into a depth-tested
//! character buffer, shades it onto a glyph ramp and resamples the buffer
//! onto whatever size the terminal currently has.

pub mod animation;
pub mod app;
pub mod buffer;
pub mod compositor;
pub mod config;
pub mod error;
pub mod math;
pub mod rasterizer;
pub mod terminal;
pub mod torus;

pub use animation::{Angles, Animation};
pub use app::{App, FrameStatus};
pub use buffer::RenderBuffer;
pub use compositor::{composite, TextGrid, Viewport};
pub use config::AppConfig;
pub use error::TorusError;
pub use rasterizer::Rasterizer;
pub use terminal::{Surface, TerminalDisplay};
