#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod input;
pub mod intent;
pub mod outline;
pub mod panels;
pub mod renderer;
pub mod session;
pub mod smoother;
pub mod stroke;
pub mod style;

pub use app::PaintApp;
pub use config::PaintConfig;
pub use document::{Document, RenderItem};
pub use history::StrokeHistory;
pub use input::{PointerEvent, PointerEventKind};
pub use intent::Intent;
pub use outline::{FreehandOutline, OutlineGenerator};
pub use session::{SessionEnd, SessionState, StrokeSession};
pub use smoother::{SmoothPath, smooth_outline};
pub use stroke::{Sample, Stroke, StrokeId};
pub use style::StyleChannel;
