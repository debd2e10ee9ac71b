use egui::Color32;

use crate::config::PaintConfig;
use crate::error::StyleError;
use crate::history::StrokeHistory;
use crate::input::{PointerEvent, PointerEventKind};
use crate::intent::Intent;
use crate::outline::{FreehandOutline, OutlineGenerator};
use crate::session::{SessionEnd, StrokeSession};
use crate::smoother::{SmoothPath, smooth_outline};
use crate::stroke::{Sample, Stroke, StrokeId};
use crate::style::StyleChannel;

/// One filled path to paint, in draw order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem<'a> {
    /// `None` for the stroke still being drawn
    pub stroke_id: Option<StrokeId>,
    pub path: &'a SmoothPath,
    pub color: Color32,
}

/// The drawing and everything needed to extend it
pub struct Document {
    style: StyleChannel,
    history: StrokeHistory,
    session: StrokeSession,
    generator: Box<dyn OutlineGenerator>,
    /// Recomputed on every captured sample
    live_path: SmoothPath,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("style", &self.style)
            .field("history", &self.history)
            .field("session", &self.session)
            .field("live_path", &self.live_path)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(&PaintConfig::default())
    }
}

impl Document {
    pub fn new(config: &PaintConfig) -> Self {
        Self::with_generator(config, Box::new(FreehandOutline::new(config.stroke)))
    }

    /// Use a custom outline generator instead of the freehand one
    pub fn with_generator(config: &PaintConfig, generator: Box<dyn OutlineGenerator>) -> Self {
        Self {
            style: StyleChannel::new(config),
            history: StrokeHistory::new(),
            session: StrokeSession::new(),
            generator,
            live_path: SmoothPath::Empty,
        }
    }

    pub fn style(&self) -> &StyleChannel {
        &self.style
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn session(&self) -> &StrokeSession {
        &self.session
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.history.committed()
    }

    /// The in-progress stroke, while a pointer is captured
    pub fn live_path(&self) -> Option<&SmoothPath> {
        self.session.is_capturing().then_some(&self.live_path)
    }

    /// Run samples through the outline generator and the path smoother
    /// with the current brush size
    fn build_path(&self, samples: &[Sample]) -> SmoothPath {
        let outline = self.generator.outline(samples, self.style.brush_size());
        smooth_outline(&outline, true)
    }

    fn refresh_live_path(&mut self) {
        self.live_path = self.build_path(self.session.samples());
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        match event.kind {
            PointerEventKind::Down => match self.session.pointer_down(event) {
                Ok(()) => self.refresh_live_path(),
                // Expected for the emulated mouse of a touch
                Err(err) => log::debug!("Ignoring pointer down: {err}"),
            },
            PointerEventKind::Move => {
                if self.session.pointer_move(event) {
                    self.refresh_live_path();
                }
            }
            PointerEventKind::Up | PointerEventKind::Leave => {
                match self.session.release(event.pointer_id) {
                    Some(SessionEnd::Commit(samples)) => self.commit_samples(&samples),
                    Some(SessionEnd::Abandoned) => self.live_path = SmoothPath::Empty,
                    None => {}
                }
            }
        }
    }

    fn commit_samples(&mut self, samples: &[Sample]) {
        let path = self.build_path(samples);
        let stroke = Stroke::new(path, self.style.color());
        log::info!(
            "Stroke {} committed from {} samples ({} segments)",
            stroke.id(),
            samples.len(),
            stroke.path().segment_count()
        );
        self.history.commit(stroke);
        self.live_path = SmoothPath::Empty;
    }

    /// Apply a control panel or shortcut intent
    pub fn apply(&mut self, intent: Intent) -> Result<(), StyleError> {
        log::info!("Intent: {}", intent.name());
        match intent {
            Intent::Undo => {
                self.history.undo();
            }
            Intent::Redo => {
                self.history.redo();
            }
            Intent::SelectColor(color) => self.style.set_color(color),
            Intent::SelectEraser => self.style.enter_erase_mode(),
            Intent::SetBrushSize(size) => self.style.set_brush_size(size)?,
        }
        Ok(())
    }

    /// Committed strokes in draw order, then the live stroke if any
    pub fn render_list(&self) -> Vec<RenderItem<'_>> {
        let committed = self.history.committed().iter().map(|stroke| RenderItem {
            stroke_id: Some(stroke.id()),
            path: stroke.path(),
            color: stroke.color(),
        });
        let live = self.live_path().map(|path| RenderItem {
            stroke_id: None,
            path,
            color: self.style.color(),
        });
        committed.chain(live).collect()
    }
}
