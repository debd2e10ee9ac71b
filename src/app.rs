use egui::Rect;

use crate::config::PaintConfig;
use crate::document::Document;
use crate::input::InputHandler;
use crate::intent::Intent;
use crate::panels;
use crate::renderer::Renderer;

/// Drawings live only as long as the process, nothing is persisted
pub struct PaintApp {
    config: PaintConfig,
    document: Document,
    renderer: Renderer,
    input: InputHandler,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_config(PaintConfig::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: PaintConfig) -> Self {
        Self::with_config(config)
    }

    pub fn with_config(config: PaintConfig) -> Self {
        Self {
            document: Document::new(&config),
            renderer: Renderer::new(),
            input: InputHandler::new(Rect::NOTHING),
            config,
        }
    }

    pub fn config(&self) -> &PaintConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Apply an intent, logging rejected ones
    pub fn apply_intent(&mut self, intent: Intent) {
        if let Err(err) = self.document.apply(intent) {
            log::warn!("Rejected {}: {err}", intent.name());
        }
    }

    /// Feed this frame's pointer and keyboard input into the document
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: Rect) {
        self.input.set_canvas_rect(canvas_rect);

        for event in self.input.process_input(ctx) {
            self.document.handle_pointer(&event);
        }
        for intent in self.input.process_shortcuts(ctx) {
            self.apply_intent(intent);
        }
    }

    pub fn render(&mut self, painter: &egui::Painter, rect: Rect) {
        let background = self.document.style().background();
        let items = self.document.render_list();
        self.renderer.render(painter, rect, background, &items);
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::control_panel(self, ctx);
        panels::central_panel(self, ctx);
    }
}
