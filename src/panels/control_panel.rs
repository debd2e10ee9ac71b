use egui::{Button, Color32, Slider, Stroke, vec2};

use crate::PaintApp;
use crate::intent::Intent;

const SWATCH_SIZE: f32 = 24.0;

fn swatch(ui: &mut egui::Ui, fill: Color32, label: &str, selected: bool) -> egui::Response {
    let outline = if selected {
        Stroke::new(2.0, Color32::LIGHT_GRAY)
    } else {
        Stroke::NONE
    };
    ui.add(
        Button::new(label)
            .fill(fill)
            .stroke(outline)
            .rounding(SWATCH_SIZE / 2.0)
            .min_size(vec2(SWATCH_SIZE, SWATCH_SIZE)),
    )
}

pub fn control_panel(app: &mut PaintApp, ctx: &egui::Context) {
    let mut intents = Vec::new();

    egui::SidePanel::left("control_panel")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            let history = app.document().history();
            let style = app.document().style();

            // Undo/Redo section
            ui.horizontal(|ui| {
                if ui.add_enabled(history.can_undo(), Button::new("⟲ Undo")).clicked() {
                    intents.push(Intent::Undo);
                }
                if ui.add_enabled(history.can_redo(), Button::new("⟳ Redo")).clicked() {
                    intents.push(Intent::Redo);
                }
            });
            ui.label(format!(
                "{} strokes, {} to redo",
                history.committed().len(),
                history.redo_buffer().len()
            ));

            ui.separator();

            ui.horizontal_wrapped(|ui| {
                for entry in &app.config().palette {
                    let color = entry.color.to_color32();
                    let selected = !style.is_erasing() && style.color() == color;
                    if swatch(ui, color, "", selected).on_hover_text(&entry.name).clicked() {
                        intents.push(Intent::SelectColor(color));
                    }
                }
                if swatch(ui, Color32::GRAY, "⌫", style.is_erasing())
                    .on_hover_text("Eraser")
                    .clicked()
                {
                    intents.push(Intent::SelectEraser);
                }
            });

            ui.separator();

            let range = app.config().brush_size_range;
            let mut size = style.brush_size();
            ui.label("Size");
            let response = ui.add(
                Slider::new(&mut size, range.min..=range.max)
                    .step_by(f64::from(range.step))
                    .show_value(true),
            );
            if response.changed() {
                intents.push(Intent::SetBrushSize(size));
            }
        });

    for intent in intents {
        app.apply_intent(intent);
    }
}
