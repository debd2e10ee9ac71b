use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            // Claim the whole area so drags stay with the canvas
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let canvas_rect = response.rect;

            app.handle_input(ctx, canvas_rect);
            app.render(&painter, canvas_rect);

            if app.document().session().is_capturing() {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }
        });
}
