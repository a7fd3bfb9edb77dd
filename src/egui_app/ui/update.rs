use std::time::Duration;

use eframe::egui;

use super::EguiApp;

/// Poll interval while a request is in flight.
const LOADING_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.prepare_frame(ctx);
        self.consume_dropped_files(ctx);
        self.render_ui(ctx);
        if self.controller.is_loading() {
            ctx.request_repaint_after(LOADING_REPAINT_INTERVAL);
        }
    }
}

impl EguiApp {
    fn prepare_frame(&mut self, ctx: &egui::Context) {
        self.apply_visuals(ctx);
        self.controller.tick();
    }

    fn consume_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped_files = ctx.input(|i| i.raw.dropped_files.clone());
        // Only the last dropped file is kept; the view holds one selection.
        let Some(file) = dropped_files.into_iter().last() else {
            return;
        };
        if !self.controller.selection_enabled() {
            tracing::debug!("Ignoring drop while predicting");
            return;
        }
        self.controller
            .select_dropped_file(file.name, file.path, file.bytes);
    }
}
