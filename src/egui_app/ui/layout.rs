use super::result_panel::render_result;
use super::style;
use super::upload_form::render_form;
use super::{EguiApp, UiAction};
use crate::egui_app::view_model::{self, ScreenModel};
use eframe::egui::{self, Frame, Margin, RichText, StrokeKind};

/// Upper bound on the card width; narrower windows shrink it.
const CARD_MAX_WIDTH: f32 = 480.0;

impl EguiApp {
    pub(super) fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    pub(super) fn render_ui(&mut self, ctx: &egui::Context) {
        self.render_status(ctx);
        let action = egui::CentralPanel::default()
            .show(ctx, |ui| self.render_center(ui))
            .inner;
        if let Some(action) = action {
            self.apply_action(action);
        }
    }

    fn render_center(&mut self, ui: &mut egui::Ui) -> Option<UiAction> {
        let palette = style::palette();
        let drop_hovered = ui.ctx().input(|i| !i.raw.hovered_files.is_empty())
            && self.controller.selection_enabled();
        let screen = view_model::screen(&self.controller.ui.upload);
        let title = &self.controller.ui.title;
        let preview_tex = &mut self.preview_tex;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    let card = Frame::new()
                        .fill(palette.bg_primary)
                        .stroke(style::card_border())
                        .inner_margin(Margin::same(16))
                        .show(ui, |ui| {
                            ui.set_max_width(CARD_MAX_WIDTH.min(ui.available_width()));
                            ui.label(
                                RichText::new(title)
                                    .heading()
                                    .color(palette.text_primary),
                            );
                            ui.add_space(12.0);
                            match &screen {
                                ScreenModel::Form(form) => render_form(ui, form, preview_tex),
                                ScreenModel::Result(result) => {
                                    render_result(ui, result, preview_tex)
                                }
                            }
                        });
                    if drop_hovered {
                        ui.painter().rect_stroke(
                            card.response.rect,
                            0.0,
                            style::drop_target_stroke(),
                            StrokeKind::Outside,
                        );
                    }
                    card.inner
                })
                .inner
            })
            .inner
    }
}
