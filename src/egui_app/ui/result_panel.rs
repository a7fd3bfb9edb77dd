use super::UiAction;
use super::preview_image::render_preview;
use super::style;
use crate::egui_app::view_model::{RESET_LABEL, ResultModel};
use eframe::egui::{self, RichText, TextureHandle};

pub(super) fn render_result(
    ui: &mut egui::Ui,
    result: &ResultModel<'_>,
    preview_tex: &mut Option<(String, TextureHandle)>,
) -> Option<UiAction> {
    let palette = style::palette();
    render_preview(ui, result.preview, preview_tex);
    ui.label(RichText::new(result.file_name).color(palette.text_muted));
    ui.add_space(12.0);

    ui.label(RichText::new("Prediction Result").strong());
    ui.label(
        RichText::new(result.prediction)
            .size(22.0)
            .color(palette.accent_mint),
    );
    ui.add_space(8.0);
    ui.label(RichText::new("Probabilities:").strong());
    egui::Grid::new("probability_rows")
        .num_columns(2)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            for row in &result.rows {
                ui.label(&row.class_label);
                ui.label(RichText::new(&row.probability).monospace());
                ui.end_row();
            }
        });
    ui.add_space(12.0);

    ui.button(RESET_LABEL)
        .clicked()
        .then_some(UiAction::Reset)
}
