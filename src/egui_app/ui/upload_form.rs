use super::UiAction;
use super::preview_image::render_preview;
use super::style;
use crate::egui_app::view_model::FormModel;
use eframe::egui::{self, RichText, TextureHandle};

pub(super) fn render_form(
    ui: &mut egui::Ui,
    form: &FormModel<'_>,
    preview_tex: &mut Option<(String, TextureHandle)>,
) -> Option<UiAction> {
    let palette = style::palette();
    let mut action = None;

    // Salting with the generation gives the picker a fresh identity after reset.
    ui.push_id(("file_input", form.input_generation), |ui| {
        ui.horizontal(|ui| {
            let choose = ui.add_enabled(form.selection_enabled, egui::Button::new("Choose image..."));
            if choose.clicked() {
                action = Some(UiAction::PickFile);
            }
            let name = form.file_name.unwrap_or("No file chosen");
            ui.label(RichText::new(name).color(palette.text_muted));
        });
    });
    ui.label(RichText::new("or drop an image onto the window").color(palette.text_muted));
    ui.add_space(8.0);

    if let Some(preview) = form.preview {
        render_preview(ui, preview, preview_tex);
        ui.add_space(8.0);
    }

    ui.horizontal(|ui| {
        let submit = ui.add_enabled(form.submit_enabled, egui::Button::new(form.submit_label));
        if submit.clicked() {
            action = Some(UiAction::Submit);
        }
        if form.file_name.is_some() {
            let clear = ui.add_enabled(form.selection_enabled, egui::Button::new("Clear"));
            if clear.clicked() {
                action = Some(UiAction::Reset);
            }
        }
    });

    if let Some(loading) = form.loading_text {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new(loading).color(palette.accent_ice));
        });
    }
    if let Some(error) = form.error {
        ui.add_space(6.0);
        ui.label(RichText::new(error).color(palette.warning));
    }
    action
}
