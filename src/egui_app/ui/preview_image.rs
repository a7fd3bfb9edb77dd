use super::style;
use crate::egui_app::state::PreviewReference;
use eframe::egui::{self, RichText, TextureHandle, TextureOptions, load::SizedTexture};

const PREVIEW_MAX_HEIGHT: f32 = 320.0;

/// Draw the selected image, uploading a new texture only when the key changes.
pub(super) fn render_preview(
    ui: &mut egui::Ui,
    preview: &PreviewReference,
    cache: &mut Option<(String, TextureHandle)>,
) {
    let Some(image) = &preview.image else {
        cache.take();
        render_placeholder(ui);
        return;
    };
    let cached = cache
        .as_ref()
        .filter(|(key, _)| *key == preview.texture_key)
        .map(|(_, texture)| texture.clone());
    let texture = match cached {
        Some(texture) => texture,
        None => {
            let texture = ui.ctx().load_texture(
                preview.texture_key.as_str(),
                image.clone(),
                TextureOptions::LINEAR,
            );
            *cache = Some((preview.texture_key.clone(), texture.clone()));
            texture
        }
    };
    let max_size = egui::vec2(ui.available_width(), PREVIEW_MAX_HEIGHT);
    ui.add(egui::Image::from_texture(SizedTexture::from_handle(&texture)).max_size(max_size));
}

fn render_placeholder(ui: &mut egui::Ui) {
    let palette = style::palette();
    egui::Frame::new()
        .fill(palette.bg_tertiary)
        .inner_margin(egui::Margin::same(24))
        .show(ui, |ui| {
            ui.label(RichText::new("No preview available").color(palette.text_muted));
        });
}
