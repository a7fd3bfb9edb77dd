use egui::ColorImage;

use crate::egui_app::state::PreviewReference;

/// Longest edge of the decoded preview, in pixels.
const MAX_PREVIEW_EDGE: u32 = 512;

/// Decode `bytes` into a display-sized preview keyed to one selection.
pub(super) fn build_preview(bytes: &[u8], generation: u64, selection_id: u64) -> PreviewReference {
    let texture_key = format!("preview-{generation}-{selection_id}");
    let image = match decode_preview_image(bytes) {
        Ok(image) => Some(image),
        Err(err) => {
            tracing::debug!("Preview unavailable: {err}");
            None
        }
    };
    PreviewReference { texture_key, image }
}

fn decode_preview_image(bytes: &[u8]) -> Result<ColorImage, image::ImageError> {
    let mut decoded = image::load_from_memory(bytes)?;
    if decoded.width() > MAX_PREVIEW_EDGE || decoded.height() > MAX_PREVIEW_EDGE {
        decoded = decoded.thumbnail(MAX_PREVIEW_EDGE, MAX_PREVIEW_EDGE);
    }
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
