//! Minimal `multipart/form-data` encoder for single-file uploads.

use std::path::Path;

use uuid::Uuid;

pub(crate) struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    pub(crate) fn new() -> Self {
        Self::with_boundary(format!("kneegrade-{}", Uuid::new_v4().simple()))
    }

    pub(crate) fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    /// Append a file part under `field`.
    pub(crate) fn add_file(
        &mut self,
        field: &str,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> &mut Self {
        let header = format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            self.boundary,
            escape_quoted(field),
            escape_quoted(file_name),
            content_type
        );
        self.body.extend_from_slice(header.as_bytes());
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Value for the request `Content-Type` header.
    pub(crate) fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Close the form and return the encoded body.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.body
    }
}

/// Guess an image MIME type from the file extension.
pub(crate) fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        Some("tif" | "tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

// Browsers percent-encode quotes and drop line breaks in disposition params.
fn escape_quoted(value: &str) -> String {
    value.replace(['\r', '\n'], "").replace('"', "%22")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_single_file_part() {
        let mut form = MultipartForm::with_boundary("XYZ");
        form.add_file("file", "knee.png", "image/png", b"\x89PNG");
        assert_eq!(form.content_type(), "multipart/form-data; boundary=XYZ");
        let body = form.finish();
        let mut expected = b"--XYZ\r\nContent-Disposition: form-data; name=\"file\"; filename=\"knee.png\"\r\nContent-Type: image/png\r\n\r\n".to_vec();
        expected.extend_from_slice(b"\x89PNG\r\n--XYZ--\r\n");
        assert_eq!(body, expected);
    }

    #[test]
    fn escapes_quotes_and_line_breaks_in_filename() {
        let mut form = MultipartForm::with_boundary("B");
        form.add_file("file", "a\"b\r\n.png", "image/png", b"");
        let body = String::from_utf8(form.finish()).unwrap();
        assert!(body.contains("filename=\"a%22b.png\""));
    }

    #[test]
    fn plain_names_pass_through_unchanged() {
        assert_eq!(escape_quoted("knee x-ray (1).png"), "knee x-ray (1).png");
        assert_eq!(escape_quoted("\"\""), "%22%22");
    }

    #[test]
    fn generated_boundaries_are_unique() {
        assert_ne!(
            MultipartForm::new().content_type(),
            MultipartForm::new().content_type()
        );
    }

    #[test]
    fn content_type_guess_is_case_insensitive() {
        assert_eq!(content_type_for("scan.JPG"), "image/jpeg");
        assert_eq!(content_type_for("scan.tiff"), "image/tiff");
        assert_eq!(content_type_for("scan"), "application/octet-stream");
    }
}
