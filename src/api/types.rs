use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    models::{
        QuizQuestion,
        SourceKind,
    },
    ReaderError,
};

#[derive(Debug, Serialize)]
pub struct TextRequest<'a> {
    pub text: &'a str,
}

/// Text and images pulled out of an uploaded document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Extraction {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SimplifyResponse {
    #[serde(default)]
    pub simplified_text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizResponse {
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// `detail` is usually a string, but validation failures send a structure.
    pub fn detail_text(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        }
    }
}

/// A file ready to be posted as multipart form data.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub kind: SourceKind,
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn pdf(path: &Path) -> Result<Self, ReaderError> {
        Ok(Self {
            kind: SourceKind::Pdf,
            file_name: file_name_or(path, "document.pdf"),
            media_type: "application/pdf",
            bytes: std::fs::read(path)?,
        })
    }

    pub fn image(path: &Path) -> Result<Self, ReaderError> {
        Ok(Self {
            kind: SourceKind::Image,
            file_name: file_name_or(path, "photo.jpg"),
            media_type: image_media_type(path),
            bytes: std::fs::read(path)?,
        })
    }

    pub fn form_field(&self) -> &'static str {
        match self.kind {
            SourceKind::Pdf => "pdf_file",
            SourceKind::Image => "image_file",
        }
    }
}

pub fn image_media_type(path: &Path) -> &'static str {
    let is_png = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);
    if is_png {
        "image/png"
    } else {
        "image/jpeg"
    }
}

fn file_name_or(path: &Path, fallback: &str) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_is_detected_by_extension() {
        assert_eq!(image_media_type(Path::new("/a/b/page.PNG")), "image/png");
        assert_eq!(image_media_type(Path::new("/a/b/page.jpeg")), "image/jpeg");
        assert_eq!(image_media_type(Path::new("/a/b/page")), "image/jpeg");
    }

    #[test]
    fn upload_file_reads_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let upload = UploadFile::image(&path).unwrap();
        assert_eq!(upload.file_name, "scan.png");
        assert_eq!(upload.media_type, "image/png");
        assert_eq!(upload.form_field(), "image_file");
        assert_eq!(upload.bytes, vec![1, 2, 3]);
    }

    #[test]
    fn structured_detail_is_stringified() {
        let err: ErrorResponse =
            serde_json::from_str(r#"{"detail": [{"msg": "field required"}]}"#).unwrap();
        assert_eq!(err.detail_text().unwrap(), r#"[{"msg":"field required"}]"#);

        let err: ErrorResponse = serde_json::from_str(r#"{"detail": "Bad PDF"}"#).unwrap();
        assert_eq!(err.detail_text().as_deref(), Some("Bad PDF"));
    }
}
