use std::path::PathBuf;

use rfd::FileDialog;

pub fn pick_pdf() -> Option<PathBuf> {
    FileDialog::new().set_title("Upload PDF").add_filter("PDF documents", &["pdf"]).pick_file()
}

pub fn pick_photo() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Open Photo")
        .add_filter("Images", &["jpg", "jpeg", "png"])
        .pick_file()
}

pub fn pick_export_path(suggested_name: &str) -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Export")
        .add_filter("HTML document", &["html"])
        .set_file_name(suggested_name)
        .save_file()
}
