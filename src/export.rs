//! Printable HTML rendering of the current view.

use std::path::Path;

use chrono::{
    DateTime,
    TimeZone,
};

use crate::core::{
    models::ViewMode,
    presentation::{
        parse_hex_color,
        PresentationSettings,
        LIGHT_TEXT_COLOR,
    },
    text::is_blank,
    ReaderError,
};

/// "Actual View", "Simplified View" or "Summary View".
pub fn heading(view_mode: ViewMode) -> String {
    let tag = view_mode.tag();
    let mut chars = tag.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!("{capitalized} View")
}

/// Default name offered in the save dialog, e.g. `simplified-view-20261018-1430.html`.
pub fn suggested_file_name<Tz: TimeZone>(view_mode: ViewMode, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}-view-{}.html", view_mode.tag(), at.format("%Y%m%d-%H%M"))
}

pub fn render_html(
    view_mode: ViewMode,
    text: &str,
    settings: &PresentationSettings,
) -> Result<String, ReaderError> {
    if is_blank(text) {
        return Err(ReaderError::EmptyInput("There is no text to print.".to_string()));
    }

    // Only well-formed colors reach the stylesheet.
    let color = match parse_hex_color(&settings.text_color) {
        Some(_) => settings.text_color.as_str(),
        None => LIGHT_TEXT_COLOR,
    };

    Ok(format!(
        r#"<html>
  <head>
    <meta charset="utf-8">
    <style>
      body {{
        font-family: 'OpenDyslexic', sans-serif;
        font-size: {font_size}px;
        line-height: {line_height};
        letter-spacing: {letter_spacing}em;
        word-spacing: {word_spacing}em;
        color: {color};
        margin: 40px;
        text-align: justify;
        word-wrap: break-word;
      }}
      h1 {{
        font-size: {heading_size}px;
        color: #000;
        border-bottom: 2px solid #ccc;
        padding-bottom: 10px;
      }}
      p {{
        white-space: pre-wrap;
      }}
    </style>
  </head>
  <body>
    <h1>{heading}</h1>
    <p>{body}</p>
  </body>
</html>
"#,
        font_size = settings.font_size,
        line_height = settings.line_height,
        letter_spacing = settings.letter_spacing,
        word_spacing = settings.word_spacing,
        color = color,
        heading_size = settings.font_size * 1.5,
        heading = heading(view_mode),
        body = html_escape::encode_text(text),
    ))
}

pub fn write_html(path: &Path, html: &str) -> Result<(), ReaderError> {
    std::fs::write(path, html)?;
    tracing::info!("Exported document to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_escaped() {
        let settings = PresentationSettings::default();
        let html =
            render_html(ViewMode::Simplified, "Tom & Jerry <script>alert(1)</script>", &settings)
                .unwrap();

        assert!(html.contains("<h1>Simplified View</h1>"));
        assert!(html.contains("Tom &amp; Jerry &lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("font-size: 18px"));
        assert!(html.contains("color: #333333"));
    }

    #[test]
    fn empty_text_is_rejected() {
        let err = render_html(ViewMode::Actual, " \n\t", &PresentationSettings::default())
            .unwrap_err();
        assert!(matches!(err, ReaderError::EmptyInput(ref m) if m == "There is no text to print."));
    }

    #[test]
    fn malformed_color_falls_back() {
        let mut settings = PresentationSettings::default();
        settings.set_text_color("red; background: url(x)");
        let html = render_html(ViewMode::Summary, "Short.", &settings).unwrap();
        assert!(html.contains("color: #333333"));
        assert!(html.contains("<h1>Summary View</h1>"));
    }

    #[test]
    fn file_name_carries_mode_and_time() {
        let at = chrono::Utc.with_ymd_and_hms(2026, 10, 18, 14, 30, 0).unwrap();
        assert_eq!(suggested_file_name(ViewMode::Summary, &at), "summary-view-20261018-1430.html");
    }

    #[test]
    fn written_file_matches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.html");
        write_html(&path, "<html></html>").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<html></html>");
    }
}
