use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// Which text the content pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Actual,
    Simplified,
    Summary,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Actual, ViewMode::Simplified, ViewMode::Summary];

    pub fn tag(&self) -> &'static str {
        match self {
            ViewMode::Actual => "actual",
            ViewMode::Simplified => "simplified",
            ViewMode::Summary => "summary",
        }
    }

    /// Unknown tags fall back to the original text.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "simplified" => ViewMode::Simplified,
            "summary" => ViewMode::Summary,
            _ => ViewMode::Actual,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Actual => "Original",
            ViewMode::Simplified => "Simplified",
            ViewMode::Summary => "Summary",
        }
    }

    pub fn processing_mode(&self) -> Option<ProcessingMode> {
        match self {
            ViewMode::Actual => None,
            ViewMode::Simplified => Some(ProcessingMode::Simplified),
            ViewMode::Summary => Some(ProcessingMode::Summary),
        }
    }
}

impl From<&str> for ViewMode {
    fn from(tag: &str) -> Self {
        ViewMode::from_tag(tag)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Server-side derivations of the extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessingMode {
    Simplified,
    Summary,
}

impl ProcessingMode {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ProcessingMode::Simplified => "/simplify_text",
            ProcessingMode::Summary => "/summarize_text",
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        match self {
            ProcessingMode::Simplified => ViewMode::Simplified,
            ProcessingMode::Summary => ViewMode::Summary,
        }
    }
}

/// Kind of file handed to the extraction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Image,
}

impl SourceKind {
    pub fn empty_text_placeholder(&self) -> &'static str {
        match self {
            SourceKind::Pdf => "No text extracted.",
            SourceKind::Image => "No text extracted from image.",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub source: Option<String>,
    pub extracted_text: String,
    pub image_urls: Vec<String>,
}

impl Document {
    pub fn file_name(&self) -> Option<&str> {
        self.source.as_deref().map(|source| {
            std::path::Path::new(source)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(source)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tags_map_to_actual() {
        assert_eq!(ViewMode::from("simplified"), ViewMode::Simplified);
        assert_eq!(ViewMode::from("summary"), ViewMode::Summary);
        assert_eq!(ViewMode::from("actual"), ViewMode::Actual);
        assert_eq!(ViewMode::from("bionic"), ViewMode::Actual);
    }

    #[test]
    fn question_without_answer_still_decodes() {
        let question: QuizQuestion =
            serde_json::from_str(r#"{"question": "Who ran?", "options": ["Bob"]}"#).unwrap();
        assert_eq!(question.correct_answer, "");
        assert_eq!(question.options, vec!["Bob"]);
    }

    #[test]
    fn document_file_name_strips_directories() {
        let doc = Document {
            source: Some("/tmp/scans/chapter-1.pdf".to_string()),
            ..Default::default()
        };
        assert_eq!(doc.file_name(), Some("chapter-1.pdf"));
        assert_eq!(Document::default().file_name(), None);
    }
}
