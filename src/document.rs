//! In-memory markdown document built from transcript sections.
//!
//! Rendered layout:
//!
//! ```text
//! # <title_1>
//! <content_1>
//!
//! # <title_2>
//! <content_2>
//! ```
//!
//! Sections are joined by exactly one blank line and a non-empty document
//! ends with a single newline. Content is written verbatim: a transcript
//! ending in `\n` shows up as two blank lines before the next heading, and
//! `parse` gives that trailing newline back. A transcript that itself
//! contains a blank line followed by `# ` cannot be re-split unambiguously.

use serde::Serialize;

const HEADING_PREFIX: &str = "# ";
const SECTION_SEPARATOR: &str = "\n\n# ";

/// One heading plus content unit of the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Heading text
    pub title: String,

    /// Verbatim file content
    pub content: String,
}

impl Section {
    /// Creates a new section.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Ordered sequence of sections, rendered once to markdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputDocument {
    sections: Vec<Section>,
}

impl OutputDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section at the end of the document.
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Returns the sections in output order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if the document has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Renders the document as markdown.
    #[must_use]
    pub fn render(&self) -> String {
        if self.sections.is_empty() {
            return String::new();
        }

        let capacity = self
            .sections
            .iter()
            .map(|s| s.title.len() + s.content.len() + HEADING_PREFIX.len() + 3)
            .sum();
        let mut out = String::with_capacity(capacity);

        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push_str("\n\n");
            }
            out.push_str(HEADING_PREFIX);
            out.push_str(&section.title);
            out.push('\n');
            out.push_str(&section.content);
        }
        out.push('\n');

        out
    }

    /// Splits a rendered document back into sections.
    ///
    /// Inverse of [`render`](Self::render) for content that does not contain
    /// the section separator. Text before the first heading is discarded.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let body = text.strip_suffix('\n').unwrap_or(text);

        let start = if body.starts_with(HEADING_PREFIX) {
            0
        } else if let Some(pos) = body.find("\n# ") {
            pos + 1
        } else {
            return Self::new();
        };

        let sections = body[start + HEADING_PREFIX.len()..]
            .split(SECTION_SEPARATOR)
            .map(|raw| match raw.split_once('\n') {
                Some((title, content)) => Section::new(title, content),
                None => Section::new(raw, ""),
            })
            .collect();

        Self { sections }
    }
}

impl FromIterator<Section> for OutputDocument {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        Self {
            sections: iter.into_iter().collect(),
        }
    }
}
