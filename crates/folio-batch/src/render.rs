//! Worksheet rendering.

use std::fmt::Write as _;
use std::path::Path;

use folio_core::ProblemRecord;

use crate::error::RenderError;

/// Writes problem records to an artifact file.
pub trait Renderer: Send + Sync {
    /// File extension of produced artifacts, without the dot.
    fn extension(&self) -> &str;

    /// Write `records` to `output_path`. The parent directory already exists.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the artifact cannot be written, or
    /// `RenderError::Invalid` when there is nothing to render.
    fn render(
        &self,
        records: &[ProblemRecord],
        output_path: &Path,
        title: &str,
    ) -> Result<(), RenderError>;
}

/// Plain Markdown worksheets with an optional answer key.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    include_answer_key: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self {
            include_answer_key: true,
        }
    }
}

impl MarkdownRenderer {
    #[must_use]
    pub const fn new(include_answer_key: bool) -> Self {
        Self { include_answer_key }
    }

    /// The document text, without touching the filesystem.
    #[must_use]
    pub fn to_markdown(&self, records: &[ProblemRecord], title: &str) -> String {
        let mut doc = String::new();
        let _ = writeln!(doc, "# {title}\n");
        let _ = writeln!(doc, "Name: ____________________  Date: ____________\n");

        for (number, record) in records.iter().enumerate() {
            let _ = writeln!(doc, "{}. {}", number + 1, record.display_form);
        }

        if self.include_answer_key && !records.is_empty() {
            let _ = writeln!(doc, "\n---\n\n## Answer Key\n");
            for (number, record) in records.iter().enumerate() {
                let _ = writeln!(doc, "{}. {}", number + 1, record.canonical_answer);
                for step in &record.solution_steps {
                    let _ = writeln!(doc, "   - {step}");
                }
            }
        }

        doc
    }
}

impl Renderer for MarkdownRenderer {
    fn extension(&self) -> &str {
        "md"
    }

    fn render(
        &self,
        records: &[ProblemRecord],
        output_path: &Path,
        title: &str,
    ) -> Result<(), RenderError> {
        if records.is_empty() {
            return Err(RenderError::Invalid(format!("{title}: no problems to render")));
        }
        std::fs::write(output_path, self.to_markdown(records, title)).map_err(|source| {
            RenderError::Io {
                path: output_path.to_path_buf(),
                source,
            }
        })
    }
}
