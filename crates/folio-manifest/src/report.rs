//! Statistics and course → unit reports over manifest entries.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Component, Path};

use chrono::Local;
use folio_core::{Difficulty, TopicType, Unit};
use serde::Serialize;

use crate::entry::ManifestEntry;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Aggregate counts over the whole manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestStatistics {
    pub total_worksheets: usize,
    pub total_size_mb: f64,
    pub by_course: BTreeMap<String, usize>,
    pub by_type: BTreeMap<TopicType, usize>,
    pub by_difficulty: BTreeMap<Difficulty, usize>,
}

impl ManifestStatistics {
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn from_entries(entries: &[ManifestEntry]) -> Self {
        let mut by_course: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_type: BTreeMap<TopicType, usize> = BTreeMap::new();
        let mut by_difficulty: BTreeMap<Difficulty, usize> = BTreeMap::new();
        let mut total_bytes: u64 = 0;

        for entry in entries {
            *by_course.entry(entry.course.clone()).or_default() += 1;
            *by_type.entry(entry.topic_type.clone()).or_default() += 1;
            *by_difficulty.entry(entry.difficulty).or_default() += 1;
            total_bytes = total_bytes.saturating_add(entry.file_size_bytes);
        }

        Self {
            total_worksheets: entries.len(),
            total_size_mb: total_bytes as f64 / BYTES_PER_MB,
            by_course,
            by_type,
            by_difficulty,
        }
    }
}

/// Output format for [`ArtifactManifest::generate_report`](crate::ArtifactManifest::generate_report).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Html,
    Json,
}

#[derive(Serialize)]
struct CourseReport<'a> {
    course: &'a str,
    units: Vec<UnitReport<'a>>,
}

#[derive(Serialize)]
struct UnitReport<'a> {
    unit: Unit,
    worksheets: Vec<&'a ManifestEntry>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    total_worksheets: usize,
    courses: Vec<CourseReport<'a>>,
}

fn group(entries: &[ManifestEntry]) -> Vec<CourseReport<'_>> {
    let mut by_course: BTreeMap<&str, BTreeMap<Unit, Vec<&ManifestEntry>>> = BTreeMap::new();
    for entry in entries {
        by_course
            .entry(entry.course.as_str())
            .or_default()
            .entry(entry.unit)
            .or_default()
            .push(entry);
    }

    by_course
        .into_iter()
        .map(|(course, units)| CourseReport {
            course,
            units: units
                .into_iter()
                .map(|(unit, worksheets)| UnitReport { unit, worksheets })
                .collect(),
        })
        .collect()
}

pub(crate) fn json_report(entries: &[ManifestEntry]) -> String {
    let report = JsonReport {
        total_worksheets: entries.len(),
        courses: group(entries),
    };
    serde_json::to_string_pretty(&report).unwrap_or_else(|_| String::from("{}"))
}

const STYLE: &str = "\
        body { font-family: Arial, sans-serif; margin: 20px; background: #f5f5f5; }
        h1 { color: #333; }
        h2 { color: #666; margin-top: 30px; }
        h3 { color: #888; margin-top: 20px; }
        .worksheet { background: white; padding: 10px; margin: 5px 0; border-radius: 5px; }
        .worksheet a { text-decoration: none; color: #0066cc; font-weight: bold; }
        .worksheet a:hover { text-decoration: underline; }
        .meta { color: #666; font-size: 0.9em; margin-left: 20px; }
        .stats { background: #e8f4f8; padding: 15px; border-radius: 5px; margin: 20px 0; }";

pub(crate) fn html_report(entries: &[ManifestEntry], base_dir: &Path) -> String {
    let courses = group(entries);
    let mut html = String::new();

    let _ = writeln!(html, "<!DOCTYPE html>\n<html lang=\"en\">\n<head>");
    let _ = writeln!(html, "    <meta charset=\"UTF-8\">");
    let _ = writeln!(
        html,
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    );
    let _ = writeln!(html, "    <title>Worksheet Library</title>");
    let _ = writeln!(html, "    <style>\n{STYLE}\n    </style>\n</head>\n<body>");
    let _ = writeln!(html, "    <h1>Worksheet Library</h1>");
    let _ = writeln!(html, "    <div class=\"stats\">");
    let _ = writeln!(
        html,
        "        <strong>Total Worksheets:</strong> {}<br>",
        entries.len()
    );
    let _ = writeln!(html, "        <strong>Courses:</strong> {}<br>", courses.len());
    let _ = writeln!(
        html,
        "        <strong>Last Updated:</strong> {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(html, "    </div>");

    for course in &courses {
        let _ = writeln!(html, "    <h2>{}</h2>", escape(course.course));
        for unit in &course.units {
            let _ = writeln!(html, "    <h3>Unit {}</h3>", unit.unit);
            for entry in &unit.worksheets {
                let _ = writeln!(html, "    <div class=\"worksheet\">");
                let _ = writeln!(
                    html,
                    "        <a href=\"{}\">{}</a>",
                    escape(&relative_href(&entry.file_path, base_dir)),
                    escape(&entry.topic)
                );
                let _ = writeln!(
                    html,
                    "        <span class=\"meta\">{} | {} | {} problems</span>",
                    escape(entry.topic_type.as_str()),
                    entry.difficulty,
                    entry.problem_count
                );
                let _ = writeln!(html, "    </div>");
            }
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Link target for `path` relative to `base_dir`, `/`-separated with spaces
/// percent-encoded. Paths outside `base_dir` are kept as given.
fn relative_href(path: &Path, base_dir: &Path) -> String {
    let relative = path.strip_prefix(base_dir).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().replace(' ', "%20")),
            Component::ParentDir => Some(String::from("..")),
            Component::RootDir => Some(String::new()),
            Component::CurDir | Component::Prefix(_) => None,
        })
        .collect();
    parts.join("/")
}

/// Escape text for HTML element content and double-quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
