//! General application configuration.

use folio_core::Difficulty;
use serde::{Deserialize, Serialize};

fn default_output_dir() -> String {
    String::from("output")
}

fn default_catalog_path() -> String {
    String::from("High School Worksheet Topics List.csv")
}

fn default_types() -> Vec<String> {
    vec![String::from("Intro"), String::from("Graphing")]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Base directory for generated artifacts, the manifest and the HTML index.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Topic catalog exported from the planning spreadsheet (CSV or TSV).
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Course name used in output paths. Empty means infer from the catalog file name.
    #[serde(default)]
    pub course: String,

    /// Types generated when neither a type filter nor `--all` is given.
    #[serde(default = "default_types")]
    pub default_types: Vec<String>,

    /// Difficulty used when the command line does not specify one.
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            catalog_path: default_catalog_path(),
            course: String::new(),
            default_types: default_types(),
            difficulty: Difficulty::default(),
        }
    }
}

impl GeneralConfig {
    /// The configured course, if one was set explicitly.
    #[must_use]
    pub fn course_override(&self) -> Option<&str> {
        let course = self.course.trim();
        (!course.is_empty()).then_some(course)
    }
}
