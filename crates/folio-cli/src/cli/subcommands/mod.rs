mod manifest;

pub use manifest::{ManifestCommands, ReportKind};
