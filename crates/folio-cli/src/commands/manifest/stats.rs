use folio_manifest::{ArtifactManifest, ManifestStatistics};

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

pub fn run(manifest: &ArtifactManifest, flags: &GlobalFlags) -> anyhow::Result<()> {
    let stats = manifest.get_statistics();
    if flags.format == OutputFormat::Table {
        println!("{}", render_text(&stats));
        return Ok(());
    }
    output(&stats, flags.format)
}

fn render_text(stats: &ManifestStatistics) -> String {
    let mut lines = vec![
        format!("Total worksheets: {}", stats.total_worksheets),
        format!("Total size: {:.2} MB", stats.total_size_mb),
    ];
    let sections = [
        ("By course", stats.by_course.iter().map(|(k, v)| (k.clone(), *v)).collect::<Vec<_>>()),
        ("By type", stats.by_type.iter().map(|(k, v)| (k.to_string(), *v)).collect()),
        ("By difficulty", stats.by_difficulty.iter().map(|(k, v)| (k.to_string(), *v)).collect()),
    ];
    for (title, counts) in sections {
        if counts.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(format!("{title}:"));
        lines.extend(counts.into_iter().map(|(name, count)| format!("  {name:<20} {count:>5}")));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use folio_core::{Difficulty, TopicType};
    use folio_manifest::ManifestStatistics;

    use super::render_text;

    #[test]
    fn empty_sections_are_omitted() {
        let stats = ManifestStatistics {
            total_worksheets: 2,
            total_size_mb: 0.5,
            by_course: BTreeMap::from([(String::from("Geometry"), 2)]),
            by_type: BTreeMap::from([(TopicType::Intro, 2)]),
            by_difficulty: BTreeMap::from([(Difficulty::Hard, 2)]),
        };
        let text = render_text(&stats);
        assert!(text.starts_with("Total worksheets: 2\nTotal size: 0.50 MB"));
        assert!(text.contains("  Geometry                 2"));
        assert!(text.contains("  hard                     2"));

        let empty = ManifestStatistics {
            total_worksheets: 0,
            total_size_mb: 0.0,
            by_course: BTreeMap::new(),
            by_type: BTreeMap::new(),
            by_difficulty: BTreeMap::new(),
        };
        assert_eq!(render_text(&empty).lines().count(), 2);
    }
}
