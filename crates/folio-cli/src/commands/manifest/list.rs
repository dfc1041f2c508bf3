use folio_core::{Difficulty, TopicType, Unit};
use folio_manifest::{ArtifactManifest, ManifestQuery};

use crate::cli::GlobalFlags;
use crate::output::output;

pub fn run(
    manifest: &ArtifactManifest,
    course: Option<&str>,
    unit: Option<Unit>,
    topic_type: Option<&str>,
    difficulty: Option<Difficulty>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut query = ManifestQuery::default();
    if let Some(course) = course {
        query = query.course(course);
    }
    if let Some(unit) = unit {
        query = query.unit(unit);
    }
    if let Some(topic_type) = topic_type {
        query = query.topic_type(TopicType::from_filter(topic_type));
    }
    if let Some(difficulty) = difficulty {
        query = query.difficulty(difficulty);
    }
    output(&manifest.get_worksheets(&query), flags.format)
}
