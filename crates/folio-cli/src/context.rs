use std::path::PathBuf;

use anyhow::Context;
use folio_catalog::CatalogLoader;
use folio_config::FolioConfig;
use folio_registry::CapabilityRegistry;

use crate::builtin;
use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: FolioConfig,
    pub registry: CapabilityRegistry,
    pub catalog: CatalogLoader,
    pub output_dir: PathBuf,
}

impl AppContext {
    /// Load configuration and apply command-line overrides. The catalog is
    /// not read until a command asks for it.
    pub fn init(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let config = FolioConfig::load_with_dotenv().context("failed to load folio configuration")?;
        warn_unconfigured(std::env::vars());

        let catalog_path = flags
            .catalog
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.general.catalog_path));
        let mut catalog = CatalogLoader::new(catalog_path);
        if let Some(course) = flags.course.as_deref().or_else(|| config.general.course_override()) {
            catalog = catalog.with_course(course);
        }

        let output_dir = flags
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.general.output_dir));

        tracing::debug!(
            catalog = %catalog.path().display(),
            course = catalog.course_name(),
            output_dir = %output_dir.display(),
            "application context ready"
        );

        Ok(Self {
            config,
            registry: builtin::registry(),
            catalog,
            output_dir,
        })
    }

    pub fn course(&self) -> &str {
        self.catalog.course_name()
    }
}

/// Warn about `FOLIO_*` variables that look like nested keys written with a
/// single underscore, which figment silently ignores.
fn warn_unconfigured<I>(env: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for warning in collect_unconfigured_warnings(env) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut keys = env
        .into_iter()
        .map(|(key, _)| key)
        .filter(|key| {
            ["FOLIO_GENERAL_", "FOLIO_GENERATION_"]
                .iter()
                .any(|prefix| key.starts_with(prefix) && !key[prefix.len()..].starts_with('_'))
        })
        .collect::<Vec<_>>();
    keys.sort();

    keys.into_iter()
        .map(|key| {
            let (section, field) = key
                .trim_start_matches("FOLIO_")
                .split_once('_')
                .unwrap_or_default();
            format!(
                "{key} is ignored. Use double underscores (example: FOLIO_{section}__{field})."
            )
        })
        .collect()
}
