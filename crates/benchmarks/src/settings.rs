//! Settings for discovery and output.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `LANGBENCH_*` environment variables. Callers apply command-line
//! overrides on the returned value.

use crate::error::Result;
use crate::loader::{default_sources, LanguageSource, LoaderConfig};
use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "LANGBENCH";

/// Settings file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "langbench.toml";

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory containing one sub-directory per language.
    pub base_dir: PathBuf,
    /// Directory comparison artifacts are written to.
    pub output_dir: PathBuf,
    /// Report sources in priority order.
    pub languages: Vec<LanguageSource>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            languages: default_sources(),
        }
    }
}

impl Settings {
    /// Load settings.
    ///
    /// With `path`, that file must exist. Without it, [`DEFAULT_CONFIG_FILE`]
    /// is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None)
    }

    /// Load settings with an explicit environment.
    ///
    /// `env` replaces the process environment for the `LANGBENCH_*` layer;
    /// `None` reads the process environment.
    pub fn load_from(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_FILE))
                .format(FileFormat::Toml)
                .required(false),
        };

        let settings = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Loader configuration derived from these settings.
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig::new(&self.base_dir).with_sources(self.languages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            vars.iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.base_dir, PathBuf::from("."));
        assert_eq!(settings.languages, default_sources());

        let loader = settings.loader_config();
        assert_eq!(loader.base_dir, PathBuf::from("."));
        assert_eq!(loader.sources.len(), settings.languages.len());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            r#"
base_dir = "/srv/bench"

[[languages]]
language = "zig"
pattern = "zig/out/*.json"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(Some(path.as_path()), env(&[])).unwrap();
        assert_eq!(settings.base_dir, PathBuf::from("/srv/bench"));
        assert_eq!(settings.output_dir, PathBuf::from("."));
        assert_eq!(
            settings.languages,
            vec![LanguageSource {
                language: "zig".to_string(),
                pattern: "zig/out/*.json".to_string(),
            }]
        );
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Settings::load_from(Some(missing.as_path()), env(&[])).is_err());
    }

    #[test]
    fn test_environment_overrides_file_and_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("langbench.toml");
        fs::write(&path, "base_dir = \"/srv/bench\"\noutput_dir = \"/srv/out\"\n").unwrap();

        let settings = Settings::load_from(
            Some(path.as_path()),
            env(&[("LANGBENCH_BASE_DIR", "/env/base")]),
        )
        .unwrap();
        assert_eq!(settings.base_dir, PathBuf::from("/env/base"));
        assert_eq!(settings.output_dir, PathBuf::from("/srv/out"));
        assert_eq!(settings.languages, default_sources());

        let settings = Settings::load_from(
            Some(path.as_path()),
            env(&[
                ("LANGBENCH_BASE_DIR", "/env/base"),
                ("LANGBENCH_OUTPUT_DIR", "/env/out"),
                ("OTHER_OUTPUT_DIR", "/ignored"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("/env/out"));
    }

    #[test]
    fn test_environment_without_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.toml");
        fs::write(&path, "").unwrap();

        let settings =
            Settings::load_from(Some(path.as_path()), env(&[("LANGBENCH_OUTPUT_DIR", "out")]))
                .unwrap();
        assert_eq!(settings.base_dir, PathBuf::from("."));
        assert_eq!(settings.output_dir, PathBuf::from("out"));
    }
}
