// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the summary engine.
//!
//! The config is a TOML file layered on top of the defaults in `default-config.toml`.

use crate::errors::{ConfigParseError, ConfigParseErrorKind};
use camino::Utf8Path;
use config::{
    Config, ConfigError, File, FileFormat,
    builder::{ConfigBuilder, DefaultState},
};
use itertools::Itertools;
use serde::Deserialize;
use smol_str::SmolStr;
use std::collections::BTreeSet;
use tracing::warn;

/// Configuration consumed by the summary engine and its renderers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SummaryConfig {
    separator: char,
    root_name: SmolStr,
    min_name_width: usize,
    max_name_width: usize,
}

impl SummaryConfig {
    /// Contains the default config as a TOML file.
    ///
    /// Custom configuration is layered on top of the default config.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../default-config.toml");

    /// Reads the config from the given file, layered on top of the default config.
    ///
    /// If no file is given, the default config is used.
    pub fn from_sources(config_file: Option<&Utf8Path>) -> Result<Self, ConfigParseError> {
        Self::from_sources_impl(config_file, |config_file, unknown| {
            let file_str = config_file.map_or_else(
                || "the default config".to_owned(),
                |file| format!("`{file}`"),
            );
            warn!(
                "ignoring unknown configuration keys in {file_str}: {}",
                unknown.iter().join(", ")
            );
        })
    }

    // A custom unknown_callback can be passed in while testing.
    fn from_sources_impl(
        config_file: Option<&Utf8Path>,
        mut unknown_callback: impl FnMut(Option<&Utf8Path>, &BTreeSet<String>),
    ) -> Result<Self, ConfigParseError> {
        let mut builder = Self::make_default_config();
        if let Some(config_file) = config_file {
            builder = builder.add_source(File::new(config_file.as_str(), FileFormat::Toml));
        }

        let (deserialized, unknown) = Self::build_and_deserialize_config(&builder)
            .map_err(|kind| ConfigParseError::new(config_file, kind))?;

        if !unknown.is_empty() {
            unknown_callback(config_file, &unknown);
        }

        deserialized
            .into_config()
            .map_err(|kind| ConfigParseError::new(config_file, kind))
    }

    /// Returns the character that separates group names in test names.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Returns the name displayed for the root group.
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Returns the minimum width of a run column in the text summary.
    pub fn min_name_width(&self) -> usize {
        self.min_name_width
    }

    /// Returns the maximum width of a run column in the text summary.
    pub fn max_name_width(&self) -> usize {
        self.max_name_width
    }

    /// Sets the separator. Used by tests and by callers that build a config by hand.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    // ---
    // Helper methods
    // ---

    fn make_default_config() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
    }

    /// This returns a tuple of (config, ignored paths).
    fn build_and_deserialize_config(
        builder: &ConfigBuilder<DefaultState>,
    ) -> Result<(SummaryConfigDeserialize, BTreeSet<String>), ConfigParseErrorKind> {
        let config = builder
            .build_cloned()
            .map_err(|error| ConfigParseErrorKind::BuildError(Box::new(error)))?;

        let mut ignored = BTreeSet::new();
        let mut cb = |path: serde_ignored::Path| {
            ignored.insert(path.to_string());
        };
        let ignored_de = serde_ignored::Deserializer::new(config, &mut cb);
        let config: SummaryConfigDeserialize = serde_path_to_error::deserialize(ignored_de)
            .map_err(|error| {
                // serde_path_to_error reports the key already, so drop it from the config error.
                let path = error.path().clone();
                let config_error = error.into_inner();
                let error = match config_error {
                    ConfigError::At { error, .. } => *error,
                    other => other,
                };
                ConfigParseErrorKind::DeserializeError(Box::new(serde_path_to_error::Error::new(
                    path, error,
                )))
            })?;

        Ok((config, ignored))
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        // Must be kept in sync with default-config.toml.
        Self {
            separator: '/',
            root_name: SmolStr::new_static("all"),
            min_name_width: 6,
            max_name_width: 20,
        }
    }
}

// This is the form of `SummaryConfig` that gets deserialized.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct SummaryConfigDeserialize {
    paths: PathsConfigDeserialize,
    text: TextConfigDeserialize,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct PathsConfigDeserialize {
    separator: String,
    root_name: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TextConfigDeserialize {
    min_name_width: usize,
    max_name_width: usize,
}

impl SummaryConfigDeserialize {
    fn into_config(self) -> Result<SummaryConfig, ConfigParseErrorKind> {
        let mut chars = self.paths.separator.chars();
        let separator = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(ConfigParseErrorKind::InvalidSeparator {
                    value: self.paths.separator,
                });
            }
        };

        let root_name = self.paths.root_name;
        if root_name.is_empty() {
            return Err(ConfigParseErrorKind::EmptyRootName);
        }
        if root_name.contains(separator) {
            return Err(ConfigParseErrorKind::RootNameContainsSeparator {
                root_name,
                separator,
            });
        }

        let TextConfigDeserialize {
            min_name_width,
            max_name_width,
        } = self.text;
        if min_name_width > max_name_width {
            return Err(ConfigParseErrorKind::InvalidNameWidths {
                min: min_name_width,
                max: max_name_width,
            });
        }

        Ok(SummaryConfig {
            separator,
            root_name: root_name.into(),
            min_name_width,
            max_name_width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino_tempfile::Utf8TempDir;
    use indoc::indoc;
    use test_case::test_case;

    fn write_config(contents: &str) -> (Utf8TempDir, camino::Utf8PathBuf) {
        let dir = Utf8TempDir::new().unwrap();
        let path = dir.path().join("summary.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn default_config_matches_default_impl() {
        let config = SummaryConfig::from_sources(None).expect("default config is valid");
        assert_eq!(config, SummaryConfig::default());
    }

    #[test]
    fn overrides_are_layered() {
        let (_dir, path) = write_config(indoc! {r#"
            [paths]
            separator = "@"
        "#});

        let config = SummaryConfig::from_sources(Some(&path)).unwrap();
        assert_eq!(config.separator(), '@');
        assert_eq!(config.root_name(), "all", "unset keys come from the default");
        assert_eq!(config.max_name_width(), 20);
    }

    #[test]
    fn unknown_keys_are_reported() {
        let (_dir, path) = write_config(indoc! {r#"
            colour = "blue"

            [paths]
            root-name = "root"
            colour = "blue"
        "#});

        let mut reported = Vec::new();
        let config = SummaryConfig::from_sources_impl(Some(&path), |config_file, unknown| {
            reported.push((config_file.map(ToOwned::to_owned), unknown.clone()));
        })
        .unwrap();
        assert_eq!(config.root_name(), "root");
        assert_eq!(
            reported,
            vec![(
                Some(path.clone()),
                BTreeSet::from(["colour".to_owned(), "paths.colour".to_owned()]),
            )]
        );
    }

    #[test]
    fn known_keys_are_not_reported() {
        let mut reported = 0;
        SummaryConfig::from_sources_impl(None, |_, _| reported += 1).unwrap();
        assert_eq!(reported, 0, "the default config has no unknown keys");
    }

    #[test_case(
        indoc! {r#"
            [paths]
            separator = "::"
        "#},
        "paths.separator must be a single character"
        ; "multi-char separator"
    )]
    #[test_case(
        indoc! {r#"
            [paths]
            root-name = ""
        "#},
        "paths.root-name must not be empty"
        ; "empty root name"
    )]
    #[test_case(
        indoc! {r#"
            [paths]
            root-name = "all/tests"
        "#},
        "must not contain the separator"
        ; "root name contains separator"
    )]
    #[test_case(
        indoc! {r#"
            [text]
            min-name-width = 30
        "#},
        "must not be greater than text.max-name-width"
        ; "widths out of order"
    )]
    fn invalid_config(contents: &str, expected: &str) {
        let (_dir, path) = write_config(contents);

        let err = SummaryConfig::from_sources(Some(&path)).unwrap_err();
        assert_eq!(err.config_file(), Some(path.as_path()));
        let message = err.kind().to_string();
        assert!(
            message.contains(expected),
            "error `{message}` should contain `{expected}`"
        );
    }

    #[test]
    fn wrong_type_reports_key() {
        let (_dir, path) = write_config(indoc! {r#"
            [text]
            max-name-width = "wide"
        "#});

        let err = SummaryConfig::from_sources(Some(&path)).unwrap_err();
        match err.kind() {
            ConfigParseErrorKind::DeserializeError(error) => {
                let path = error.path().to_string();
                assert!(path.contains("max-name-width"), "path: {path}");
            }
            other => panic!("expected a deserialize error, found {other:?}"),
        }
    }

    #[test]
    fn missing_file() {
        let dir = Utf8TempDir::new().unwrap();
        let path = dir.path().join("does-not-exist.toml");

        let err = SummaryConfig::from_sources(Some(&path)).unwrap_err();
        assert!(
            matches!(err.kind(), ConfigParseErrorKind::BuildError(_)),
            "{err:?}"
        );
    }
}
