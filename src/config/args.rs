//! The `[args]` section: defaults for command-line options.
//!
//! # Example
//!
//! ```toml
//! [args]
//! force = false
//! new_viewer = true
//! compiler = "/opt/pandoc/bin/pandoc"
//! ```
//!
//! An explicit flag on the command line always wins over these values.

use super::ConfigError;
use serde::Deserialize;

/// Default document compiler.
pub const DEFAULT_COMPILER: &str = "pandoc";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArgsSection {
    /// Compile in one-shot modes even when the output is up to date.
    pub force: Option<bool>,

    /// In continuous mode, start a new viewer on every change.
    #[serde(alias = "new-viewer")]
    pub new_viewer: Option<bool>,

    /// Compiler program (name in PATH or absolute path).
    pub compiler: Option<String>,
}

impl ArgsSection {
    /// Deserialize from a TOML value.
    ///
    /// Unknown keys are reported through `on_unknown` and otherwise ignored.
    pub fn from_value(
        value: toml::Value,
        mut on_unknown: impl FnMut(String),
    ) -> Result<Self, ConfigError> {
        serde_ignored::deserialize(value, |path: serde_ignored::Path| {
            on_unknown(path.to_string());
        })
        .map_err(|e: toml::de::Error| ConfigError::Args(e.to_string()))
    }

    /// Compiler program, falling back to [`DEFAULT_COMPILER`].
    pub fn compiler(&self) -> &str {
        self.compiler
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_COMPILER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> (Result<ArgsSection, ConfigError>, Vec<String>) {
        let table: toml::Table = toml::from_str(src).unwrap();
        let mut unknown = Vec::new();
        let result = ArgsSection::from_value(toml::Value::Table(table), |k| unknown.push(k));
        (result, unknown)
    }

    #[test]
    fn test_args_section() {
        let (args, unknown) = parse("force = true\nnew-viewer = false\ncompiler = 'pandoc3'");
        let args = args.unwrap();
        assert_eq!(args.force, Some(true));
        assert_eq!(args.new_viewer, Some(false));
        assert_eq!(args.compiler(), "pandoc3");
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_args_unknown_keys_reported() {
        let (args, unknown) = parse("cd = true\nforce = false");
        assert_eq!(args.unwrap().force, Some(false));
        assert_eq!(unknown, vec!["cd".to_string()]);
    }

    #[test]
    fn test_args_wrong_type() {
        let (args, _) = parse("force = 'yes'");
        assert!(matches!(args, Err(ConfigError::Args(_))));
    }

    #[test]
    fn test_default_compiler() {
        assert_eq!(ArgsSection::default().compiler(), DEFAULT_COMPILER);
        let blank = ArgsSection {
            compiler: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(blank.compiler(), DEFAULT_COMPILER);
    }
}
