//! Typed hook values from the settings file.
//!
//! Hooks are a closed set of named strategies, validated when the settings
//! are loaded:
//!
//! ```toml
//! [pdf]
//! load = ["zathura", "$PANVIEW_OUTPUT"]   # or "command:zathura $PANVIEW_OUTPUT"
//! reload = "signal:HUP"                    # default | none | kill | restart | relaunch
//! pre_reload = "none"
//! ```

use crate::platform::ViewerSignal;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One parsed hook value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookSpec {
    /// Use the platform default for this role.
    Default,
    /// Do nothing.
    None,
    /// Send a signal to the viewer.
    Signal(ViewerSignal),
    /// Kill the viewer.
    Kill,
    /// Terminate, wait, kill, relaunch.
    Restart,
    /// Launch a fresh viewer with the original command line.
    Relaunch,
    /// Run an external command.
    Command(Vec<String>),
}

/// Why a hook value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    #[error("empty hook value")]
    Empty,

    #[error("unknown hook `{0}`")]
    Unknown(String),

    #[error("unknown signal `{0}`")]
    BadSignal(String),

    #[error("hook command has no program")]
    EmptyCommand,

    #[error("hook value must be a string or an array of strings, found {0}")]
    WrongType(&'static str),

    #[error("`{spec}` cannot be used as a {role} hook")]
    NotForRole { spec: String, role: &'static str },
}

impl FromStr for HookSpec {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(HookError::Empty);
        }

        if let Some((kind, rest)) = s.split_once(':') {
            return match kind.trim().to_ascii_lowercase().as_str() {
                "signal" => ViewerSignal::parse(rest)
                    .map(Self::Signal)
                    .ok_or_else(|| HookError::BadSignal(rest.trim().to_string())),
                "command" => Self::command(rest.split_whitespace().map(str::to_string).collect()),
                _ => Err(HookError::Unknown(s.to_string())),
            };
        }

        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "none" | "nothing" => Ok(Self::None),
            "kill" => Ok(Self::Kill),
            "restart" => Ok(Self::Restart),
            "relaunch" => Ok(Self::Relaunch),
            _ => Err(HookError::Unknown(s.to_string())),
        }
    }
}

impl HookSpec {
    /// Build a `Command` hook, rejecting an empty argv.
    pub fn command(argv: Vec<String>) -> Result<Self, HookError> {
        if argv.first().is_none_or(|p| p.trim().is_empty()) {
            return Err(HookError::EmptyCommand);
        }
        Ok(Self::Command(argv))
    }

    /// Parse a settings value: a string, or an array of strings (a command).
    pub fn from_value(value: &toml::Value) -> Result<Self, HookError> {
        match value {
            toml::Value::String(s) => s.parse(),
            toml::Value::Array(items) => {
                let argv = items
                    .iter()
                    .map(|item| {
                        item.as_str()
                            .map(str::to_string)
                            .ok_or(HookError::WrongType(item.type_str()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Self::command(argv)
            }
            // `false` is the conventional "unset"
            toml::Value::Boolean(false) => Err(HookError::Empty),
            other => Err(HookError::WrongType(other.type_str())),
        }
    }
}

impl fmt::Display for HookSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::None => f.write_str("none"),
            Self::Signal(ViewerSignal::Number(n)) => write!(f, "signal:{n}"),
            Self::Signal(sig) => write!(f, "signal:{sig}"),
            Self::Kill => f.write_str("kill"),
            Self::Restart => f.write_str("restart"),
            Self::Relaunch => f.write_str("relaunch"),
            Self::Command(argv) => write!(f, "command:{}", argv.join(" ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named() {
        assert_eq!("default".parse(), Ok(HookSpec::Default));
        assert_eq!(" None ".parse(), Ok(HookSpec::None));
        assert_eq!("kill".parse(), Ok(HookSpec::Kill));
        assert_eq!("RESTART".parse(), Ok(HookSpec::Restart));
        assert_eq!("relaunch".parse(), Ok(HookSpec::Relaunch));
    }

    #[test]
    fn test_parse_signal() {
        assert_eq!(
            "signal:HUP".parse(),
            Ok(HookSpec::Signal(ViewerSignal::Hangup))
        );
        assert_eq!(
            "signal: 10".parse(),
            Ok(HookSpec::Signal(ViewerSignal::Number(10)))
        );
        assert_eq!(
            "signal:WAT".parse::<HookSpec>(),
            Err(HookError::BadSignal("WAT".into()))
        );
    }

    #[test]
    fn test_display_parses_back() {
        let specs = [
            HookSpec::Signal(ViewerSignal::Number(10)),
            HookSpec::Signal(ViewerSignal::Hangup),
            HookSpec::Restart,
            HookSpec::Command(vec!["xpdf".into(), "-reload".into()]),
        ];
        assert_eq!(specs[0].to_string(), "signal:10");
        for spec in specs {
            assert_eq!(spec.to_string().parse(), Ok(spec));
        }
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(
            "command:xpdf -remote panview -reload".parse(),
            Ok(HookSpec::Command(vec![
                "xpdf".into(),
                "-remote".into(),
                "panview".into(),
                "-reload".into()
            ]))
        );
        assert_eq!(
            "command:   ".parse::<HookSpec>(),
            Err(HookError::EmptyCommand)
        );
    }

    #[test]
    fn test_parse_rejects_code() {
        // arbitrary expressions are never evaluated
        assert!(matches!(
            "send_signal(29)".parse::<HookSpec>(),
            Err(HookError::Unknown(_))
        ));
        assert!(matches!(
            "lambda p: p.kill()".parse::<HookSpec>(),
            Err(HookError::Unknown(_))
        ));
        assert_eq!("".parse::<HookSpec>(), Err(HookError::Empty));
    }

    #[test]
    fn test_from_value() {
        let argv = toml::Value::Array(vec!["gv".into(), "--watch".into()]);
        assert_eq!(
            HookSpec::from_value(&argv),
            Ok(HookSpec::Command(vec!["gv".into(), "--watch".into()]))
        );
        assert_eq!(
            HookSpec::from_value(&toml::Value::Array(vec![])),
            Err(HookError::EmptyCommand)
        );
        assert_eq!(
            HookSpec::from_value(&toml::Value::Integer(29)),
            Err(HookError::WrongType("integer"))
        );
        assert_eq!(
            HookSpec::from_value(&toml::Value::Boolean(false)),
            Err(HookError::Empty)
        );
        assert_eq!(
            HookSpec::from_value(&toml::Value::Array(vec![1.into()])),
            Err(HookError::WrongType("integer"))
        );
    }

    #[test]
    fn test_display_round_trip() {
        let spec = HookSpec::Command(vec!["xpdf".into(), "-reload".into()]);
        assert_eq!(spec.to_string().parse(), Ok(spec));
    }
}
