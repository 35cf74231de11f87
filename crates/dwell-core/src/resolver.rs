//! Window title to activity label resolution.

use regex::Regex;
use thiserror::Error;

/// Default title pattern: the project segment of VS Code and Cursor titles,
/// e.g. `main.rs - dwell - Code - OSS` yields `dwell`.
pub const DEFAULT_TITLE_PATTERN: &str = r"(?i)^.+? - (.+?) - (?:cursor|code).*$";

/// Errors building a rule set.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A pattern failed to compile.
    #[error("invalid title pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// A pattern has no capture group to extract a label from.
    #[error("title pattern {pattern:?} has no capture group")]
    MissingCapture { pattern: String },
}

/// Extracts an activity label from a window title.
///
/// Implementations must be total: a title that yields nothing returns `None`.
pub trait ResolveName {
    fn resolve(&self, title: &str) -> Option<String>;
}

/// Ordered list of title patterns. The first pattern whose first capture
/// group matches wins.
#[derive(Debug, Clone)]
pub struct TitleRules {
    patterns: Vec<Regex>,
}

impl TitleRules {
    /// Compiles the given patterns, preserving their order.
    pub fn new<I, S>(patterns: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                let regex = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })?;
                if regex.captures_len() < 2 {
                    return Err(RuleError::MissingCapture {
                        pattern: pattern.to_string(),
                    });
                }
                Ok(regex)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for TitleRules {
    fn default() -> Self {
        Self {
            patterns: vec![Regex::new(DEFAULT_TITLE_PATTERN).expect("default pattern is valid")],
        }
    }
}

impl ResolveName for TitleRules {
    fn resolve(&self, title: &str) -> Option<String> {
        self.patterns.iter().find_map(|re| {
            re.captures(title)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
    }
}
