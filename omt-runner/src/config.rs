//! Runner configuration
//!
//! Defines how the external scan tool is launched and which of its
//! output lines are surfaced while it runs.

use thiserror::Error;

/// Program launched for every job unless overridden
pub const DEFAULT_TOOL: &str = "nmap";

/// Output prefixes treated as live progress
pub const DEFAULT_PROGRESS_PREFIXES: [&str; 3] = ["Stats:", "Timing:", "ETC:"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunnerConfigError {
    #[error("tool cannot be empty")]
    EmptyTool,

    #[error("at least one progress prefix is required")]
    NoProgressPrefixes,
}

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// External program name or path (e.g., "nmap" or "/usr/bin/nmap")
    pub tool: String,

    /// A stdout line starting with any of these is shown live
    pub progress_prefixes: Vec<String>,
}

impl RunnerConfig {
    /// Creates a new configuration with default progress prefixes
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            progress_prefixes: DEFAULT_PROGRESS_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }

    /// Replaces the progress prefixes
    pub fn with_progress_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.progress_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `line` should be surfaced as live progress
    pub fn is_progress_line(&self, line: &str) -> bool {
        self.progress_prefixes
            .iter()
            .any(|prefix| line.starts_with(prefix.as_str()))
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), RunnerConfigError> {
        if self.tool.trim().is_empty() {
            return Err(RunnerConfigError::EmptyTool);
        }

        if self.progress_prefixes.is_empty() {
            return Err(RunnerConfigError::NoProgressPrefixes);
        }

        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL)
    }
}
