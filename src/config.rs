use anyhow::{Result, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

use crate::progress::ReportSettings;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tokens: TokenConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub expansion: ExpansionConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Inline seed entries per category. Entries are raw input: each one
    /// passes through the token normalizer, so "omer faruk" contributes
    /// two tokens and a symbol run like "!@#$" splits per character.
    #[serde(default)]
    pub words: Vec<String>,
    #[serde(default)]
    pub numbers: Vec<String>,
    #[serde(default)]
    pub symbols: Vec<String>,

    /// Optional newline-delimited seed files, one token per line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbers_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbols_file: Option<String>,

    /// Max lines read per seed file.
    #[serde(default = "default_file_line_limit")]
    pub file_line_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Minimum output line length, in characters
    pub min_len: usize,

    /// Maximum output line length, in characters
    pub max_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpansionConfig {
    /// Generate upper/lower case variants for each token
    pub case_variants: bool,

    /// Cap on exhaustive case expansion per token; above it only the
    /// original/lower/upper/title fallback set is used
    #[serde(default = "default_max_variants_per_token")]
    pub max_variants_per_token: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output file path
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Report after this many new unique lines
    #[serde(default = "default_progress_lines")]
    pub lines: u64,

    /// Report after this many milliseconds, whichever comes first
    #[serde(default = "default_progress_interval_ms")]
    pub interval_ms: u64,
}

fn default_file_line_limit() -> usize {
    100_000
}

fn default_max_variants_per_token() -> usize {
    1024
}

fn default_progress_lines() -> u64 {
    1000
}

fn default_progress_interval_ms() -> u64 {
    500
}

impl ProgressConfig {
    pub fn settings(&self) -> ReportSettings {
        ReportSettings {
            lines: self.lines,
            interval: Duration::from_millis(self.interval_ms),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.window.min_len > self.window.max_len {
            anyhow::bail!(
                "window.min_len ({}) must not exceed window.max_len ({})",
                self.window.min_len,
                self.window.max_len
            );
        }

        if self.expansion.max_variants_per_token == 0 {
            anyhow::bail!("expansion.max_variants_per_token must be >= 1");
        }

        if self.output.path.is_empty() {
            anyhow::bail!("output.path must not be empty");
        }

        if self.progress.lines == 0 {
            anyhow::bail!("progress.lines must be >= 1");
        }
        if self.progress.interval_ms == 0 {
            anyhow::bail!("progress.interval_ms must be >= 1");
        }
        if self.progress.interval_ms > 3_600_000 {
            anyhow::bail!("progress.interval_ms is too high (>{}ms)", 3_600_000);
        }

        if self.tokens.file_line_limit == 0 {
            anyhow::bail!("tokens.file_line_limit must be >= 1");
        }

        Ok(())
    }

    /// Create default configuration
    pub fn default_toml() -> String {
        r#"
[tokens]
words = []
numbers = []
symbols = []
file_line_limit = 100_000

[window]
min_len = 4
max_len = 12

[expansion]
case_variants = false
max_variants_per_token = 1024

[output]
path = "wordlist.txt"

[progress]
lines = 1000
interval_ms = 500
"#.to_string()
    }

    /// Save default config to file
    pub fn save_default(path: &str) -> Result<()> {
        fs::write(path, Self::default_toml())
            .context("Failed to write default config")?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tokens: TokenConfig::default(),
            window: WindowConfig::default(),
            expansion: ExpansionConfig::default(),
            output: OutputConfig::default(),
            progress: ProgressConfig::default(),
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        TokenConfig {
            words: Vec::new(),
            numbers: Vec::new(),
            symbols: Vec::new(),
            words_file: None,
            numbers_file: None,
            symbols_file: None,
            file_line_limit: default_file_line_limit(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            min_len: 4,
            max_len: 12,
        }
    }
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        ExpansionConfig {
            case_variants: false,
            max_variants_per_token: default_max_variants_per_token(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: "wordlist.txt".to_string(),
        }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        ProgressConfig {
            lines: default_progress_lines(),
            interval_ms: default_progress_interval_ms(),
        }
    }
}
