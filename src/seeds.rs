use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use tracing::info;

use crate::config::TokenConfig;
use crate::token::normalize_tokens;

/// The three seed-token categories, in pool order.
#[derive(Debug, Clone, Default)]
pub struct Seeds {
    pub words: Vec<String>,
    pub numbers: Vec<String>,
    pub symbols: Vec<String>,
}

impl Seeds {
    /// Total number of entries across all categories.
    pub fn total_entries(&self) -> usize {
        self.words.len() + self.numbers.len() + self.symbols.len()
    }

    /// All tokens in category order: words, then numbers, then symbols.
    pub fn ordered(&self) -> impl Iterator<Item = &str> {
        self.words
            .iter()
            .chain(self.numbers.iter())
            .chain(self.symbols.iter())
            .map(String::as_str)
    }
}

/// Assembles seed tokens from inline values and optional seed files.
pub struct SeedLoader;

impl SeedLoader {
    /// Build the seed categories from config: inline entries are raw
    /// input and pass through the normalizer, seed-file lines are
    /// already atomic tokens and are taken verbatim.
    pub fn assemble(config: &TokenConfig) -> Result<Seeds> {
        let seeds = Seeds {
            words: Self::category(&config.words, config.words_file.as_deref(), config.file_line_limit)
                .context("failed to load word seeds")?,
            numbers: Self::category(&config.numbers, config.numbers_file.as_deref(), config.file_line_limit)
                .context("failed to load number seeds")?,
            symbols: Self::category(&config.symbols, config.symbols_file.as_deref(), config.file_line_limit)
                .context("failed to load symbol seeds")?,
        };

        info!(
            "Collected {} word / {} number / {} symbol tokens",
            seeds.words.len(),
            seeds.numbers.len(),
            seeds.symbols.len()
        );

        Ok(seeds)
    }

    fn category(inline: &[String], file: Option<&str>, limit: usize) -> Result<Vec<String>> {
        let mut tokens = Vec::new();
        for raw in inline {
            tokens.extend(normalize_tokens(raw));
        }

        if let Some(path) = file {
            let from_file = Self::load_file_limited(path, limit)?;
            info!("Loaded {} tokens from {}", from_file.len(), path);
            tokens.extend(from_file);
        }

        Ok(tokens)
    }

    /// Load a newline-delimited seed file, trimming lines, skipping
    /// blanks, stopping at `limit` lines.
    fn load_file_limited(path: &str, limit: usize) -> Result<Vec<String>> {
        let file = File::open(path).context(format!("Failed to open: {}", path))?;

        let reader = BufReader::new(file);
        let mut lines = Vec::new();

        for line in reader.lines().take(limit) {
            let line = line?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }

        Ok(lines)
    }
}
