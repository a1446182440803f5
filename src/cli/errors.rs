//! Attribute a diagnostic transcript's errors to source files.
//!
//! Reads the analyzer's raw transcript from a file and prints the
//! per-file error index, either as readable text (default) or JSON:
//!
//! ```bash
//! modlens errors transcript.txt
//! modlens errors transcript.txt --file shield/guard.lua
//! modlens errors transcript.txt --format json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::json;

use crate::config::ModlensConfig;
use crate::core::ModlensError;
use crate::diagnostics::{ErrorAttributor, ErrorRecord};

/// Command to parse and display a diagnostic transcript.
#[derive(Args, Debug)]
pub struct ErrorsCommand {
    /// Path to the analyzer's transcript file.
    transcript: PathBuf,

    /// Show errors for one file only (fuzzy-matched against the index).
    #[arg(long)]
    file: Option<String>,

    /// Output format (text, json).
    #[arg(short = 'f', long, default_value = "text")]
    format: String,

    /// Fallback file for errors the transcript attributes to nothing
    /// (default: configured entry-file convention).
    #[arg(short, long)]
    entry: Option<String>,
}

impl ErrorsCommand {
    /// Parse the transcript and print the attribution index.
    pub async fn execute(self, config: &ModlensConfig) -> Result<()> {
        let transcript = std::fs::read_to_string(&self.transcript).map_err(|err| {
            ModlensError::TranscriptReadError {
                path: self.transcript.clone(),
                reason: err.to_string(),
            }
        })?;

        let fallback = self.entry.as_deref().unwrap_or(&config.entry_file);
        let mut attributor = ErrorAttributor::new().with_fallback(fallback);
        attributor.parse_errors(&transcript);

        let files = match &self.file {
            Some(file) => vec![file.clone()],
            None => attributor.files_with_errors(),
        };

        match self.format.as_str() {
            "json" => {
                let index: serde_json::Map<String, serde_json::Value> = files
                    .iter()
                    .map(|file| (file.clone(), json!(attributor.errors_for_file(file))))
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "files": index,
                        "total": attributor.total_error_count(),
                    }))?
                );
            }
            "text" => {
                if attributor.total_error_count() == 0 {
                    println!("no errors in transcript");
                    return Ok(());
                }
                for file in &files {
                    let records = attributor.errors_for_file(file);
                    println!("{} ({} errors)", file.bold(), records.len());
                    for ErrorRecord {
                        line,
                        column,
                        message,
                    } in &records
                    {
                        println!("  {} {message}", format!("[{line}:{column}]").cyan());
                    }
                }
            }
            other => {
                anyhow::bail!("unknown format '{other}' (expected 'text' or 'json')");
            }
        }

        Ok(())
    }
}
