use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use rasid_core::{Expense, ExpenseOverrides, Money};
use rasid_ocr::{
    ContentKind, InterpreterConfig, ParsedReceipt, ReceiptInterpreter, ReceiptPipeline, TextSource,
};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "rasid", version, about = "Turn receipt scans into expense records")]
pub struct Cli {
    /// Receipt files (.jpg, .jpeg, .png, .pdf, .txt)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Interpreter configuration (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Treat every file as already-extracted text
    #[arg(long)]
    pub text: bool,

    /// Print the raw interpretation instead of the merged expense
    #[arg(long)]
    pub parsed: bool,

    /// Amount to use when none is found on the receipt
    #[arg(long)]
    pub amount: Option<String>,

    /// Date (YYYY-MM-DD) to use when none is found on the receipt
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub vendor: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> Result<ExpenseOverrides> {
        let amount = self
            .amount
            .as_deref()
            .map(str::parse::<Money>)
            .transpose()
            .context("Invalid --amount")?;
        let date = self
            .date
            .as_deref()
            .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d"))
            .transpose()
            .context("Invalid --date, expected YYYY-MM-DD")?;
        Ok(ExpenseOverrides {
            amount,
            date,
            vendor: self.vendor.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
        })
    }

    pub fn interpreter(&self) -> Result<ReceiptInterpreter> {
        let config = match &self.config {
            Some(path) => InterpreterConfig::from_path(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => InterpreterConfig::default(),
        };
        Ok(ReceiptInterpreter::new(&config))
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Expense(Expense),
    Parsed(ParsedReceipt),
}

#[derive(Debug, Serialize)]
pub struct FileOutput {
    pub file: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

pub async fn process_files<R: TextSource>(
    cli: &Cli,
    pipeline: &ReceiptPipeline<R>,
    overrides: &ExpenseOverrides,
) -> Vec<FileOutput> {
    let mut out = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let parsed = if cli.text {
            pipeline.process_file_as(path, ContentKind::Text).await
        } else {
            pipeline.process_file(path).await
        };
        tracing::info!(
            amount = %parsed.amount(),
            source = %parsed.amount_source,
            vendor = parsed.vendor(),
            "Receipt interpreted: {}",
            path.display()
        );
        let outcome = if cli.parsed {
            Outcome::Parsed(parsed)
        } else {
            Outcome::Expense(parsed.into_expense(overrides.clone()))
        };
        out.push(FileOutput { file: path.display().to_string(), outcome });
    }
    out
}
