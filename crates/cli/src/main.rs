use anyhow::Result;
use clap::Parser;
use rasid_ocr::{ReceiptInterpreter, ReceiptPipeline};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Cli;

#[cfg(feature = "tesseract")]
fn build_pipeline(
    interpreter: ReceiptInterpreter,
) -> ReceiptPipeline<rasid_ocr::recognizer::tesseract_backend::TesseractRecognizer> {
    let data_path = std::env::var("TESSDATA_PREFIX").ok();
    let recognizer =
        rasid_ocr::recognizer::tesseract_backend::TesseractRecognizer::new(data_path, "eng");
    ReceiptPipeline::new(recognizer, interpreter)
}

// Without Tesseract, image receipts resolve to the acquisition-failure default.
#[cfg(not(feature = "tesseract"))]
fn build_pipeline(interpreter: ReceiptInterpreter) -> ReceiptPipeline<rasid_ocr::UnavailableRecognizer> {
    ReceiptPipeline::new(rasid_ocr::UnavailableRecognizer, interpreter)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let overrides = cli.overrides()?;
    let pipeline = build_pipeline(cli.interpreter()?);

    let results = commands::process_files(&cli, &pipeline, &overrides).await;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
