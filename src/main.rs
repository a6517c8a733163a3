// Aadhaar / PAN card verification from photographs

use clap::{Args, Parser, Subcommand, ValueEnum};
use docverify::{
    config::{Config, OcrMode},
    models::{BatchItem, DocumentRecord, DocumentType},
    report::{self, ReportFormat},
    utils::VerifierError,
    DocumentVerifier,
};
use std::path::PathBuf;

/// Extract and verify identity fields from Aadhaar and PAN card images
#[derive(Parser)]
#[command(name = "docverify", author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Tesseract data directory
    #[arg(long, global = true)]
    tessdata: Option<PathBuf>,

    /// Tesseract language(s), e.g. "eng" or "eng+hin"
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Use per-word OCR output (with boxes and confidences) instead of plain text
    #[arg(long, global = true)]
    detailed: bool,

    /// Tesseract page segmentation mode (0-13)
    #[arg(long, global = true)]
    psm: Option<u8>,

    /// Grayscale and contrast-enhance images before OCR
    #[arg(long, global = true)]
    preprocess: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify Aadhaar card images
    Aadhaar(VerifyArgs),
    /// Verify PAN card images
    Pan(VerifyArgs),
}

#[derive(Args)]
struct VerifyArgs {
    /// Card images (PNG or JPEG), processed in order
    images: Vec<PathBuf>,

    /// Report to generate after the batch
    #[arg(long, value_enum, default_value = "pdf")]
    report: ReportArg,

    /// Directory for the report file
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Print the raw OCR text of each image
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportArg {
    Pdf,
    Json,
    None,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), VerifierError> {
    let config = load_config(&cli)?;
    let (kind, args) = match cli.command {
        Commands::Aadhaar(args) => (DocumentType::Aadhaar, args),
        Commands::Pan(args) => (DocumentType::Pan, args),
    };

    if args.images.is_empty() {
        println!("No {} images given.", kind);
        return Ok(());
    }
    println!("{} image(s) uploaded.", args.images.len());

    let verifier = DocumentVerifier::new(&config);
    let items = verifier.verify_batch(&args.images, kind)?;

    for item in &items {
        print_item(item, args.show_text);
    }

    let format = match args.report {
        ReportArg::Pdf => ReportFormat::Pdf,
        ReportArg::Json => ReportFormat::Json,
        ReportArg::None => return Ok(()),
    };
    let dir = args.out_dir.unwrap_or(config.report_dir);
    let path = report::write_report(format, kind, &items, &dir)?;
    println!("\nReport written to {}", path.display());
    Ok(())
}

// File settings first, then command line overrides
fn load_config(cli: &Cli) -> Result<Config, VerifierError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(dir) = &cli.tessdata {
        config.tessdata_dir = Some(dir.clone());
    }
    if let Some(lang) = &cli.lang {
        config.language = lang.clone();
    }
    if cli.detailed {
        config.ocr_mode = OcrMode::Detailed;
    }
    if let Some(psm) = cli.psm {
        config.page_seg_mode = psm;
    }
    if cli.preprocess {
        config.preprocess = true;
    }
    config.validate()?;
    Ok(config)
}

fn print_item(item: &BatchItem, show_text: bool) {
    println!("\n-----------------------------------------------");
    println!("{}", item.source());
    match item {
        BatchItem::Processed(record) => print_record(record, show_text),
        BatchItem::Failed { error, .. } => println!("  ERROR: {}", error),
    }
}

fn print_record(record: &DocumentRecord, show_text: bool) {
    let kind = record.result.document_type();
    let verdict = match (kind, record.verified()) {
        (DocumentType::Aadhaar, true) => "[OK] Aadhaar Card Verified",
        (DocumentType::Aadhaar, false) => "[X] This is not a valid Aadhaar card",
        (DocumentType::Pan, true) => "[OK] PAN Card Verified",
        (DocumentType::Pan, false) => "[X] Invalid PAN Card",
    };
    println!("  {}", verdict);

    for (label, value) in record.result.field_lines() {
        let label = match label {
            "Aadhaar No" => "Aadhaar Number",
            "PAN No" => "PAN Number",
            other => other,
        };
        println!("  {}: {}", label, value);
    }

    if show_text {
        println!("\n  OCR TEXT:");
        for line in record.raw_text.lines().filter(|l| !l.trim().is_empty()) {
            println!("    {}", line);
        }
    }
}
