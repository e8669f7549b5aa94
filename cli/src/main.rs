//! docexport CLI - render section outlines to Word and PowerPoint files

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use serde::Deserialize;
use serde_json::{Map, Value};

use docexport::{ExportFormat, ExportRequest, ExportSettings, Exporter, SectionInput};

#[derive(Parser)]
#[command(name = "docexport")]
#[command(version)]
#[command(about = "Export generated document sections to docx and pptx", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON document description and save it
    Export {
        /// Input JSON file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output format (docx or pptx)
        #[arg(short, long, default_value = "docx")]
        format: String,

        /// Output directory
        #[arg(short, long, value_name = "DIR", env = "EXPORT_TEMP_DIR", default_value = "./exports")]
        output: PathBuf,

        /// Identifier used in the file name (defaults to the input file stem)
        #[arg(long)]
        document_id: Option<String>,

        /// Size limit in megabytes (0 = unlimited)
        #[arg(long, env = "MAX_FILE_SIZE_MB", default_value = "50")]
        max_size_mb: u64,
    },

    /// Print the blocks parsed from a text file as JSON
    Blocks {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

/// Export input file layout.
#[derive(Deserialize)]
struct ExportInput {
    #[serde(default = "default_title")]
    title: String,
    #[serde(default)]
    sections: Vec<SectionInput>,
    #[serde(default)]
    slide_titles: Option<Vec<String>>,
    #[serde(default)]
    options: Map<String, Value>,
}

fn default_title() -> String {
    docexport::export::DEFAULT_PROJECT_TITLE.to_string()
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export {
            input,
            format,
            output,
            document_id,
            max_size_mb,
        } => cmd_export(&input, &format, &output, document_id, max_size_mb),
        Commands::Blocks { input, compact } => cmd_blocks(&input, compact),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_export(
    input: &Path,
    format: &str,
    output: &Path,
    document_id: Option<String>,
    max_size_mb: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    // fail on a bad format before reading anything
    let format: ExportFormat = format.parse()?;

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading input...");
    let text = fs::read_to_string(input)?;
    let parsed: ExportInput = serde_json::from_str(&text)?;
    pb.inc(1);

    let document_id = document_id.unwrap_or_else(|| {
        input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    });

    let mut request = ExportRequest::new(document_id, format.extension())
        .with_project_title(parsed.title)
        .with_sections(parsed.sections)
        .with_options(parsed.options);
    if let Some(titles) = parsed.slide_titles {
        request = request.with_slide_titles(titles);
    }

    let settings = ExportSettings::new()
        .with_export_dir(output)
        .with_max_file_size_mb(max_size_mb);
    let exporter = Exporter::new(settings);

    pb.set_message(format!("Rendering {}...", format));
    let artifact = exporter.export_document(&request)?;
    debug!("rendered {} bytes", artifact.len());
    pb.inc(1);

    pb.set_message("Saving...");
    let report = exporter.save_artifact(artifact)?;
    pb.inc(1);
    pb.finish_and_clear();
    info!("saved {} to {}", report.document_id, report.path.display());

    println!("{} {}", "Saved".green().bold(), report.path.display());
    println!("  {} {}", "Format:".dimmed(), report.format);
    println!("  {} {} bytes", "Size:".dimmed(), report.file_size_bytes);
    Ok(())
}

fn cmd_blocks(input: &Path, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(input)?;
    let blocks = docexport::parse(&content);

    let json = if compact {
        serde_json::to_string(&blocks)?
    } else {
        serde_json::to_string_pretty(&blocks)?
    };
    println!("{}", json);
    eprintln!("{} {} blocks", "Parsed".green(), blocks.len());
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docexport".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Word and PowerPoint export for generated documents");
}
