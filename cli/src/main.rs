//! pdfoutline CLI - PDF title and heading outline extraction

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::render::{layout_to_json, to_json};
use pdfoutline::{
    BatchOptions, BatchProcessor, BatchReport, JsonFormat, OutlineConfig, Outliner, PageSelection,
    ParseOptions, PdfLayoutParser,
};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract title and heading outlines from PDF documents", long_about = None)]
struct Cli {
    /// Input PDF file or directory of PDFs
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file (for a PDF) or directory (for a directory)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Outline configuration file (JSON)
    #[arg(long, value_name = "FILE", env = "PDFOUTLINE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of one PDF as JSON
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Outline configuration file (JSON)
        #[arg(long, value_name = "FILE", env = "PDFOUTLINE_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Extract outlines for every PDF in a directory
    Batch {
        /// Directory containing PDF files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Directory for the JSON outlines
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Outline configuration file (JSON)
        #[arg(long, value_name = "FILE", env = "PDFOUTLINE_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Dump the extracted page layout as JSON
    Layout {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            compact,
            pages,
            config,
        }) => cmd_extract(
            &input,
            output.as_deref(),
            compact,
            pages.as_deref(),
            config.as_deref(),
        ),
        Some(Commands::Batch {
            input,
            output,
            sequential,
            compact,
            config,
        }) => cmd_batch(&input, &output, sequential, compact, config.as_deref()),
        Some(Commands::Layout {
            input,
            output,
            pages,
        }) => cmd_layout(&input, output.as_deref(), pages.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match cli.input {
            Some(input) if input.is_dir() => {
                let output = cli.output.unwrap_or_else(|| default_batch_dir(&input));
                cmd_batch(&input, &output, false, false, cli.config.as_deref())
            }
            Some(input) => cmd_extract(
                &input,
                cli.output.as_deref(),
                false,
                None,
                cli.config.as_deref(),
            ),
            None => {
                println!("{}", "Usage: pdfoutline <INPUT> [OUTPUT]".yellow());
                println!("       pdfoutline --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn default_batch_dir(input: &Path) -> PathBuf {
    let name = input.file_name().unwrap_or_default().to_string_lossy();
    PathBuf::from(format!("{}_outlines", name))
}

fn load_config(path: Option<&Path>) -> Result<OutlineConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            log::debug!("Loading outline config from {}", path.display());
            Ok(OutlineConfig::from_file(path)?)
        }
        None => Ok(OutlineConfig::default()),
    }
}

fn page_selection(pages: Option<&str>) -> Result<PageSelection, Box<dyn std::error::Error>> {
    match pages {
        Some(p) => Ok(PageSelection::parse(p)?),
        None => Ok(PageSelection::All),
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    pages: Option<&str>,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = Outliner::new()
        .with_config(load_config(config)?)
        .with_pages(page_selection(pages)?)
        .extract_file(input)?;

    let json = to_json(&outline, json_format(compact))?;
    write_or_print(output, &json)
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    sequential: bool,
    compact: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = BatchOptions::new()
        .with_parallel(!sequential)
        .with_format(json_format(compact));
    let processor = BatchProcessor::new(load_config(config)?, options);

    let (pdfs, _) = processor.discover(input)?;
    let pb = ProgressBar::new(pdfs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = processor.run_with_progress(input, output, |doc| {
        let name = doc.input.file_name().unwrap_or_default().to_string_lossy();
        pb.set_message(name.into_owned());
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    print_report(&report, output);
    if report.is_success() {
        Ok(())
    } else {
        Err(format!("{} of {} documents failed", report.failed(), report.total()).into())
    }
}

fn print_report(report: &BatchReport, output: &Path) {
    println!("\n{}", "Batch summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Output".bold(), output.display());
    println!("{}: {}", "Succeeded".bold(), report.succeeded().to_string().green());
    println!("{}: {}", "Failed".bold(), report.failed().to_string().red());
    println!("{}: {}", "Skipped".bold(), report.skipped);

    for failure in report.failures() {
        if let Err(message) = &failure.result {
            println!(
                "  {} {}: {}",
                "✗".red(),
                failure.input.display(),
                message.dimmed()
            );
        }
    }
}

fn cmd_layout(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = ParseOptions::new().with_pages(page_selection(pages)?);
    let layout = PdfLayoutParser::open_with_options(input, options)?.extract()?;

    let json = layout_to_json(&layout, JsonFormat::Pretty)?;
    write_or_print(output, &json)
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading outline extraction tool");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/pdfoutline".dimmed()
    );
    println!("License: MIT");
}
