use clap::{Parser, ValueEnum};
use jpegquality::{QualityReport, SENTINEL_QUALITY};
use rayon::prelude::*;
use serde_json::json;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const JPEG_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

#[derive(Parser)]
#[command(name = "jpegquality")]
#[command(version, about = "Estimate the libjpeg quality factor of JPEG files from their quantization tables", long_about = None)]
struct Cli {
    /// Files or directories to analyze
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    #[arg(short, long, default_value_t = true)]
    recursive: bool,

    #[arg(short, long, value_enum, default_value = "human")]
    output: OutputFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

fn main() -> anyhow::Result<()> {
    let _ = jpegquality::logging::init_logging(
        "jpegquality",
        jpegquality::logging::LogConfig::default(),
    );

    let cli = Cli::parse();

    let mut files = Vec::new();
    for input in &cli.inputs {
        if input.is_file() {
            files.push(input.clone());
        } else if input.is_dir() {
            collect_jpeg_files(input, cli.recursive, &mut files)?;
        } else {
            eprintln!("Error: Input path does not exist: {}", input.display());
            std::process::exit(1);
        }
    }

    tracing::info!(files = files.len(), "starting quality analysis");

    let reports: Vec<QualityReport> = files
        .par_iter()
        .map(|path| QualityReport::for_file(path))
        .collect();

    match cli.output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "total": reports.len(),
                    "results": reports,
                }))?
            );
        }
        OutputFormat::Human => {
            for report in &reports {
                if report.quality == SENTINEL_QUALITY {
                    println!("{}: not a valid JPEG", report.path.display());
                } else {
                    println!("{}: quality {}", report.path.display(), report.quality);
                }
            }
            println!("Analyzed {} file(s)", reports.len());
        }
    }

    Ok(())
}

fn collect_jpeg_files(
    dir: &Path,
    recursive: bool,
    files: &mut Vec<PathBuf>,
) -> anyhow::Result<()> {
    let walker = if recursive {
        WalkDir::new(dir).follow_links(true)
    } else {
        WalkDir::new(dir).max_depth(1)
    };

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if let Some(ext) = path.extension() {
            if JPEG_EXTENSIONS.contains(&ext.to_str().unwrap_or("").to_lowercase().as_str()) {
                files.push(path.to_path_buf());
            }
        }
    }

    Ok(())
}
