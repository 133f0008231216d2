use crate::cnv::{check_window, DEFAULT_AUTOSOMES};
use crate::utils::Result;
use chrono::Datelike;
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// Comma-separated chromosome list, parsed as one value.
pub type ChromList = Vec<u32>;

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="cnvtrack",
          version=&**FULL_VERSION,
          about="Copy-number patterns from single-cell expression",
          long_about = None,
          disable_help_subcommand = true,
          after_help = format!("Copyright (C) 2021-{}     the cnvtrack authors.
This program comes with ABSOLUTELY NO WARRANTY; it is intended for
research use only.", chrono::Utc::now().year()),
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(global = true)]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Genome-wide ratio track of target versus reference cells")]
    Scan(ScanArgs),
    #[clap(about = "Per-cell heatmap of smoothed expression differences")]
    Heatmap(HeatmapArgs),
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("scan")))]
#[command(arg_required_else_help(true))]
pub struct ScanArgs {
    #[clap(required = true)]
    #[clap(short = 'm')]
    #[clap(long = "matrix")]
    #[clap(help = "Genes x cells expression matrix, log2(CPM/10+1) scaled (TSV, may be gzipped)")]
    #[clap(value_name = "MATRIX")]
    #[arg(value_parser = check_file_exists)]
    pub matrix_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'p')]
    #[clap(long = "positions")]
    #[clap(help = "Gene positions: gene chrom start end")]
    #[clap(value_name = "POSITIONS")]
    #[arg(value_parser = check_file_exists)]
    pub positions_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'c')]
    #[clap(long = "cells")]
    #[clap(help = "Cell annotations: cell group(reference|target) [subject]")]
    #[clap(value_name = "CELLS")]
    #[arg(value_parser = check_file_exists)]
    pub cells_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "image")]
    #[clap(help = "Output image path (.svg, .png, or .pdf)")]
    #[clap(value_name = "IMAGE")]
    #[arg(value_parser = check_image_path)]
    pub output_path: PathBuf,

    #[clap(long = "subject")]
    #[clap(value_name = "SUBJECT")]
    #[clap(help = "Restrict target cells to one subject")]
    pub subject: Option<String>,

    #[clap(short = 'w')]
    #[clap(long = "window")]
    #[clap(value_name = "GENES")]
    #[clap(help = "Width of the moving-average window in genes (odd)")]
    #[clap(default_value = "101")]
    #[arg(value_parser = window_is_odd)]
    pub window: usize,

    #[clap(long = "arms")]
    #[clap(value_name = "ARMS")]
    #[clap(help = "Arm boundaries (hg19 or file of 'chrom p_arm_end' lines)")]
    #[clap(default_value = "hg19")]
    pub arms: String,

    #[clap(long = "per-chromosome")]
    #[clap(help = "Also write one image per chromosome with p/q arms marked")]
    pub per_chromosome: bool,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "autosomes")]
    #[clap(value_name = "N")]
    #[clap(help = "Number of autosomes to scan")]
    #[clap(default_value_t = DEFAULT_AUTOSOMES)]
    #[arg(value_parser = autosomes_in_range)]
    pub num_autosomes: u32,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "margin")]
    #[clap(value_name = "MARGIN")]
    #[clap(help = "Horizontal offset applied to the genome track, separators, and ticks")]
    #[clap(default_value = "0")]
    #[arg(value_parser = ensure_non_negative_float)]
    pub margin: f64,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("heatmap")))]
#[command(arg_required_else_help(true))]
pub struct HeatmapArgs {
    #[clap(required = true)]
    #[clap(short = 'm')]
    #[clap(long = "matrix")]
    #[clap(help = "Genes x cells expression matrix, log2(CPM/10+1) scaled (TSV, may be gzipped)")]
    #[clap(value_name = "MATRIX")]
    #[arg(value_parser = check_file_exists)]
    pub matrix_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'p')]
    #[clap(long = "positions")]
    #[clap(help = "Gene positions: gene chrom start end")]
    #[clap(value_name = "POSITIONS")]
    #[arg(value_parser = check_file_exists)]
    pub positions_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'c')]
    #[clap(long = "cells")]
    #[clap(help = "Cell annotations: cell group(reference|target) [subject]")]
    #[clap(value_name = "CELLS")]
    #[arg(value_parser = check_file_exists)]
    pub cells_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "image")]
    #[clap(help = "Output image path (.svg, .png, or .pdf)")]
    #[clap(value_name = "IMAGE")]
    #[arg(value_parser = check_image_path)]
    pub output_path: PathBuf,

    #[clap(long = "display-cells")]
    #[clap(value_name = "CELL_LIST")]
    #[clap(help = "Cells to display, one per line (default: all target cells)")]
    #[arg(value_parser = check_file_exists, conflicts_with = "subject")]
    pub display_cells_path: Option<PathBuf>,

    #[clap(long = "subject")]
    #[clap(value_name = "SUBJECT")]
    #[clap(help = "Display only the target cells of one subject")]
    pub subject: Option<String>,

    #[clap(short = 'w')]
    #[clap(long = "window")]
    #[clap(value_name = "GENES")]
    #[clap(help = "Width of the moving-average window in genes (odd)")]
    #[clap(default_value = "101")]
    #[arg(value_parser = window_is_odd)]
    pub window: usize,

    #[clap(long = "cluster-chroms")]
    #[clap(value_name = "CHROMS")]
    #[clap(help = "Order cells by clustering over these chromosomes (e.g. 7,10)")]
    #[arg(value_parser = chroms_from_string)]
    pub cluster_chroms: Option<ChromList>,

    #[clap(long = "exp-thresh")]
    #[clap(value_name = "CPM")]
    #[clap(help = "Minimum mean reference expression (CPM) for a gene to be shown")]
    #[clap(default_value = "5")]
    #[arg(value_parser = ensure_non_negative_float)]
    pub exp_thresh: f64,

    #[clap(long = "clip")]
    #[clap(value_name = "CLIP")]
    #[clap(help = "Saturate displayed differences at +/- this value")]
    #[clap(default_value = "30")]
    #[arg(value_parser = ensure_positive_float)]
    pub clip_thresh: f64,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "autosomes")]
    #[clap(value_name = "N")]
    #[clap(help = "Number of autosomes to include")]
    #[clap(default_value_t = DEFAULT_AUTOSOMES)]
    #[arg(value_parser = autosomes_in_range)]
    pub num_autosomes: u32,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_image_path(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("svg") | Some("png") | Some("pdf") => Ok(path.to_path_buf()),
        _ => Err("Image must have an extension of .svg, .png, or .pdf".to_string()),
    }
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid thread number", s))?;
    if thread >= 1 {
        Ok(thread)
    } else {
        Err("Number of threads must be at least 1".into())
    }
}

fn window_is_odd(s: &str) -> Result<usize> {
    let window: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid window size", s))?;
    check_window(window)?;
    Ok(window)
}

fn autosomes_in_range(s: &str) -> Result<u32> {
    let count: u32 = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid number of autosomes", s))?;
    if count >= 1 {
        Ok(count)
    } else {
        Err("Number of autosomes must be at least 1".into())
    }
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn parse_float(s: &str) -> Result<f64> {
    let value = s
        .parse::<f64>()
        .map_err(|e| format!("Could not parse float: {}", e))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("The value must be finite, got: {}", value))
    }
}

fn ensure_non_negative_float(s: &str) -> Result<f64> {
    let value = parse_float(s)?;
    if value < 0.0 {
        Err(format!("The value must be non-negative, got: {}", value))
    } else {
        Ok(value)
    }
}

fn ensure_positive_float(s: &str) -> Result<f64> {
    let value = parse_float(s)?;
    if value <= 0.0 {
        Err(format!("The value must be positive, got: {}", value))
    } else {
        Ok(value)
    }
}

fn chroms_from_string(s: &str) -> Result<ChromList> {
    let chroms = s
        .split(',')
        .map(|chrom| {
            crate::utils::autosome_number(chrom.trim())
                .ok_or_else(|| format!("Invalid chromosome in list: {}", chrom))
        })
        .collect::<Result<Vec<u32>>>()?;
    if chroms.is_empty() {
        Err("Chromosome list is empty".to_string())
    } else {
        Ok(chroms)
    }
}
