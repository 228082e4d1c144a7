//! hatcher CLI - hatch pattern generation from segment sets
//!
//! Reads 2D segments from JSON, solves the tiling problem, and writes
//! `.pat` pattern files; also decodes pattern files back to segments.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use hatcher::{assemble, AssembleSettings, FailurePolicy, Segment, Tile};
use hatcher_pat::{parse_pat, parse_segments, HatchPattern, PatDialect, PatKind, PatUnits};

#[derive(Parser)]
#[command(name = "hatcher")]
#[command(about = "Periodic hatch pattern generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a .pat file from a segments JSON file
    Generate {
        /// Input segments JSON: [{"x0":..,"y0":..,"x1":..,"y1":..}, ...]
        input: PathBuf,
        /// Output .pat file
        output: PathBuf,
        /// Tile width the segments repeat over
        #[arg(long, default_value_t = 1.0)]
        tile_width: f64,
        /// Tile height the segments repeat over
        #[arg(long, default_value_t = 1.0)]
        tile_height: f64,
        /// Fractional digits for endpoint rounding and slope bounding
        #[arg(long, default_value_t = 4)]
        decimals: u32,
        /// Decimal digits bounding the solver's integer coefficients
        #[arg(long, default_value_t = 8)]
        precision: u32,
        /// Retry the whole assembly this many times at coarser rounding
        /// instead of skipping unsolvable segments
        #[arg(long)]
        retry: Option<u32>,
        /// Header dialect: autocad or revit
        #[arg(long, default_value = "autocad")]
        dialect: String,
        /// Units metadata for the revit dialect: mm or inch
        #[arg(long, default_value = "mm")]
        units: String,
        /// Pattern type for the revit dialect: model or drafting
        #[arg(long, default_value = "model")]
        kind: String,
        /// Pattern title
        #[arg(short, long, default_value = "title")]
        title: String,
        /// Pattern description
        #[arg(short, long, default_value = "description")]
        description: String,
    },
    /// Decode a .pat file back into a segments JSON file
    Decode {
        /// Input .pat file
        input: PathBuf,
        /// Output segments JSON file
        output: PathBuf,
    },
    /// Display information about a .pat file
    Info {
        /// Path to the .pat file
        file: PathBuf,
    },
}

/// JSON wire form of one segment.
#[derive(Serialize, Deserialize)]
struct SegmentRecord {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            tile_width,
            tile_height,
            decimals,
            precision,
            retry,
            dialect,
            units,
            kind,
            title,
            description,
        } => generate(
            &input,
            &output,
            tile_width,
            tile_height,
            decimals,
            precision,
            retry,
            &dialect,
            &units,
            &kind,
            title,
            description,
        ),
        Commands::Decode { input, output } => decode(&input, &output),
        Commands::Info { file } => info(&file),
    }
}

#[allow(clippy::too_many_arguments)]
fn generate(
    input: &PathBuf,
    output: &PathBuf,
    tile_width: f64,
    tile_height: f64,
    decimals: u32,
    precision: u32,
    retry: Option<u32>,
    dialect: &str,
    units: &str,
    kind: &str,
    title: String,
    description: String,
) -> Result<()> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("reading segments from {}", input.display()))?;
    let records: Vec<SegmentRecord> = serde_json::from_str(&json)?;
    let segments: Vec<Segment> = records
        .iter()
        .map(|r| Segment::from_coords(r.x0, r.y0, r.x1, r.y1))
        .collect();

    let tile = Tile::new(tile_width, tile_height)?;
    let settings = AssembleSettings {
        round_decimals: decimals,
        precision,
        policy: match retry {
            Some(attempts) => FailurePolicy::RetryCoarser { attempts },
            None => FailurePolicy::Skip,
        },
    };
    let assembly = assemble(&segments, &tile, &settings)?;
    for skipped in &assembly.skipped {
        eprintln!("warning: segment {} skipped: {}", skipped.index, skipped.error);
    }

    let pattern = HatchPattern {
        title,
        description,
        dialect: parse_dialect(dialect)?,
        units: parse_units(units)?,
        kind: parse_kind(kind)?,
        lines: assembly.lines,
    };
    fs::write(output, pattern.to_pat_string())
        .with_context(|| format!("writing {}", output.display()))?;
    println!(
        "Wrote {} hatch lines to {}",
        pattern.lines.len(),
        output.display()
    );
    Ok(())
}

fn decode(input: &PathBuf, output: &PathBuf) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("reading pattern from {}", input.display()))?;
    let segments = parse_segments(&text)?;
    let records: Vec<SegmentRecord> = segments
        .iter()
        .map(|s| SegmentRecord {
            x0: s.p0.x,
            y0: s.p0.y,
            x1: s.p1.x,
            y1: s.p1.y,
        })
        .collect();
    fs::write(output, serde_json::to_string_pretty(&records)?)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("Decoded {} segments to {}", records.len(), output.display());
    Ok(())
}

fn info(file: &PathBuf) -> Result<()> {
    let text =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let title = text
        .lines()
        .find(|l| l.starts_with('*'))
        .unwrap_or("*<untitled>");
    let lines = parse_pat(&text)?;

    println!("Pattern: {}", &title[1..]);
    println!("Hatch lines: {}", lines.len());
    for line in &lines {
        println!(
            "  {:>10.4} deg  base ({:.4}, {:.4})  dash {:.4}  period {:.4}",
            line.angle,
            line.x,
            line.y,
            line.dash,
            line.dash - line.space
        );
    }
    Ok(())
}

fn parse_dialect(value: &str) -> Result<PatDialect> {
    match value.to_lowercase().as_str() {
        "autocad" => Ok(PatDialect::AutoCad),
        "revit" => Ok(PatDialect::Revit),
        _ => bail!("unknown dialect: {value} (expected autocad or revit)"),
    }
}

fn parse_units(value: &str) -> Result<PatUnits> {
    match value.to_lowercase().as_str() {
        "mm" | "millimeters" => Ok(PatUnits::Millimeters),
        "inch" | "inches" => Ok(PatUnits::Inches),
        _ => bail!("unknown units: {value} (expected mm or inch)"),
    }
}

fn parse_kind(value: &str) -> Result<PatKind> {
    match value.to_lowercase().as_str() {
        "model" => Ok(PatKind::Model),
        "drafting" => Ok(PatKind::Drafting),
        _ => bail!("unknown pattern type: {value} (expected model or drafting)"),
    }
}
