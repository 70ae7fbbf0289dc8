//! RF heatmap visualiser: reads a measurement CSV, applies the selected
//! filters and writes an interactive map (HTML) and a histogram (PNG).

mod histogram;
mod map_html;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rf_core::{Dataset, PlmnFilter, RawTable, RenderConfig, Selection, Tier, ViewReport, ViewRequest};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "rf-visualize", about = "Classify and map RF signal measurements")]
struct Args {
    /// CSV file with Latitude, Longitude and at least one of RSRP/RSSI/RSRQ/SINR.
    #[arg(short, long)]
    input: PathBuf,

    /// Metric column to visualise (defaults to the first one found).
    #[arg(short, long)]
    metric: Option<String>,

    /// PLMN to keep, or "All".
    #[arg(short, long, default_value = "All")]
    plmn: String,

    /// Range preset: Excellent, Good, Fair or Poor.
    #[arg(long, conflicts_with_all = ["min", "max"])]
    preset: Option<Tier>,

    /// Lower bound of a manual range (defaults to the observed minimum).
    #[arg(long, allow_hyphen_values = true)]
    min: Option<f64>,

    /// Upper bound of a manual range (defaults to the observed maximum).
    #[arg(long, allow_hyphen_values = true)]
    max: Option<f64>,

    /// Output directory for rf_map.html and histogram.png.
    #[arg(short, long, default_value = "out")]
    output: PathBuf,

    /// JSON render configuration overriding the built-in map/histogram style.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the selectable options and exit without rendering.
    #[arg(long)]
    list: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)))
        .init();

    let config = match &args.config {
        Some(path) => RenderConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };

    let table = RawTable::from_path(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
    let dataset = match Dataset::from_table(&table) {
        Ok(ds) => ds,
        Err(e) => bail!(
            "{e}. File must contain 'Latitude', 'Longitude' and at least one RF parameter like RSRP, RSSI, RSRQ, or SINR."
        ),
    };
    tracing::info!(rows = dataset.records().len(), "loaded {}", args.input.display());

    let request = ViewRequest {
        plmn: PlmnFilter::from(args.plmn.clone()),
        metric: args.metric.clone(),
        selection: selection_from_args(&args),
    };
    let report = rf_core::run(&dataset, &request)?;

    if args.list {
        print_options(&report);
        return Ok(());
    }

    print_report(&report);
    write_outputs(&report, &config, &args.output)?;
    Ok(())
}

/// A one-sided manual range leaves the other end open, which filters the same
/// rows as pinning it to the observed extreme.
fn selection_from_args(args: &Args) -> Selection {
    match (args.preset, args.min, args.max) {
        (Some(tier), _, _) => Selection::Preset { tier },
        (None, None, None) => Selection::All,
        (None, min, max) => Selection::Manual {
            lo: min.unwrap_or(f64::NEG_INFINITY),
            hi: max.unwrap_or(f64::INFINITY),
        },
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_options(report: &ViewReport) {
    println!("Metrics: {}", report.options.metrics.join(", "));
    match &report.options.plmns {
        Some(plmns) => println!("PLMNs:   {}", plmns.join(", ")),
        None => println!("PLMNs:   (no PLMN column)"),
    }
    match report.bounds {
        Some(b) => println!("{} range: {:.2} .. {:.2}", report.metric, b.lo, b.hi),
        None => println!("{} range: (no usable rows)", report.metric),
    }
    if let Some(p) = &report.presets {
        for tier in Tier::ALL {
            let r = p.get(tier);
            println!("  {:<10} {:>8.2} .. {:>8.2}", tier.name(), r.lo, r.hi);
        }
    }
}

fn print_report(report: &ViewReport) {
    println!("{}", report.status_line());
    for w in &report.warnings {
        eprintln!("Warning: {w}");
    }
    match &report.summary {
        Some(s) => {
            let s = s.rounded();
            println!("Average {}: {:.2}", report.metric, s.mean);
            println!("Strongest: {:.2}", s.max);
            println!("Weakest: {:.2}", s.min);
        }
        None => println!("No {} values in the selected range; statistics undefined.", report.metric),
    }
}

fn write_outputs(report: &ViewReport, config: &RenderConfig, out_dir: &std::path::Path) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    if let Some(summary) = &report.summary {
        let img = histogram::render_histogram(&summary.histogram, &config.histogram);
        let path = out_dir.join("histogram.png");
        img.save(&path).with_context(|| format!("writing {}", path.display()))?;
        println!("{} Distribution -> {}", report.metric, path.display());
    }

    match &report.layers {
        Some(layers) => {
            let html = map_html::render_map(layers, &config.map, "RF Signal Map")?;
            let path = out_dir.join("rf_map.html");
            fs::write(&path, html).with_context(|| format!("writing {}", path.display()))?;
            println!("RF Signal Map -> {}", path.display());
        }
        None => eprintln!(
            "Warning: No valid Latitude/Longitude found in the filtered data. Please adjust filters or check your file."
        ),
    }
    Ok(())
}
