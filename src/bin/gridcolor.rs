use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gridcolor::{AnalyzerConfig, ArtifactStore, GridColorAnalyzer, StorageConfig, load_image};
use tracing::Level;

/// Sample a color grid and draw a contour overlay for each input image.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON file with analyzer settings; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cells along each axis
    #[arg(short, long)]
    grid_size: Option<u32>,

    /// Skip the color frequency summary
    #[arg(long)]
    no_summary: bool,

    /// Output directory for overlays and reports
    #[arg(short = 'd', long, default_value = "uploads")]
    out_dir: PathBuf,

    /// Accept .gif inputs as well
    #[arg(long)]
    allow_gif: bool,

    /// Number of most frequent colors to print
    #[arg(short, long, default_value_t = 5)]
    top: usize,

    /// Log pipeline details
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();
}

fn load_config(args: &Args) -> Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => AnalyzerConfig::default(),
    };
    if let Some(grid_size) = args.grid_size {
        config.grid_size = grid_size;
    }
    if args.no_summary {
        config.compute_summary = false;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let analyzer = GridColorAnalyzer::new(load_config(&args)?)?;
    let mut storage = StorageConfig::new(&args.out_dir);
    if args.allow_gif {
        storage = storage.allow_gif();
    }
    let store = ArtifactStore::new(&storage);

    for input in &args.inputs {
        let img = load_image(input, &storage)
            .with_context(|| format!("loading {}", input.display()))?;
        let result = analyzer
            .analyze(&img)
            .with_context(|| format!("analyzing {}", input.display()))?;
        let saved = store.save(input, &result).context("saving artifacts failed")?;

        println!("{}", input.display());
        println!("  overlay → {}", saved.overlay.display());
        println!("  report  → {}", saved.report.display());
        if let Some(summary) = &result.summary {
            println!(
                "  {} cells, {} unique colors",
                summary.total_cells, summary.unique_colors
            );
            for (hex, count) in summary.top(args.top) {
                println!("    {hex}  {count}");
            }
        }
    }

    Ok(())
}
