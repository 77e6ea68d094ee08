//! MINI IBEX surface CLI
//!
//! Fetches the quote table, builds the volatility surface for one option
//! type and quote date, and renders it as terminal tables, JSON, or an
//! SVG smile chart.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ibex_surface::prelude::*;

#[derive(Parser)]
#[command(name = "surface-cli", about = "MINI IBEX volatility surface", version)]
struct Args {
    /// Option type to select
    #[arg(long, value_enum, default_value = "call")]
    option_type: OptionTypeArg,

    /// Quote date to select (defaults to the latest available)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Implied vol floor, strictly-greater comparison
    #[arg(long, default_value_t = DEFAULT_MIN_VOL)]
    min_vol: f64,

    /// Quote service base URL (overrides API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Load the payload from a file instead of the service
    #[arg(long)]
    input: Option<PathBuf>,

    /// Write an SVG smile chart to this path
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Print the surface as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Quote table row cap
    #[arg(long, default_value_t = DEFAULT_MAX_ROWS)]
    max_rows: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OptionTypeArg {
    Call,
    Put,
}

impl From<OptionTypeArg> for OptionType {
    fn from(arg: OptionTypeArg) -> Self {
        match arg {
            OptionTypeArg::Call => OptionType::Call,
            OptionTypeArg::Put => OptionType::Put,
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> SurfaceResult<()> {
    let quotes = match &args.input {
        Some(path) => load_quotes_file(path)?,
        None => {
            let mut config = ApiConfig::from_env();
            if let Some(url) = &args.api_url {
                config = config.with_base_url(url);
            }
            ApiClient::new(config).fetch_quotes()?
        }
    };

    let Some(quote_date) = args.date.or_else(|| latest_quote_date(&quotes)) else {
        println!("No quote dates available.");
        return Ok(());
    };

    let option_type = OptionType::from(args.option_type);
    let filter = QuoteFilter::new(option_type, quote_date).with_min_vol(args.min_vol);
    let filtered = filter.filter(&quotes);

    let title = format!("Volatility Surface - {} ({})", option_type, quote_date);

    let Some(surface) = VolSurface::from_quotes(&filtered) else {
        println!("{}", title);
        println!("No data for this selection.");
        return Ok(());
    };

    if args.json {
        println!("{}", surface_json(&surface)?);
    } else {
        let (rows, cols) = surface.shape();
        println!("{}", title);
        println!(
            "{} quotes, {} after filter; grid {}x{} ({} populated)\n",
            quotes.len(),
            filtered.len(),
            rows,
            cols,
            surface.populated_cells(),
        );
        println!("{}", surface_table(&surface));
        println!("{}", quote_table(&filtered, args.max_rows));
    }

    if let Some(path) = &args.plot {
        render_smile_svg(&surface, path, &title)?;
        println!("Chart saved to {}", path.display());
    }

    Ok(())
}

fn surface_json(surface: &VolSurface) -> SurfaceResult<String> {
    let vols: Vec<Vec<Option<f64>>> = surface
        .vols
        .rows()
        .into_iter()
        .map(|row| row.to_vec())
        .collect();

    let value = serde_json::json!({
        "expiries": &surface.expiries,
        "strikes": &surface.strikes,
        "vols": vols,
    });

    serde_json::to_string_pretty(&value).map_err(|e| SurfaceError::serialization(e.to_string()))
}
