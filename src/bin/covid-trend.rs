use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use covid_trend::viz::format::{abbreviate, axis_date, signed_thousands};
use covid_trend::{Category, ChartOptions, Client, Query};
use covid_trend::{graph, stats, storage, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "covid-trend",
    version,
    about = "Fetch historical COVID-19 counts, derive daily changes, and chart them"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch daily changes (and optionally save, plot, and print stats).
    Get(GetArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CategoryArg {
    #[value(alias = "confirmed")]
    Cases,
    Recovered,
    Deaths,
}

impl From<CategoryArg> for Category {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::Cases => Category::Confirmed,
            CategoryArg::Recovered => Category::Recovered,
            CategoryArg::Deaths => Category::Deaths,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct GetArgs {
    /// Statistic to chart.
    #[arg(short, long, value_enum, default_value_t = CategoryArg::Cases)]
    category: CategoryArg,
    /// Country name or ISO code (e.g., Germany or DEU). Omit for the global total.
    #[arg(long)]
    country: Option<String>,
    /// Days of history to request.
    #[arg(short = 'n', long, default_value_t = 120)]
    last_days: u32,
    /// Save the daily changes to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Create a chart at the given path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Width of the plot (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the plot (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Custom chart title.
    #[arg(long)]
    title: Option<String>,
    /// Print summary statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Get(args) => cmd_get(args),
    }
}

fn cmd_get(args: GetArgs) -> Result<()> {
    let category = Category::from(args.category);
    let query = Query {
        country: args.country.clone(),
        last_days: args.last_days,
    };
    let client = Client::new().context("build http client")?;

    let series = graph::load(&client, &query, category)
        .with_context(|| format!("no data for {}", category.label()))?;

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&series, path)?,
            "json" => storage::save_json(&series, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", series.len(), path.display());
    }

    if let Some(plot_path) = args.plot.as_ref() {
        let options = match args.title.clone() {
            Some(t) => ChartOptions::default().with_title(t),
            None => ChartOptions::default(),
        };
        // `load` never returns an empty series, so a chart is always built here.
        if let Some(chart) = viz::chart(&series, category, options) {
            viz::render_to_file(&chart, plot_path, args.width, args.height)
                .with_context(|| format!("render {}", plot_path.display()))?;
            eprintln!("Wrote plot to {}", plot_path.display());
        }
    }

    if args.stats {
        if let Some(s) = stats::summary(&series) {
            println!(
                "{}  days={} total={} min={} max={} mean={} median={} peak={} on {}",
                category,
                s.count,
                signed_thousands(s.total),
                signed_thousands(s.min),
                signed_thousands(s.max),
                abbreviate(s.mean),
                abbreviate(s.median),
                signed_thousands(s.peak.value),
                axis_date(&s.peak.date),
            );
        }
    }

    if args.out.is_none() && args.plot.is_none() && !args.stats {
        for p in &series {
            println!("{}  {}", axis_date(&p.date), signed_thousands(p.value));
        }
    }

    Ok(())
}
