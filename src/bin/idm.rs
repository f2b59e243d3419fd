use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use idm_rs::cache::default_cache_dir;
use idm_rs::{
    Category, Client, FileStore, ReferenceCache, SeriesFetcher, SeriesQuery, SeriesResult, stats,
    storage,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "idm",
    version,
    about = "Fetch, cache & export IMF DataMapper indicator data"
)]
struct Cli {
    /// Directory for the persisted reference tables.
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a reference table (ids and names).
    List(ListArgs),
    /// Fetch series data (and optionally save and print stats).
    Get(GetArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CategoryArg {
    Indicators,
    Countries,
    Groups,
    Regions,
}

impl From<CategoryArg> for Category {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::Indicators => Category::Indicator,
            CategoryArg::Countries => Category::Country,
            CategoryArg::Groups => Category::Group,
            CategoryArg::Regions => Category::Region,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(value_enum)]
    category: CategoryArg,
}

#[derive(Args, Debug)]
struct GetArgs {
    /// Indicator name, repeatable (e.g. "Real GDP growth").
    #[arg(short, long = "indicator", required = true)]
    indicators: Vec<String>,
    /// Country name, repeatable (e.g. "India"). Names may contain
    /// commas, hence one flag per name instead of a comma list.
    #[arg(short, long = "country")]
    countries: Vec<String>,
    /// Group name, repeatable (e.g. "Oil-exporting countries").
    #[arg(short, long = "group")]
    groups: Vec<String>,
    /// Region name, repeatable (e.g. "Europe").
    #[arg(short, long = "region")]
    regions: Vec<String>,
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print grouped statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let dir = cli.cache_dir.clone().unwrap_or_else(default_cache_dir);
    match cli.cmd {
        Command::List(args) => cmd_list(dir, args),
        Command::Get(args) => cmd_get(dir, args),
    }
}

fn cmd_list(dir: PathBuf, args: ListArgs) -> Result<()> {
    let cache = ReferenceCache::new(Client::default(), FileStore::new(dir));
    let entries = cache.load(args.category.into())?;
    for e in &entries {
        match &e.unit {
            Some(unit) => println!("{}\t{} [{}]", e.id, e.name, unit),
            None => println!("{}\t{}", e.id, e.name),
        }
    }
    eprintln!("{} entries", entries.len());
    Ok(())
}

fn cmd_get(dir: PathBuf, args: GetArgs) -> Result<()> {
    let client = Client::default();
    let cache = ReferenceCache::new(client.clone(), FileStore::new(dir));
    let fetcher = SeriesFetcher::new(&client, &cache);

    let query = SeriesQuery {
        indicators: args.indicators,
        countries: args.countries,
        groups: args.groups,
        regions: args.regions,
    };

    let points = match fetcher.fetch(&query)? {
        SeriesResult::NoData => {
            println!("Nothing to show for this selection.");
            return Ok(());
        }
        SeriesResult::Table(points) => points,
    };

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&points, path)?,
            "json" => storage::save_json(&points, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", points.len(), path.display());
    } else {
        for p in &points {
            println!(
                "{}\t{}\t{}\t{}\t{}",
                p.country,
                p.year,
                p.indicator,
                fmt_opt(p.value),
                p.unit
            );
        }
        eprintln!("{} rows", points.len());
    }

    if args.stats {
        let summaries = stats::grouped_summary(&points);
        for s in summaries {
            println!(
                "{} • {}  count={} missing={}  min={} max={} mean={} median={}",
                s.key.country,
                s.key.indicator,
                s.count,
                s.missing,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median)
            );
        }
    }

    Ok(())
}
