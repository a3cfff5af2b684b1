use astrohub::config::Config;
use astrohub::location::GeocodeResolver;
use astrohub::nasa::NasaClient;
use astrohub::server;
use chrono::{NaiveDate, Utc};
use clap::Parser;

/// AstroHub — community core for space enthusiasts.
///
/// Resolves free-text member locations to globe coordinates and serves
/// the community directory plus NASA open-data panels.
///
/// Examples:
///   astrohub "New York, USA"
///   astrohub --location "Tromsø, Norway"
///   astrohub --offline Paris
///   astrohub --apod --date 2026-07-04
///   astrohub --mars --sol 2000
///   astrohub --serve --port 8080
#[derive(Parser)]
#[command(name = "astrohub", version, about, long_about = None)]
struct Cli {
    /// Location to resolve (positional). Example: astrohub "New York, USA"
    #[arg(index = 1)]
    location_positional: Option<String>,

    /// Location to resolve (named).
    #[arg(long)]
    location: Option<String>,

    /// Offline mode: resolve against the built-in table only.
    #[arg(long)]
    offline: bool,

    /// Fetch the Astronomy Picture of the Day and print it as JSON.
    #[arg(long)]
    apod: bool,

    /// Date for --apod (YYYY-MM-DD). Defaults to today's picture.
    #[arg(long, short = 'd')]
    date: Option<String>,

    /// Fetch today's near-Earth object feed and print it as JSON.
    #[arg(long)]
    neo: bool,

    /// Fetch Mars rover photos and print them as JSON.
    #[arg(long)]
    mars: bool,

    /// Mars sol for --mars.
    #[arg(long, default_value_t = 1000)]
    sol: u32,

    /// Start the HTTP API server.
    #[arg(long)]
    serve: bool,

    /// Port for --serve (overrides ASTROHUB_PORT).
    #[arg(long)]
    port: Option<u16>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = Config::load();

    // ── Server mode ─────────────────────────────────────────────

    if cli.serve {
        if let Some(port) = cli.port {
            config.port = port;
        }
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap_or_else(|e| {
                eprintln!("Error: Cannot start runtime: {}", e);
                std::process::exit(1);
            });
        runtime.block_on(server::start(config, cli.offline));
        return;
    }

    // ── NASA panels ─────────────────────────────────────────────

    if cli.apod || cli.neo || cli.mars {
        run_nasa(&cli, &config);
        return;
    }

    // ── Resolve a location ──────────────────────────────────────

    let query = match cli.location.as_deref().or(cli.location_positional.as_deref()) {
        Some(q) => q.to_string(),
        None => {
            eprintln!("Error: No location specified.");
            eprintln!();
            eprintln!("Usage:");
            eprintln!("  astrohub \"New York, USA\"");
            eprintln!("  astrohub --location \"Tromsø, Norway\"");
            eprintln!("  astrohub --offline Paris");
            eprintln!("  astrohub --apod --date 2026-07-04");
            eprintln!("  astrohub --serve --port 8080");
            std::process::exit(1);
        }
    };

    let mut resolver = GeocodeResolver::new(&config.opencage_key);
    resolver.set_offline(cli.offline);

    match resolver.resolve(&query) {
        Some(coord) => println!("{}", serde_json::to_string_pretty(&coord).unwrap()),
        None => {
            eprintln!(
                "Warning: no coordinates found for '{}'. A profile can still be saved; it just won't appear on the globe.",
                query
            );
            std::process::exit(1);
        }
    }
}

fn run_nasa(cli: &Cli, config: &Config) {
    let client = NasaClient::new(
        config.nasa_primary_key.as_str(),
        config.nasa_backup_key.as_str(),
    );

    if cli.apod {
        let date = cli.date.as_deref().map(|d| {
            NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap_or_else(|e| {
                eprintln!("Error: Invalid date '{}': {}", d, e);
                std::process::exit(1);
            })
        });
        print_or_exit(client.apod(date));
    }

    if cli.neo {
        print_or_exit(client.neo_feed(Utc::now().date_naive()));
    }

    if cli.mars {
        print_or_exit(client.mars_photos("curiosity", cli.sol));
    }
}

fn print_or_exit<T: serde::Serialize>(result: Result<T, astrohub::nasa::NasaError>) {
    match result {
        Ok(data) => println!("{}", serde_json::to_string_pretty(&data).unwrap()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
