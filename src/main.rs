use async_trait::async_trait;
use clap::Parser;
use ports_index::config::{CliConfig, Command};
use ports_index::core::{bulk_io, coords, distance};
use ports_index::domain::model::{BulkRow, Coordinates, LocationKind, PlaceKind};
use ports_index::domain::ports::{DirectorySource, Geocoder};
use ports_index::utils::{logger, validation::Validate};
use ports_index::{
    BulkRunner, CoordinateResolver, MapboxGeocoder, PortDirectory, PortsError, Result,
    UneceDirectory,
};

/// Stands in when no geocoder token is configured: directory coordinates
/// still work, geocoder fallbacks simply find nothing.
struct DisabledGeocoder;

#[async_trait]
impl Geocoder for DisabledGeocoder {
    async fn search(
        &self,
        _query: &str,
        _country_code: &str,
        _kind: PlaceKind,
    ) -> Result<Option<Coordinates>> {
        Ok(None)
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::info!("Starting ports-index CLI");

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&config).await {
        tracing::error!("❌ Command failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(config: &CliConfig) -> Result<()> {
    let directory = PortDirectory::new(UneceDirectory::new(&config.directory_url)?);

    match &config.command {
        Command::Bulk { input, output } => {
            let file = std::fs::File::open(input)?;
            let rows = bulk_io::parse_bulk_file(file)?;
            tracing::info!("📋 Loaded {} rows from {}", rows.len(), input);

            match config.mapbox_token() {
                Ok(token) => {
                    let geocoder = MapboxGeocoder::new(&config.geocoder_url, token)?;
                    run_bulk(&directory, &geocoder, &rows, output).await
                }
                // Postal endpoints cannot resolve without a geocoder, so
                // fail up front instead of erroring on every row.
                Err(missing) if bulk_io::needs_geocoder(&rows) => Err(missing),
                Err(_) => {
                    tracing::warn!("No geocoder token configured, fallback geocoding disabled");
                    run_bulk(&directory, &DisabledGeocoder, &rows, output).await
                }
            }
        }

        Command::Lookup { locode } => run_lookup(&directory, locode).await,

        Command::Distance { from, to } => match config.mapbox_token() {
            Ok(token) => {
                let geocoder = MapboxGeocoder::new(&config.geocoder_url, token)?;
                run_distance(&directory, &geocoder, from, to).await
            }
            Err(_) => {
                tracing::warn!("No geocoder token configured, fallback geocoding disabled");
                run_distance(&directory, &DisabledGeocoder, from, to).await
            }
        },

        Command::Template => {
            print!("{}", bulk_io::template_csv());
            Ok(())
        }
    }
}

async fn run_bulk<S: DirectorySource, G: Geocoder>(
    directory: &PortDirectory<S>,
    geocoder: &G,
    rows: &[BulkRow],
    output: &str,
) -> Result<()> {
    let runner = BulkRunner::new(CoordinateResolver::new(directory, geocoder));
    let results = runner
        .run(rows, |fraction, stats| {
            tracing::info!(
                "Processed {}/{} ({:.0}%): {} ok, {} failed",
                stats.processed,
                stats.total,
                fraction * 100.0,
                stats.successful,
                stats.failed
            );
        })
        .await;

    std::fs::write(output, bulk_io::render_results_csv(&results)?)?;
    println!("✅ Bulk run complete");
    println!("📁 Results saved to: {}", output);
    Ok(())
}

async fn run_lookup<S: DirectorySource>(
    directory: &PortDirectory<S>,
    locode: &str,
) -> Result<()> {
    let port = directory.find_by_locode(locode).await?.ok_or_else(|| {
        PortsError::ResolutionError {
            location: locode.to_string(),
            reason: "not found in UN/LOCODE directory".to_string(),
        }
    })?;

    println!("{}  {}", port.locode, port.name);
    if let Some(subdivision) = &port.subdivision {
        println!("  Subdivision: {}", subdivision);
    }
    println!("  Function:    {}", port.function);
    println!("  Status:      {}", port.status);
    if let Some(iata) = &port.iata {
        println!("  IATA:        {}", iata);
    }
    match &port.coordinates {
        Some(raw) => {
            println!("  Coordinates: {}", coords::format_dms(raw)?);
            let decoded = coords::decode(raw)?;
            println!(
                "               {:.4}, {:.4}",
                decoded.latitude, decoded.longitude
            );
        }
        None => println!("  Coordinates: (none listed)"),
    }
    Ok(())
}

async fn run_distance<S: DirectorySource, G: Geocoder>(
    directory: &PortDirectory<S>,
    geocoder: &G,
    from: &str,
    to: &str,
) -> Result<()> {
    let resolver = CoordinateResolver::new(directory, geocoder);
    // Country is derived from the LOCODE prefix for port lookups.
    let origin = resolver.resolve(LocationKind::Port, from, "").await?;
    let dest = resolver.resolve(LocationKind::Port, to, "").await?;

    let nm = distance::haversine_nm(origin, dest);
    println!(
        "{} -> {}: {:.0} nm / {:.0} km",
        from.to_uppercase(),
        to.to_uppercase(),
        nm,
        nm * distance::NM_TO_KM
    );
    Ok(())
}
