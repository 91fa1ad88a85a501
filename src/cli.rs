use crate::types::Footprint;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Location name, e.g. "Gioia del Colle"
    #[arg(env = "LOCATION")]
    pub location: String,

    /// Pollutant key, e.g. nitrogendioxide
    #[arg(env = "POLLUTION")]
    pub pollutant: String,

    /// Time range predicate added to the search, e.g. "ingestiondate:[NOW-7DAYS TO NOW]"
    #[arg(short = 'r', long, env = "RANGE")]
    pub range: String,

    /// Root directory; datasets land under <root>/datasets
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Footprint ("lat, lon") for a location missing from the built-in catalog
    #[arg(short, long)]
    pub footprint: Option<Footprint>,

    /// Catalog search endpoint
    #[arg(long, default_value = "https://s5phub.copernicus.eu/dhus/search")]
    pub endpoint: String,

    /// Catalog user
    #[arg(short, long, env = "S5P_USERNAME", default_value = "s5pguest")]
    pub username: String,

    /// Catalog password
    #[arg(long, env = "S5P_PASSWORD", default_value = "s5pguest", hide_env_values = true)]
    pub password: String,

    /// Maximum number of entries requested from the catalog
    #[arg(long, default_value = "100")]
    pub rows: u32,

    /// Number of concurrent downloads (unbounded when omitted)
    #[arg(short, long)]
    pub parallelism: Option<usize>,

    /// Transport timeout in seconds
    #[arg(short, long, default_value = "600")]
    pub timeout: u64,
}
