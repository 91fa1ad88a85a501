use crate::config::{ensure_destination, Registry};
use crate::downloader::Downloader;
use crate::error::DownloaderError;
use crate::parser::parse_feed;
use crate::progress::{ProgressSink, TaskKind};
use crate::remote::{self, Fetch};
use crate::types::{DownloadSummary, SearchQuery};
use log::info;
use std::path::PathBuf;

// Item ids are file names and never contain '/', so these cannot collide.
const SEARCHING: &str = "catalog/Searching";
const PROCESS_XML: &str = "catalog/Process XML";

/// What to fetch and where to put it.
#[derive(Debug, Clone)]
pub struct Request {
    pub location: String,
    pub pollutant: String,
    pub time_range: String,
    pub root: PathBuf,
    pub endpoint: String,
    pub rows: u32,
}

/// Resolves the request against the registry, searches the catalog and
/// downloads every dataset found. Configuration and catalog errors abort
/// before any download starts; per-item failures end up in the summary.
pub async fn retrieve<F: Fetch>(
    registry: &Registry,
    request: &Request,
    downloader: &Downloader<F>,
    progress: &ProgressSink,
) -> Result<DownloadSummary, DownloaderError> {
    let location = registry.location(&request.location)?;
    let product = registry.product(&request.pollutant)?;
    info!("Retrieving {} for {}", product.display_name, location.name);

    let dir = ensure_destination(&request.root, location, product).await?;

    let query = SearchQuery::new(location, product, &request.time_range)?;
    let url = query.search_url(&request.endpoint, request.rows)?;

    progress.add_task(SEARCHING, TaskKind::Spinner);
    let xml = stage(
        progress,
        SEARCHING,
        "Search finished.",
        remote::search(downloader.fetcher(), url.as_str()).await,
    )?;

    progress.add_task(PROCESS_XML, TaskKind::Spinner);
    let items = stage(progress, PROCESS_XML, "XML processed.", parse_feed(&xml))?;
    info!("Found {} datasets, saving to {}", items.len(), dir.display());

    Ok(downloader.download_all(items, &dir, progress).await)
}

fn stage<T>(
    progress: &ProgressSink,
    id: &str,
    message: &str,
    result: Result<T, DownloaderError>,
) -> Result<T, DownloaderError> {
    match &result {
        Ok(_) => progress.done(id, message),
        Err(e) => progress.fail(id, &e.to_string()),
    }
    result
}
