use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloaderError {
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Unknown pollutant: {0}")]
    UnknownProduct(String),

    #[error("Invalid footprint '{0}', expected 'lat, lon'")]
    InvalidFootprint(String),

    #[error("Product catalog code must not be empty")]
    EmptyCatalogCode,

    #[error("Time range predicate must not be empty")]
    EmptyTimeRange,

    #[error("Invalid catalog endpoint '{0}'")]
    InvalidEndpoint(String),

    #[error("Cannot read datasets from the Copernicus catalog")]
    CatalogUnreadable,

    #[error("Malformed catalog response: {0}")]
    MalformedResponse(String),

    #[error("Malformed entry #{index}: missing {field}")]
    MalformedEntry { index: usize, field: &'static str },

    #[error("Malformed entry #{index}: invalid ingestion date '{value}'")]
    InvalidDate { index: usize, value: String },

    #[error("Cannot read remote resource (HTTP {status})")]
    ResourceUnreadable { status: u16 },

    #[error("Size mismatch: expected {expected} bytes, received {received}")]
    SizeMismatch { expected: u64, received: u64 },

    #[error("Download failed: {0}")]
    DownloadError(String),

    #[error("Progress observer stopped: {0}")]
    ObserverStopped(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
