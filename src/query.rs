use crate::error::DownloaderError;
use crate::types::{Location, Product, SearchQuery};
use reqwest::Url;

impl SearchQuery {
    /// Builds the search for one location and product. `time_range` is used
    /// verbatim as the second clause, e.g. `ingestiondate:[NOW-7DAYS TO NOW]`.
    pub fn new(
        location: &Location,
        product: &Product,
        time_range: &str,
    ) -> Result<Self, DownloaderError> {
        let fp = location.footprint;
        if !(fp.lat.is_finite() && fp.lon.is_finite())
            || !(-90.0..=90.0).contains(&fp.lat)
            || !(-180.0..=180.0).contains(&fp.lon)
        {
            return Err(DownloaderError::InvalidFootprint(fp.to_string()));
        }

        let code = product.catalog_code.trim();
        if code.is_empty() {
            return Err(DownloaderError::EmptyCatalogCode);
        }

        let time_range = time_range.trim();
        if time_range.is_empty() {
            return Err(DownloaderError::EmptyTimeRange);
        }

        Ok(Self {
            footprint: format!("footprint:\"Intersects({})\"", fp),
            time_range: time_range.to_string(),
            product_type: format!("producttype:{}", code),
        })
    }

    /// The clauses joined by `AND` in fixed order: footprint, time range,
    /// product type.
    pub fn to_query_string(&self) -> String {
        [&self.footprint, &self.time_range, &self.product_type]
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// Full search URL against `endpoint`, requesting up to `rows` entries.
    pub fn search_url(&self, endpoint: &str, rows: u32) -> Result<Url, DownloaderError> {
        Url::parse_with_params(
            endpoint,
            &[
                ("q", self.to_query_string()),
                ("rows", rows.to_string()),
            ],
        )
        .map_err(|_| DownloaderError::InvalidEndpoint(endpoint.to_string()))
    }
}
