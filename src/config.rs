use crate::error::DownloaderError;
use crate::types::{Footprint, Location, Product};
use log::debug;
use std::path::{Path, PathBuf};

/// Known locations and products. Built once and passed by reference to
/// whatever needs to resolve names.
#[derive(Debug, Clone)]
pub struct Registry {
    locations: Vec<Location>,
    products: Vec<Product>,
}

impl Registry {
    pub fn new(locations: Vec<Location>, products: Vec<Product>) -> Self {
        Self {
            locations,
            products,
        }
    }

    /// The Sentinel-5P catalog shipped with the tool.
    pub fn builtin() -> Self {
        let product = |code: &str, key: &str, name: &str| Product {
            catalog_code: code.to_string(),
            key: key.to_string(),
            display_name: name.to_string(),
        };

        Self::new(
            vec![Location {
                name: "Gioia del Colle".to_string(),
                footprint: Footprint {
                    lat: 40.7779,
                    lon: 16.9115,
                },
            }],
            vec![
                product("L2__SO2___", "sulfurdioxide", "Sulfur Dioxide (SO2)"),
                product("L2__NO2___", "nitrogendioxide", "Nitrogen Dioxide (NO2)"),
                product("L2__HCHO__", "formaldehyde", "Formaldehyde (HCHO)"),
                product("L2__CO____", "carbonmonoxide", "Carbon Monoxide (CO)"),
                product("L2__AER_AI", "aerosolI", "UV Aerosol Index"),
                product("L2__AER_LH", "aerosolH", "UV Aerosol Height"),
            ],
        )
    }

    /// Adds a location, replacing any existing one with the same name.
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations
            .retain(|l| !l.name.eq_ignore_ascii_case(&location.name));
        self.locations.push(location);
        self
    }

    pub fn location(&self, name: &str) -> Result<&Location, DownloaderError> {
        self.locations
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| DownloaderError::UnknownLocation(name.to_string()))
    }

    pub fn product(&self, key: &str) -> Result<&Product, DownloaderError> {
        self.products
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(key.trim()))
            .ok_or_else(|| DownloaderError::UnknownProduct(key.to_string()))
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

/// Directory-safe form of a location name: `"Gioia del Colle"` -> `gioia_del_colle`.
pub fn location_slug(name: &str) -> String {
    name.replace('\'', " ")
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// `<root>/datasets/<location-slug>/<product-key>`
pub fn destination_dir(root: &Path, location: &Location, product: &Product) -> PathBuf {
    root.join("datasets")
        .join(location_slug(&location.name))
        .join(&product.key)
}

/// Creates the destination directory and its parents. Safe to call again on
/// an existing directory.
pub async fn ensure_destination(
    root: &Path,
    location: &Location,
    product: &Product,
) -> Result<PathBuf, DownloaderError> {
    let dir = destination_dir(root, location, product);
    tokio::fs::create_dir_all(&dir).await?;
    debug!("Destination directory ready: {}", dir.display());
    Ok(dir)
}
