//! File-backed persistence for the CLI session.
//!
//! Everything lives under the configured data directory:
//!
//! - `brew_buddy_cart.json` - cart line items ([`JsonFileStore`])
//! - `profile.json` - loyalty profile ([`ProfileFile`])
//! - `orders.json` - placed orders ([`OrderLog`])
//!
//! The menu catalog is YAML and lives wherever `--catalog` points
//! ([`CatalogFile`]).
//!
//! Writes go to a sibling temporary file that is then renamed over the
//! target, so a crash never leaves a half-written file behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use brew_buddy_core::{
    Catalog, CartStore, LineItem, LoyaltyProfile, Order, OrderSubmitter, StoreError, SubmitError,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Read a JSON file, or `T::default()` if it does not exist.
fn read_json<T>(path: &Path) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
{
    match fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => Ok(T::default()),
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

/// Write `content` to `path` through a temporary file.
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(value)?;
    write_atomic(path, &content)?;
    debug!(path = %path.display(), "Wrote file");
    Ok(())
}

// =============================================================================
// Cart
// =============================================================================

/// Cart persistence in a JSON file holding an array of line items.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStore for JsonFileStore {
    fn load(&self) -> Result<Vec<LineItem>, StoreError> {
        read_json(&self.path)
    }

    fn save(&self, items: &[LineItem]) -> Result<(), StoreError> {
        write_json(&self.path, items)
    }
}

// =============================================================================
// Loyalty profile
// =============================================================================

/// Loyalty profile persistence in a JSON file.
#[derive(Debug, Clone)]
pub struct ProfileFile {
    path: PathBuf,
}

impl ProfileFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the profile; a missing file is a fresh profile with no points.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<LoyaltyProfile, StoreError> {
        read_json(&self.path)
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be written.
    pub fn save(&self, profile: &LoyaltyProfile) -> Result<(), StoreError> {
        write_json(&self.path, profile)
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Order history in a JSON file. Submitting an order appends it.
#[derive(Debug, Clone)]
pub struct OrderLog {
    path: PathBuf,
}

impl OrderLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// All recorded orders, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file exists but cannot be read or parsed.
    pub fn history(&self) -> Result<Vec<Order>, StoreError> {
        read_json(&self.path)
    }
}

impl OrderSubmitter for OrderLog {
    fn submit(&self, order: &Order) -> Result<(), SubmitError> {
        let mut orders = self.history()?;
        orders.push(order.clone());
        write_json(&self.path, &orders)?;
        Ok(())
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Errors reading or writing a YAML catalog.
#[derive(Debug, Error)]
pub enum CatalogFileError {
    #[error("catalog I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Menu catalog persistence in a YAML file.
#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the catalog; a missing file yields the default menu.
    ///
    /// # Errors
    ///
    /// Returns `CatalogFileError` if the file exists but cannot be read or
    /// parsed.
    pub fn load(&self) -> Result<Catalog, CatalogFileError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_yaml::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Catalog::default_menu()),
            Err(e) => Err(e.into()),
        }
    }

    /// # Errors
    ///
    /// Returns `CatalogFileError` if the catalog cannot be encoded or written.
    pub fn save(&self, catalog: &Catalog) -> Result<(), CatalogFileError> {
        let content = serde_yaml::to_string(catalog)?;
        write_atomic(&self.path, &content)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use brew_buddy_core::{OptionSet, Price, Reward, Size};

    use super::*;

    #[test]
    fn test_missing_cart_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("cart.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_cart_file_roundtrip_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/cart.json"));
        let items = vec![
            LineItem::priced(
                "3",
                "Caramel Macchiato",
                Price::from_cents(649),
                1,
                Size::Large,
                ["Extra shot", "Whipped cream"].into_iter().collect::<OptionSet>(),
            )
            .with_image("macchiato.jpg"),
        ];

        store.save(&items).unwrap();
        assert_eq!(store.load().unwrap(), items);
        assert!(!dir.path().join("nested/cart.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_cart_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonFileStore::new(path).load(),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_profile_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let file = ProfileFile::new(dir.path().join("profile.json"));
        assert_eq!(file.load().unwrap(), LoyaltyProfile::default());

        let mut profile = LoyaltyProfile::with_points(420);
        profile.redeem_reward(Reward::FreeCoffee).unwrap();
        profile.redeem_code("DISCOUNT20").unwrap();
        file.save(&profile).unwrap();

        assert_eq!(file.load().unwrap(), profile);
    }

    #[test]
    fn test_missing_catalog_is_default_menu() {
        let dir = tempfile::tempdir().unwrap();
        let file = CatalogFile::new(dir.path().join("menu.yaml"));
        assert_eq!(file.load().unwrap(), Catalog::default_menu());
    }

    #[test]
    fn test_catalog_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let file = CatalogFile::new(dir.path().join("menu.yaml"));
        let catalog = Catalog::default_menu();
        file.save(&catalog).unwrap();
        assert_eq!(file.load().unwrap(), catalog);
    }
}
