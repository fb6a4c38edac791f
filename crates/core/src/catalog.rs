//! Menu catalog.
//!
//! Holds the sellable products and the admin operations that edit them.
//! The catalog is also where a customer's size and option choices are turned
//! into a priced [`LineItem`].

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::cart::LineItem;
use crate::pricing::{self, PricingError};
use crate::types::{OptionSet, Price, ProductId, Size};

/// Errors from catalog operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A product name was blank.
    #[error("product name cannot be empty")]
    EmptyName,

    /// No product has this id.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// The product could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Menu section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Coffee,
    Tea,
    Smoothie,
    Refreshment,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coffee => write!(f, "coffee"),
            Self::Tea => write!(f, "tea"),
            Self::Smoothie => write!(f, "smoothie"),
            Self::Refreshment => write!(f, "refreshment"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coffee" => Ok(Self::Coffee),
            "tea" => Ok(Self::Tea),
            "smoothie" => Ok(Self::Smoothie),
            "refreshment" => Ok(Self::Refreshment),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

/// A sellable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Medium price with no options.
    pub base_price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Category,
}

/// Editable fields of a product, as entered in the admin form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub base_price: Price,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub category: Category,
}

impl NewProduct {
    fn validated(self) -> Result<Self, CatalogError> {
        let Self {
            name,
            description,
            base_price,
            image_url,
            tags,
            category,
        } = self;

        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        Ok(Self {
            name: name.to_owned(),
            description: description.trim().to_owned(),
            base_price,
            image_url: image_url
                .map(|url| url.trim().to_owned())
                .filter(|url| !url.is_empty()),
            tags,
            category,
        })
    }

    fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            base_price: self.base_price,
            image_url: self.image_url,
            tags: self.tags,
            category: self.category,
        }
    }
}

/// The set of products on sale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// An empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// The shop's standard drinks menu.
    #[must_use]
    pub fn default_menu() -> Self {
        let drink = |id: &str,
                     name: &str,
                     description: &str,
                     cents: u32,
                     image: &str,
                     tags: &[&str],
                     category: Category| Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: description.to_owned(),
            base_price: Price::from_cents(cents),
            image_url: Some(format!("https://images.unsplash.com/{image}")),
            tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
            category,
        };

        Self {
            products: vec![
                drink(
                    "1",
                    "Espresso",
                    "Rich and bold single shot of espresso",
                    299,
                    "photo-1611854779393-1b2da9d400fe",
                    &["hot", "classic"],
                    Category::Coffee,
                ),
                drink(
                    "2",
                    "Cappuccino",
                    "Espresso with steamed milk and thick foam",
                    450,
                    "photo-1534778101976-62847782c213",
                    &["hot", "classic", "milk"],
                    Category::Coffee,
                ),
                drink(
                    "3",
                    "Caramel Macchiato",
                    "Espresso with vanilla syrup, steamed milk and caramel",
                    499,
                    "photo-1570968915860-54d5c301fa9f",
                    &["hot", "sweet", "milk"],
                    Category::Coffee,
                ),
                drink(
                    "4",
                    "Cold Brew",
                    "Smooth, cold brewed coffee steeped for 12 hours",
                    399,
                    "photo-1517701604599-bb29b565090c",
                    &["cold", "refreshing"],
                    Category::Coffee,
                ),
                drink(
                    "5",
                    "Matcha Latte",
                    "Premium matcha green tea with steamed milk",
                    550,
                    "photo-1536256263959-770b48d82b0a",
                    &["hot", "tea", "milk"],
                    Category::Tea,
                ),
                drink(
                    "6",
                    "Berry Blast Smoothie",
                    "Mixed berries, banana and yogurt",
                    650,
                    "photo-1638176067000-9eea2bffa3b7",
                    &["cold", "fruity", "sweet"],
                    Category::Smoothie,
                ),
                drink(
                    "7",
                    "Lemonade",
                    "Freshly squeezed lemons with a hint of mint",
                    350,
                    "photo-1621263764928-df1444c3a451",
                    &["cold", "refreshing", "tangy"],
                    Category::Refreshment,
                ),
                drink(
                    "8",
                    "Avocado Smoothie",
                    "Creamy avocado blended with milk and a touch of honey",
                    750,
                    "photo-1583500178450-e59e4309b57a",
                    &["cold", "creamy", "healthy"],
                    Category::Smoothie,
                ),
            ],
        }
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == *id)
    }

    /// All products sorted by name.
    #[must_use]
    pub fn products(&self) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.iter().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        products
    }

    #[must_use]
    pub fn by_category(&self, category: Category) -> Vec<&Product> {
        self.products()
            .into_iter()
            .filter(|product| product.category == category)
            .collect()
    }

    /// Products whose name or description contains `query`, ignoring case.
    /// An empty query matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let query = query.trim().to_lowercase();
        self.products()
            .into_iter()
            .filter(|product| {
                query.is_empty()
                    || product.name.to_lowercase().contains(&query)
                    || product.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Add a product under the next free numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyName`] if the name is blank.
    pub fn add_product(&mut self, product: NewProduct) -> Result<ProductId, CatalogError> {
        let product = product.validated()?;
        let id = self.next_id();
        tracing::info!(product_id = %id, name = %product.name, "Added product");
        self.products.push(product.into_product(id.clone()));
        Ok(id)
    }

    /// Replace a product's editable fields.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id and
    /// [`CatalogError::EmptyName`] if the name is blank.
    pub fn update_product(
        &mut self,
        id: &ProductId,
        product: NewProduct,
    ) -> Result<&Product, CatalogError> {
        let product = product.validated()?;
        let slot = self
            .products
            .iter_mut()
            .find(|existing| existing.id == *id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;

        *slot = product.into_product(id.clone());
        tracing::info!(product_id = %id, "Updated product");
        Ok(&*slot)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id.
    pub fn remove_product(&mut self, id: &ProductId) -> Result<Product, CatalogError> {
        let index = self
            .products
            .iter()
            .position(|product| product.id == *id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        tracing::info!(product_id = %id, "Removed product");
        Ok(self.products.remove(index))
    }

    /// Price a product at a size with options and wrap it as a cart line.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id.
    pub fn line_item(
        &self,
        id: &ProductId,
        size: Size,
        options: OptionSet,
        quantity: u32,
    ) -> Result<LineItem, CatalogError> {
        let product = self
            .get(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        let unit_price = pricing::price(product.base_price.amount(), size, &options)?;

        let item = LineItem::priced(
            product.id.clone(),
            product.name.clone(),
            unit_price,
            quantity,
            size,
            options,
        );
        Ok(match &product.image_url {
            Some(url) => item.with_image(url.clone()),
            None => item,
        })
    }

    fn next_id(&self) -> ProductId {
        let max = self
            .products
            .iter()
            .filter_map(|product| product.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        ProductId::new((max + 1).to_string())
    }
}
