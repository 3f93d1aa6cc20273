use std::collections::BTreeMap;
use std::io::{Read, Write};
use log::trace;
use serde::{Deserialize, Serialize};
use crate::error::Error;

/// Products offered when no catalog has been saved yet.
const SEED_PRODUCTS: [(&str, f64); 5] = [
    ("Galleta Oreo", 1.25),
    ("Chocobanano", 0.75),
    ("Jabón", 2.50),
    ("Shampoo", 5.00),
    ("Cereal", 3.40),
];

/// The known products and their unit prices, keyed by product name.
///
/// Persisted as a single JSON object, e.g. `{"Cereal": 3.4, "Jabón": 2.5}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCatalog {
    products: BTreeMap<String, f64>,
}

impl ProductCatalog {
    pub fn seed() -> Self {
        ProductCatalog {
            products: SEED_PRODUCTS
                .iter()
                .map(|&(name, price)| (name.to_owned(), price))
                .collect(),
        }
    }

    pub fn from_json(reader: impl Read) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json(&self, writer: impl Write) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Inserts `name` or overwrites its price if it is already known.
    ///
    /// Returns the previous price, if any. Prices are not checked here: newly
    /// typed products are validated by the caller before they reach the catalog.
    pub fn upsert(&mut self, name: impl Into<String>, price: f64) -> Option<f64> {
        let name = name.into();
        trace!("Setting price of {} to {:.2}", name, price);
        self.products.insert(name, price)
    }

    /// Removes `name` and returns the price it had.
    pub fn remove(&mut self, name: &str) -> Result<f64, Error> {
        self.products
            .remove(name)
            .ok_or_else(|| Error::ProductNotFound(name.to_owned()))
    }

    pub fn price_of(&self, name: &str) -> Result<f64, Error> {
        self.products
            .get(name)
            .copied()
            .ok_or_else(|| Error::ProductNotFound(name.to_owned()))
    }

    pub fn products(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.products.iter().map(|(name, &price)| (name.as_str(), price))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_five_products() {
        let catalog = ProductCatalog::seed();

        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.price_of("Galleta Oreo").unwrap(), 1.25);
        assert_eq!(catalog.price_of("Chocobanano").unwrap(), 0.75);
        assert_eq!(catalog.price_of("Jabón").unwrap(), 2.50);
        assert_eq!(catalog.price_of("Shampoo").unwrap(), 5.00);
        assert_eq!(catalog.price_of("Cereal").unwrap(), 3.40);
    }

    #[test]
    fn test_upsert_new_and_existing() {
        let mut catalog = ProductCatalog::seed();

        assert_eq!(catalog.upsert("Café", 1.80), None);
        assert_eq!(catalog.upsert("Jabón", 2.75), Some(2.50));
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.price_of("Jabón").unwrap(), 2.75);
    }

    #[test]
    fn test_remove_missing_product() {
        let mut catalog = ProductCatalog::seed();

        let result = catalog.remove("Café");
        assert!(matches!(result, Err(Error::ProductNotFound(name)) if name == "Café"));
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_remove_existing_product() {
        let mut catalog = ProductCatalog::seed();

        assert_eq!(catalog.remove("Shampoo").unwrap(), 5.00);
        assert!(catalog.price_of("Shampoo").is_err());
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_json_keeps_every_entry() {
        let mut catalog = ProductCatalog::seed();
        catalog.upsert("Café", 1.80);

        let mut buffer = Vec::new();
        catalog.to_json(&mut buffer).unwrap();
        let reloaded = ProductCatalog::from_json(buffer.as_slice()).unwrap();

        assert_eq!(reloaded, catalog);
    }

    #[test]
    fn test_json_reads_plain_object() {
        let catalog = ProductCatalog::from_json(r#"{"Jabón": 2.5, "Café": 1.8}"#.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.price_of("Café").unwrap(), 1.8);
    }

    #[test]
    fn test_json_rejects_wrong_structure() {
        let result = ProductCatalog::from_json(r#"["Jabón", 2.5]"#.as_bytes());
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
