//! The operations an operator can run against the sales data.
//!
//! A [Session] owns the loaded catalog and ledger for one operator. Every
//! change is saved through the [SalesStore] before the method returns, and a
//! rejected request returns before anything is modified.
use chrono::NaiveDate;
use log::{info, warn};
use crate::catalog::ProductCatalog;
use crate::config::Credentials;
use crate::error::Error;
use crate::ledger::{validate_sale, SaleRecord, SalesLedger};
use crate::store::SalesStore;
use crate::totals::TotalsSnapshot;

/// Compares the typed username and password against the configured ones.
pub fn login(credentials: &Credentials, username: &str, password: &str) -> bool {
    let accepted = credentials.matches(username, password);
    if accepted {
        info!("User {} logged in", username);
    } else {
        warn!("Rejected login for user {}", username);
    }
    accepted
}

/// What the operator picked for a sale.
#[derive(Debug, Clone, PartialEq)]
pub enum SaleItem {
    /// A product already in the catalog, sold at its catalog price.
    FromCatalog(String),
    /// A product typed in by hand. It is added to the catalog, or its price
    /// updated, when the sale is recorded.
    NewProduct { name: String, price: f64 },
}

#[derive(Debug)]
pub struct Session {
    store: SalesStore,
    catalog: ProductCatalog,
    ledger: SalesLedger,
    today: NaiveDate,
}

impl Session {
    /// Loads the catalog and ledger, creating either file if it is missing.
    pub fn open(store: SalesStore, today: NaiveDate) -> Result<Self, Error> {
        let catalog = store.load_catalog()?;
        let ledger = store.load_ledger()?;
        info!("Opened {:?} with {} products and {} sales", store.dir(), catalog.len(), ledger.len());
        Ok(Session {
            store,
            catalog,
            ledger,
            today,
        })
    }

    pub fn ledger(&self) -> &SalesLedger {
        &self.ledger
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// The snapshot saved by the last totals refresh, from any session.
    pub fn latest_totals(&self) -> Result<Option<TotalsSnapshot>, Error> {
        self.store.load_totals()
    }

    pub fn price_of(&self, product: &str) -> Result<f64, Error> {
        self.catalog.price_of(product)
    }

    /// Records a sale on `date` and returns the confirmation for the operator.
    ///
    /// The ledger is saved before a typed product reaches the catalog, so a
    /// failed ledger write leaves both files and the loaded state as they were.
    pub fn register_sale(&mut self, date: NaiveDate, item: SaleItem) -> Result<String, Error> {
        let (record, new_product) = match item {
            SaleItem::FromCatalog(product) => {
                let price = self.catalog.price_of(&product)?;
                (SaleRecord::new(date, product, price), false)
            }
            SaleItem::NewProduct { name, price } => {
                let name = name.trim().to_owned();
                validate_sale(&name, price)?;
                (SaleRecord::new(date, name, price), true)
            }
        };
        let message = format!("Recorded sale of {} for ${:.2} on {}", record.product, record.price, record.date);
        let (product, price) = (record.product.clone(), record.price);

        self.ledger.append(record)?;
        if let Err(e) = self.store.save_ledger(&self.ledger) {
            self.ledger.delete_at(self.ledger.len() - 1)?;
            return Err(e);
        }
        if new_product {
            if let Some(old_price) = self.catalog.upsert(product.clone(), price) {
                info!("Changed price of {} from {:.2} to {:.2}", product, old_price, price);
            }
            self.store.save_catalog(&self.catalog)?;
        }
        info!("{}", message);
        Ok(message)
    }

    /// Deletes the sale at `index`. Later sales move down one position.
    pub fn delete_sale(&mut self, index: usize) -> Result<String, Error> {
        let removed = self.ledger.delete_at(index)?;
        self.store.save_ledger(&self.ledger)?;
        let message = format!("Deleted sale {} ({} for ${:.2} on {})", index, removed.product, removed.price, removed.date);
        info!("{}", message);
        Ok(message)
    }

    /// Removes `name` from the catalog. Past sales of it are kept.
    pub fn delete_product(&mut self, name: &str) -> Result<String, Error> {
        self.catalog.remove(name)?;
        self.store.save_catalog(&self.catalog)?;
        let message = format!("Deleted product '{}'", name);
        info!("{}", message);
        Ok(message)
    }

    /// Recomputes the total over the whole ledger and saves it as the latest snapshot.
    pub fn refresh_totals(&self) -> Result<TotalsSnapshot, Error> {
        let snapshot = TotalsSnapshot::compute(&self.ledger, self.today);
        self.store.persist_totals(&snapshot)?;
        Ok(snapshot)
    }
}
