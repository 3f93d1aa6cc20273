use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use log::{debug, info};
use crate::catalog::ProductCatalog;
use crate::csv_handler;
use crate::error::Error;
use crate::ledger::SalesLedger;
use crate::totals::TotalsSnapshot;

pub const SALES_FILE: &str = "ventas.csv";
pub const TOTALS_FILE: &str = "totales.csv";
pub const PRODUCTS_FILE: &str = "productos.json";

/// Handle on the directory holding the sales, catalog and totals files.
///
/// Every read and write covers a whole file. Nothing is cached, so callers
/// hold the loaded state themselves and save it after each change.
#[derive(Debug, Clone)]
pub struct SalesStore {
    dir: PathBuf,
}

impl SalesStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SalesStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn sales_path(&self) -> PathBuf {
        self.dir.join(SALES_FILE)
    }

    pub fn totals_path(&self) -> PathBuf {
        self.dir.join(TOTALS_FILE)
    }

    pub fn products_path(&self) -> PathBuf {
        self.dir.join(PRODUCTS_FILE)
    }

    /// Loads the catalog, saving the seed products first if there is no file.
    pub fn load_catalog(&self) -> Result<ProductCatalog, Error> {
        let path = self.products_path();
        match open_if_exists(&path)? {
            Some(file) => ProductCatalog::from_json(BufReader::new(file)),
            None => {
                info!("No catalog at {:?}, creating it with the default products", path);
                let catalog = ProductCatalog::seed();
                self.save_catalog(&catalog)?;
                Ok(catalog)
            }
        }
    }

    pub fn save_catalog(&self, catalog: &ProductCatalog) -> Result<(), Error> {
        let path = self.products_path();
        let mut writer = BufWriter::new(create(&path)?);
        catalog.to_json(&mut writer)?;
        writer.flush().map_err(|e| Error::io(&path, e))?;
        debug!("Saved {} products to {:?}", catalog.len(), path);
        Ok(())
    }

    /// Loads the ledger, saving an empty table first if there is no file.
    pub fn load_ledger(&self) -> Result<SalesLedger, Error> {
        let path = self.sales_path();
        match open_if_exists(&path)? {
            Some(file) => csv_handler::read_sales(BufReader::new(file)),
            None => {
                info!("No sales at {:?}, creating an empty ledger", path);
                let ledger = SalesLedger::default();
                self.save_ledger(&ledger)?;
                Ok(ledger)
            }
        }
    }

    pub fn save_ledger(&self, ledger: &SalesLedger) -> Result<(), Error> {
        let path = self.sales_path();
        csv_handler::write_sales(BufWriter::new(create(&path)?), ledger)?;
        debug!("Saved {} sales to {:?}", ledger.len(), path);
        Ok(())
    }

    /// The last persisted snapshot, if totals were ever computed.
    pub fn load_totals(&self) -> Result<Option<TotalsSnapshot>, Error> {
        match open_if_exists(&self.totals_path())? {
            Some(file) => csv_handler::read_totals(BufReader::new(file)),
            None => Ok(None),
        }
    }

    /// Replaces the totals file with `snapshot`.
    pub fn persist_totals(&self, snapshot: &TotalsSnapshot) -> Result<(), Error> {
        let path = self.totals_path();
        csv_handler::write_totals(BufWriter::new(create(&path)?), snapshot)?;
        debug!("Saved total of {:.2} to {:?}", snapshot.total_sales, path);
        Ok(())
    }
}

/// Opens `path` for reading. A missing file is `None`, any other failure is an error.
fn open_if_exists(path: &Path) -> Result<Option<File>, Error> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

fn create(path: &Path) -> Result<File, Error> {
    File::create(path).map_err(|e| Error::io(path, e))
}
