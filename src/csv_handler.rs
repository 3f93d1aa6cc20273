use std::io::{Read, Write};
use log::debug;
use crate::catalog::ProductCatalog;
use crate::error::Error;
use crate::ledger::{SaleRecord, SalesLedger};
use crate::totals::TotalsSnapshot;

/// Column headers of the sales table, in file order.
pub const SALES_HEADER: [&str; 3] = ["Fecha", "Producto", "Precio"];

/// Reads the whole sales table. A row that does not parse fails the read.
pub fn read_sales(reader: impl Read) -> Result<SalesLedger, Error> {
    let records = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize::<SaleRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Read {} sales", records.len());
    Ok(SalesLedger::from_records(records))
}

/// Writes the header row and every sale, replacing whatever `writer` held.
///
/// The header is written by hand so an empty ledger still produces it.
pub fn write_sales(writer: impl Write, ledger: &SalesLedger) -> Result<(), Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(SALES_HEADER)?;
    for record in ledger.records() {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Reads the totals table, which holds at most one snapshot.
pub fn read_totals(reader: impl Read) -> Result<Option<TotalsSnapshot>, Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    match csv_reader.deserialize::<TotalsSnapshot>().next() {
        Some(snapshot) => Ok(Some(snapshot?)),
        None => Ok(None),
    }
}

pub fn write_totals(writer: impl Write, snapshot: &TotalsSnapshot) -> Result<(), Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.serialize(snapshot)?;
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes the sales history with each row's current index.
pub fn print_sales(mut out: impl Write, ledger: &SalesLedger) -> std::io::Result<()> {
    writeln!(out, "index, Fecha, Producto, Precio")?;
    for (index, record) in ledger.records().iter().enumerate() {
        writeln!(out, "{}, {}, {}, {:.2}", index, record.date, record.product, record.price)?;
    }
    Ok(())
}

pub fn print_catalog(mut out: impl Write, catalog: &ProductCatalog) -> std::io::Result<()> {
    writeln!(out, "Producto, Precio")?;
    for (name, price) in catalog.products() {
        writeln!(out, "{}, {:.2}", name, price)?;
    }
    Ok(())
}

pub fn print_totals(mut out: impl Write, snapshot: &TotalsSnapshot) -> std::io::Result<()> {
    writeln!(out, "Fecha, Total Ventas")?;
    let date = snapshot.date.map(|date| date.to_string()).unwrap_or_default();
    writeln!(out, "{}, {:.2}", date, snapshot.total_sales)
}
