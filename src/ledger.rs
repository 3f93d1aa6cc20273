use chrono::NaiveDate;
use log::trace;
use serde::{Deserialize, Serialize};
use crate::error::Error;

/// One recorded sale. The price is the one charged at the time of the sale and
/// need not match the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(rename = "Fecha")]
    pub date: NaiveDate,
    #[serde(rename = "Producto")]
    pub product: String,
    #[serde(rename = "Precio")]
    pub price: f64,
}

impl SaleRecord {
    pub fn new(date: NaiveDate, product: impl Into<String>, price: f64) -> Self {
        SaleRecord {
            date,
            product: product.into(),
            price,
        }
    }

    /// Checks the record can be written to the ledger.
    pub fn validate(&self) -> Result<(), Error> {
        validate_sale(&self.product, self.price)
    }
}

/// A sale needs a product name and a positive, finite price.
pub fn validate_sale(product: &str, price: f64) -> Result<(), Error> {
    if product.trim().is_empty() {
        return Err(Error::EmptyProductName);
    }
    if !price.is_finite() {
        return Err(Error::NonFinitePrice(price));
    }
    if price <= 0.0 {
        return Err(Error::NonPositivePrice(price));
    }
    Ok(())
}

/// The ordered list of sales, oldest first.
///
/// Rows are addressed by position. Deleting a row shifts every later row down
/// by one, so an index is only meaningful against the ledger it was read from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesLedger {
    records: Vec<SaleRecord>,
}

impl SalesLedger {
    pub fn from_records(records: Vec<SaleRecord>) -> Self {
        SalesLedger { records }
    }

    /// Adds `record` at the end. Invalid records leave the ledger unchanged.
    pub fn append(&mut self, record: SaleRecord) -> Result<(), Error> {
        record.validate()?;
        trace!("Appending sale of {} for {:.2} on {}", record.product, record.price, record.date);
        self.records.push(record);
        Ok(())
    }

    /// Removes and returns the row at `index`.
    pub fn delete_at(&mut self, index: usize) -> Result<SaleRecord, Error> {
        if index >= self.records.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        let removed = self.records.remove(index);
        trace!("Deleted sale {} of {}, {} rows left", index, removed.product, self.records.len());
        Ok(removed)
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn three_row_ledger() -> SalesLedger {
        SalesLedger::from_records(vec![
            SaleRecord::new(date(1), "Jabón", 2.50),
            SaleRecord::new(date(2), "Cereal", 3.40),
            SaleRecord::new(date(3), "Shampoo", 5.00),
        ])
    }

    #[test]
    fn test_append_adds_at_end() {
        let mut ledger = three_row_ledger();
        let record = SaleRecord::new(date(4), "Café", 1.80);

        ledger.append(record.clone()).unwrap();

        assert_eq!(ledger.len(), 4);
        assert_eq!(ledger.records().get(3), Some(&record));
    }

    #[test]
    fn test_append_rejects_empty_product() {
        let mut ledger = three_row_ledger();

        let result = ledger.append(SaleRecord::new(date(4), "  ", 1.00));

        assert!(matches!(result, Err(Error::EmptyProductName)));
        assert_eq!(ledger, three_row_ledger());
    }

    #[test]
    fn test_append_rejects_non_positive_price() {
        let mut ledger = three_row_ledger();

        assert!(matches!(ledger.append(SaleRecord::new(date(4), "Café", 0.0)), Err(Error::NonPositivePrice(_))));
        assert!(matches!(ledger.append(SaleRecord::new(date(4), "Café", -1.0)), Err(Error::NonPositivePrice(_))));
        assert_eq!(ledger, three_row_ledger());
    }

    #[test]
    fn test_append_rejects_non_finite_price() {
        let mut ledger = three_row_ledger();

        assert!(matches!(ledger.append(SaleRecord::new(date(4), "Café", f64::NAN)), Err(Error::NonFinitePrice(_))));
        assert!(matches!(ledger.append(SaleRecord::new(date(4), "Café", f64::INFINITY)), Err(Error::NonFinitePrice(_))));
        assert!(matches!(ledger.append(SaleRecord::new(date(4), "Café", f64::NEG_INFINITY)), Err(Error::NonFinitePrice(_))));
        assert_eq!(ledger, three_row_ledger());
    }

    #[test]
    fn test_delete_first_shifts_rows() {
        let original = three_row_ledger();
        let mut ledger = original.clone();

        let removed = ledger.delete_at(0).unwrap();

        assert_eq!(removed, original.records()[0]);
        assert_eq!(ledger.records(), &original.records()[1..]);
    }

    #[test]
    fn test_delete_middle_keeps_order() {
        let original = three_row_ledger();
        let mut ledger = original.clone();

        ledger.delete_at(1).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.records().get(0), original.records().get(0));
        assert_eq!(ledger.records().get(1), original.records().get(2));
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut ledger = three_row_ledger();

        let result = ledger.delete_at(3);

        assert!(matches!(result, Err(Error::IndexOutOfRange { index: 3, len: 3 })));
        assert_eq!(ledger.len(), 3);
    }
}
