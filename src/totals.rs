use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::ledger::SalesLedger;

/// The latest computed sales total. Only one snapshot is ever kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsSnapshot {
    /// The day the total was computed, empty when there were no sales.
    #[serde(rename = "Fecha")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "Total Ventas")]
    pub total_sales: f64,
}

impl TotalsSnapshot {
    /// Sums every sale currently in `ledger`, stamped with `today`.
    pub fn compute(ledger: &SalesLedger, today: NaiveDate) -> Self {
        if ledger.is_empty() {
            return TotalsSnapshot {
                date: None,
                total_sales: 0.0,
            };
        }
        TotalsSnapshot {
            date: Some(today),
            total_sales: ledger.records().iter().map(|record| record.price).sum(),
        }
    }
}
