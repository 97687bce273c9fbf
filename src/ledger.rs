use std::collections::{BTreeMap, HashSet};

use crate::{Money, NewPurchase, PurchaseRecord, ValidationError};

/// Possible errors to occur when addressing rows of the ledger
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Row {position} does not exist, the log has {len} rows")]
    RowOutOfRange { position: usize, len: usize },
}

/// The summed amount of all purchases at one vendor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VendorSpending {
    pub vendor: String,
    pub total: Money,
}

/// A snapshot of all derived figures of a ledger
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub total_spending: Money,
    pub total_items: usize,
    pub vendors: usize,
    pub by_vendor: Vec<VendorSpending>,
}

/// The ordered log of all purchases
///
/// Rows are addressed by their position. Positions are not stable, removing a
/// row shifts every later row down by one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PurchaseLedger {
    records: Vec<PurchaseRecord>,
    /// The sum of all amounts, kept in step with `records`
    total: Money,
}

impl PurchaseLedger {
    /// Creates a new, empty ledger
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            total: Money::ZERO,
        }
    }

    /// All records in insertion order
    pub fn records(&self) -> &[PurchaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validates a purchase and appends it to the end of the ledger
    ///
    /// On a validation error the ledger is left untouched.
    pub fn add(&mut self, purchase: NewPurchase) -> Result<&PurchaseRecord, ValidationError> {
        let record = PurchaseRecord::new(purchase)?;
        self.push(record)?;

        Ok(&self.records[self.records.len() - 1])
    }

    /// Removes the record at `position` and returns it
    pub fn remove(&mut self, position: usize) -> Result<PurchaseRecord, LedgerError> {
        self.check_position(position)?;
        let record = self.records.remove(position);
        self.total -= record.amount();

        Ok(record)
    }

    /// The label shown when selecting a row, e.g. `Row 0: Office Chair from Acme Inc`
    pub fn row_label(&self, position: usize) -> Result<String, LedgerError> {
        self.check_position(position)?;

        Ok(label(position, &self.records[position]))
    }

    /// The labels of all rows, in order
    pub fn row_labels(&self) -> Vec<String> {
        self.records
            .iter()
            .enumerate()
            .map(|(position, record)| label(position, record))
            .collect()
    }

    /// The sum of all amounts, `0` for an empty ledger
    pub fn total_spending(&self) -> Money {
        self.total
    }

    /// The number of records
    pub fn total_items(&self) -> usize {
        self.records.len()
    }

    /// The number of distinct vendors
    ///
    /// Vendors are compared exactly, `Acme` and `acme` are two vendors.
    pub fn distinct_vendors(&self) -> usize {
        self.records
            .iter()
            .map(PurchaseRecord::vendor)
            .collect::<HashSet<_>>()
            .len()
    }

    /// The summed amount per vendor, largest first
    ///
    /// Groups are formed in ascending vendor order and then stably sorted, so
    /// vendors with equal totals stay in name order.
    pub fn spending_by_vendor(&self) -> Vec<VendorSpending> {
        let mut groups: BTreeMap<&str, Money> = BTreeMap::new();
        for record in &self.records {
            // amounts are never negative, so a group total never exceeds `self.total`
            *groups
                .entry(record.vendor())
                .or_insert(Money::ZERO) += record.amount();
        }

        let mut spending = groups
            .into_iter()
            .map(|(vendor, total)| VendorSpending { vendor: vendor.to_owned(), total })
            .collect::<Vec<_>>();
        spending.sort_by(|a, b| b.total.cmp(&a.total));

        spending
    }

    /// All derived figures at once
    pub fn summary(&self) -> Summary {
        Summary {
            total_spending: self.total_spending(),
            total_items: self.total_items(),
            vendors: self.distinct_vendors(),
            by_vendor: self.spending_by_vendor(),
        }
    }

    /// Appends a record, refusing it if the total spending would overflow
    pub(crate) fn push(&mut self, record: PurchaseRecord) -> Result<(), ValidationError> {
        self.total = self.total
            .checked_add(record.amount())
            .ok_or(ValidationError::TotalOverflow)?;
        self.records.push(record);

        Ok(())
    }

    fn check_position(&self, position: usize) -> Result<(), LedgerError> {
        match position < self.records.len() {
            true => Ok(()),
            false => Err(LedgerError::RowOutOfRange { position, len: self.records.len() }),
        }
    }
}

fn label(position: usize, record: &PurchaseRecord) -> String {
    format!("Row {}: {} from {}", position, record.item(), record.vendor())
}
