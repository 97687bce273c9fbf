use crate::{LedgerError, LedgerStore, NewPurchase, PurchaseLedger, StoreError, Summary, ValidationError};

/// Possible errors to occur while handling a request
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The result of a successful mutation
///
/// Carries the message for the user and the fresh figures of the ledger, so
/// the caller never has to recompute them on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    pub summary: Summary,
}

/// Handles the requests of the purchase dashboard against one backing file
///
/// The ledger itself is owned by the caller and handed into every request.
/// Mutations are all or nothing: the caller's ledger only changes once the
/// new state has been written to the file.
#[derive(Clone, Debug)]
pub struct PurchaseService {
    store: LedgerStore,
}

impl PurchaseService {
    /// Creates a new service persisting to `store`
    pub fn new(store: LedgerStore) -> Self {
        Self {
            store,
        }
    }

    /// The backing store
    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Loads the ledger from the backing file
    pub fn open(&self) -> Result<PurchaseLedger, ServiceError> {
        Ok(self.store.load()?)
    }

    /// Adds a purchase and persists the ledger
    pub fn add(&self, ledger: &mut PurchaseLedger, purchase: NewPurchase) -> Result<Outcome, ServiceError> {
        let mut next = ledger.clone();
        let item = next.add(purchase)?.item().to_owned();
        self.commit(ledger, next)?;
        log::info!("added {}, the log now has {} purchases", item, ledger.len());

        Ok(Outcome {
            message: format!("Added: {}", item),
            summary: ledger.summary(),
        })
    }

    /// Deletes the purchase at `position` and persists the ledger
    pub fn delete(&self, ledger: &mut PurchaseLedger, position: usize) -> Result<Outcome, ServiceError> {
        let label = ledger.row_label(position)?;
        let mut next = ledger.clone();
        next.remove(position)?;
        self.commit(ledger, next)?;
        log::info!("deleted {}, the log now has {} purchases", label, ledger.len());

        Ok(Outcome {
            message: format!("Deleted: {}", label),
            summary: ledger.summary(),
        })
    }

    fn commit(&self, ledger: &mut PurchaseLedger, next: PurchaseLedger) -> Result<(), ServiceError> {
        self.store.save(&next)?;
        *ledger = next;

        Ok(())
    }
}
