pub use self::{
    ledger::{LedgerError, PurchaseLedger, Summary, VendorSpending},
    record::{title_case, Money, NewPurchase, PurchaseRecord, ValidationError},
    service::{Outcome, PurchaseService, ServiceError},
    store::{LedgerStore, StoreError, EXPORT_FILE_NAME, EXPORT_MEDIA_TYPE},
};

mod ledger;
mod record;
mod service;
pub mod report;
pub mod store;
