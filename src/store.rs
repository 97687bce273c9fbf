use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::record::StoredRecord;
use crate::{PurchaseLedger, PurchaseRecord, ValidationError};

/// The header row of the backing file, in column order
pub const COLUMNS: [&str; 5] = ["Vendor", "Item", "Qty", "Price", "Amount"];

/// The file name offered when exporting the ledger
pub const EXPORT_FILE_NAME: &str = "purchases_export.csv";

/// The media type of an exported ledger
pub const EXPORT_MEDIA_TYPE: &str = "text/csv";

/// Possible errors to occur while reading or writing the purchase file
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("The purchase file is missing the `{0}` column")]
    MissingColumn(&'static str),
    #[error("The purchase file is malformed: {0}")]
    Parse(#[source] csv::Error),
    #[error("Row {row} of the purchase file is invalid: {source}")]
    InvalidRecord { row: usize, source: ValidationError },
    #[error("The purchase file could not be written: {0}")]
    Write(#[source] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The flat CSV file a ledger is persisted to
#[derive(Clone, Debug)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    /// Creates a store backed by the file at `path`
    ///
    /// The file does not have to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// The path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole ledger
    ///
    /// A missing file is an empty ledger.
    pub fn load(&self) -> Result<PurchaseLedger, StoreError> {
        if !self.path.exists() {
            log::info!("{} does not exist yet, starting with an empty log", self.path.display());
            return Ok(PurchaseLedger::new());
        }

        let ledger = read_csv(File::open(&self.path)?)?;
        log::info!("loaded {} purchases from {}", ledger.len(), self.path.display());

        Ok(ledger)
    }

    /// Replaces the backing file with the full ledger
    ///
    /// The ledger is written to a sibling `.tmp` file first, which is then
    /// renamed over the backing file.
    pub fn save(&self, ledger: &PurchaseLedger) -> Result<(), StoreError> {
        let tmp = self.tmp_path();
        log::debug!("writing {} purchases to {}", ledger.len(), tmp.display());

        let result = File::create(&tmp)
            .map_err(StoreError::from)
            .and_then(|file| write_csv(ledger, file))
            .and_then(|()| fs::rename(&tmp, &self.path).map_err(StoreError::from));
        if result.is_err() {
            // the original file is still intact, only the partial copy is dropped
            let _ = fs::remove_file(&tmp);
        }
        result?;

        log::info!("saved {} purchases to {}", ledger.len(), self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Parses a ledger from CSV with a `Vendor,Item,Qty,Price,Amount` header
///
/// Rows are normalized like new purchases: items are title cased and amounts
/// are recomputed from `Qty` and `Price`. Values that change are logged.
pub fn read_csv<R: Read>(reader: R) -> Result<PurchaseLedger, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(StoreError::Parse)?;
    if let Some(missing) = COLUMNS.iter().find(|column| !headers.iter().any(|h| h == **column)) {
        return Err(StoreError::MissingColumn(*missing));
    }

    let mut ledger = PurchaseLedger::new();
    for (row, stored) in reader.deserialize::<StoredRecord>().enumerate() {
        let stored = stored.map_err(StoreError::Parse)?;
        let record = PurchaseRecord::new(stored.to_purchase())
            .map_err(|source| StoreError::InvalidRecord { row, source })?;
        if record.item() != stored.item {
            log::warn!("row {} has item {:?}, loading it as {:?}", row, stored.item, record.item());
        }
        if record.amount() != stored.amount {
            log::warn!(
                "row {} has amount {}, but qty * price is {}; using {}",
                row, stored.amount, record.amount(), record.amount(),
            );
        }
        ledger
            .push(record)
            .map_err(|source| StoreError::InvalidRecord { row, source })?;
    }

    Ok(ledger)
}

/// Writes the ledger as CSV, with a header row and without an index column
pub fn write_csv<W: Write>(ledger: &PurchaseLedger, writer: W) -> Result<(), StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // written by hand so an empty ledger still gets its header
    writer.write_record(COLUMNS).map_err(StoreError::Write)?;
    for record in ledger.records() {
        writer.serialize(record).map_err(StoreError::Write)?;
    }
    writer.flush()?;

    Ok(())
}

/// Exports the ledger in the same format as the backing file
///
/// This never touches the backing file.
pub fn export<W: Write>(ledger: &PurchaseLedger, writer: W) -> Result<(), StoreError> {
    write_csv(ledger, writer)
}
