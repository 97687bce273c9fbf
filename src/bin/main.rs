use std::fs::File;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use purchase_ledger::{
    report, store, LedgerStore, Money, NewPurchase, Outcome, PurchaseService, EXPORT_FILE_NAME, EXPORT_MEDIA_TYPE,
};

/// A cli dashboard for recording, viewing and deleting purchases
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// The path to the purchase CSV file
    #[clap(
        long,
        short,
        global = true,
        env = "PURCHASE_LEDGER_FILE",
        default_value = "cleaned_purchases.csv"
    )]
    file: PathBuf,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Shows the metrics, the purchase log and the spending by vendor
    Show,
    /// Records a new purchase
    Add {
        #[clap(long)]
        vendor: String,
        #[clap(long)]
        item: String,
        /// The number of units, at least 1
        #[clap(long, default_value_t = 1)]
        qty: u32,
        /// The price of a single unit
        #[clap(long)]
        price: Money,
    },
    /// Deletes the purchase in the given row, see `rows`
    Delete {
        row: usize,
    },
    /// Lists the rows that can be deleted
    Rows,
    /// Exports the purchase log as CSV
    Export {
        /// Defaults to `purchases_export.csv`, `-` writes to stdout
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let service = PurchaseService::new(LedgerStore::new(args.file));
    let mut ledger = service.open()?;

    match args.command.unwrap_or(Command::Show) {
        Command::Show => print!("{}", report::dashboard(&ledger)),
        Command::Add { vendor, item, qty, price } => {
            let outcome = service.add(&mut ledger, NewPurchase { vendor, item, qty, price })?;
            print_outcome(&outcome);
        }
        Command::Delete { row } => {
            let outcome = service.delete(&mut ledger, row)?;
            print_outcome(&outcome);
        }
        Command::Rows => match ledger.is_empty() {
            true => println!("The log is currently empty."),
            false => print!("{}", report::row_selection(&ledger)),
        },
        Command::Export { output } => {
            let output = output.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
            if output.as_os_str() == "-" {
                store::export(&ledger, std::io::stdout())?;
                return Ok(());
            }
            store::export(&ledger, File::create(&output)?)?;
            println!("Exported {} purchases to {} ({})", ledger.len(), output.display(), EXPORT_MEDIA_TYPE);
        }
    }

    Ok(())
}

fn print_outcome(outcome: &Outcome) {
    println!("{}\n", outcome.message);
    print!("{}", report::metrics(&outcome.summary));
}
