use std::fmt::Write;

use prettytable::{format, Cell, Row, Table};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::RoundingStrategy;

use crate::{Money, PurchaseLedger, Summary, VendorSpending};

/// The width of the longest bar in the vendor chart
const BAR_WIDTH: usize = 40;

/// Renders the complete dashboard: metrics, purchase log and vendor chart
pub fn dashboard(ledger: &PurchaseLedger) -> String {
    let summary = ledger.summary();
    let mut out = String::new();

    out.push_str("Purchase Management System\n\n");
    out.push_str(&metrics(&summary));
    out.push_str("\nPurchase Log\n");
    out.push_str(&purchase_log(ledger));
    if !ledger.is_empty() {
        out.push_str("\nSpending by Vendor\n");
        out.push_str(&vendor_chart(&summary.by_vendor));
    }

    out
}

/// The metrics strip, one figure per line
pub fn metrics(summary: &Summary) -> String {
    format!(
        "Total Spending: {}\nTotal Items:    {}\nVendors:        {}\n",
        format_total(summary.total_spending),
        summary.total_items,
        summary.vendors,
    )
}

/// The purchase log as a table, including the row positions
pub fn purchase_log(ledger: &PurchaseLedger) -> String {
    if ledger.is_empty() {
        return "The log is currently empty.\n".to_owned();
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(
        ["", "Vendor", "Item", "Qty", "Price", "Amount"]
            .iter()
            .map(|title| Cell::new(title))
            .collect(),
    ));
    for (position, record) in ledger.records().iter().enumerate() {
        table.add_row(Row::new(vec![
            Cell::new_align(&position.to_string(), format::Alignment::RIGHT),
            Cell::new(record.vendor()),
            Cell::new(record.item()),
            Cell::new_align(&record.qty().to_string(), format::Alignment::RIGHT),
            Cell::new_align(&record.price().to_string(), format::Alignment::RIGHT),
            Cell::new_align(&record.amount().to_string(), format::Alignment::RIGHT),
        ]));
    }

    table.to_string()
}

/// One horizontal bar per vendor, scaled to the largest total
pub fn vendor_chart(spending: &[VendorSpending]) -> String {
    let name_width = spending
        .iter()
        .map(|s| s.vendor.chars().count())
        .max()
        .unwrap_or(0);
    let max = spending
        .iter()
        .map(|s| s.total)
        .max()
        .unwrap_or(Money::ZERO);

    let mut out = String::new();
    for s in spending {
        let bar = "█".repeat(bar_length(s.total, max));
        // writing into a String cannot fail
        let _ = writeln!(out, "{:<width$} | {} {}", s.vendor, bar, format_total(s.total), width = name_width);
    }

    out
}

/// The labels offered when selecting a row to delete
pub fn row_selection(ledger: &PurchaseLedger) -> String {
    ledger
        .row_labels()
        .into_iter()
        .map(|label| label + "\n")
        .collect()
}

/// Formats a total as a whole number with thousands separators, e.g. `1,234`
///
/// Halves round to the nearest even number, so `2.5` becomes `2`.
pub fn format_total(total: Money) -> String {
    let digits = total
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }

    out
}

fn bar_length(total: Money, max: Money) -> usize {
    if max.is_zero() {
        return 0;
    }
    let length = (total / max * Money::from(BAR_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(BAR_WIDTH);
    match total > Money::ZERO {
        true => length.max(1),
        false => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NewPurchase;

    fn ledger(purchases: &[(&str, &str, u32, u32)]) -> PurchaseLedger {
        let mut ledger = PurchaseLedger::new();
        for &(vendor, item, qty, price) in purchases {
            ledger
                .add(NewPurchase {
                    vendor: vendor.to_owned(),
                    item: item.to_owned(),
                    qty,
                    price: Money::from(price),
                })
                .unwrap();
        }
        ledger
    }

    #[test]
    fn totals_are_grouped() {
        let total = |value: &str| format_total(value.parse().unwrap());

        assert_eq!(total("0"), "0");
        assert_eq!(total("300.00"), "300");
        assert_eq!(total("1234"), "1,234");
        assert_eq!(total("999999.51"), "1,000,000");
        assert_eq!(total("12345678"), "12,345,678");
    }

    #[test]
    fn totals_round_halves_to_even() {
        let total = |value: &str| format_total(value.parse().unwrap());

        assert_eq!(total("2.5"), "2");
        assert_eq!(total("3.5"), "4");
        assert_eq!(total("1234.50"), "1,234");
        assert_eq!(total("0.5"), "0");
    }

    #[test]
    fn empty_dashboard() {
        let out = dashboard(&PurchaseLedger::new());

        assert!(out.contains("Total Spending: 0\n"));
        assert!(out.contains("Total Items:    0\n"));
        assert!(out.contains("Vendors:        0\n"));
        assert!(out.contains("The log is currently empty."));
        assert!(!out.contains("Spending by Vendor"));
    }

    #[test]
    fn dashboard_lists_records_and_chart() {
        let out = dashboard(&ledger(&[("Acme Inc", "office chair", 2, 1500), ("Paper Co", "paper", 10, 4)]));

        assert!(out.contains("Total Spending: 3,040\n"));
        assert!(out.contains("Total Items:    2\n"));
        assert!(out.contains("Vendors:        2\n"));
        assert!(out.contains("Office Chair"));
        assert!(out.contains("Spending by Vendor"));
    }

    #[test]
    fn chart_bars_scale_to_largest() {
        let ledger = ledger(&[("A", "desk", 1, 100), ("B", "lamp", 1, 50), ("A", "pen", 1, 25)]);
        let chart = vendor_chart(&ledger.spending_by_vendor());
        let lines = chart.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("A | {} 125", "█".repeat(40)));
        assert_eq!(lines[1], format!("B | {} 50", "█".repeat(16)));
    }

    #[test]
    fn chart_with_only_free_items() {
        let ledger = ledger(&[("A", "sample", 1, 0)]);

        assert_eq!(vendor_chart(&ledger.spending_by_vendor()), "A |  0\n");
    }

    #[test]
    fn selection_labels() {
        let ledger = ledger(&[("Acme Inc", "office chair", 2, 150), ("B", "lamp", 1, 50)]);

        assert_eq!(
            row_selection(&ledger),
            "Row 0: Office Chair from Acme Inc\nRow 1: Lamp from B\n",
        );
    }
}
