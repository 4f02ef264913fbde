use crate::model::BillingItem;
use std::io::Write;
use std::path::Path;

/// Payment state shown in the export.
fn payment_status(item: &BillingItem) -> &'static str {
    if item.is_paid() {
        "Paid"
    } else {
        "Open"
    }
}

/// Write the billing plan to any writer as semicolon-delimited CSV.
///
/// Columns: Due Date ; Paid Date ; Amount ; Status ; Description
/// Dates are formatted as DD/MM/YYYY; missing values are left empty.
/// Returns the number of items written.
pub fn write_billing_csv<W: Write>(items: &[BillingItem], writer: W) -> Result<usize, String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(["Due Date", "Paid Date", "Amount", "Status", "Description"])
        .map_err(|e| format!("Failed to write header: {}", e))?;

    for item in items {
        let due = item
            .due_date
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_default();
        let paid = item
            .paid_at
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_default();
        let amount = item.amount.map(|a| format!("{:.2}", a)).unwrap_or_default();
        wtr.write_record([
            due.as_str(),
            paid.as_str(),
            amount.as_str(),
            payment_status(item),
            item.description.as_deref().unwrap_or(""),
        ])
        .map_err(|e| format!("Failed to write billing item: {}", e))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {}", e))?;
    Ok(items.len())
}

/// Export the billing plan to a CSV file on disk.
pub fn export_billing(items: &[BillingItem], path: &Path) -> Result<usize, String> {
    let file = std::fs::File::create(path)
        .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
    let count = write_billing_csv(items, file)?;
    log::info!("exported {} billing items to {}", count, path.display());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn billing_csv_has_header_and_one_line_per_item() {
        let items = vec![
            BillingItem {
                id: Uuid::new_v4(),
                due_date: NaiveDate::from_ymd_opt(2025, 5, 15),
                paid_at: NaiveDate::from_ymd_opt(2025, 5, 20),
                amount: Some(12500.0),
                description: Some("Down payment".into()),
            },
            BillingItem {
                id: Uuid::new_v4(),
                due_date: NaiveDate::from_ymd_opt(2025, 11, 1),
                paid_at: None,
                amount: None,
                description: None,
            },
        ];

        let mut buf = Vec::new();
        let count = write_billing_csv(&items, &mut buf).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Due Date;Paid Date;Amount;Status;Description");
        assert_eq!(lines[1], "15/05/2025;20/05/2025;12500.00;Paid;Down payment");
        assert_eq!(lines[2], "01/11/2025;;;Open;");
    }
}
