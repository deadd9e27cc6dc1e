//! Fixed-width table rendering for list output.

use api_client::models::{QuoteDetail, QuoteHeader};
use service::view_models::{CustomerListModel, QuoteListModel};

pub fn customers_table(rows: &[CustomerListModel]) -> String {
    let header = format!(
        "{:>6}  {:<28} {:<16} {:<16} {:<16} {:<28}",
        "ID", "NAME", "CITY", "COUNTRY", "CONTACT", "EMAIL"
    );
    let mut out = String::new();
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(header.len()));
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{:>6}  {:<28} {:<16} {:<16} {:<16} {:<28}\n",
            opt_id(row.customer_id),
            row.name,
            row.city,
            row.country,
            row.contact_number,
            row.email_id
        ));
    }
    out
}

pub fn quotes_table(rows: &[QuoteListModel]) -> String {
    let header = format!(
        "{:>6}  {:<10} {:<12} {:<28} {:>10} {:>12}",
        "ID", "REF", "DATE", "CUSTOMER", "QTY", "VALUE"
    );
    let mut out = String::new();
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(header.len()));
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{:>6}  {:<10} {:<12} {:<28} {:>10.2} {:>12.2}\n",
            opt_id(row.quote_id),
            row.quote_ref,
            row.quote_date,
            row.customer_name,
            row.total_quantity,
            row.total_value
        ));
    }
    out
}

pub fn items_table(items: &[QuoteDetail]) -> String {
    let header = format!(
        "{:>4}  {:<32} {:>12} {:>10} {:>12}",
        "SL", "DESCRIPTION", "RATE", "QTY", "VALUE"
    );
    let mut out = String::new();
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(header.len()));
    out.push('\n');
    for item in items {
        out.push_str(&format!(
            "{:>4}  {:<32} {:>12.2} {:>10.2} {:>12.2}\n",
            opt_id(item.sl_no),
            item.item_desc,
            item.item_unit_rate,
            item.item_quantity,
            item.item_value
        ));
    }
    out
}

/// Table of quotes offered after a customer-name search, before one is
/// picked by reference.
pub fn candidates_table(quotes: &[QuoteHeader]) -> String {
    let header = format!("{:<10} {:<12} {:>10} {:>12}", "REF", "DATE", "QTY", "VALUE");
    let mut out = String::new();
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(header.len()));
    out.push('\n');
    for quote in quotes {
        out.push_str(&format!(
            "{:<10} {:<12} {:>10.2} {:>12.2}\n",
            quote.quote_ref.as_deref().unwrap_or("-"),
            quote.quote_date,
            quote.total_quantity.unwrap_or(0.0),
            quote.total_value.unwrap_or(0.0)
        ));
    }
    out
}

pub fn opt_id(id: Option<i64>) -> String {
    id.map(|value| value.to_string())
        .unwrap_or_else(|| "-".to_string())
}
