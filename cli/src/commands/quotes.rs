use std::sync::Arc;

use api_client::models::QuoteDetail;
use chrono::NaiveDate;
use clap::Subcommand;
use colored::Colorize;
use service::{
    app_services::AppServices,
    error::Error,
    quote_draft::{DraftItem, QuoteComposer, QuoteDraft},
    quote_editor::{QuoteEditor, QuoteSearch, SearchOutcome},
    quote_store::QuoteStore,
    view_models::QuoteListModel,
};

use crate::feedback::{TerminalConfirmationPrompt, TerminalNotificationSink};
use crate::table;

#[derive(Subcommand)]
pub enum QuoteCommands {
    /// List quotes with their customers
    List,
    /// Load a quote by reference or list a customer's quotes
    Find {
        /// Quote reference, e.g. QR0007
        #[arg(long, conflicts_with = "customer")]
        reference: Option<String>,
        /// Customer name to search by
        #[arg(long)]
        customer: Option<String>,
    },
    /// Create a quote from line items
    Add {
        /// Owning customer id
        #[arg(long)]
        customer_id: i64,
        /// Quote date as YYYY-MM-DD; defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Line item as "DESC:RATE:QTY"; repeat for more rows
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },
    /// Delete a quote
    Delete {
        /// Quote id
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Append a line item to a quote
    AddItem {
        /// Quote reference
        #[arg(long)]
        reference: String,
        /// Item description
        #[arg(long)]
        desc: String,
        /// Unit rate
        #[arg(long)]
        rate: f64,
        /// Quantity
        #[arg(long)]
        qty: f64,
    },
    /// Change a line item on a quote
    UpdateItem {
        /// Quote reference
        #[arg(long)]
        reference: String,
        /// Line item serial number
        #[arg(long)]
        sl_no: i64,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        qty: Option<f64>,
    },
    /// Remove a line item from a quote
    DeleteItem {
        /// Quote reference
        #[arg(long)]
        reference: String,
        /// Line item serial number
        #[arg(long)]
        sl_no: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub async fn dispatch(command: QuoteCommands, services: &Arc<AppServices>) -> Result<(), Error> {
    match command {
        QuoteCommands::List => list(services).await,
        QuoteCommands::Find {
            reference,
            customer,
        } => find(services, reference, customer).await,
        QuoteCommands::Add {
            customer_id,
            date,
            items,
        } => add(services, customer_id, date, items).await,
        QuoteCommands::Delete { id, yes } => delete(services, id, yes).await,
        QuoteCommands::AddItem {
            reference,
            desc,
            rate,
            qty,
        } => add_item(services, reference, desc, rate, qty).await,
        QuoteCommands::UpdateItem {
            reference,
            sl_no,
            desc,
            rate,
            qty,
        } => update_item(services, reference, sl_no, desc, rate, qty).await,
        QuoteCommands::DeleteItem {
            reference,
            sl_no,
            yes,
        } => delete_item(services, reference, sl_no, yes).await,
    }
}

fn editor(services: &Arc<AppServices>, assume_yes: bool) -> QuoteEditor {
    QuoteEditor::new(
        services.quote_store(),
        services.customer_store(),
        Arc::new(TerminalNotificationSink),
        Arc::new(TerminalConfirmationPrompt::new(assume_yes)),
    )
}

/// Loads the quote into the editor or exits; the editor has already told
/// the user what went wrong.
async fn require_loaded(editor: &QuoteEditor, reference: &str) {
    let outcome = editor
        .search(QuoteSearch::ByReference(reference.to_string()))
        .await;
    if outcome != SearchOutcome::Loaded {
        std::process::exit(1);
    }
}

fn print_loaded(editor: &QuoteEditor) {
    if let Some(quote_ref) = editor.current_quote_ref() {
        println!("Quote {}", quote_ref);
    }
    print!("{}", table::items_table(&editor.items()));
    println!(
        "Total quantity: {:.2}  Total value: {:.2}",
        editor.total_quantity(),
        editor.total_value()
    );
}

async fn list(services: &Arc<AppServices>) -> Result<(), Error> {
    let Some(models) = super::view_model_service(services, false)
        .load_quote_list()
        .await
    else {
        std::process::exit(1);
    };
    print!("{}", table::quotes_table(&models));
    println!("{} quote(s)", models.len());
    Ok(())
}

async fn find(
    services: &Arc<AppServices>,
    reference: Option<String>,
    customer: Option<String>,
) -> Result<(), Error> {
    let editor = editor(services, false);
    let search = match (reference, customer) {
        (Some(reference), _) => QuoteSearch::ByReference(reference),
        (None, Some(customer)) => QuoteSearch::ByCustomerName(customer),
        (None, None) => QuoteSearch::ByReference(String::new()),
    };

    match editor.search(search).await {
        SearchOutcome::Loaded => {
            print_loaded(&editor);
            Ok(())
        }
        SearchOutcome::Candidates(quotes) => {
            print!("{}", table::candidates_table(&quotes));
            Ok(())
        }
        SearchOutcome::NotFound | SearchOutcome::EmptyQuery => std::process::exit(1),
    }
}

async fn add(
    services: &Arc<AppServices>,
    customer_id: i64,
    date: Option<String>,
    items: Vec<String>,
) -> Result<(), Error> {
    let quote_date = match date {
        Some(date) => {
            NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
                Error::InvalidInput(format!("invalid date {:?}, expected YYYY-MM-DD", date))
            })?;
            date
        }
        None => chrono::Local::now().format("%Y-%m-%d").to_string(),
    };

    let mut draft = QuoteDraft::new(Some(customer_id), quote_date);
    for (index, raw) in items.iter().enumerate() {
        let item = parse_item(raw)?;
        if index > 0 && !draft.add_row() {
            return Err(Error::InvalidInput(
                "previous line item is incomplete".to_string(),
            ));
        }
        draft.update_row(index, item);
    }

    let composer = QuoteComposer::new(services.quote_store(), Arc::new(TerminalNotificationSink));
    match composer.submit(&draft).await {
        Some(saved) => {
            print!("{}", table::items_table(&saved.quote_details.unwrap_or_default()));
            Ok(())
        }
        None => std::process::exit(1),
    }
}

async fn delete(services: &Arc<AppServices>, id: i64, yes: bool) -> Result<(), Error> {
    let quote = services.quote_store().get_quote(id).await?;
    let model = QuoteListModel::from_quote(&quote, String::new());

    let deleted = super::view_model_service(services, yes)
        .delete_quote(&model)
        .await;
    if !deleted {
        std::process::exit(1);
    }
    Ok(())
}

async fn add_item(
    services: &Arc<AppServices>,
    reference: String,
    desc: String,
    rate: f64,
    qty: f64,
) -> Result<(), Error> {
    let editor = editor(services, false);
    require_loaded(&editor, &reference).await;

    // Mirrors the interactive flow: a fresh row is created first, then
    // saved with the requested values.
    let Some(created) = editor.add_item().await else {
        std::process::exit(1);
    };
    let edited = QuoteDetail {
        item_desc: desc,
        item_unit_rate: rate,
        item_quantity: qty,
        ..created
    };
    if editor.update_item(edited).await.is_none() {
        std::process::exit(1);
    }

    print_loaded(&editor);
    Ok(())
}

async fn update_item(
    services: &Arc<AppServices>,
    reference: String,
    sl_no: i64,
    desc: Option<String>,
    rate: Option<f64>,
    qty: Option<f64>,
) -> Result<(), Error> {
    let editor = editor(services, false);
    require_loaded(&editor, &reference).await;

    let Some(mut item) = editor.items().into_iter().find(|i| i.sl_no == Some(sl_no)) else {
        eprintln!(
            "{}",
            format!("No line item {} on quote {}", sl_no, reference).red()
        );
        std::process::exit(1);
    };
    if let Some(desc) = desc {
        item.item_desc = desc;
    }
    if let Some(rate) = rate {
        item.item_unit_rate = rate;
    }
    if let Some(qty) = qty {
        item.item_quantity = qty;
    }

    if editor.update_item(item).await.is_none() {
        std::process::exit(1);
    }

    print_loaded(&editor);
    Ok(())
}

async fn delete_item(
    services: &Arc<AppServices>,
    reference: String,
    sl_no: i64,
    yes: bool,
) -> Result<(), Error> {
    let editor = editor(services, yes);
    require_loaded(&editor, &reference).await;

    if !editor.remove_item(sl_no).await {
        std::process::exit(1);
    }

    print_loaded(&editor);
    Ok(())
}

/// Parses "DESC:RATE:QTY". The split runs right to left so descriptions may
/// contain colons.
fn parse_item(raw: &str) -> Result<DraftItem, Error> {
    let mut parts = raw.rsplitn(3, ':');
    let qty = parts.next();
    let rate = parts.next();
    let desc = parts.next();
    let (Some(desc), Some(rate), Some(qty)) = (desc, rate, qty) else {
        return Err(Error::InvalidInput(format!(
            "invalid item {:?}, expected \"DESC:RATE:QTY\"",
            raw
        )));
    };
    let rate: f64 = rate.trim().parse().map_err(|_| {
        Error::InvalidInput(format!("invalid rate {:?} in item {:?}", rate, raw))
    })?;
    let qty: f64 = qty.trim().parse().map_err(|_| {
        Error::InvalidInput(format!("invalid quantity {:?} in item {:?}", qty, raw))
    })?;
    Ok(DraftItem::new(desc.trim(), rate, qty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_spec_parses_desc_rate_and_qty() {
        let item = parse_item("Widget:10.5:2").unwrap();
        assert_eq!(item.item_desc, "Widget");
        assert_eq!(item.item_unit_rate, 10.5);
        assert_eq!(item.item_quantity, 2.0);
    }

    #[test]
    fn item_spec_allows_colons_in_the_description() {
        let item = parse_item("Cable: USB-C 2m:3:4").unwrap();
        assert_eq!(item.item_desc, "Cable: USB-C 2m");
        assert_eq!(item.item_unit_rate, 3.0);
        assert_eq!(item.item_quantity, 4.0);
    }

    #[test]
    fn malformed_item_specs_are_rejected() {
        assert!(parse_item("Widget:10").is_err());
        assert!(parse_item("Widget:abc:2").is_err());
        assert!(parse_item("Widget:10:lots").is_err());
    }
}
