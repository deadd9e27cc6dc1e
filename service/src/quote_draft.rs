//! Draft state for composing a new quote.
//!
//! [`QuoteDraft`] carries the same rules the creation form enforced: it
//! always holds at least one row, a new row may only follow a filled-in one,
//! and the derived values and totals are computed, never entered.
//! [`QuoteComposer`] turns a valid draft into a created quote.

use std::sync::Arc;
use std::time::Duration;

use api_client::models::{QuoteDetail, QuoteHeader};

use crate::error::Error;
use crate::feedback::{DEFAULT_DURATION, Notification, NotificationSink};
use crate::line_items;
use crate::quote_store::QuoteStore;

const SAVE_FAILED_DURATION: Duration = Duration::from_secs(4);

/// One editable row of a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftItem {
    pub item_desc: String,
    pub item_unit_rate: f64,
    pub item_quantity: f64,
}

impl Default for DraftItem {
    fn default() -> Self {
        Self {
            item_desc: String::new(),
            item_unit_rate: 0.0,
            item_quantity: 1.0,
        }
    }
}

impl DraftItem {
    pub fn new(item_desc: impl Into<String>, item_unit_rate: f64, item_quantity: f64) -> Self {
        Self {
            item_desc: item_desc.into(),
            item_unit_rate,
            item_quantity,
        }
    }

    pub fn value(&self) -> f64 {
        line_items::item_value(self.item_unit_rate, self.item_quantity)
    }

    fn is_valid(&self) -> bool {
        !self.item_desc.trim().is_empty()
            && self.item_unit_rate.is_finite()
            && self.item_unit_rate >= 0.0
            && self.item_quantity.is_finite()
            && self.item_quantity >= 1.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteDraft {
    pub customer_id: Option<i64>,
    pub quote_date: String,
    rows: Vec<DraftItem>,
}

impl QuoteDraft {
    /// A fresh draft starts with one empty row.
    pub fn new(customer_id: Option<i64>, quote_date: impl Into<String>) -> Self {
        Self {
            customer_id,
            quote_date: quote_date.into(),
            rows: vec![DraftItem::default()],
        }
    }

    pub fn rows(&self) -> &[DraftItem] {
        &self.rows
    }

    /// A row can be appended only once the last row has a description and a
    /// non-negative rate.
    pub fn can_add_row(&self) -> bool {
        match self.rows.last() {
            None => true,
            Some(last) => {
                !last.item_desc.trim().is_empty()
                    && last.item_unit_rate.is_finite()
                    && last.item_unit_rate >= 0.0
            }
        }
    }

    pub fn add_row(&mut self) -> bool {
        if !self.can_add_row() {
            return false;
        }
        self.rows.push(DraftItem::default());
        true
    }

    /// The final remaining row cannot be removed.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.rows.len() == 1 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    pub fn update_row(&mut self, index: usize, item: DraftItem) -> bool {
        match self.rows.get_mut(index) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn total_quantity(&self) -> f64 {
        self.rows.iter().map(|row| row.item_quantity.max(0.0)).sum()
    }

    pub fn total_value(&self) -> f64 {
        self.rows.iter().map(|row| row.value()).sum()
    }

    fn validate(&self) -> Result<(), Error> {
        if self.customer_id.is_none() {
            return Err(Error::InvalidInput("customer is required".to_string()));
        }
        if self.quote_date.trim().is_empty() {
            return Err(Error::InvalidInput("quote date is required".to_string()));
        }
        if self.rows.is_empty() || self.rows.iter().any(|row| !row.is_valid()) {
            return Err(Error::InvalidInput(
                "every line item needs a description, a non-negative rate and a quantity of at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Validates the draft and produces the creation payload with computed
    /// per-row values and totals.
    pub fn build(&self) -> Result<QuoteHeader, Error> {
        self.validate()?;
        let details = self
            .rows
            .iter()
            .map(|row| QuoteDetail {
                item_desc: row.item_desc.clone(),
                item_unit_rate: row.item_unit_rate,
                item_quantity: row.item_quantity,
                item_value: row.value(),
                ..Default::default()
            })
            .collect();
        Ok(QuoteHeader {
            customer_id: self.customer_id,
            quote_date: self.quote_date.clone(),
            total_quantity: Some(self.total_quantity()),
            total_value: Some(self.total_value()),
            quote_details: Some(details),
            ..Default::default()
        })
    }
}

/// Creates quotes from drafts and reports the outcome.
pub struct QuoteComposer {
    store: Arc<dyn QuoteStore>,
    notifications: Arc<dyn NotificationSink>,
}

impl QuoteComposer {
    pub fn new(store: Arc<dyn QuoteStore>, notifications: Arc<dyn NotificationSink>) -> Self {
        Self {
            store,
            notifications,
        }
    }

    /// Returns the saved quote (with its backend-assigned reference) or
    /// None after reporting what went wrong.
    pub async fn submit(&self, draft: &QuoteDraft) -> Option<QuoteHeader> {
        let quote = match draft.build() {
            Ok(quote) => quote,
            Err(error) => {
                tracing::debug!(error = %error, "quote draft rejected");
                self.notifications.notify(Notification::info(
                    "Please fill all required fields",
                    DEFAULT_DURATION,
                ));
                return None;
            }
        };

        match self.store.create_quote(&quote).await {
            Ok(saved) => {
                let quote_ref = saved.quote_ref.clone().unwrap_or_default();
                self.notifications.notify(Notification::info(
                    format!("Quote {} created successfully", quote_ref),
                    DEFAULT_DURATION,
                ));
                Some(saved)
            }
            Err(error) => {
                tracing::error!(error = %error, "saving quote failed");
                self.notifications.notify(Notification::info(
                    "Failed to save quote",
                    SAVE_FAILED_DURATION,
                ));
                None
            }
        }
    }
}
