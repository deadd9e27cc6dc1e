//! Fan-out/fan-in deletion of the selected customers.
//!
//! One request per selected record, a join barrier that waits for every
//! request, a single summary notification, then a best-effort reload of the
//! list after a short settle delay. Individual failures are captured as
//! values and never abort the batch.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use api_client::models::Customer;
use futures::FutureExt;
use futures::future::join_all;

use crate::customer_store::CustomerStore;
use crate::feedback::{
    BRIEF_DURATION, ConfirmationPrompt, DEFAULT_DURATION, Notification, NotificationSink,
};

use super::model::{BulkDeleteSummary, DeletionErrorKind, DeletionOutcome};

/// Delay between the summary and the list reload, giving the backend time to
/// settle before the list is fetched again.
const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Row selected for deletion, resolved to id and display name.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedCustomer {
    pub id: i64,
    pub name: String,
}

impl SelectedCustomer {
    /// Unsaved customers have no id and cannot be selected.
    pub fn from_customer(customer: &Customer) -> Option<Self> {
        customer.customer_id.map(|id| Self {
            id,
            name: customer.name.clone(),
        })
    }
}

/// What a bulk delete invocation did.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkDeleteReport {
    /// Nothing selected; reported to the user, nothing attempted.
    NoSelection,
    /// User declined the confirmation; nothing attempted, selection kept.
    Cancelled,
    /// An earlier invocation was still running; nothing attempted.
    Busy,
    /// The fan-in step itself failed; list and selection untouched.
    Failed,
    Completed {
        /// One outcome per selected customer, in selection order.
        outcomes: Vec<DeletionOutcome>,
        /// The reloaded list, when the reload succeeded.
        refreshed: Option<Vec<Customer>>,
    },
}

/// Coordinates bulk deletion for one customer list view. Create one per
/// view; selection state and the deleting flag are per-instance.
pub struct BulkDeletionCoordinator {
    store: Arc<dyn CustomerStore>,
    notifications: Arc<dyn NotificationSink>,
    confirmation: Arc<dyn ConfirmationPrompt>,
    selection: Mutex<Vec<SelectedCustomer>>,
    deleting: AtomicBool,
    busy: AtomicBool,
    settle_delay: Duration,
}

impl BulkDeletionCoordinator {
    pub fn new(
        store: Arc<dyn CustomerStore>,
        notifications: Arc<dyn NotificationSink>,
        confirmation: Arc<dyn ConfirmationPrompt>,
    ) -> Self {
        Self::with_settle_delay(store, notifications, confirmation, SETTLE_DELAY)
    }

    /// Like [`BulkDeletionCoordinator::new`] with an explicit settle delay,
    /// so tests do not have to wait for the default.
    pub fn with_settle_delay(
        store: Arc<dyn CustomerStore>,
        notifications: Arc<dyn NotificationSink>,
        confirmation: Arc<dyn ConfirmationPrompt>,
        settle_delay: Duration,
    ) -> Self {
        Self {
            store,
            notifications,
            confirmation,
            selection: Mutex::new(Vec::new()),
            deleting: AtomicBool::new(false),
            busy: AtomicBool::new(false),
            settle_delay,
        }
    }

    /// Adds a customer to the selection. Returns false for records without
    /// an id and for ids already selected; first-selection order is kept.
    pub fn select(&self, customer: &Customer) -> bool {
        let Some(selected) = SelectedCustomer::from_customer(customer) else {
            return false;
        };
        let mut selection = self.selection.lock().unwrap();
        if selection.iter().any(|s| s.id == selected.id) {
            return false;
        }
        selection.push(selected);
        true
    }

    pub fn deselect(&self, id: i64) -> bool {
        let mut selection = self.selection.lock().unwrap();
        let before = selection.len();
        selection.retain(|s| s.id != id);
        selection.len() < before
    }

    pub fn selected(&self) -> Vec<SelectedCustomer> {
        self.selection.lock().unwrap().clone()
    }

    pub fn selection_count(&self) -> usize {
        self.selection.lock().unwrap().len()
    }

    pub fn clear_selection(&self) {
        self.selection.lock().unwrap().clear();
    }

    /// True while deletion requests are in flight. Frontends disable the
    /// delete control on this.
    pub fn is_deleting(&self) -> bool {
        self.deleting.load(Ordering::SeqCst)
    }

    /// Deletes every selected customer and reports a single summary. An
    /// invocation overlapping an unfinished one is rejected outright rather
    /// than queued, so a second confirmation can never race the reload.
    pub async fn delete_selected(&self) -> BulkDeleteReport {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!("bulk delete already in progress, ignoring request");
            return BulkDeleteReport::Busy;
        }
        let _busy = ClearOnDrop(&self.busy);

        let selected = self.selected();
        if selected.is_empty() {
            self.notifications
                .notify(Notification::info("No customers selected", BRIEF_DURATION));
            return BulkDeleteReport::NoSelection;
        }

        let prompt = format!(
            "Are you sure you want to delete {} customer(s)?",
            selected.len()
        );
        if !self.confirmation.confirm(&prompt) {
            return BulkDeleteReport::Cancelled;
        }

        tracing::info!(count = selected.len(), "bulk customer delete started");
        self.deleting.store(true, Ordering::SeqCst);
        let joined = {
            let _deleting = ClearOnDrop(&self.deleting);
            let deletions = selected.iter().map(|customer| self.delete_one(customer));
            AssertUnwindSafe(join_all(deletions)).catch_unwind().await
        };

        let outcomes = match joined {
            Ok(outcomes) => outcomes,
            Err(_) => {
                tracing::error!("bulk delete aggregation failed");
                self.notifications.notify(Notification::info(
                    "Delete operation failed",
                    DEFAULT_DURATION,
                ));
                return BulkDeleteReport::Failed;
            }
        };

        let summary = BulkDeleteSummary::from_outcomes(&outcomes);
        self.notifications.notify(summary.notification());
        self.clear_selection();

        let refreshed = self.reload_after_delay().await;
        tracing::info!(
            deleted = summary.success_count,
            failed = summary.failure_count(),
            "bulk customer delete finished"
        );
        BulkDeleteReport::Completed {
            outcomes,
            refreshed,
        }
    }

    /// Maps every failure into an outcome value so the join never
    /// short-circuits.
    async fn delete_one(&self, customer: &SelectedCustomer) -> DeletionOutcome {
        match self.store.delete_customer(customer.id).await {
            Ok(()) => DeletionOutcome::deleted(customer.id, customer.name.clone()),
            Err(error) => {
                let kind = DeletionErrorKind::classify(&error);
                tracing::warn!(
                    customer_id = customer.id,
                    customer_name = %customer.name,
                    error = %error,
                    "customer deletion failed"
                );
                DeletionOutcome::failed(customer.id, customer.name.clone(), kind, error.to_string())
            }
        }
    }

    /// Best effort: a reload failure is reported on its own and never
    /// overwrites the summary.
    async fn reload_after_delay(&self) -> Option<Vec<Customer>> {
        tokio::time::sleep(self.settle_delay).await;
        match self.store.get_customers().await {
            Ok(customers) => Some(customers),
            Err(error) => {
                tracing::error!(error = %error, "failed to reload customers after delete");
                self.notifications.notify(Notification::info(
                    "Failed to load customers",
                    DEFAULT_DURATION,
                ));
                None
            }
        }
    }
}

/// Resets a flag on every exit path, panics included.
struct ClearOnDrop<'a>(&'a AtomicBool);

impl Drop for ClearOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
