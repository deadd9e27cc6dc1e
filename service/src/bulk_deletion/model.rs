use crate::error::Error;
use crate::feedback::{DEFAULT_DURATION, Notification, PROLONGED_DURATION, WARNING_DURATION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionErrorKind {
    /// The backend refused because dependent quotes still reference the
    /// customer.
    ForeignKeyConstraint,
    Other,
}

impl DeletionErrorKind {
    pub fn classify(error: &Error) -> Self {
        match error {
            Error::ForeignKeyConstraint(_) => DeletionErrorKind::ForeignKeyConstraint,
            _ => DeletionErrorKind::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeletionStatus {
    Deleted,
    Failed {
        kind: DeletionErrorKind,
        message: String,
    },
}

/// Outcome of one deletion attempt within a batch. Transient, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletionOutcome {
    pub customer_id: i64,
    pub customer_name: String,
    pub status: DeletionStatus,
}

impl DeletionOutcome {
    pub fn deleted(customer_id: i64, customer_name: impl Into<String>) -> Self {
        Self {
            customer_id,
            customer_name: customer_name.into(),
            status: DeletionStatus::Deleted,
        }
    }

    pub fn failed(
        customer_id: i64,
        customer_name: impl Into<String>,
        kind: DeletionErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            customer_id,
            customer_name: customer_name.into(),
            status: DeletionStatus::Failed {
                kind,
                message: message.into(),
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, DeletionStatus::Failed { .. })
    }

    pub fn failure_kind(&self) -> Option<DeletionErrorKind> {
        match &self.status {
            DeletionStatus::Failed { kind, .. } => Some(*kind),
            DeletionStatus::Deleted => None,
        }
    }
}

/// Batch totals derived from the outcomes, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkDeleteSummary {
    pub success_count: usize,
    /// Display names of customers blocked by dependent quotes.
    pub blocked_names: Vec<String>,
    pub other_failure_count: usize,
}

impl BulkDeleteSummary {
    pub fn from_outcomes(outcomes: &[DeletionOutcome]) -> Self {
        let mut success_count = 0;
        let mut blocked_names = Vec::new();
        let mut other_failure_count = 0;
        for outcome in outcomes {
            match &outcome.status {
                DeletionStatus::Deleted => success_count += 1,
                DeletionStatus::Failed {
                    kind: DeletionErrorKind::ForeignKeyConstraint,
                    ..
                } => blocked_names.push(outcome.customer_name.clone()),
                DeletionStatus::Failed {
                    kind: DeletionErrorKind::Other,
                    ..
                } => other_failure_count += 1,
            }
        }
        Self {
            success_count,
            blocked_names,
            other_failure_count,
        }
    }

    pub fn failure_count(&self) -> usize {
        self.blocked_names.len() + self.other_failure_count
    }

    /// The single summary message for the batch. The four forms are
    /// disjoint: no failures, only constraint failures, a mix, and only
    /// other failures.
    pub fn notification(&self) -> Notification {
        let blocked = self.blocked_names.len();
        if self.failure_count() == 0 {
            Notification::info(
                format!("Successfully deleted {} customer(s)", self.success_count),
                DEFAULT_DURATION,
            )
        } else if blocked > 0 && self.other_failure_count == 0 {
            Notification::warning(
                format!(
                    "Cannot delete {} customer(s) ({}) - they have existing quotes. Delete their quotes first.",
                    blocked,
                    self.blocked_names.join(", ")
                ),
                WARNING_DURATION,
            )
        } else if blocked > 0 {
            Notification::warning(
                format!(
                    "Deleted {} customer(s). {} cannot be deleted (have quotes), {} failed with errors.",
                    self.success_count, blocked, self.other_failure_count
                ),
                WARNING_DURATION,
            )
        } else {
            Notification::info(
                format!(
                    "Deleted {} customer(s), {} failed. Check logs for details.",
                    self.success_count,
                    self.failure_count()
                ),
                PROLONGED_DURATION,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::NotificationClass;

    fn failed_fk(id: i64, name: &str) -> DeletionOutcome {
        DeletionOutcome::failed(
            id,
            name,
            DeletionErrorKind::ForeignKeyConstraint,
            "has quotes",
        )
    }

    fn failed_other(id: i64, name: &str) -> DeletionOutcome {
        DeletionOutcome::failed(id, name, DeletionErrorKind::Other, "timeout")
    }

    #[test]
    fn classify_maps_foreign_key_errors_and_everything_else() {
        let fk = Error::ForeignKeyConstraint("has quotes".to_string());
        assert_eq!(
            DeletionErrorKind::classify(&fk),
            DeletionErrorKind::ForeignKeyConstraint
        );

        for error in [
            Error::NetworkError("timeout".to_string()),
            Error::ApiError("500".to_string()),
            Error::NotFound("gone".to_string()),
        ] {
            assert_eq!(DeletionErrorKind::classify(&error), DeletionErrorKind::Other);
        }
    }

    #[test]
    fn all_successes_report_the_count() {
        let outcomes = vec![
            DeletionOutcome::deleted(1, "Acme"),
            DeletionOutcome::deleted(2, "Globex"),
        ];
        let summary = BulkDeleteSummary::from_outcomes(&outcomes);
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.failure_count(), 0);

        let notification = summary.notification();
        assert_eq!(notification.message, "Successfully deleted 2 customer(s)");
        assert_eq!(notification.class, NotificationClass::Info);
        assert_eq!(notification.duration, DEFAULT_DURATION);
    }

    #[test]
    fn constraint_only_failures_name_the_customers_in_input_order() {
        let outcomes = vec![failed_fk(1, "Acme"), failed_fk(2, "Globex")];
        let summary = BulkDeleteSummary::from_outcomes(&outcomes);
        assert_eq!(summary.success_count, 0);
        assert_eq!(summary.blocked_names, vec!["Acme", "Globex"]);

        let notification = summary.notification();
        assert_eq!(
            notification.message,
            "Cannot delete 2 customer(s) (Acme, Globex) - they have existing quotes. Delete their quotes first."
        );
        assert_eq!(notification.class, NotificationClass::Warning);
        assert_eq!(notification.duration, WARNING_DURATION);
    }

    #[test]
    fn mixed_failures_report_all_three_counts() {
        let outcomes = vec![
            DeletionOutcome::deleted(1, "Acme"),
            failed_fk(2, "Globex"),
            failed_other(3, "Initech"),
        ];
        let summary = BulkDeleteSummary::from_outcomes(&outcomes);

        let notification = summary.notification();
        assert_eq!(
            notification.message,
            "Deleted 1 customer(s). 1 cannot be deleted (have quotes), 1 failed with errors."
        );
        assert_eq!(notification.class, NotificationClass::Warning);
    }

    #[test]
    fn other_only_failures_point_to_the_log() {
        let outcomes = vec![DeletionOutcome::deleted(1, "Acme"), failed_other(2, "Globex")];
        let summary = BulkDeleteSummary::from_outcomes(&outcomes);

        let notification = summary.notification();
        assert_eq!(
            notification.message,
            "Deleted 1 customer(s), 1 failed. Check logs for details."
        );
        assert_eq!(notification.class, NotificationClass::Info);
        assert_eq!(notification.duration, PROLONGED_DURATION);
    }
}
