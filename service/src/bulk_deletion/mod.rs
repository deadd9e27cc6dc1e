pub mod coordinator;
pub mod model;

pub use coordinator::{BulkDeleteReport, BulkDeletionCoordinator, SelectedCustomer};
pub use model::{BulkDeleteSummary, DeletionErrorKind, DeletionOutcome, DeletionStatus};
