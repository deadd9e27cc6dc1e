pub mod customers;
pub mod quotes;
pub mod session;

use std::sync::Arc;

use service::{app_services::AppServices, error::Error, view_model_service::ViewModelService};

use crate::Commands;
use crate::feedback::{TerminalConfirmationPrompt, TerminalNotificationSink};

pub async fn dispatch(command: Commands, services: &Arc<AppServices>) -> Result<(), Error> {
    match command {
        Commands::Login { email, password } => session::login(services, &email, &password),
        Commands::Logout => session::logout(services),
        Commands::Whoami => {
            session::whoami(services);
            Ok(())
        }
        Commands::Customers { command } => {
            session::require_login(services);
            customers::dispatch(command, services).await
        }
        Commands::Quotes { command } => {
            session::require_login(services);
            quotes::dispatch(command, services).await
        }
    }
}

/// List service wired to terminal feedback. Confirmations come from stdin
/// unless `assume_yes` is set.
pub(crate) fn view_model_service(
    services: &Arc<AppServices>,
    assume_yes: bool,
) -> ViewModelService {
    ViewModelService::new(
        services.customer_store(),
        services.quote_store(),
        Arc::new(TerminalNotificationSink),
        Arc::new(TerminalConfirmationPrompt::new(assume_yes)),
    )
}
