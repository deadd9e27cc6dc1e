use std::sync::Arc;

use api_client::models::Customer;
use clap::{Args, Subcommand};
use colored::Colorize;
use service::{
    app_services::AppServices,
    bulk_deletion::{BulkDeleteReport, BulkDeletionCoordinator},
    customer_store::CustomerStore,
    error::Error,
    view_models::CustomerListModel,
};

use crate::feedback::{TerminalConfirmationPrompt, TerminalNotificationSink};
use crate::table;

#[derive(Subcommand)]
pub enum CustomerCommands {
    /// List all customers
    List,
    /// Create a customer
    Add {
        /// Customer name
        #[arg(long)]
        name: String,
        #[command(flatten)]
        details: CustomerDetailArgs,
    },
    /// Update fields of an existing customer
    Edit {
        /// Customer id
        id: i64,
        /// New customer name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        details: CustomerDetailArgs,
    },
    /// Delete one or more customers
    Delete {
        /// Ids of the customers to delete
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct CustomerDetailArgs {
    /// Street address, first line
    #[arg(long)]
    address1: Option<String>,
    /// Street address, second line
    #[arg(long)]
    address2: Option<String>,
    #[arg(long)]
    city: Option<String>,
    /// State or province
    #[arg(long)]
    state_province: Option<String>,
    #[arg(long)]
    country: Option<String>,
    /// Phone number
    #[arg(long)]
    contact_number: Option<String>,
    /// Email address
    #[arg(long)]
    email_id: Option<String>,
    /// Website
    #[arg(long)]
    web_url: Option<String>,
}

impl CustomerDetailArgs {
    fn apply(self, customer: &mut Customer) {
        if let Some(address1) = self.address1 {
            customer.address1 = address1;
        }
        if let Some(address2) = self.address2 {
            customer.address2 = address2;
        }
        if let Some(city) = self.city {
            customer.city = city;
        }
        if let Some(state_province) = self.state_province {
            customer.state_province = state_province;
        }
        if let Some(country) = self.country {
            customer.country = country;
        }
        if let Some(contact_number) = self.contact_number {
            customer.contact_number = contact_number;
        }
        if let Some(email_id) = self.email_id {
            customer.email_id = email_id;
        }
        if let Some(web_url) = self.web_url {
            customer.web_url = web_url;
        }
    }
}

pub async fn dispatch(command: CustomerCommands, services: &Arc<AppServices>) -> Result<(), Error> {
    match command {
        CustomerCommands::List => list(services).await,
        CustomerCommands::Add { name, details } => add(services, name, details).await,
        CustomerCommands::Edit { id, name, details } => edit(services, id, name, details).await,
        CustomerCommands::Delete { ids, yes } => delete(services, ids, yes).await,
    }
}

async fn list(services: &Arc<AppServices>) -> Result<(), Error> {
    let models = super::view_model_service(services, false)
        .customer_list_models()
        .await?;
    print!("{}", table::customers_table(&models));
    println!("{} customer(s)", models.len());
    Ok(())
}

async fn add(
    services: &Arc<AppServices>,
    name: String,
    details: CustomerDetailArgs,
) -> Result<(), Error> {
    let mut customer = Customer {
        name,
        ..Default::default()
    };
    details.apply(&mut customer);

    match services.customer_store().create_customer(&customer).await {
        Ok(created) => {
            let id = table::opt_id(created.customer_id);
            println!("{}", format!("Customer created with id {}", id).green());
            Ok(())
        }
        Err(Error::InvalidInput(message)) => {
            eprintln!("{}", "Please fill in all required fields correctly.".red());
            eprintln!("{}", message);
            std::process::exit(1);
        }
        Err(error) => {
            tracing::error!(error = %error, "creating customer failed");
            eprintln!("{}", "Failed to add customer. Please try again.".red());
            std::process::exit(1);
        }
    }
}

async fn edit(
    services: &Arc<AppServices>,
    id: i64,
    name: Option<String>,
    details: CustomerDetailArgs,
) -> Result<(), Error> {
    let store = services.customer_store();
    let mut customer = match store.get_customer(id).await {
        Ok(customer) => customer,
        Err(error) => {
            tracing::error!(customer_id = id, error = %error, "loading customer failed");
            eprintln!("{}", "Failed to load customer details".red());
            std::process::exit(1);
        }
    };
    if let Some(name) = name {
        customer.name = name;
    }
    details.apply(&mut customer);

    match store.update_customer(id, &customer).await {
        Ok(_) => {
            println!("{}", "Customer updated successfully".green());
            Ok(())
        }
        Err(Error::InvalidInput(message)) => {
            eprintln!("{}", "Please fill in all required fields correctly".red());
            eprintln!("{}", message);
            std::process::exit(1);
        }
        Err(error) => {
            tracing::error!(customer_id = id, error = %error, "updating customer failed");
            eprintln!("{}", "Failed to update customer".red());
            std::process::exit(1);
        }
    }
}

async fn delete(services: &Arc<AppServices>, ids: Vec<i64>, yes: bool) -> Result<(), Error> {
    let store = services.customer_store();
    let customers = match store.get_customers().await {
        Ok(customers) => customers,
        Err(error) => {
            tracing::error!(error = %error, "loading customers failed");
            eprintln!("{}", "Failed to load customers".red());
            std::process::exit(1);
        }
    };

    let coordinator = BulkDeletionCoordinator::new(
        store,
        Arc::new(TerminalNotificationSink),
        Arc::new(TerminalConfirmationPrompt::new(yes)),
    );
    for id in ids {
        match customers.iter().find(|c| c.customer_id == Some(id)) {
            Some(customer) => {
                coordinator.select(customer);
            }
            None => println!("{}", format!("No customer with id {}; skipping", id).yellow()),
        }
    }

    match coordinator.delete_selected().await {
        BulkDeleteReport::Completed {
            outcomes,
            refreshed,
        } => {
            if let Some(customers) = refreshed {
                let models: Vec<CustomerListModel> =
                    customers.iter().map(CustomerListModel::from).collect();
                print!("{}", table::customers_table(&models));
                println!("{} customer(s) remaining", models.len());
            }
            if outcomes.iter().any(|outcome| outcome.is_failure()) {
                std::process::exit(1);
            }
            Ok(())
        }
        BulkDeleteReport::NoSelection | BulkDeleteReport::Cancelled => Ok(()),
        BulkDeleteReport::Busy | BulkDeleteReport::Failed => std::process::exit(1),
    }
}
