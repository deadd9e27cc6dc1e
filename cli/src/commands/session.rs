use std::sync::Arc;

use colored::Colorize;
use service::{app_services::AppServices, error::Error};

pub fn login(services: &Arc<AppServices>, email: &str, password: &str) -> Result<(), Error> {
    if services.auth().login(email, password)? {
        println!("{}", "Logged in".green());
        Ok(())
    } else {
        eprintln!("{}", "Invalid credentials".red());
        std::process::exit(1);
    }
}

pub fn logout(services: &Arc<AppServices>) -> Result<(), Error> {
    services.auth().logout()?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(services: &Arc<AppServices>) {
    if services.auth().is_authenticated() {
        println!("Logged in");
    } else {
        println!("Not logged in");
    }
}

/// Customer and quote commands need an active session.
pub fn require_login(services: &Arc<AppServices>) {
    if !services.auth().is_authenticated() {
        eprintln!("{}", "Please login first".yellow());
        std::process::exit(1);
    }
}
