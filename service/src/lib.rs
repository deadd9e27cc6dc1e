pub mod app_services;
pub mod auth_service;
pub mod bulk_deletion;
pub mod customer_store;
pub mod error;
pub mod feedback;
pub mod line_items;
pub mod quote_draft;
pub mod quote_editor;
pub mod quote_store;
pub mod validation;
pub mod view_model_service;
pub mod view_models;
