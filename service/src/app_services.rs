use std::sync::{Arc, OnceLock};

use api_client::client_manager::ApiClientManager;

use crate::{
    auth_service::AuthService,
    customer_store::HttpCustomerStore,
    quote_store::HttpQuoteStore,
    view_models::Settings,
};

/// Builds the shared service container for the given settings.
pub fn create_app_services(settings: Settings) -> Arc<AppServices> {
    let settings = Arc::new(settings);
    let api = Arc::new(ApiClientManager::new(settings.api_base_url.clone()));
    Arc::new(AppServices::new(api, settings))
}

/// Lazily created, shared service instances.
pub struct AppServices {
    customer_store: OnceLock<Arc<HttpCustomerStore>>,
    quote_store: OnceLock<Arc<HttpQuoteStore>>,
    auth: OnceLock<Arc<AuthService>>,
    api: Arc<ApiClientManager>,
    settings: Arc<Settings>,
}

impl AppServices {
    pub fn new(api: Arc<ApiClientManager>, settings: Arc<Settings>) -> Self {
        Self {
            customer_store: OnceLock::new(),
            quote_store: OnceLock::new(),
            auth: OnceLock::new(),
            api,
            settings,
        }
    }

    pub fn customer_store(&self) -> Arc<HttpCustomerStore> {
        self.customer_store
            .get_or_init(|| Arc::new(HttpCustomerStore::new(Arc::clone(&self.api))))
            .clone()
    }

    pub fn quote_store(&self) -> Arc<HttpQuoteStore> {
        self.quote_store
            .get_or_init(|| Arc::new(HttpQuoteStore::new(Arc::clone(&self.api))))
            .clone()
    }

    pub fn auth(&self) -> Arc<AuthService> {
        self.auth.get_or_init(|| Arc::new(AuthService::new())).clone()
    }

    pub fn settings(&self) -> Arc<Settings> {
        Arc::clone(&self.settings)
    }
}
