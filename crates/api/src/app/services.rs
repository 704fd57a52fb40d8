//! Service wiring: in-memory stores, the sale ledger engine, the report
//! projector, and the auth pieces every handler shares.

use std::sync::Arc;

use stockbook_auth::{AdminCredentials, Hs256TokenCodec};
use stockbook_customers::InMemoryCustomerStore;
use stockbook_inventory::InMemoryItemStore;
use stockbook_reports::ReportProjector;
use stockbook_sales::{InMemorySaleStore, SaleLedgerEngine};

use crate::config::AppConfig;

pub type SharedItemStore = Arc<InMemoryItemStore>;
pub type SharedCustomerStore = Arc<InMemoryCustomerStore>;
pub type SharedSaleStore = Arc<InMemorySaleStore>;

pub struct AppServices {
    pub items: SharedItemStore,
    pub customers: SharedCustomerStore,
    pub engine: SaleLedgerEngine<SharedItemStore, SharedCustomerStore, SharedSaleStore>,
    pub reports: ReportProjector<SharedItemStore, SharedSaleStore>,
    pub credentials: AdminCredentials,
    pub tokens: Arc<Hs256TokenCodec>,
}

pub fn build_services(config: &AppConfig) -> AppServices {
    let items: SharedItemStore = Arc::new(InMemoryItemStore::new());
    let customers: SharedCustomerStore = Arc::new(InMemoryCustomerStore::new());
    let sales: SharedSaleStore = Arc::new(InMemorySaleStore::new());

    // The engine is the only writer of sales and of stock quantities on
    // behalf of sales; handlers never touch the sale store directly.
    let engine = SaleLedgerEngine::new(items.clone(), customers.clone(), sales.clone());
    let reports = ReportProjector::new(items.clone(), sales.clone());

    AppServices {
        items,
        customers,
        engine,
        reports,
        credentials: AdminCredentials::new(&config.admin_email, &config.admin_password),
        tokens: Arc::new(Hs256TokenCodec::new(config.jwt_secret.as_bytes())),
    }
}
