//! `stockbook-reports` — read-side aggregation over items and sales.
//!
//! Everything here is stateless and recomputed from scratch on each request;
//! nothing is cached or incrementally maintained.

pub mod projector;

pub use projector::{
    InventoryValuation, ItemValuation, MonthlySalesBucket, ReportProjector, TopSellingItem,
};
