//! `stockbook-customers` — customer records and their persistence seam.

pub mod customer;
pub mod store;

pub use customer::{Address, Customer, CustomerPatch, NewCustomer};
pub use store::{CustomerStore, InMemoryCustomerStore};
