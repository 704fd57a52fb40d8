//! `stockbook-inventory` — inventory items and their persistence seam.

pub mod item;
pub mod store;

pub use item::{InventoryItem, ItemPatch, NewItem};
pub use store::{InMemoryItemStore, ItemStore};
