//! Request DTOs and domain-to-JSON mapping helpers.
//!
//! Wire field names are camelCase (e.g. `itemId`, `mobileNumber`, `pinCode`);
//! the mappers below translate between that and the snake_case domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use stockbook_customers::{Address, Customer, CustomerPatch, NewCustomer};
use stockbook_inventory::{InventoryItem, ItemPatch, NewItem};
use stockbook_reports::{InventoryValuation, MonthlySalesBucket, TopSellingItem};
use stockbook_sales::{LedgerEntry, PaymentType, Sale};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i64,
    pub price: i64,
}

impl AddItemRequest {
    pub fn into_new_item(self) -> NewItem {
        NewItem {
            name: self.name,
            description: self.description,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<i64>,
}

impl UpdateItemRequest {
    pub fn into_patch(self) -> ItemPatch {
        ItemPatch {
            name: self.name,
            description: self.description,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddressDto {
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "pinCode")]
    pub pin_code: String,
}

impl AddressDto {
    pub fn into_address(self) -> Address {
        Address {
            street: self.street,
            city: self.city,
            state: self.state,
            postal_code: self.pin_code,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub address: AddressDto,
    #[serde(rename = "mobileNumber")]
    pub mobile_number: String,
}

impl CreateCustomerRequest {
    pub fn into_new_customer(self) -> NewCustomer {
        NewCustomer {
            name: self.name,
            address: self.address.into_address(),
            mobile_number: self.mobile_number,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub address: Option<AddressDto>,
    #[serde(rename = "mobileNumber")]
    pub mobile_number: Option<String>,
}

impl UpdateCustomerRequest {
    pub fn into_patch(self) -> CustomerPatch {
        CustomerPatch {
            name: self.name,
            address: self.address.map(AddressDto::into_address),
            mobile_number: self.mobile_number,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SaleLineRequest {
    #[serde(rename = "itemId")]
    pub item_id: String,
    pub name: String,
    pub quantity: i64,
    pub price: i64,
    pub total: i64,
}

#[derive(Debug, Deserialize)]
pub struct SaleRequest {
    pub items: Vec<SaleLineRequest>,
    #[serde(rename = "customerId")]
    pub customer_id: Option<String>,
    #[serde(rename = "paymentType")]
    pub payment_type: Option<PaymentType>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct SalesReportQuery {
    #[serde(rename = "startDate")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end_date: DateTime<Utc>,
}

// -------------------------
// Response mapping
// -------------------------

pub fn item_to_json(item: &InventoryItem) -> serde_json::Value {
    json!({
        "id": item.id.to_string(),
        "name": item.name,
        "description": item.description,
        "quantity": item.quantity,
        "price": item.price,
        "createdAt": item.created_at,
        "updatedAt": item.updated_at,
    })
}

pub fn customer_to_json(customer: &Customer) -> serde_json::Value {
    json!({
        "id": customer.id.to_string(),
        "name": customer.name,
        "address": {
            "street": customer.address.street,
            "city": customer.address.city,
            "state": customer.address.state,
            "pinCode": customer.address.postal_code,
        },
        "mobileNumber": customer.mobile_number,
        "createdAt": customer.created_at,
        "updatedAt": customer.updated_at,
    })
}

pub fn sale_to_json(sale: &Sale) -> serde_json::Value {
    json!({
        "id": sale.id.to_string(),
        "items": sale.items.iter().map(|line| json!({
            "itemId": line.item_id.to_string(),
            "name": line.name,
            "quantity": line.quantity,
            "price": line.price,
            "total": line.total,
        })).collect::<Vec<_>>(),
        "customerId": sale.customer_id.map(|id| id.to_string()),
        "customerName": sale.customer_name,
        "total": sale.total,
        "paymentType": sale.payment_type,
        "date": sale.date,
        "createdAt": sale.created_at,
        "updatedAt": sale.updated_at,
    })
}

pub fn ledger_entry_to_json(entry: &LedgerEntry) -> serde_json::Value {
    json!({
        "id": entry.id,
        "date": entry.date,
        "type": entry.kind,
        "amount": entry.amount,
        "description": entry.description,
        "balance": entry.balance,
    })
}

pub fn monthly_bucket_to_json(bucket: &MonthlySalesBucket) -> serde_json::Value {
    json!({
        "month": bucket.month,
        "total": bucket.total,
    })
}

pub fn top_item_to_json(item: &TopSellingItem) -> serde_json::Value {
    json!({
        "itemId": item.item_id.to_string(),
        "name": item.name,
        "total": item.total,
    })
}

pub fn valuation_to_json(valuation: &InventoryValuation) -> serde_json::Value {
    json!({
        "items": valuation.items.iter().map(|row| json!({
            "itemId": row.item_id.to_string(),
            "name": row.name,
            "quantity": row.quantity,
            "value": row.value,
        })).collect::<Vec<_>>(),
        "totalValue": valuation.total_value,
        "itemCount": valuation.item_count,
        "lowStockCount": valuation.low_stock_count,
    })
}
