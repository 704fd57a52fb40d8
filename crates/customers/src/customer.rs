use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{CustomerId, DomainError, DomainResult, Entity};

/// Postal address (value object).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// Customer record.
///
/// Sales hold a non-owning reference to customers by id; deleting a customer
/// leaves historical sales intact (they keep their name snapshot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub address: Address,
    pub mobile_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn create(input: NewCustomer, now: DateTime<Utc>) -> DomainResult<Self> {
        input.validate()?;
        Ok(Self {
            id: CustomerId::new(),
            name: input.name,
            address: input.address,
            mobile_number: input.mobile_number,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn validate_mobile(mobile: &str) -> DomainResult<()> {
    if mobile.len() != 10 || !mobile.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::validation(
            "mobile number must be exactly 10 digits",
        ));
    }
    Ok(())
}

/// Creation input for a customer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    #[serde(default)]
    pub address: Address,
    pub mobile_number: String,
}

impl NewCustomer {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        validate_mobile(&self.mobile_number)
    }
}

/// Partial-field update for a customer. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub address: Option<Address>,
    pub mobile_number: Option<String>,
}

impl CustomerPatch {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if let Some(mobile) = &self.mobile_number {
            validate_mobile(mobile)?;
        }
        Ok(())
    }

    pub fn apply_to(&self, customer: &mut Customer, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            customer.name = name.clone();
        }
        if let Some(address) = &self.address {
            customer.address = address.clone();
        }
        if let Some(mobile) = &self.mobile_number {
            customer.mobile_number = mobile.clone();
        }
        customer.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_customer(name: &str, mobile: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            address: Address {
                street: "12 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                postal_code: "62701".to_string(),
            },
            mobile_number: mobile.to_string(),
        }
    }

    #[test]
    fn create_validates_name_and_mobile() {
        let now = Utc::now();
        assert!(Customer::create(new_customer("Ada", "0123456789"), now).is_ok());
        assert!(Customer::create(new_customer("", "0123456789"), now).is_err());
        assert!(Customer::create(new_customer("Ada", "12345"), now).is_err());
        assert!(Customer::create(new_customer("Ada", "12345678ab"), now).is_err());
    }

    #[test]
    fn patch_updates_only_provided_fields() {
        let created = Utc::now();
        let mut customer = Customer::create(new_customer("Ada", "0123456789"), created).unwrap();

        let later = created + chrono::Duration::seconds(1);
        let patch = CustomerPatch {
            mobile_number: Some("9876543210".to_string()),
            ..CustomerPatch::default()
        };
        patch.validate().unwrap();
        patch.apply_to(&mut customer, later);

        assert_eq!(customer.name, "Ada");
        assert_eq!(customer.mobile_number, "9876543210");
        assert_eq!(customer.updated_at, later);
    }
}
