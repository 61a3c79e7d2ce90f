use chrono::{DateTime, Utc};
use crm_core_api::domain::{
    deserialize_close_type, serialize_close_type, Category, CloseType, Entry, EntryOwner,
    EntryStatus, HistoryEntry, Product,
};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::entry::history::History;
use crate::models::identifiable::Identifiable;
use crate::models::owned::Owned;

/// Fixed width of mobile and alternate numbers
pub const PHONE_NUMBER_LEN: usize = 10;

pub type PhoneNumber = HeaplessString<PHONE_NUMBER_LEN>;

const ADDRESS_MIN_LEN: usize = 5;
const ADDRESS_MAX_LEN: usize = 200;

/// Database model for a customer entry
///
/// `validate()` is the store-level schema check every write runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_close_state"))]
pub struct EntryModel {
    pub id: Uuid,

    pub customer_name: String,
    pub contact_name: String,

    #[validate(custom(function = "validate_phone_number"))]
    pub mobile_number: PhoneNumber,
    #[validate(custom(function = "validate_phone_number"))]
    pub alternate_number: PhoneNumber,

    /// Stored trimmed and lower-cased
    pub email: String,

    #[validate(custom(function = "validate_address"))]
    pub address: String,

    #[validate(length(max = 100, message = "Organization cannot exceed 100 characters"))]
    pub organization: String,

    pub city: String,
    pub state: String,

    pub product: Product,
    pub category: Category,
    pub status: EntryStatus,

    /// Set exactly when `status` is `Closed`
    #[serde(serialize_with = "serialize_close_type", deserialize_with = "deserialize_close_type")]
    pub close_type: Option<CloseType>,
    pub close_amount: Option<Decimal>,
    pub estimated_value: Option<Decimal>,

    #[validate(length(max = 500, message = "Remarks cannot exceed 500 characters"))]
    pub remarks: String,

    pub history: History,

    /// References UserModel.id of the creator
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for EntryModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Owned for EntryModel {
    fn get_owner_id(&self) -> Uuid {
        self.created_by
    }
}

impl EntryModel {
    /// Caller-facing view of this entry, with the owner resolved by the caller
    pub fn to_entry(&self, created_by: EntryOwner) -> Entry {
        Entry {
            id: self.id,
            customer_name: self.customer_name.clone(),
            contact_name: self.contact_name.clone(),
            mobile_number: self.mobile_number.to_string(),
            alternate_number: self.alternate_number.to_string(),
            email: self.email.clone(),
            address: self.address.clone(),
            state: self.state.clone(),
            city: self.city.clone(),
            product: self.product,
            organization: self.organization.clone(),
            category: self.category,
            status: self.status,
            close_type: self.close_type,
            close_amount: self.close_amount,
            estimated_value: self.estimated_value,
            remarks: self.remarks.clone(),
            history: self.history.iter().map(HistoryEntry::from).collect(),
            created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn phone_number_error() -> ValidationError {
    ValidationError::new("phone_number")
        .with_message(Cow::from("Mobile number must be exactly 10 digits"))
}

/// Empty, or exactly ten ASCII digits
fn validate_phone_number(value: &PhoneNumber) -> Result<(), ValidationError> {
    if value.is_empty()
        || (value.len() == PHONE_NUMBER_LEN && value.bytes().all(|b| b.is_ascii_digit()))
    {
        Ok(())
    } else {
        Err(phone_number_error())
    }
}

fn validate_address(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < ADDRESS_MIN_LEN {
        Err(ValidationError::new("length")
            .with_message(Cow::from("Address must be at least 5 characters")))
    } else if len > ADDRESS_MAX_LEN {
        Err(ValidationError::new("length")
            .with_message(Cow::from("Address cannot exceed 200 characters")))
    } else {
        Ok(())
    }
}

fn validate_close_state(entry: &EntryModel) -> Result<(), ValidationError> {
    if entry.status.is_closed() {
        if entry.close_type.is_none() {
            return Err(ValidationError::new("close_type").with_message(Cow::from(
                "A closed entry must be either 'Closed Won' or 'Closed Lost'",
            )));
        }
        if entry.close_amount.is_some_and(|amount| amount.is_sign_negative() && !amount.is_zero()) {
            return Err(ValidationError::new("close_amount")
                .with_message(Cow::from("Close amount cannot be negative")));
        }
    } else if entry.close_type.is_some() || entry.close_amount.is_some() {
        return Err(ValidationError::new("close_type").with_message(Cow::from(
            "Only closed entries can carry a close type or close amount",
        )));
    }
    Ok(())
}

/// Converts text into a fixed-width phone number.
///
/// Input that cannot fit is reported the same way the schema check reports a
/// malformed number.
pub fn parse_phone_number(field: &'static str, value: &str) -> Result<PhoneNumber, ValidationErrors> {
    PhoneNumber::from_str(value).map_err(|_| {
        let mut errors = ValidationErrors::new();
        errors.add(field, phone_number_error());
        errors
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entry::history::HistoryEntryModel;
    use crate::utils::validation_messages;

    fn sample_entry() -> EntryModel {
        let now = Utc::now();
        EntryModel {
            id: Uuid::new_v4(),
            customer_name: "Acme Corp".to_string(),
            contact_name: "".to_string(),
            mobile_number: PhoneNumber::try_from("9876543210").unwrap(),
            alternate_number: PhoneNumber::try_from("9876543211").unwrap(),
            email: "a@x.com".to_string(),
            address: "12 Main Street".to_string(),
            organization: "Acme".to_string(),
            city: "".to_string(),
            state: "".to_string(),
            product: Product::EdTech,
            category: Category::Private,
            status: EntryStatus::NotFound,
            close_type: None,
            close_amount: None,
            estimated_value: None,
            remarks: "".to_string(),
            history: History::new(),
            created_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_valid_entry_passes() {
        assert!(sample_entry().validate().is_ok());
    }

    #[test]
    fn test_phone_numbers_must_be_ten_digits() {
        let mut entry = sample_entry();
        entry.mobile_number = PhoneNumber::try_from("98765abc10").unwrap();
        let errors = entry.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("mobile_number"));

        let mut entry = sample_entry();
        entry.alternate_number = PhoneNumber::try_from("12345").unwrap();
        assert!(entry.validate().is_err());

        let mut entry = sample_entry();
        entry.alternate_number = PhoneNumber::new();
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_length_rules() {
        let mut entry = sample_entry();
        entry.address = "abc".to_string();
        let errors = entry.validate().unwrap_err();
        assert_eq!(
            validation_messages(&errors),
            vec!["Address must be at least 5 characters".to_string()]
        );

        let mut entry = sample_entry();
        entry.address = "a".repeat(201);
        let errors = entry.validate().unwrap_err();
        assert_eq!(
            validation_messages(&errors),
            vec!["Address cannot exceed 200 characters".to_string()]
        );

        let mut entry = sample_entry();
        entry.organization = "o".repeat(101);
        assert!(entry.validate().is_err());

        let mut entry = sample_entry();
        entry.remarks = "r".repeat(501);
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_close_state_invariant() {
        let mut entry = sample_entry();
        entry.status = EntryStatus::Closed;
        assert!(entry.validate().is_err());

        entry.close_type = Some(CloseType::ClosedWon);
        entry.close_amount = Some(Decimal::new(500, 0));
        assert!(entry.validate().is_ok());

        entry.close_amount = Some(Decimal::new(-1, 0));
        assert!(entry.validate().is_err());

        let mut entry = sample_entry();
        entry.close_type = Some(CloseType::ClosedLost);
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_parse_phone_number_rejects_overlong_input() {
        assert!(parse_phone_number("mobile_number", "9876543210").is_ok());
        let errors = parse_phone_number("mobile_number", "98765432101").unwrap_err();
        assert!(errors.field_errors().contains_key("mobile_number"));
    }

    #[test]
    fn test_to_entry_copies_history() {
        let mut entry = sample_entry();
        entry
            .history
            .append(HistoryEntryModel::new(EntryStatus::Maybe, "call back", Utc::now()));
        let owner = EntryOwner {
            id: Some(entry.created_by),
            username: "jane".to_string(),
        };
        let view = entry.to_entry(owner);
        assert_eq!(view.history.len(), 1);
        assert_eq!(view.mobile_number, "9876543210");
        assert_eq!(view.created_by.username, "jane");
    }
}
