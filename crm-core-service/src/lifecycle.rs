//! Create and patch rules for entries.
//!
//! Everything here is pure: the caller loads the current record, applies the
//! request and hands the result to the store, which runs the schema check.

use chrono::{DateTime, Utc};
use crm_core_api::domain::{
    Category, CloseType, CreateEntryRequest, EntryStatus, Product, UpdateEntryRequest,
};
use crm_core_api::error::{ApiError, ApiResult};
use crm_core_db::models::entry::{parse_phone_number, EntryModel, History, HistoryEntryModel, PhoneNumber};
use crm_core_db::utils::validation_messages;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use uuid::Uuid;

pub const CREATE_INVALID_INPUT: &str = "Some inputs are incorrect. Please check and try again.";
pub const UPDATE_INVALID_INPUT: &str =
    "Some fields contain invalid data. Please review your inputs and try again.";
pub const CREATE_INVALID_PRODUCT: &str = "Product must be one of 'Ed-Tech', 'Furniture', or 'AV'.";
pub const UPDATE_INVALID_PRODUCT: &str =
    "Invalid product selected. Please choose from 'Ed-Tech', 'Furniture', or 'AV'.";
pub const INVALID_CATEGORY: &str = "Category must be either 'Private' or 'Government'";
pub const INVALID_STATUS: &str =
    "Status must be either 'Interested', 'Not Interested', 'Maybe', or 'Not Found'";
pub const MISSING_CLOSE_TYPE: &str =
    "When closing an entry, please specify if it is 'Closed Won' or 'Closed Lost'.";

/// Result of applying a patch to a stored entry
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    /// The entry to store; its history already ends with `appended`
    pub entry: EntryModel,
    pub appended: Option<HistoryEntryModel>,
}

fn required_message(field: &str) -> String {
    let mut chars = field.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("{capitalized} is required and must be a non-empty string.")
}

fn trimmed(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or_default()
}

/// Trimmed request value, or the stored value when the request value is blank
fn or_stored(value: &Option<String>, stored: &str) -> Option<String> {
    value.as_ref().map(|v| {
        let v = v.trim();
        if v.is_empty() { stored.to_string() } else { v.to_string() }
    })
}

fn invalid_field(message: &str, field_message: &str) -> ApiError {
    ApiError::ValidationError {
        message: message.to_string(),
        errors: vec![field_message.to_string()],
    }
}

fn phone_number(field: &'static str, value: &str, message: &str) -> ApiResult<PhoneNumber> {
    parse_phone_number(field, value).map_err(|errors| ApiError::ValidationError {
        message: message.to_string(),
        errors: validation_messages(&errors),
    })
}

/// Parses a monetary value sent as a JSON number or numeric string.
///
/// Anything else, including blank strings, yields `None`.
pub fn parse_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Value::String(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        }
        _ => None,
    }
}

fn parse_close_type(value: &Option<String>) -> ApiResult<CloseType> {
    CloseType::from_str(trimmed(value)).map_err(|_| ApiError::validation(MISSING_CLOSE_TYPE))
}

/// Builds a new entry owned by `created_by` from a create request.
///
/// Required fields are checked in a fixed order and the first missing one is reported.
pub fn new_entry(
    request: &CreateEntryRequest,
    created_by: Uuid,
    now: DateTime<Utc>,
) -> ApiResult<EntryModel> {
    let required = [
        ("customerName", &request.customer_name),
        ("email", &request.email),
        ("mobileNumber", &request.mobile_number),
        ("AlterNumber", &request.alternate_number),
        ("address", &request.address),
        ("product", &request.product),
        ("organization", &request.organization),
        ("category", &request.category),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| trimmed(value).is_empty()) {
        return Err(ApiError::validation(required_message(field)));
    }

    let product = Product::from_str(trimmed(&request.product))
        .map_err(|_| ApiError::validation(CREATE_INVALID_PRODUCT))?;
    let category = Category::from_str(trimmed(&request.category))
        .map_err(|_| invalid_field(CREATE_INVALID_INPUT, INVALID_CATEGORY))?;

    let requested_status = match trimmed(&request.status) {
        "" => None,
        raw => Some(
            EntryStatus::from_str(raw).map_err(|_| invalid_field(CREATE_INVALID_INPUT, INVALID_STATUS))?,
        ),
    };
    let status = requested_status.unwrap_or_default();

    let (close_type, close_amount) = if status.is_closed() {
        (
            Some(parse_close_type(&request.close_type)?),
            request.close_amount.as_ref().and_then(parse_amount),
        )
    } else {
        (None, None)
    };

    let remarks = trimmed(&request.remarks).to_string();
    let mut history = History::new();
    if let Some(status) = requested_status {
        if !remarks.is_empty() {
            history.append(HistoryEntryModel::new(status, remarks.clone(), now));
        }
    }

    Ok(EntryModel {
        id: Uuid::new_v4(),
        customer_name: trimmed(&request.customer_name).to_string(),
        contact_name: trimmed(&request.contact_name).to_string(),
        mobile_number: phone_number("mobile_number", trimmed(&request.mobile_number), CREATE_INVALID_INPUT)?,
        alternate_number: phone_number(
            "alternate_number",
            trimmed(&request.alternate_number),
            CREATE_INVALID_INPUT,
        )?,
        email: trimmed(&request.email).to_lowercase(),
        address: trimmed(&request.address).to_string(),
        organization: trimmed(&request.organization).to_string(),
        city: trimmed(&request.city).to_string(),
        state: trimmed(&request.state).to_string(),
        product,
        category,
        status,
        close_type,
        close_amount,
        estimated_value: request.estimated_value.as_ref().and_then(parse_amount),
        remarks,
        history,
        created_by,
        created_at: now,
        updated_at: now,
    })
}

/// Applies a patch to `current`.
///
/// Absent fields are left untouched. Nothing is returned when the patch is
/// rejected, so a failed update never appends history.
pub fn apply_update(
    current: &EntryModel,
    request: &UpdateEntryRequest,
    now: DateTime<Utc>,
) -> ApiResult<UpdateOutcome> {
    let product = match &request.product {
        Some(raw) => Product::from_str(raw.trim()).map_err(|_| ApiError::validation(UPDATE_INVALID_PRODUCT))?,
        None => current.product,
    };

    let requested_status = match &request.status {
        Some(raw) => Some(
            EntryStatus::from_str(raw.trim()).map_err(|_| invalid_field(UPDATE_INVALID_INPUT, INVALID_STATUS))?,
        ),
        None => None,
    };
    let status = requested_status.unwrap_or(current.status);

    let category = match or_stored(&request.category, current.category.as_str()) {
        Some(raw) => Category::from_str(&raw).map_err(|_| invalid_field(UPDATE_INVALID_INPUT, INVALID_CATEGORY))?,
        None => current.category,
    };

    let (close_type, close_amount) = match requested_status {
        Some(EntryStatus::Closed) => (
            Some(parse_close_type(&request.close_type)?),
            request.close_amount.as_ref().and_then(parse_amount),
        ),
        None if current.status.is_closed() => {
            let close_type = match &request.close_type {
                Some(_) => Some(parse_close_type(&request.close_type)?),
                None => current.close_type,
            };
            let close_amount = match &request.close_amount {
                Some(raw) => parse_amount(raw),
                None => current.close_amount,
            };
            (close_type, close_amount)
        }
        _ => (None, None),
    };

    let mut entry = current.clone();
    entry.product = product;
    entry.category = category;
    entry.status = status;
    entry.close_type = close_type;
    entry.close_amount = close_amount;

    if let Some(v) = or_stored(&request.customer_name, &current.customer_name) {
        entry.customer_name = v;
    }
    if let Some(v) = or_stored(&request.contact_name, &current.contact_name) {
        entry.contact_name = v;
    }
    if let Some(v) = or_stored(&request.mobile_number, &current.mobile_number) {
        entry.mobile_number = phone_number("mobile_number", &v, UPDATE_INVALID_INPUT)?;
    }
    if let Some(v) = or_stored(&request.alternate_number, &current.alternate_number) {
        entry.alternate_number = phone_number("alternate_number", &v, UPDATE_INVALID_INPUT)?;
    }
    if let Some(v) = or_stored(&request.email, &current.email) {
        entry.email = v.to_lowercase();
    }
    if let Some(v) = or_stored(&request.address, &current.address) {
        entry.address = v;
    }
    if let Some(v) = or_stored(&request.organization, &current.organization) {
        entry.organization = v;
    }
    // state, city and remarks may be cleared
    if request.state.is_some() {
        entry.state = trimmed(&request.state).to_string();
    }
    if request.city.is_some() {
        entry.city = trimmed(&request.city).to_string();
    }
    if request.remarks.is_some() {
        entry.remarks = trimmed(&request.remarks).to_string();
    }
    if let Some(raw) = &request.estimated_value {
        entry.estimated_value = parse_amount(raw);
    }
    entry.updated_at = now;

    let appended = request.touches_any_field().then(|| {
        HistoryEntryModel::new(status, trimmed(&request.remarks), now)
    });
    if let Some(snapshot) = &appended {
        entry.history.append(snapshot.clone());
    }

    Ok(UpdateOutcome { entry, appended })
}
