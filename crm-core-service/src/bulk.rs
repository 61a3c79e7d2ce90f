//! Conversion of externally shaped spreadsheet rows into entries.

use chrono::{DateTime, Utc};
use crm_core_api::domain::columns;
use crm_core_api::domain::{Category, EntryStatus, Product};
use crm_core_db::models::entry::{parse_phone_number, EntryModel, History};
use serde_json::{Map, Value};
use std::str::FromStr;
use uuid::Uuid;

pub const INVALID_UPLOAD_FORMAT: &str =
    "The uploaded data is not in the correct format. Please upload a list of entries.";

/// Text of one cell. Missing and null cells are empty; scalars are rendered as text.
fn cell_text(row: &Map<String, Value>, column: &str) -> Result<String, String> {
    match row.get(column) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(_) => Err(format!("column '{column}' does not hold a single value")),
    }
}

fn parse_enum<T: FromStr>(row: &Map<String, Value>, column: &str) -> Result<T, String> {
    let text = cell_text(row, column)?;
    T::from_str(&text).map_err(|_| format!("'{text}' is not a valid {column}"))
}

/// Converts one uploaded row into an entry owned by `created_by`.
///
/// Only conversion problems are reported here; the field rules are left to
/// the store's schema check.
pub fn row_to_entry(row: &Value, created_by: Uuid, now: DateTime<Utc>) -> Result<EntryModel, String> {
    let row = row.as_object().ok_or_else(|| "row is not an object".to_string())?;

    let status = match cell_text(row, columns::STATUS)?.as_str() {
        "" => EntryStatus::default(),
        text => EntryStatus::from_str(text).map_err(|_| format!("'{text}' is not a valid {}", columns::STATUS))?,
    };

    let mobile_number = parse_phone_number("mobile_number", &cell_text(row, columns::CONTACT_NUMBER)?)
        .map_err(|e| e.to_string())?;
    let alternate_number = parse_phone_number("alternate_number", &cell_text(row, columns::ALTERNATE_NUMBER)?)
        .map_err(|e| e.to_string())?;

    Ok(EntryModel {
        id: Uuid::new_v4(),
        customer_name: cell_text(row, columns::CUSTOMER_NAME)?,
        contact_name: cell_text(row, columns::CONTACT_PERSON)?,
        mobile_number,
        alternate_number,
        email: cell_text(row, columns::EMAIL)?.to_lowercase(),
        address: cell_text(row, columns::ADDRESS)?,
        organization: cell_text(row, columns::ORGANIZATION)?,
        city: cell_text(row, columns::DISTRICT)?,
        state: cell_text(row, columns::STATE)?,
        product: parse_enum::<Product>(row, columns::PRODUCT)?,
        category: parse_enum::<Category>(row, columns::CATEGORY)?,
        status,
        close_type: None,
        close_amount: None,
        estimated_value: None,
        remarks: cell_text(row, columns::REMARKS)?,
        history: History::new(),
        created_by,
        created_at: now,
        updated_at: now,
    })
}
