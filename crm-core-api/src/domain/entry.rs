use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Product {
    #[serde(rename = "Ed-Tech")]
    EdTech,
    Furniture,
    #[serde(rename = "AV")]
    Av,
}

impl Product {
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::EdTech => "Ed-Tech",
            Product::Furniture => "Furniture",
            Product::Av => "AV",
        }
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Product {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ed-Tech" => Ok(Product::EdTech),
            "Furniture" => Ok(Product::Furniture),
            "AV" => Ok(Product::Av),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Private,
    Government,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Private => "Private",
            Category::Government => "Government",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Private" => Ok(Category::Private),
            "Government" => Ok(Category::Government),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntryStatus {
    Interested,
    #[serde(rename = "Not Interested")]
    NotInterested,
    Maybe,
    Closed,
    Not,
    Service,
    #[default]
    #[serde(rename = "Not Found")]
    NotFound,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Interested => "Interested",
            EntryStatus::NotInterested => "Not Interested",
            EntryStatus::Maybe => "Maybe",
            EntryStatus::Closed => "Closed",
            EntryStatus::Not => "Not",
            EntryStatus::Service => "Service",
            EntryStatus::NotFound => "Not Found",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, EntryStatus::Closed)
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Interested" => Ok(EntryStatus::Interested),
            "Not Interested" => Ok(EntryStatus::NotInterested),
            "Maybe" => Ok(EntryStatus::Maybe),
            "Closed" => Ok(EntryStatus::Closed),
            "Not" => Ok(EntryStatus::Not),
            "Service" => Ok(EntryStatus::Service),
            "Not Found" => Ok(EntryStatus::NotFound),
            _ => Err(()),
        }
    }
}

/// Outcome recorded when an entry is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseType {
    #[serde(rename = "Closed Won")]
    ClosedWon,
    #[serde(rename = "Closed Lost")]
    ClosedLost,
}

impl CloseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloseType::ClosedWon => "Closed Won",
            CloseType::ClosedLost => "Closed Lost",
        }
    }
}

impl FromStr for CloseType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Closed Won" => Ok(CloseType::ClosedWon),
            "Closed Lost" => Ok(CloseType::ClosedLost),
            _ => Err(()),
        }
    }
}

/// Stored text of an optional close type; an open entry stores "".
pub fn close_type_str(value: Option<CloseType>) -> &'static str {
    value.map(|c| c.as_str()).unwrap_or("")
}

pub fn serialize_close_type<S>(value: &Option<CloseType>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(close_type_str(*value))
}

pub fn deserialize_close_type<'de, D>(deserializer: D) -> Result<Option<CloseType>, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    if value_str.is_empty() {
        return Ok(None);
    }
    CloseType::from_str(&value_str)
        .map(Some)
        .map_err(|_| serde::de::Error::custom(format!("Invalid CloseType: {value_str}")))
}

/// Payload of a create request. Every field is optional on the wire so the
/// lifecycle engine can report which required one is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub customer_name: Option<String>,
    pub contact_name: Option<String>,
    pub mobile_number: Option<String>,
    #[serde(rename = "AlterNumber", alias = "alternateNumber")]
    pub alternate_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub product: Option<String>,
    pub organization: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub remarks: Option<String>,
    #[serde(rename = "closetype", alias = "closeType")]
    pub close_type: Option<String>,
    #[serde(rename = "closeamount", alias = "closeAmount")]
    pub close_amount: Option<serde_json::Value>,
    pub estimated_value: Option<serde_json::Value>,
}

/// Payload of a patch request.
///
/// `None` means the field was absent and is left untouched; `Some("")` is an
/// explicit (blank) value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    pub customer_name: Option<String>,
    pub contact_name: Option<String>,
    pub mobile_number: Option<String>,
    #[serde(rename = "AlterNumber", alias = "alternateNumber")]
    pub alternate_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub product: Option<String>,
    pub organization: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub remarks: Option<String>,
    #[serde(rename = "closetype", alias = "closeType")]
    pub close_type: Option<String>,
    #[serde(rename = "closeamount", alias = "closeAmount")]
    pub close_amount: Option<serde_json::Value>,
    pub estimated_value: Option<serde_json::Value>,
}

impl UpdateEntryRequest {
    /// True when the request carries at least one field that is recorded in history.
    /// Close type and close amount alone do not count.
    pub fn touches_any_field(&self) -> bool {
        [
            &self.customer_name,
            &self.contact_name,
            &self.mobile_number,
            &self.alternate_number,
            &self.email,
            &self.address,
            &self.state,
            &self.city,
            &self.product,
            &self.organization,
            &self.category,
            &self.status,
            &self.remarks,
        ]
        .iter()
        .any(|field| field.is_some())
            || self.estimated_value.is_some()
    }
}

/// Owner reference attached to listed entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryOwner {
    #[serde(rename = "_id")]
    pub id: Option<Uuid>,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub status: EntryStatus,
    pub remarks: String,
    pub timestamp: DateTime<Utc>,
}

/// Entry as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub customer_name: String,
    pub contact_name: String,
    pub mobile_number: String,
    #[serde(rename = "AlterNumber")]
    pub alternate_number: String,
    pub email: String,
    pub address: String,
    pub state: String,
    pub city: String,
    pub product: Product,
    pub organization: String,
    pub category: Category,
    pub status: EntryStatus,
    #[serde(
        rename = "closetype",
        serialize_with = "serialize_close_type",
        deserialize_with = "deserialize_close_type"
    )]
    pub close_type: Option<CloseType>,
    #[serde(rename = "closeamount")]
    pub close_amount: Option<Decimal>,
    pub estimated_value: Option<Decimal>,
    pub remarks: String,
    pub history: Vec<HistoryEntry>,
    pub created_by: EntryOwner,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
