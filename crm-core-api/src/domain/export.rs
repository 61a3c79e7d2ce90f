use serde::{Deserialize, Serialize};

pub const EXPORT_FILE_NAME: &str = "entries.xlsx";
pub const EXPORT_SHEET_NAME: &str = "Customer Entries";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// One flat spreadsheet row. Field order is the column order of the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub customer_name: String,
    pub contact_name: String,
    pub mobile_number: String,
    #[serde(rename = "AlterNumber")]
    pub alternate_number: String,
    pub email: String,
    pub address: String,
    pub state: String,
    pub city: String,
    pub product: String,
    pub organization: String,
    pub category: String,
    pub status: String,
    pub created_at: String,
    pub remarks: String,
}

impl ExportRow {
    pub const COLUMNS: [&'static str; 14] = [
        "customerName",
        "contactName",
        "mobileNumber",
        "AlterNumber",
        "email",
        "address",
        "state",
        "city",
        "product",
        "organization",
        "category",
        "status",
        "createdAt",
        "remarks",
    ];

    /// Cell values in [`ExportRow::COLUMNS`] order
    pub fn cells(&self) -> [&str; 14] {
        [
            self.customer_name.as_str(),
            self.contact_name.as_str(),
            self.mobile_number.as_str(),
            self.alternate_number.as_str(),
            self.email.as_str(),
            self.address.as_str(),
            self.state.as_str(),
            self.city.as_str(),
            self.product.as_str(),
            self.organization.as_str(),
            self.category.as_str(),
            self.status.as_str(),
            self.created_at.as_str(),
            self.remarks.as_str(),
        ]
    }
}

/// A downloadable workbook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn xlsx(bytes: Vec<u8>) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME.to_string(),
            content_type: XLSX_CONTENT_TYPE.to_string(),
            bytes,
        }
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.file_name)
    }
}
