use chrono::{DateTime, Utc};
use crm_core_api::domain::ExportRow;
use crm_core_db::models::entry::EntryModel;

const EMPTY_REMARKS: &str = "Not Found";

/// Export date format, e.g. `3/7/2024`
pub fn format_export_date(date: DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Flat spreadsheet row for one entry
pub fn project(entry: &EntryModel) -> ExportRow {
    let remarks = if entry.remarks.is_empty() {
        EMPTY_REMARKS.to_string()
    } else {
        entry.remarks.clone()
    };
    ExportRow {
        customer_name: entry.customer_name.clone(),
        contact_name: entry.contact_name.clone(),
        mobile_number: entry.mobile_number.to_string(),
        alternate_number: entry.alternate_number.to_string(),
        email: entry.email.clone(),
        address: entry.address.clone(),
        state: entry.state.clone(),
        city: entry.city.clone(),
        product: entry.product.to_string(),
        organization: entry.organization.clone(),
        category: entry.category.to_string(),
        status: entry.status.to_string(),
        created_at: format_export_date(entry.created_at),
        remarks,
    }
}
