use serde::{Deserialize, Serialize};

/// Column headers understood by the bulk upload, as they appear in exported sheets
pub mod columns {
    pub const CUSTOMER_NAME: &str = "Customer Name";
    pub const CONTACT_PERSON: &str = "Contact Person";
    pub const EMAIL: &str = "Email";
    pub const CONTACT_NUMBER: &str = "Contact Number";
    pub const ALTERNATE_NUMBER: &str = "Alternate Number";
    pub const PRODUCT: &str = "Product";
    pub const ADDRESS: &str = "Address";
    pub const ORGANIZATION: &str = "Organization";
    pub const CATEGORY: &str = "Category";
    pub const DISTRICT: &str = "District";
    pub const STATE: &str = "State";
    pub const STATUS: &str = "Status";
    pub const REMARKS: &str = "Remarks";
}

/// Result of a best-effort bulk upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUploadReport {
    /// Rows actually persisted
    pub inserted: usize,
    /// 1-based indices of batches in which at least one row was rejected
    pub failed_batches: Vec<usize>,
    /// One diagnostic per failed batch
    pub errors: Vec<String>,
}

impl BulkUploadReport {
    pub fn is_partial(&self) -> bool {
        !self.failed_batches.is_empty()
    }

    /// 201 when every batch landed, 207 when some rows were rejected
    pub fn status_code(&self) -> u16 {
        if self.is_partial() {
            207
        } else {
            201
        }
    }

    pub fn message(&self) -> String {
        if self.is_partial() {
            format!(
                "Some entries were uploaded successfully ({}), but there were issues with others.",
                self.inserted
            )
        } else {
            format!("All {} entries were uploaded successfully!", self.inserted)
        }
    }

    pub fn batch_error_message(batch_number: usize) -> String {
        format!(
            "Upload problem in batch {batch_number}: Some entries could not be saved. Please check your data and try again."
        )
    }
}
