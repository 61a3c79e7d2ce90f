#[cfg(test)]
pub mod test_utils {
    use chrono::Utc;
    use crm_core_api::domain::{Category, EntryStatus, Product};
    use crm_core_db::models::entry::{EntryModel, History, PhoneNumber};
    use uuid::Uuid;

    pub fn create_test_entry(customer_name: &str, created_by: Uuid) -> EntryModel {
        let now = Utc::now();
        EntryModel {
            id: Uuid::new_v4(),
            customer_name: customer_name.to_string(),
            contact_name: "Jane Roe".to_string(),
            mobile_number: PhoneNumber::try_from("9876543210").unwrap(),
            alternate_number: PhoneNumber::try_from("9876543211").unwrap(),
            email: "a@x.com".to_string(),
            address: "12 Main Street".to_string(),
            organization: "Acme".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            product: Product::EdTech,
            category: Category::Private,
            status: EntryStatus::NotFound,
            close_type: None,
            close_amount: None,
            estimated_value: None,
            remarks: String::new(),
            history: History::new(),
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}
