#[cfg(test)]
pub mod test_utils {
    use crate::test_helper::unique_email;
    use crm_core_api::domain::Role;
    use crm_core_db::models::user::UserModel;
    use uuid::Uuid;

    pub fn create_test_user(username: &str, role: Role) -> UserModel {
        UserModel {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: unique_email(username),
            password_hash: "$2b$10$not-a-real-hash".to_string(),
            role,
        }
    }
}
