use async_trait::async_trait;
use crm_core_api::domain::close_type_str;
use crm_core_db::models::entry::{EntryModel, HistoryEntryModel};
use crm_core_db::repository::update_with_history::UpdateWithHistory;
use sqlx::Postgres;
use std::error::Error;
use validator::Validate;

use super::repo_impl::EntryRepositoryImpl;

impl EntryRepositoryImpl {
    pub(super) async fn update_with_history_impl(
        repo: &EntryRepositoryImpl,
        item: EntryModel,
        appended: Option<HistoryEntryModel>,
    ) -> Result<Option<EntryModel>, Box<dyn Error + Send + Sync>> {
        item.validate()?;

        let mut transaction = repo.pool.begin().await?;

        // The row lock taken here serializes history appends on the same entry
        let result = sqlx::query(
            r#"
            UPDATE entry
            SET customer_name = $2, contact_name = $3, mobile_number = $4, alternate_number = $5,
                email = $6, address = $7, organization = $8, city = $9, state = $10,
                product = $11, category = $12, status = $13, close_type = $14, close_amount = $15,
                estimated_value = $16, remarks = $17, updated_at = $18
            WHERE id = $1
            "#,
        )
        .bind(item.id)
        .bind(item.customer_name.as_str())
        .bind(item.contact_name.as_str())
        .bind(item.mobile_number.as_str())
        .bind(item.alternate_number.as_str())
        .bind(item.email.as_str())
        .bind(item.address.as_str())
        .bind(item.organization.as_str())
        .bind(item.city.as_str())
        .bind(item.state.as_str())
        .bind(item.product.as_str())
        .bind(item.category.as_str())
        .bind(item.status.as_str())
        .bind(close_type_str(item.close_type))
        .bind(item.close_amount)
        .bind(item.estimated_value)
        .bind(item.remarks.as_str())
        .bind(item.updated_at)
        .execute(&mut *transaction)
        .await?;

        if result.rows_affected() == 0 {
            transaction.rollback().await?;
            return Ok(None);
        }

        if let Some(snapshot) = &appended {
            let next_seq: i32 = sqlx::query_scalar(
                r#"SELECT COALESCE(MAX(seq) + 1, 0) FROM entry_history WHERE entry_id = $1"#,
            )
            .bind(item.id)
            .fetch_one(&mut *transaction)
            .await?;
            Self::insert_history(&mut transaction, item.id, next_seq, snapshot).await?;
        }

        transaction.commit().await?;

        tracing::debug!(entry_id = %item.id, history_appended = appended.is_some(), "entry updated");
        Ok(Some(item))
    }
}

#[async_trait]
impl UpdateWithHistory<Postgres> for EntryRepositoryImpl {
    async fn update_with_history(
        &self,
        item: EntryModel,
        appended: Option<HistoryEntryModel>,
    ) -> Result<Option<EntryModel>, Box<dyn Error + Send + Sync>> {
        Self::update_with_history_impl(self, item, appended).await
    }
}
