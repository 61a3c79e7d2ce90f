use crm_core_api::domain::close_type_str;
use crm_core_db::models::entry::{EntryModel, History, HistoryEntryModel};
use crate::utils::{get_heapless_string, get_optional_parsed, get_parsed, TryFromRow};
use sqlx::{postgres::PgRow, PgPool, Postgres, Row, Transaction};
use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

pub struct EntryRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl EntryRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Loads the stored history of every row and builds the models, keeping row order.
    pub(super) async fn hydrate(
        &self,
        rows: Vec<PgRow>,
    ) -> Result<Vec<EntryModel>, Box<dyn Error + Send + Sync>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            items.push(EntryModel::try_from_row(row)?);
        }
        let ids: Vec<Uuid> = items.iter().map(|item| item.id).collect();

        let history_rows = sqlx::query(
            r#"
            SELECT entry_id, seq, status, remarks, recorded_at
            FROM entry_history
            WHERE entry_id = ANY($1)
            ORDER BY entry_id, seq
            "#,
        )
        .bind(ids.as_slice())
        .fetch_all(&*self.pool)
        .await?;

        let mut histories: HashMap<Uuid, Vec<HistoryEntryModel>> = HashMap::new();
        for row in history_rows {
            let entry_id: Uuid = row.try_get("entry_id")?;
            histories
                .entry(entry_id)
                .or_default()
                .push(HistoryEntryModel::try_from_row(&row)?);
        }

        for item in &mut items {
            if let Some(stored) = histories.remove(&item.id) {
                item.history = History::from_stored(stored);
            }
        }
        Ok(items)
    }

    /// Inserts the entry row and its full history inside `transaction`.
    pub(super) async fn insert_entry(
        transaction: &mut Transaction<'_, Postgres>,
        item: &EntryModel,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO entry (
                id, customer_name, contact_name, mobile_number, alternate_number,
                email, address, organization, city, state,
                product, category, status, close_type, close_amount,
                estimated_value, remarks, created_by, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
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
        .bind(item.created_by)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&mut **transaction)
        .await?;

        for (seq, snapshot) in item.history.iter().enumerate() {
            Self::insert_history(transaction, item.id, seq as i32, snapshot).await?;
        }
        Ok(())
    }

    pub(super) async fn insert_history(
        transaction: &mut Transaction<'_, Postgres>,
        entry_id: Uuid,
        seq: i32,
        snapshot: &HistoryEntryModel,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO entry_history (entry_id, seq, status, remarks, recorded_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entry_id)
        .bind(seq)
        .bind(snapshot.status.as_str())
        .bind(snapshot.remarks.as_str())
        .bind(snapshot.timestamp)
        .execute(&mut **transaction)
        .await?;
        Ok(())
    }
}

/// True when the database refused the row itself (constraint, bad value),
/// as opposed to the connection or pool failing.
pub(super) fn is_row_rejection(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(_))
}

impl TryFromRow<PgRow> for EntryModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(EntryModel {
            id: row.try_get("id")?,
            customer_name: row.try_get("customer_name")?,
            contact_name: row.try_get("contact_name")?,
            mobile_number: get_heapless_string(row, "mobile_number")?,
            alternate_number: get_heapless_string(row, "alternate_number")?,
            email: row.try_get("email")?,
            address: row.try_get("address")?,
            organization: row.try_get("organization")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            product: get_parsed(row, "product")?,
            category: get_parsed(row, "category")?,
            status: get_parsed(row, "status")?,
            close_type: get_optional_parsed(row, "close_type")?,
            close_amount: row.try_get("close_amount")?,
            estimated_value: row.try_get("estimated_value")?,
            remarks: row.try_get("remarks")?,
            history: History::new(),
            created_by: row.try_get("created_by")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl TryFromRow<PgRow> for HistoryEntryModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(HistoryEntryModel {
            status: get_parsed(row, "status")?,
            remarks: row.try_get("remarks")?,
            timestamp: row.try_get("recorded_at")?,
        })
    }
}
