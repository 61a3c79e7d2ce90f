use sqlx::Database;

use crate::models::entry::EntryModel;
use crate::repository::{
    create::Create, delete::Delete, find_all::FindAll, find_by_owner::FindByOwner,
    insert_unordered::InsertUnordered, load::Load, update_with_history::UpdateWithHistory,
};

/// Every store operation the entry services rely on
pub trait EntryRepository<DB: Database>:
    Load<DB, EntryModel>
    + FindAll<DB, EntryModel>
    + FindByOwner<DB, EntryModel>
    + Create<DB, EntryModel>
    + InsertUnordered<DB, EntryModel>
    + UpdateWithHistory<DB>
    + Delete<DB>
{
}

impl<DB, R> EntryRepository<DB> for R
where
    DB: Database,
    R: Load<DB, EntryModel>
        + FindAll<DB, EntryModel>
        + FindByOwner<DB, EntryModel>
        + Create<DB, EntryModel>
        + InsertUnordered<DB, EntryModel>
        + UpdateWithHistory<DB>
        + Delete<DB>,
{
}
