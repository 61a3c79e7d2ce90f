use sqlx::Database;

use crate::models::user::UserModel;
use crate::repository::{
    create::Create, find_all::FindAll, find_by_email::FindByEmail, load::Load,
    load_batch::LoadBatch,
};

/// Every store operation the user services rely on
pub trait UserRepository<DB: Database>:
    Load<DB, UserModel>
    + LoadBatch<DB, UserModel>
    + FindAll<DB, UserModel>
    + FindByEmail<DB>
    + Create<DB, UserModel>
{
}

impl<DB, R> UserRepository<DB> for R
where
    DB: Database,
    R: Load<DB, UserModel>
        + LoadBatch<DB, UserModel>
        + FindAll<DB, UserModel>
        + FindByEmail<DB>
        + Create<DB, UserModel>,
{
}
