use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::prelude::User;
use super::entities::user;

pub async fn create_user(
    db: &DatabaseConnection,
    email: &str,
    password_hash: &str,
) -> Result<user::Model, sea_orm::DbErr> {
    let now = Utc::now().fixed_offset();
    let model = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        last_login_at: Set(None),
    };
    model.insert(db).await
}

pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>, sea_orm::DbErr> {
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
}

pub async fn touch_last_login(
    db: &DatabaseConnection,
    user: user::Model,
) -> Result<user::Model, sea_orm::DbErr> {
    let now = Utc::now().fixed_offset();
    let mut active: user::ActiveModel = user.into();
    active.last_login_at = Set(Some(now));
    active.updated_at = Set(now);
    active.update(db).await
}
