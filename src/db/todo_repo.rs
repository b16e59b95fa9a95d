use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::prelude::Todo;
use super::entities::todo;

pub async fn create_todo(
    db: &DatabaseConnection,
    owner_id: &Uuid,
    title: &str,
    description: Option<&str>,
) -> Result<todo::Model, sea_orm::DbErr> {
    let now = Utc::now().fixed_offset();
    let model = todo::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        description: Set(description.map(str::to_string)),
        is_completed: Set(false),
        owner_id: Set(*owner_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    model.insert(db).await
}

pub async fn list_by_owner(
    db: &DatabaseConnection,
    owner_id: &Uuid,
) -> Result<Vec<todo::Model>, sea_orm::DbErr> {
    Todo::find()
        .filter(todo::Column::OwnerId.eq(*owner_id))
        .order_by_desc(todo::Column::CreatedAt)
        .all(db)
        .await
}

pub async fn find_by_id(
    db: &DatabaseConnection,
    id: &Uuid,
) -> Result<Option<todo::Model>, sea_orm::DbErr> {
    Todo::find_by_id(*id).one(db).await
}

pub async fn update_todo(
    db: &DatabaseConnection,
    todo: todo::Model,
    title: Option<String>,
    description: Option<String>,
    is_completed: Option<bool>,
) -> Result<todo::Model, sea_orm::DbErr> {
    let mut active: todo::ActiveModel = todo.into();
    if let Some(title) = title {
        active.title = Set(title);
    }
    if let Some(description) = description {
        active.description = Set(Some(description));
    }
    if let Some(is_completed) = is_completed {
        active.is_completed = Set(is_completed);
    }
    active.updated_at = Set(Utc::now().fixed_offset());
    active.update(db).await
}

pub async fn set_completed(
    db: &DatabaseConnection,
    todo: todo::Model,
    is_completed: bool,
) -> Result<todo::Model, sea_orm::DbErr> {
    let mut active: todo::ActiveModel = todo.into();
    active.is_completed = Set(is_completed);
    active.updated_at = Set(Utc::now().fixed_offset());
    active.update(db).await
}

pub async fn delete_todo(db: &DatabaseConnection, id: &Uuid) -> Result<bool, sea_orm::DbErr> {
    let result = Todo::delete_by_id(*id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
