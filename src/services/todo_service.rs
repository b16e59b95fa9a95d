use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    db::{entities::todo, todo_repo},
    error::AppError,
};

/// Fields a caller may change on an existing todo. Owner and id are not
/// representable here and therefore can never be written by a client.
#[derive(Debug, Default, Clone)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}

#[derive(Clone)]
pub struct TodoService {
    db: DatabaseConnection,
}

impl TodoService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, caller: &Uuid) -> Result<Vec<todo::Model>, AppError> {
        Ok(todo_repo::list_by_owner(&self.db, caller).await?)
    }

    pub async fn get(&self, caller: &Uuid, id: &Uuid) -> Result<todo::Model, AppError> {
        self.require_owned(caller, id).await
    }

    pub async fn create(
        &self,
        caller: &Uuid,
        title: &str,
        description: Option<&str>,
    ) -> Result<todo::Model, AppError> {
        let title = normalize_title(title)?;
        Ok(todo_repo::create_todo(&self.db, caller, title, description).await?)
    }

    pub async fn update(
        &self,
        caller: &Uuid,
        id: &Uuid,
        changes: TodoChanges,
    ) -> Result<todo::Model, AppError> {
        let todo = self.require_owned(caller, id).await?;
        let TodoChanges {
            title,
            description,
            is_completed,
        } = changes;
        let title = match title {
            Some(value) => Some(normalize_title(&value)?.to_string()),
            None => None,
        };
        Ok(todo_repo::update_todo(&self.db, todo, title, description, is_completed).await?)
    }

    pub async fn delete(&self, caller: &Uuid, id: &Uuid) -> Result<(), AppError> {
        self.require_owned(caller, id).await?;
        let deleted = todo_repo::delete_todo(&self.db, id).await?;
        if !deleted {
            return Err(AppError::not_found("Todo not found"));
        }
        Ok(())
    }

    pub async fn toggle(&self, caller: &Uuid, id: &Uuid) -> Result<todo::Model, AppError> {
        let todo = self.require_owned(caller, id).await?;
        let next = !todo.is_completed;
        Ok(todo_repo::set_completed(&self.db, todo, next).await?)
    }

    /// Existence first, then ownership: a missing id is NotFound, a record
    /// owned by someone else is Forbidden. The two kinds are never merged.
    async fn require_owned(&self, caller: &Uuid, id: &Uuid) -> Result<todo::Model, AppError> {
        let todo = todo_repo::find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| AppError::not_found("Todo not found"))?;
        if todo.owner_id != *caller {
            return Err(AppError::forbidden("Not authorized to access this todo"));
        }
        Ok(todo)
    }
}

fn normalize_title(title: &str) -> Result<&str, AppError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Please provide a title"));
    }
    Ok(trimmed)
}
