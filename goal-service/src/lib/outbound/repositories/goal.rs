use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::goal::errors::GoalError;
use crate::domain::goal::models::Goal;
use crate::domain::goal::models::GoalId;
use crate::domain::goal::models::SubTask;
use crate::domain::goal::models::SubTaskId;
use crate::domain::goal::models::Title;
use crate::domain::goal::ports::GoalRepository;
use crate::domain::identity::models::IdentityId;

/// Goal store backed by PostgreSQL. Subtasks live in a JSONB column so a
/// goal is read and written as one document.
pub struct PostgresGoalRepository {
    pool: PgPool,
}

impl PostgresGoalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SubTaskDocument {
    id: String,
    title: String,
    description: Option<String>,
    completed: bool,
    due_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&SubTask> for SubTaskDocument {
    fn from(subtask: &SubTask) -> Self {
        Self {
            id: subtask.id.to_string(),
            title: subtask.title.as_str().to_string(),
            description: subtask.description.clone(),
            completed: subtask.completed,
            due_date: subtask.due_date,
            created_at: subtask.created_at,
            updated_at: subtask.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GoalRow {
    id: String,
    owner_id: String,
    title: String,
    description: Option<String>,
    subtasks: Json<Vec<SubTaskDocument>>,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    completed: bool,
    progress: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn corrupt(id: &str, e: impl std::fmt::Display) -> GoalError {
    GoalError::DatabaseError(format!("Unreadable goal {}: {}", id, e))
}

impl TryFrom<GoalRow> for Goal {
    type Error = GoalError;

    fn try_from(row: GoalRow) -> Result<Self, Self::Error> {
        let id = row.id.trim();

        let subtasks = row
            .subtasks
            .0
            .into_iter()
            .map(|doc| {
                Ok(SubTask {
                    id: SubTaskId::from_string(&doc.id).map_err(|e| corrupt(id, e))?,
                    title: Title::new(doc.title).map_err(|e| corrupt(id, e))?,
                    description: doc.description,
                    completed: doc.completed,
                    due_date: doc.due_date,
                    created_at: doc.created_at,
                    updated_at: doc.updated_at,
                })
            })
            .collect::<Result<Vec<_>, GoalError>>()?;

        Ok(Goal {
            id: GoalId::from_string(id).map_err(|e| corrupt(id, e))?,
            owner_id: IdentityId::from_string(row.owner_id.trim()).map_err(|e| corrupt(id, e))?,
            title: Title::new(row.title).map_err(|e| corrupt(id, e))?,
            description: row.description,
            subtasks,
            start_date: row.start_date,
            end_date: row.end_date,
            completed: row.completed,
            progress: row.progress,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn subtask_documents(goal: &Goal) -> Json<Vec<SubTaskDocument>> {
    Json(goal.subtasks.iter().map(SubTaskDocument::from).collect())
}

#[async_trait]
impl GoalRepository for PostgresGoalRepository {
    async fn create(&self, goal: Goal) -> Result<Goal, GoalError> {
        sqlx::query(
            r#"
            INSERT INTO goals (id, owner_id, title, description, subtasks, start_date,
                               end_date, completed, progress, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(goal.id.to_string())
        .bind(goal.owner_id.to_string())
        .bind(goal.title.as_str())
        .bind(&goal.description)
        .bind(subtask_documents(&goal))
        .bind(goal.start_date)
        .bind(goal.end_date)
        .bind(goal.completed)
        .bind(goal.progress)
        .bind(goal.created_at)
        .bind(goal.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| GoalError::DatabaseError(e.to_string()))?;

        Ok(goal)
    }

    async fn find_by_id(
        &self,
        owner: &IdentityId,
        id: &GoalId,
    ) -> Result<Option<Goal>, GoalError> {
        sqlx::query_as::<_, GoalRow>(
            r#"
            SELECT id, owner_id, title, description, subtasks, start_date, end_date,
                   completed, progress, created_at, updated_at
            FROM goals
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.to_string())
        .bind(owner.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| GoalError::DatabaseError(e.to_string()))?
        .map(Goal::try_from)
        .transpose()
    }

    async fn list_by_owner(&self, owner: &IdentityId) -> Result<Vec<Goal>, GoalError> {
        let rows = sqlx::query_as::<_, GoalRow>(
            r#"
            SELECT id, owner_id, title, description, subtasks, start_date, end_date,
                   completed, progress, created_at, updated_at
            FROM goals
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GoalError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Goal::try_from).collect()
    }

    async fn update(&self, owner: &IdentityId, goal: Goal) -> Result<Goal, GoalError> {
        let result = sqlx::query(
            r#"
            UPDATE goals
            SET title = $3, description = $4, subtasks = $5, start_date = $6,
                end_date = $7, completed = $8, progress = $9, updated_at = $10
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(goal.id.to_string())
        .bind(owner.to_string())
        .bind(goal.title.as_str())
        .bind(&goal.description)
        .bind(subtask_documents(&goal))
        .bind(goal.start_date)
        .bind(goal.end_date)
        .bind(goal.completed)
        .bind(goal.progress)
        .bind(goal.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| GoalError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(GoalError::NotFound(goal.id));
        }

        Ok(goal)
    }

    async fn delete(&self, owner: &IdentityId, id: &GoalId) -> Result<(), GoalError> {
        let result = sqlx::query(
            r#"
            DELETE FROM goals
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.to_string())
        .bind(owner.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| GoalError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(GoalError::NotFound(*id));
        }

        Ok(())
    }
}
