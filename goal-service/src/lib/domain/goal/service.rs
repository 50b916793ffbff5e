use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::goal::errors::GoalError;
use crate::domain::goal::models::AddSubTaskCommand;
use crate::domain::goal::models::CreateGoalCommand;
use crate::domain::goal::models::Goal;
use crate::domain::goal::models::GoalId;
use crate::domain::goal::models::SubTask;
use crate::domain::goal::models::SubTaskId;
use crate::domain::goal::models::UpdateGoalCommand;
use crate::domain::goal::models::UpdateSubTaskCommand;
use crate::domain::goal::ports::GoalRepository;
use crate::domain::goal::ports::GoalServicePort;
use crate::domain::goal::progress;
use crate::domain::identity::models::IdentityId;

/// Domain service implementation for goal operations.
///
/// Mutations are read-modify-write on the whole goal document. Progress is
/// recomputed before every write and on every read.
pub struct GoalService<GR>
where
    GR: GoalRepository,
{
    repository: Arc<GR>,
}

impl<GR> GoalService<GR>
where
    GR: GoalRepository,
{
    pub fn new(repository: Arc<GR>) -> Self {
        Self { repository }
    }

    async fn load(&self, owner: &IdentityId, goal_id: GoalId) -> Result<Goal, GoalError> {
        self.repository
            .find_by_id(owner, &goal_id)
            .await?
            .map(progress::recompute)
            .ok_or(GoalError::NotFound(goal_id))
    }

    async fn save(&self, owner: &IdentityId, mut goal: Goal) -> Result<Goal, GoalError> {
        goal.updated_at = Utc::now();
        let goal = progress::recompute(goal);
        self.repository.update(owner, goal).await.map(progress::recompute)
    }
}

fn ensure_schedule(
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
) -> Result<(), GoalError> {
    match end_date {
        Some(end_date) if end_date < start_date => Err(GoalError::InvalidSchedule {
            start_date,
            end_date,
        }),
        _ => Ok(()),
    }
}

#[async_trait]
impl<GR> GoalServicePort for GoalService<GR>
where
    GR: GoalRepository,
{
    async fn create_goal(
        &self,
        owner: IdentityId,
        command: CreateGoalCommand,
    ) -> Result<Goal, GoalError> {
        let now = Utc::now();
        let start_date = command.start_date.unwrap_or(now);
        ensure_schedule(start_date, command.end_date)?;

        let goal = progress::recompute(Goal {
            id: GoalId::new(),
            owner_id: owner,
            title: command.title,
            description: command.description.filter(|d| !d.is_empty()),
            subtasks: Vec::new(),
            start_date,
            end_date: command.end_date,
            completed: false,
            progress: 0.0,
            created_at: now,
            updated_at: now,
        });

        let created = self.repository.create(goal).await?;
        tracing::debug!(goal_id = %created.id, owner_id = %owner, "Goal created");

        Ok(progress::recompute(created))
    }

    async fn get_goal(&self, owner: IdentityId, goal_id: GoalId) -> Result<Goal, GoalError> {
        self.load(&owner, goal_id).await
    }

    async fn list_goals(&self, owner: IdentityId) -> Result<Vec<Goal>, GoalError> {
        let goals = self.repository.list_by_owner(&owner).await?;
        Ok(goals.into_iter().map(progress::recompute).collect())
    }

    async fn update_goal(
        &self,
        owner: IdentityId,
        goal_id: GoalId,
        command: UpdateGoalCommand,
    ) -> Result<Goal, GoalError> {
        let mut goal = self.load(&owner, goal_id).await?;

        if let Some(title) = command.title {
            goal.title = title;
        }
        if let Some(description) = command.description.filter(|d| !d.is_empty()) {
            goal.description = Some(description);
        }
        if let Some(start_date) = command.start_date {
            goal.start_date = start_date;
        }
        if let Some(end_date) = command.end_date {
            goal.end_date = Some(end_date);
        }
        // Written as supplied; save recomputes it from the subtasks
        if let Some(completed) = command.completed {
            goal.completed = completed;
        }

        ensure_schedule(goal.start_date, goal.end_date)?;

        self.save(&owner, goal).await
    }

    async fn delete_goal(&self, owner: IdentityId, goal_id: GoalId) -> Result<(), GoalError> {
        self.repository.delete(&owner, &goal_id).await?;
        tracing::debug!(goal_id = %goal_id, owner_id = %owner, "Goal deleted");
        Ok(())
    }

    async fn add_subtask(
        &self,
        owner: IdentityId,
        goal_id: GoalId,
        command: AddSubTaskCommand,
    ) -> Result<Goal, GoalError> {
        let mut goal = self.load(&owner, goal_id).await?;

        let now = Utc::now();
        goal.subtasks.push(SubTask {
            id: SubTaskId::new(),
            title: command.title,
            description: command.description.filter(|d| !d.is_empty()),
            completed: false,
            due_date: command.due_date,
            created_at: now,
            updated_at: now,
        });

        self.save(&owner, goal).await
    }

    async fn update_subtask(
        &self,
        owner: IdentityId,
        goal_id: GoalId,
        subtask_id: SubTaskId,
        command: UpdateSubTaskCommand,
    ) -> Result<Goal, GoalError> {
        let mut goal = self.load(&owner, goal_id).await?;

        let subtask = goal
            .subtask_mut(subtask_id)
            .ok_or(GoalError::SubTaskNotFound(subtask_id))?;

        if let Some(title) = command.title {
            subtask.title = title;
        }
        if let Some(description) = command.description.filter(|d| !d.is_empty()) {
            subtask.description = Some(description);
        }
        if let Some(completed) = command.completed {
            subtask.completed = completed;
        }
        if let Some(due_date) = command.due_date {
            subtask.due_date = Some(due_date);
        }
        subtask.updated_at = Utc::now();

        self.save(&owner, goal).await
    }

    async fn remove_subtask(
        &self,
        owner: IdentityId,
        goal_id: GoalId,
        subtask_id: SubTaskId,
    ) -> Result<Goal, GoalError> {
        let mut goal = self.load(&owner, goal_id).await?;

        let before = goal.subtasks.len();
        goal.subtasks.retain(|subtask| subtask.id != subtask_id);
        if goal.subtasks.len() == before {
            return Err(GoalError::SubTaskNotFound(subtask_id));
        }

        self.save(&owner, goal).await
    }
}
