use async_trait::async_trait;

use crate::domain::goal::errors::GoalError;
use crate::domain::goal::models::AddSubTaskCommand;
use crate::domain::goal::models::CreateGoalCommand;
use crate::domain::goal::models::Goal;
use crate::domain::goal::models::GoalId;
use crate::domain::goal::models::SubTaskId;
use crate::domain::goal::models::UpdateGoalCommand;
use crate::domain::goal::models::UpdateSubTaskCommand;
use crate::domain::identity::models::IdentityId;

/// Port for goal domain service operations.
///
/// Every operation is scoped to `owner`, the authenticated identity. A goal
/// owned by someone else is reported exactly like a missing one.
#[async_trait]
pub trait GoalServicePort: Send + Sync + 'static {
    /// Create a goal owned by `owner`.
    ///
    /// # Errors
    /// * `InvalidSchedule` - End date precedes start date
    /// * `DatabaseError` - Database operation failed
    async fn create_goal(
        &self,
        owner: IdentityId,
        command: CreateGoalCommand,
    ) -> Result<Goal, GoalError>;

    /// Retrieve one of `owner`'s goals.
    ///
    /// # Errors
    /// * `NotFound` - No such goal for this owner
    /// * `DatabaseError` - Database operation failed
    async fn get_goal(&self, owner: IdentityId, goal_id: GoalId) -> Result<Goal, GoalError>;

    /// List all of `owner`'s goals, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_goals(&self, owner: IdentityId) -> Result<Vec<Goal>, GoalError>;

    /// Apply a partial update to one of `owner`'s goals.
    ///
    /// # Errors
    /// * `NotFound` - No such goal for this owner
    /// * `InvalidSchedule` - Resulting end date precedes start date
    /// * `DatabaseError` - Database operation failed
    async fn update_goal(
        &self,
        owner: IdentityId,
        goal_id: GoalId,
        command: UpdateGoalCommand,
    ) -> Result<Goal, GoalError>;

    /// Delete one of `owner`'s goals.
    ///
    /// # Errors
    /// * `NotFound` - No such goal for this owner
    /// * `DatabaseError` - Database operation failed
    async fn delete_goal(&self, owner: IdentityId, goal_id: GoalId) -> Result<(), GoalError>;

    /// Append a subtask and return the updated goal.
    ///
    /// # Errors
    /// * `NotFound` - No such goal for this owner
    /// * `DatabaseError` - Database operation failed
    async fn add_subtask(
        &self,
        owner: IdentityId,
        goal_id: GoalId,
        command: AddSubTaskCommand,
    ) -> Result<Goal, GoalError>;

    /// Apply a partial update to a subtask and return the updated goal.
    ///
    /// # Errors
    /// * `NotFound` - No such goal for this owner
    /// * `SubTaskNotFound` - Goal has no such subtask
    /// * `DatabaseError` - Database operation failed
    async fn update_subtask(
        &self,
        owner: IdentityId,
        goal_id: GoalId,
        subtask_id: SubTaskId,
        command: UpdateSubTaskCommand,
    ) -> Result<Goal, GoalError>;

    /// Remove a subtask and return the updated goal.
    ///
    /// # Errors
    /// * `NotFound` - No such goal for this owner
    /// * `SubTaskNotFound` - Goal has no such subtask
    /// * `DatabaseError` - Database operation failed
    async fn remove_subtask(
        &self,
        owner: IdentityId,
        goal_id: GoalId,
        subtask_id: SubTaskId,
    ) -> Result<Goal, GoalError>;
}

/// Goal store. Every lookup and mutation filters on the owner.
#[async_trait]
pub trait GoalRepository: Send + Sync + 'static {
    /// Persist a new goal. Its `owner_id` is stored as given.
    async fn create(&self, goal: Goal) -> Result<Goal, GoalError>;

    /// Retrieve a goal matching both `id` and `owner`.
    async fn find_by_id(&self, owner: &IdentityId, id: &GoalId)
        -> Result<Option<Goal>, GoalError>;

    /// All goals of `owner`, ordered by creation time, newest first.
    async fn list_by_owner(&self, owner: &IdentityId) -> Result<Vec<Goal>, GoalError>;

    /// Replace the stored goal matching both `goal.id` and `owner`.
    ///
    /// # Errors
    /// * `NotFound` - No goal matched
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, owner: &IdentityId, goal: Goal) -> Result<Goal, GoalError>;

    /// Remove the goal matching both `id` and `owner`.
    ///
    /// # Errors
    /// * `NotFound` - No goal matched
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, owner: &IdentityId, id: &GoalId) -> Result<(), GoalError>;
}
