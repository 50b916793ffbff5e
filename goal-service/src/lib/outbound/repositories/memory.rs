//! In-process stores for the `memory` backend and HTTP tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::goal::errors::GoalError;
use crate::domain::goal::models::Goal;
use crate::domain::goal::models::GoalId;
use crate::domain::goal::ports::GoalRepository;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::IdentityRepository;

/// Credential store in a map. Uniqueness is checked under the write lock,
/// so concurrent registrations of the same username cannot both succeed.
#[derive(Default)]
pub struct InMemoryIdentityRepository {
    identities: RwLock<HashMap<IdentityId, Identity>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        let mut identities = self.identities.write().await;

        for existing in identities.values() {
            if existing.username == identity.username {
                return Err(IdentityError::UsernameAlreadyExists(
                    identity.username.to_string(),
                ));
            }
            if existing.email == identity.email {
                return Err(IdentityError::EmailAlreadyExists(identity.email.to_string()));
            }
        }

        identities.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Identity>, IdentityError> {
        let identities = self.identities.read().await;
        Ok(identities
            .values()
            .find(|identity| &identity.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        let identities = self.identities.read().await;
        Ok(identities
            .values()
            .find(|identity| identity.email.as_str() == email)
            .cloned())
    }
}

/// Goal store in a map keyed by goal id. Owner is checked on every access.
#[derive(Default)]
pub struct InMemoryGoalRepository {
    goals: RwLock<HashMap<GoalId, Goal>>,
}

impl InMemoryGoalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GoalRepository for InMemoryGoalRepository {
    async fn create(&self, goal: Goal) -> Result<Goal, GoalError> {
        self.goals.write().await.insert(goal.id, goal.clone());
        Ok(goal)
    }

    async fn find_by_id(
        &self,
        owner: &IdentityId,
        id: &GoalId,
    ) -> Result<Option<Goal>, GoalError> {
        let goals = self.goals.read().await;
        Ok(goals
            .get(id)
            .filter(|goal| &goal.owner_id == owner)
            .cloned())
    }

    async fn list_by_owner(&self, owner: &IdentityId) -> Result<Vec<Goal>, GoalError> {
        let goals = self.goals.read().await;

        let mut owned: Vec<Goal> = goals
            .values()
            .filter(|goal| &goal.owner_id == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(owned)
    }

    async fn update(&self, owner: &IdentityId, goal: Goal) -> Result<Goal, GoalError> {
        let mut goals = self.goals.write().await;

        match goals.get_mut(&goal.id) {
            Some(stored) if &stored.owner_id == owner => {
                *stored = goal.clone();
                Ok(goal)
            }
            _ => Err(GoalError::NotFound(goal.id)),
        }
    }

    async fn delete(&self, owner: &IdentityId, id: &GoalId) -> Result<(), GoalError> {
        let mut goals = self.goals.write().await;

        match goals.get(id) {
            Some(stored) if &stored.owner_id == owner => {
                goals.remove(id);
                Ok(())
            }
            _ => Err(GoalError::NotFound(*id)),
        }
    }
}
