//! Progress engine: derives a goal's completion state from its subtasks.

use crate::domain::goal::models::Goal;
use crate::domain::goal::models::SubTask;

/// Completion state derived from a list of subtasks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Percentage of completed subtasks, 0 to 100
    pub percent: f64,
    /// True iff there is at least one subtask and all are completed
    pub completed: bool,
}

/// Measure progress over `subtasks`.
pub fn measure(subtasks: &[SubTask]) -> Progress {
    if subtasks.is_empty() {
        return Progress {
            percent: 0.0,
            completed: false,
        };
    }

    let done = subtasks.iter().filter(|subtask| subtask.completed).count();

    Progress {
        percent: 100.0 * done as f64 / subtasks.len() as f64,
        completed: done == subtasks.len(),
    }
}

/// Return `goal` with `progress` and `completed` derived from its subtasks.
///
/// Pure: whatever was stored in the two derived fields is discarded.
pub fn recompute(mut goal: Goal) -> Goal {
    let progress = measure(&goal.subtasks);
    goal.progress = progress.percent;
    goal.completed = progress.completed;
    goal
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::goal::models::GoalId;
    use crate::domain::goal::models::SubTaskId;
    use crate::domain::goal::models::Title;
    use crate::domain::identity::models::IdentityId;

    fn subtask(completed: bool) -> SubTask {
        let now = Utc::now();
        SubTask {
            id: SubTaskId::new(),
            title: Title::new("step".to_string()).unwrap(),
            description: None,
            completed,
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn goal(subtasks: Vec<SubTask>, completed: bool, progress: f64) -> Goal {
        let now = Utc::now();
        Goal {
            id: GoalId::new(),
            owner_id: IdentityId::new(),
            title: Title::new("Learn Go".to_string()).unwrap(),
            description: None,
            subtasks,
            start_date: now,
            end_date: None,
            completed,
            progress,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_no_subtasks() {
        let goal = recompute(goal(vec![], true, 42.0));

        assert_eq!(goal.progress, 0.0);
        assert!(!goal.completed);
    }

    #[test]
    fn test_all_done() {
        let goal = recompute(goal(vec![subtask(true), subtask(true)], false, 0.0));

        assert_eq!(goal.progress, 100.0);
        assert!(goal.completed);
    }

    #[test]
    fn test_half_done() {
        let goal = recompute(goal(vec![subtask(true), subtask(false)], true, 100.0));

        assert_eq!(goal.progress, 50.0);
        assert!(!goal.completed);
    }

    #[test]
    fn test_thirds() {
        let progress = measure(&[subtask(true), subtask(false), subtask(false)]);

        assert!((progress.percent - 100.0 / 3.0).abs() < 1e-9);
        assert!(!progress.completed);
    }

    #[test]
    fn test_none_done() {
        let progress = measure(&[subtask(false), subtask(false)]);

        assert_eq!(progress.percent, 0.0);
        assert!(!progress.completed);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let original = goal(vec![subtask(true), subtask(false), subtask(true)], true, 7.0);

        let once = recompute(original);
        let twice = recompute(once.clone());

        assert_eq!(once, twice);
    }
}
