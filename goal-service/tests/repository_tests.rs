//! PostgreSQL adapter tests. They need a server reachable through
//! `DATABASE_URL`; run them with `cargo test -- --ignored`.

mod common;

use chrono::DateTime;
use chrono::Duration;
use chrono::SubsecRound;
use chrono::Utc;
use common::TestDb;
use goal_service::domain::goal::errors::GoalError;
use goal_service::domain::goal::models::Goal;
use goal_service::domain::goal::models::GoalId;
use goal_service::domain::goal::models::SubTask;
use goal_service::domain::goal::models::SubTaskId;
use goal_service::domain::goal::models::Title;
use goal_service::domain::goal::ports::GoalRepository;
use goal_service::domain::identity::errors::IdentityError;
use goal_service::domain::identity::models::EmailAddress;
use goal_service::domain::identity::models::Identity;
use goal_service::domain::identity::models::IdentityId;
use goal_service::domain::identity::models::Username;
use goal_service::domain::identity::ports::IdentityRepository;
use goal_service::outbound::repositories::PostgresGoalRepository;
use goal_service::outbound::repositories::PostgresIdentityRepository;

// TIMESTAMPTZ keeps microseconds
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

fn identity(username: &str, email: &str) -> Identity {
    let created_at = now();
    Identity {
        id: IdentityId::new(),
        username: Username::new(username.to_string()).unwrap(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        created_at,
        updated_at: created_at,
    }
}

fn subtask(title: &str, completed: bool) -> SubTask {
    let created_at = Utc::now();
    SubTask {
        id: SubTaskId::new(),
        title: Title::new(title.to_string()).unwrap(),
        description: Some(format!("{} notes", title)),
        completed,
        due_date: Some(created_at + Duration::days(7)),
        created_at,
        updated_at: created_at,
    }
}

fn goal(owner: IdentityId, title: &str, created_at: DateTime<Utc>) -> Goal {
    Goal {
        id: GoalId::new(),
        owner_id: owner,
        title: Title::new(title.to_string()).unwrap(),
        description: None,
        subtasks: vec![],
        start_date: created_at,
        end_date: None,
        completed: false,
        progress: 0.0,
        created_at,
        updated_at: created_at,
    }
}

async fn stored_identity(db: &TestDb, username: &str, email: &str) -> IdentityId {
    PostgresIdentityRepository::new(db.pool.clone())
        .create(identity(username, email))
        .await
        .expect("Failed to store identity")
        .id
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_identity_lookup_by_email_and_username() {
    let db = TestDb::new().await;
    let repository = PostgresIdentityRepository::new(db.pool.clone());
    let alice = repository
        .create(identity("alice", "alice@example.com"))
        .await
        .unwrap();

    let by_email = repository
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .expect("Identity not found by email");
    let by_username = repository
        .find_by_username(&alice.username)
        .await
        .unwrap()
        .expect("Identity not found by username");

    for found in [by_email, by_username] {
        assert_eq!(found.id, alice.id);
        assert_eq!(found.username, alice.username);
        assert_eq!(found.email, alice.email);
        assert_eq!(found.password_hash, alice.password_hash);
        assert_eq!(found.created_at, alice.created_at);
    }

    assert!(repository
        .find_by_email("nobody@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_identity_unique_constraints_map_to_conflicts() {
    let db = TestDb::new().await;
    let repository = PostgresIdentityRepository::new(db.pool.clone());
    repository
        .create(identity("alice", "alice@example.com"))
        .await
        .unwrap();

    let same_username = repository
        .create(identity("alice", "other@example.com"))
        .await;
    assert!(matches!(
        same_username,
        Err(IdentityError::UsernameAlreadyExists(name)) if name == "alice"
    ));

    let same_email = repository
        .create(identity("alicia", "alice@example.com"))
        .await;
    assert!(matches!(
        same_email,
        Err(IdentityError::EmailAlreadyExists(email)) if email == "alice@example.com"
    ));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_identity_with_long_email_is_stored() {
    let db = TestDb::new().await;
    let repository = PostgresIdentityRepository::new(db.pool.clone());
    let email = format!(
        "{}@{}.{}.{}.com",
        "a".repeat(64),
        "b".repeat(63),
        "c".repeat(63),
        "d".repeat(63)
    );

    repository.create(identity("alice", &email)).await.unwrap();

    assert!(repository.find_by_email(&email).await.unwrap().is_some());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_goal_with_subtasks_round_trips() {
    let db = TestDb::new().await;
    let owner = stored_identity(&db, "alice", "alice@example.com").await;
    let repository = PostgresGoalRepository::new(db.pool.clone());

    let mut stored = goal(owner, "Learn Rust", now());
    stored.description = Some("Ownership first".to_string());
    stored.end_date = Some(stored.start_date + Duration::days(30));
    stored.subtasks = vec![subtask("Read the book", true), subtask("Write a CLI", false)];
    stored.progress = 50.0;
    repository.create(stored.clone()).await.unwrap();

    let found = repository
        .find_by_id(&owner, &stored.id)
        .await
        .unwrap()
        .expect("Goal not found");

    assert_eq!(found, stored);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_goal_update_replaces_document() {
    let db = TestDb::new().await;
    let owner = stored_identity(&db, "alice", "alice@example.com").await;
    let repository = PostgresGoalRepository::new(db.pool.clone());
    let mut stored = goal(owner, "Learn Rust", now());
    repository.create(stored.clone()).await.unwrap();

    stored.title = Title::new("Learn Rust properly".to_string()).unwrap();
    stored.subtasks = vec![subtask("Read the book", true)];
    stored.completed = true;
    stored.progress = 100.0;
    stored.updated_at = now() + Duration::minutes(1);
    repository.update(&owner, stored.clone()).await.unwrap();

    let found = repository.find_by_id(&owner, &stored.id).await.unwrap();
    assert_eq!(found, Some(stored));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_goals_are_scoped_to_owner() {
    let db = TestDb::new().await;
    let alice = stored_identity(&db, "alice", "alice@example.com").await;
    let bob = stored_identity(&db, "bob", "bob@example.com").await;
    let repository = PostgresGoalRepository::new(db.pool.clone());
    let alices_goal = goal(alice, "Learn Rust", now());
    repository.create(alices_goal.clone()).await.unwrap();

    assert_eq!(
        repository.find_by_id(&bob, &alices_goal.id).await.unwrap(),
        None
    );
    assert!(repository.list_by_owner(&bob).await.unwrap().is_empty());

    let mut hijacked = alices_goal.clone();
    hijacked.title = Title::new("Bob's now".to_string()).unwrap();
    assert!(matches!(
        repository.update(&bob, hijacked).await,
        Err(GoalError::NotFound(id)) if id == alices_goal.id
    ));
    assert!(matches!(
        repository.delete(&bob, &alices_goal.id).await,
        Err(GoalError::NotFound(_))
    ));

    assert_eq!(
        repository.find_by_id(&alice, &alices_goal.id).await.unwrap(),
        Some(alices_goal)
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_goals_listed_newest_first() {
    let db = TestDb::new().await;
    let owner = stored_identity(&db, "alice", "alice@example.com").await;
    let repository = PostgresGoalRepository::new(db.pool.clone());
    let earlier = now() - Duration::hours(1);
    let later = now();

    let oldest = goal(owner, "Oldest", earlier);
    let oldest_id = oldest.id;
    let mut goals = vec![
        oldest,
        goal(owner, "Tied one", later),
        goal(owner, "Tied two", later),
    ];
    for goal in &goals {
        repository.create(goal.clone()).await.unwrap();
    }

    goals.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.to_string().cmp(&a.id.to_string()))
    });
    let expected: Vec<GoalId> = goals.iter().map(|goal| goal.id).collect();

    let listed: Vec<GoalId> = repository
        .list_by_owner(&owner)
        .await
        .unwrap()
        .iter()
        .map(|goal| goal.id)
        .collect();

    assert_eq!(listed, expected);
    assert_eq!(listed.last(), Some(&oldest_id));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_goal_delete() {
    let db = TestDb::new().await;
    let owner = stored_identity(&db, "alice", "alice@example.com").await;
    let repository = PostgresGoalRepository::new(db.pool.clone());
    let stored = goal(owner, "Learn Rust", now());
    repository.create(stored.clone()).await.unwrap();

    repository.delete(&owner, &stored.id).await.unwrap();

    assert_eq!(repository.find_by_id(&owner, &stored.id).await.unwrap(), None);
    assert!(matches!(
        repository.delete(&owner, &stored.id).await,
        Err(GoalError::NotFound(_))
    ));
}
