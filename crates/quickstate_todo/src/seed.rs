//! Deterministic seed dataset.
//!
//! Shapes follow a typical team backlog: rotating titles and priorities,
//! roughly 30% complete, roughly 70% assigned, 1-5 history entries each,
//! created within the last 30 days. Values are derived from the record
//! index so the same counts always produce the same data.

use crate::types::{
    HistoryAction, HistoryEntry, Priority, Source, Tags, Todo, TodoId, User, UserId,
};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Default number of seed users.
pub const DEFAULT_USERS: usize = 20;

/// Default number of seed todos.
pub const DEFAULT_TODOS: usize = 200;

const VERBS: [&str; 5] = ["Complete", "Review", "Plan", "Discuss", "Implement"];
const NOUNS: [&str; 5] = ["project", "report", "meeting", "feature", "bug fix"];
const TAGS: [&str; 10] = [
    "work",
    "personal",
    "shopping",
    "health",
    "finance",
    "family",
    "home",
    "education",
    "travel",
    "leisure",
];
const SOURCES: [Source; 4] = [Source::Web, Source::Mobile, Source::Api, Source::Import];
const PRIORITIES: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];
const SEED_ACTIONS: [HistoryAction; 3] = [
    HistoryAction::Updated,
    HistoryAction::StatusChanged,
    HistoryAction::Assigned,
];

/// Users and todos a store starts from and resets to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    /// Known users.
    pub users: Vec<User>,
    /// Initial todos, newest first.
    pub todos: Vec<Todo>,
}

impl Seed {
    /// Generates `user_count` users and `todo_count` todos relative to `now`.
    #[instrument]
    pub fn generate(user_count: usize, todo_count: usize, now: DateTime<Utc>) -> Self {
        let users = generate_users(user_count);
        let todos = generate_todos(todo_count, &users, now);
        debug!(users = users.len(), todos = todos.len(), "Generated seed");
        Self { users, todos }
    }
}

/// `user-1`..`user-n` named `User 1`..`User n`.
#[instrument]
pub fn generate_users(count: usize) -> Vec<User> {
    (1..=count)
        .map(|n| User::new(UserId::from(format!("user-{n}")), format!("User {n}")))
        .collect()
}

fn actor(users: &[User], k: usize) -> UserId {
    if users.is_empty() {
        UserId::from("system")
    } else {
        users[k % users.len()].id().clone()
    }
}

fn seed_todo(index: usize, users: &[User], now: DateTime<Utc>) -> Todo {
    let n = index + 1;
    let days_ago = (index * 7 % 30) as i64;
    let created_at = now - TimeDelta::days(days_ago);
    let updated_at = (created_at + TimeDelta::hours((index * 5 % 48) as i64)).min(now);

    let title = format!("Task {n}: {} {}", VERBS[index % 5], NOUNS[index / 5 % 5]);
    let description = format!(
        "This is a detailed description for task {n}. Lorem ipsum dolor sit amet, \
         consectetur adipiscing elit."
    );

    // Overlapping picks exercise de-duplication
    let tags: Tags = (0..index % 3 + 1)
        .map(|k| TAGS[(index + k * index) % TAGS.len()])
        .collect();

    let due_date = (index % 5 != 0).then(|| now + TimeDelta::days((index % 14) as i64));
    let reminders = (0..index % 3)
        .map(|k| now + TimeDelta::days(k as i64 + 1))
        .collect();

    let assigned_to = (index % 10 < 7 && !users.is_empty()).then(|| actor(users, index * 3));

    // Oldest first, then reversed so the log reads newest first
    let mut history: Vec<HistoryEntry> = (0..index % 5 + 1)
        .map(|k| {
            let action = if k == 0 {
                HistoryAction::Created
            } else {
                SEED_ACTIONS[(index + k) % SEED_ACTIONS.len()]
            };
            let timestamp = (created_at + TimeDelta::hours(2 * k as i64)).min(now);
            HistoryEntry::new(action, timestamp, actor(users, index + k))
        })
        .collect();
    history.reverse();

    Todo::assemble(
        TodoId::numbered(n as u64),
        title,
        description,
        index % 10 < 3,
        PRIORITIES[index % 3],
        due_date,
        assigned_to,
        tags,
        created_at,
        updated_at,
        SOURCES[index % SOURCES.len()],
        reminders,
        history,
    )
}

/// `todo-1`..`todo-n`, in id order.
#[instrument(skip(users), fields(users = users.len()))]
pub fn generate_todos(count: usize, users: &[User], now: DateTime<Utc>) -> Vec<Todo> {
    (0..count).map(|i| seed_todo(i, users, now)).collect()
}
