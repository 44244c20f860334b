//! The todo store: owned collection, filter selection and page cursor.

use crate::clock::{Clock, SystemClock};
use crate::draft::{Field, FieldError, TodoDraft, ValidationErrors};
use crate::error::TodoError;
use crate::filter::{FilterCriteria, apply_filter};
use crate::page::{PageWindow, page_count, page_window, paginate};
use crate::seed::Seed;
use crate::types::{HistoryAction, HistoryEntry, Todo, TodoId, User, UserId};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// What [`TodoStore::edit`] does with the audit log.
///
/// Create and toggle always record history. Edit is a direct overwrite by
/// default; `RecordUpdate` opts into an `updated` entry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EditHistoryPolicy {
    /// Replace fields only. `updated_at` comes from the edited record.
    #[default]
    Overwrite,
    /// Replace fields, prepend an `updated` entry by the current user and
    /// set `updated_at` to now.
    RecordUpdate,
}

/// Store behaviour settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct StoreSettings {
    /// Items per page.
    page_size: usize,
    /// Edit audit behaviour.
    edit_policy: EditHistoryPolicy,
    /// Actor recorded for create, toggle and audited edits.
    current_user: UserId,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            page_size: 10,
            edit_policy: EditHistoryPolicy::default(),
            current_user: UserId::from("user-1"),
        }
    }
}

/// One rendered page of the filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    /// Items on this page, in view order.
    pub items: Vec<&'a Todo>,
    /// 1-based page number.
    pub number: usize,
    /// Pages in the filtered view (0 when it is empty).
    pub count: usize,
    /// Item range for "Showing a-b of n".
    pub window: PageWindow,
}

/// In-memory todo store.
///
/// All state for one session: records, users, filter selection and page
/// cursor. Operations on ids that do not exist are no-ops returning `None`.
#[derive(Debug, Clone)]
pub struct TodoStore<C = SystemClock> {
    todos: Vec<Todo>,
    users: Vec<User>,
    criteria: FilterCriteria,
    page: usize,
    next_id: u64,
    settings: StoreSettings,
    seed: Seed,
    clock: C,
}

impl TodoStore<SystemClock> {
    /// Creates a store over `seed` using the wall clock.
    pub fn new(seed: Seed, settings: StoreSettings) -> Self {
        Self::with_clock(seed, settings, SystemClock)
    }
}

impl<C: Clock> TodoStore<C> {
    /// Creates a store over `seed` with an explicit clock.
    #[instrument(skip(seed, clock), fields(users = seed.users.len(), todos = seed.todos.len()))]
    pub fn with_clock(seed: Seed, settings: StoreSettings, clock: C) -> Self {
        let mut store = Self {
            todos: Vec::new(),
            users: Vec::new(),
            criteria: FilterCriteria::default(),
            page: 1,
            next_id: 1,
            settings,
            seed,
            clock,
        };
        store.load_seed();
        store
    }

    fn load_seed(&mut self) {
        self.todos = self.seed.todos.clone();
        self.users = self.seed.users.clone();
        self.criteria = FilterCriteria::default();
        self.page = 1;
        self.next_id = self
            .todos
            .iter()
            .filter_map(|t| t.id().number())
            .max()
            .map_or(1, |max| max + 1);
    }

    /// Restores the seed records, clears the filter and returns to page 1.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.load_seed();
        info!(todos = self.todos.len(), "Store reset to seed");
    }

    /// All records, newest first.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Known users.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Looks up a user.
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id() == id)
    }

    /// Looks up a todo.
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id() == id)
    }

    /// Store settings.
    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Changes the actor recorded for subsequent events.
    pub fn set_current_user(&mut self, user: UserId) {
        self.settings.current_user = user;
    }

    /// The clock timestamps are drawn from.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn position(&self, id: &TodoId) -> Option<usize> {
        self.todos.iter().position(|t| t.id() == id)
    }

    fn fresh_id(&mut self) -> TodoId {
        loop {
            let id = TodoId::numbered(self.next_id);
            self.next_id += 1;
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    /// Validates `draft` and prepends the new record.
    ///
    /// # Errors
    ///
    /// [`TodoError::Validation`] with one [`FieldError`] per failing
    /// field. The collection is unchanged.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub fn create(&mut self, draft: TodoDraft) -> Result<&Todo, TodoError> {
        if let Err(errors) = draft.validate(|id| self.user(id).is_some()) {
            warn!(%errors, "Create rejected");
            return Err(errors.into());
        }

        let now = self.clock.now();
        let id = self.fresh_id();
        let reminders = draft.due_date.into_iter().collect();
        let actor = self.settings.current_user.clone();

        let todo = Todo::assemble(
            id.clone(),
            draft.title.trim().to_string(),
            draft.description.trim().to_string(),
            false,
            draft.priority,
            draft.due_date,
            draft.assigned_to,
            draft.tags,
            now,
            now,
            draft.source,
            reminders,
            vec![HistoryEntry::new(HistoryAction::Created, now, actor)],
        );

        self.todos.insert(0, todo);
        info!(%id, total = self.todos.len(), "Todo created");
        Ok(&self.todos[0])
    }

    /// Flips completion of `id` and records `completed`/`uncompleted`.
    #[instrument(skip(self))]
    pub fn toggle_complete(&mut self, id: &TodoId) -> Option<&Todo> {
        let Some(index) = self.position(id) else {
            debug!("Toggle ignored: no such todo");
            return None;
        };

        let now = self.clock.now();
        let actor = self.settings.current_user.clone();
        let todo = &mut self.todos[index];
        todo.toggle(now, actor);
        info!(completed = *todo.completed(), "Todo toggled");

        // Completion can drop the record out of the filtered view
        self.clamp_page();
        self.todos.get(index)
    }

    /// Removes `id`, returning the removed record.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: &TodoId) -> Option<Todo> {
        let Some(index) = self.position(id) else {
            debug!("Remove ignored: no such todo");
            return None;
        };

        let removed = self.todos.remove(index);
        self.clamp_page();
        info!(total = self.todos.len(), "Todo removed");
        Some(removed)
    }

    /// Replaces the editable fields of the record with `updated`'s id.
    ///
    /// Id, creation time and history always stay those of the stored
    /// record. History follows [`StoreSettings::edit_policy`].
    ///
    /// # Errors
    ///
    /// [`TodoError::Validation`] if the title is blank or the assignee is
    /// not a known user; the record is unchanged.
    #[instrument(skip(self, updated), fields(id = %updated.id()))]
    pub fn edit(&mut self, updated: Todo) -> Result<Option<&Todo>, TodoError> {
        let Some(index) = self.position(updated.id()) else {
            debug!("Edit ignored: no such todo");
            return Ok(None);
        };

        let mut errors = Vec::new();
        if updated.title().trim().is_empty() {
            errors.push(FieldError::new(Field::Title, "Title is required"));
        }
        if let Some(assignee) = updated.assigned_to()
            && self.user(assignee).is_none()
        {
            errors.push(FieldError::new(
                Field::Assignee,
                format!("Unknown user {assignee}"),
            ));
        }
        if !errors.is_empty() {
            let errors = ValidationErrors(errors);
            warn!(%errors, "Edit rejected");
            return Err(errors.into());
        }

        let policy = self.settings.edit_policy;
        let now = self.clock.now();
        let actor = self.settings.current_user.clone();
        let todo = &mut self.todos[index];
        todo.overwrite_from(updated);
        if policy == EditHistoryPolicy::RecordUpdate {
            todo.record(HistoryEntry::new(HistoryAction::Updated, now, actor));
        }
        info!(?policy, "Todo edited");

        self.clamp_page();
        Ok(self.todos.get(index))
    }

    /// Active filter.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replaces the filter and returns to page 1.
    #[instrument(skip(self))]
    pub fn set_filter(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.page = 1;
        debug!(active = self.criteria.active_filter_count(), "Filter changed");
    }

    /// Clears every filter and returns to page 1.
    pub fn clear_filter(&mut self) {
        self.set_filter(FilterCriteria::default());
    }

    /// Current 1-based page.
    pub fn current_page(&self) -> usize {
        self.page
    }

    /// Moves to `page`, clamped to the pages of the current view.
    /// Returns the page actually selected.
    #[instrument(skip(self))]
    pub fn set_page(&mut self, page: usize) -> usize {
        self.page = page;
        self.clamp_page();
        self.page
    }

    fn clamp_page(&mut self) {
        let count = page_count(self.view().len(), self.settings.page_size).max(1);
        self.page = self.page.clamp(1, count);
    }

    /// Records passing the active filter, in collection order.
    pub fn view(&self) -> Vec<&Todo> {
        apply_filter(&self.todos, &self.criteria)
    }

    /// The current page of the filtered view.
    pub fn page(&self) -> Page<'_> {
        let view = self.view();
        let size = self.settings.page_size;
        Page {
            items: paginate(&view, size, self.page).to_vec(),
            number: self.page,
            count: page_count(view.len(), size),
            window: page_window(view.len(), size, self.page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::filter::StatusFilter;
    use crate::seed::generate_users;
    use chrono::{DateTime, TimeDelta, Utc};

    fn store_with(todos: usize) -> (TodoStore<ManualClock>, ManualClock) {
        let clock = ManualClock::new(DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(20_000));
        let seed = Seed::generate(3, todos, clock.now());
        let store = TodoStore::with_clock(seed, StoreSettings::default(), clock.clone());
        (store, clock)
    }

    #[test]
    fn test_next_id_follows_seed() {
        let (mut store, _) = store_with(12);
        let id = store.create(TodoDraft::new("New")).unwrap().id().clone();
        assert_eq!(id, TodoId::numbered(13));
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let (mut store, _) = store_with(0);
        let first = store.create(TodoDraft::new("A")).unwrap().id().clone();
        store.remove(&first);
        let second = store.create(TodoDraft::new("B")).unwrap().id().clone();
        assert_ne!(first, second);
    }

    #[test]
    fn test_ids_start_at_one_for_empty_seed() {
        let users = generate_users(1);
        let clock = ManualClock::new(DateTime::<Utc>::UNIX_EPOCH);
        let mut store = TodoStore::with_clock(
            Seed {
                users,
                todos: Vec::new(),
            },
            StoreSettings::default(),
            clock,
        );
        let a = store.create(TodoDraft::new("A")).unwrap().id().clone();
        let b = store.create(TodoDraft::new("B")).unwrap().id().clone();
        assert_eq!(a, TodoId::numbered(1));
        assert_eq!(b, TodoId::numbered(2));
    }

    #[test]
    fn test_remove_clamps_page() {
        let (mut store, _) = store_with(11);
        assert_eq!(store.set_page(2), 2);
        let last = store.page().items[0].id().clone();
        store.remove(&last);
        assert_eq!(store.current_page(), 1);
    }

    #[test]
    fn test_set_page_clamps() {
        let (mut store, _) = store_with(25);
        assert_eq!(store.set_page(0), 1);
        assert_eq!(store.set_page(99), 3);
    }

    #[test]
    fn test_set_filter_resets_page() {
        let (mut store, _) = store_with(40);
        store.set_page(3);
        store.set_filter(FilterCriteria {
            status: StatusFilter::Active,
            ..FilterCriteria::default()
        });
        assert_eq!(store.current_page(), 1);
    }

    #[test]
    fn test_toggle_out_of_filter_clamps_page() {
        let (mut store, _) = store_with(0);
        for n in 0..11 {
            store.create(TodoDraft::new(format!("Task {n}"))).unwrap();
        }
        store.set_filter(FilterCriteria {
            status: StatusFilter::Active,
            ..FilterCriteria::default()
        });
        assert_eq!(store.set_page(2), 2);
        let last = store.page().items[0].id().clone();

        let toggled = store.toggle_complete(&last).unwrap();
        assert!(*toggled.completed());
        assert_eq!(store.current_page(), 1);
        let page = store.page();
        assert!(page.number <= page.count.max(1));
        assert_eq!(page.items.len(), 10);
    }

    #[test]
    fn test_edit_out_of_filter_clamps_page() {
        let (mut store, _) = store_with(0);
        for n in 0..11 {
            store.create(TodoDraft::new(format!("Task {n}"))).unwrap();
        }
        store.set_filter(FilterCriteria {
            status: StatusFilter::Active,
            ..FilterCriteria::default()
        });
        store.set_page(2);
        let last = store.page().items[0].clone();

        store.edit(last.with_completed(true)).unwrap();
        assert_eq!(store.current_page(), 1);
    }

    #[test]
    fn test_edit_unknown_assignee_rejected() {
        let (mut store, _) = store_with(3);
        let original = store.todos()[0].clone();
        let err = store
            .edit(original.clone().with_assigned_to(Some(UserId::from("user-99"))))
            .unwrap_err();
        assert!(err.validation().unwrap().field(Field::Assignee).is_some());
        assert_eq!(store.todos()[0], original);

        let known = original.with_assigned_to(Some(UserId::from("user-2")));
        let todo = store.edit(known).unwrap().unwrap();
        assert_eq!(todo.assigned_to(), &Some(UserId::from("user-2")));
    }

    #[test]
    fn test_edit_of_missing_id_is_noop() {
        let (mut store, _) = store_with(3);
        let mut ghost = store.todos()[0].clone();
        store.remove(&ghost.id().clone());
        ghost = ghost.with_title("Changed");
        assert_eq!(store.edit(ghost), Ok(None));
        assert_eq!(store.todos().len(), 2);
    }
}
