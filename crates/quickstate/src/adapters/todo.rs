//! Todo list text adapter.

use super::{CommandError, Reply, Session, split_verb};
use quickstate_todo::{
    AssigneeFilter, Clock, FilterCriteria, Priority, PriorityFilter, StatusFilter, SystemClock,
    Todo, TodoDraft, TodoError, TodoId, TodoStore, UserId,
};
use tracing::{debug, instrument};

const HELP: &str = "\
Commands:
  add <title> [| description]   create a todo; #tag !priority @user in the title
  toggle <id>                   flip completion
  rm <id>                       delete
  edit <id> [title] [| description]
                                change fields; #tag !priority @user as in add
  show <id>                     details and history
  status <all|active|completed> filter by completion
  priority <all|low|medium|high>
  assignee <all|user-id>
  search [text]                 match title, description or tags; empty clears
  clear                         clear every filter
  page <n> | next | prev        move through pages
  list                          show the current page
  user <user-id>                act as another user
  export                        print the filtered view as JSON
  reset                         restore the seed data
  help                          show this help
  quit                          leave";

/// A parsed todo command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoCommand {
    /// Create a todo.
    Add(TodoDraft),
    /// Flip completion.
    Toggle(TodoId),
    /// Delete.
    Remove(TodoId),
    /// Change fields of an existing todo.
    Edit(TodoId, TodoEdit),
    /// Show one todo in full.
    Show(TodoId),
    /// Set the status filter.
    Status(StatusFilter),
    /// Set the priority filter.
    Priority(PriorityFilter),
    /// Set the assignee filter.
    Assignee(AssigneeFilter),
    /// Set the search text.
    Search(String),
    /// Clear all filters.
    Clear,
    /// Jump to a page.
    Page(usize),
    /// Next page.
    Next,
    /// Previous page.
    Prev,
    /// Redraw the current page.
    List,
    /// Change the acting user.
    User(UserId),
    /// Dump the filtered view as JSON.
    Export,
    /// Restore the seed.
    Reset,
    /// Show help.
    Help,
    /// Leave.
    Quit,
}

/// Accepts `todo-7` or the bare number `7`.
fn parse_id(arg: &str) -> Result<TodoId, CommandError> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(CommandError::new("Missing todo id"));
    }
    match arg.parse::<u64>() {
        Ok(n) => Ok(TodoId::numbered(n)),
        Err(_) => Ok(TodoId::from(arg)),
    }
}

/// Fields changed by `edit`. `None` and empty keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoEdit {
    /// New title.
    pub title: Option<String>,
    /// New description; `Some("")` clears it.
    pub description: Option<String>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New assignee.
    pub assigned_to: Option<UserId>,
    /// Tags added to the existing set.
    pub tags: Vec<String>,
}

/// Title words and the `#tag !priority @user` tokens mixed into them.
#[derive(Debug, Default)]
struct Tokens {
    title: String,
    tags: Vec<String>,
    priority: Option<Priority>,
    assigned_to: Option<UserId>,
}

/// Splits `title words #tag !priority @user | description` at the first `|`.
fn parse_tokens(rest: &str) -> Result<(Tokens, Option<&str>), CommandError> {
    let (head, description) = match rest.split_once('|') {
        Some((head, description)) => (head, Some(description.trim())),
        None => (rest, None),
    };

    let mut tokens = Tokens::default();
    let mut words = Vec::new();
    for word in head.split_whitespace() {
        if let Some(tag) = word.strip_prefix('#')
            && !tag.is_empty()
        {
            tokens.tags.push(tag.to_string());
        } else if let Some(priority) = word.strip_prefix('!')
            && !priority.is_empty()
        {
            let priority = priority
                .parse::<Priority>()
                .map_err(|_| CommandError::new(format!("Unknown priority {priority:?}")))?;
            tokens.priority = Some(priority);
        } else if let Some(user) = word.strip_prefix('@')
            && !user.is_empty()
        {
            tokens.assigned_to = Some(UserId::from(user));
        } else {
            words.push(word);
        }
    }
    tokens.title = words.join(" ");
    Ok((tokens, description))
}

fn parse_draft(rest: &str) -> Result<TodoDraft, CommandError> {
    let (tokens, description) = parse_tokens(rest)?;
    let mut draft = TodoDraft::new(tokens.title).description(description.unwrap_or_default());
    for tag in tokens.tags {
        draft = draft.tag(tag);
    }
    if let Some(priority) = tokens.priority {
        draft = draft.priority(priority);
    }
    if let Some(user) = tokens.assigned_to {
        draft = draft.assigned_to(user);
    }
    Ok(draft)
}

fn parse_edit(rest: &str) -> Result<(TodoId, TodoEdit), CommandError> {
    let (id, fields) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let id = parse_id(id)?;
    let (tokens, description) = parse_tokens(fields)?;
    let edit = TodoEdit {
        title: (!tokens.title.is_empty()).then_some(tokens.title),
        description: description.map(str::to_string),
        priority: tokens.priority,
        assigned_to: tokens.assigned_to,
        tags: tokens.tags,
    };
    if edit == TodoEdit::default() {
        return Err(CommandError::new("Nothing to edit"));
    }
    Ok((id, edit))
}

fn require<'a>(rest: &'a str, what: &str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::new(format!("Missing {what}")))
    } else {
        Ok(rest)
    }
}

impl TodoCommand {
    /// Parses one input line.
    ///
    /// # Errors
    ///
    /// [`CommandError`] for unknown verbs, missing arguments and bad
    /// filter values.
    #[instrument]
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let (verb, rest) = split_verb(line);
        let command = match verb.as_str() {
            "add" | "new" => Self::Add(parse_draft(rest)?),
            "toggle" | "done" => Self::Toggle(parse_id(rest)?),
            "rm" | "remove" | "delete" => Self::Remove(parse_id(rest)?),
            "edit" => {
                let (id, edit) = parse_edit(rest)?;
                Self::Edit(id, edit)
            }
            "show" => Self::Show(parse_id(rest)?),
            "status" => Self::Status(
                require(rest, "status")?
                    .parse()
                    .map_err(|_| CommandError::new(format!("Unknown status filter {rest:?}")))?,
            ),
            "priority" => Self::Priority(
                require(rest, "priority")?
                    .parse()
                    .map_err(|e: quickstate_todo::FilterParseError| {
                        CommandError::new(e.to_string())
                    })?,
            ),
            "assignee" => Self::Assignee(
                require(rest, "assignee")?
                    .parse()
                    .map_err(|e: quickstate_todo::FilterParseError| {
                        CommandError::new(e.to_string())
                    })?,
            ),
            "search" => Self::Search(rest.to_string()),
            "clear" => Self::Clear,
            "page" => Self::Page(
                require(rest, "page number")?
                    .parse()
                    .map_err(|_| CommandError::new(format!("Not a page number: {rest:?}")))?,
            ),
            "next" | "n" => Self::Next,
            "prev" | "p" => Self::Prev,
            "list" | "ls" | "" => Self::List,
            "user" => Self::User(UserId::from(require(rest, "user id")?)),
            "export" => Self::Export,
            "reset" => Self::Reset,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandError::new(format!("Unknown command {other:?}"))),
        };
        Ok(command)
    }
}

/// A todo list in a terminal.
#[derive(Debug)]
pub struct TodoSession<C = SystemClock> {
    store: TodoStore<C>,
}

impl<C: Clock> TodoSession<C> {
    /// Wraps a store.
    pub fn new(store: TodoStore<C>) -> Self {
        Self { store }
    }

    /// The store being driven.
    pub fn store(&self) -> &TodoStore<C> {
        &self.store
    }

    fn row(&self, todo: &Todo) -> String {
        let mark = if *todo.completed() { "[x]" } else { "[ ]" };
        let mut row = format!("{mark} {:<9} {}", todo.id(), todo.title());

        let mut meta = vec![todo.priority().to_string()];
        if let Some(user) = todo.assigned_to() {
            meta.push(format!("@{user}"));
        }
        if let Some(due) = todo.due_date() {
            meta.push(format!("due {}", due.format("%Y-%m-%d")));
        }
        meta.extend(todo.tags().iter().map(|tag| format!("#{tag}")));
        row.push_str(&format!("  ({})", meta.join(", ")));
        row
    }

    fn filter_summary(criteria: &FilterCriteria) -> Option<String> {
        let mut parts = Vec::new();
        if criteria.status != StatusFilter::All {
            parts.push(format!("status={}", criteria.status));
        }
        if criteria.priority != PriorityFilter::All {
            parts.push(format!("priority={}", criteria.priority));
        }
        if criteria.assignee != AssigneeFilter::All {
            parts.push(format!("assignee={}", criteria.assignee));
        }
        if !criteria.search.is_empty() {
            parts.push(format!("search={:?}", criteria.search));
        }
        if parts.is_empty() {
            None
        } else {
            Some(format!(
                "Filters ({}): {}",
                criteria.active_filter_count(),
                parts.join(", ")
            ))
        }
    }

    /// Heading, active filters, the item window, the rows and the page
    /// indicator.
    pub fn render(&self) -> String {
        let criteria = self.store.criteria();
        let page = self.store.page();

        let mut lines = vec![criteria.status.heading().to_string()];
        if let Some(summary) = Self::filter_summary(criteria) {
            lines.push(summary);
        }
        lines.push(page.window.to_string());
        lines.extend(page.items.iter().map(|todo| self.row(todo)));
        if page.count > 0 {
            lines.push(format!("Page {}/{}", page.number, page.count));
        }
        lines.join("\n")
    }

    fn detail(&self, todo: &Todo) -> String {
        let mut lines = vec![self.row(todo)];
        if !todo.description().is_empty() {
            lines.push(format!("  {}", todo.description()));
        }
        let assignee = todo
            .assigned_to()
            .as_ref()
            .map(|id| match self.store.user(id) {
                Some(user) => user.display_name().clone(),
                None => id.to_string(),
            })
            .unwrap_or_else(|| "unassigned".to_string());
        lines.push(format!("  Assigned: {assignee}"));
        lines.push(format!("  Source:   {}", todo.source()));
        lines.push(format!(
            "  Created:  {}",
            todo.created_at().format("%Y-%m-%d %H:%M")
        ));
        lines.push(format!(
            "  Updated:  {}",
            todo.updated_at().format("%Y-%m-%d %H:%M")
        ));
        for reminder in todo.reminders() {
            lines.push(format!("  Reminder: {}", reminder.format("%Y-%m-%d %H:%M")));
        }
        lines.push("  History:".to_string());
        for entry in todo.history() {
            lines.push(format!(
                "    {} {} by {}",
                entry.timestamp().format("%Y-%m-%d %H:%M"),
                entry.action(),
                entry.actor()
            ));
        }
        lines.join("\n")
    }

    fn lookup(&self, id: &TodoId) -> Result<&Todo, CommandError> {
        self.store
            .get(id)
            .ok_or_else(|| CommandError::new(format!("No todo {id}")))
    }

    fn validation(err: TodoError) -> CommandError {
        CommandError::new(err.to_string())
    }

    fn update_filter(&mut self, change: impl FnOnce(&mut FilterCriteria)) -> Reply {
        let mut criteria = self.store.criteria().clone();
        change(&mut criteria);
        self.store.set_filter(criteria);
        Reply::Continue(self.render())
    }

    /// Applies a parsed command.
    ///
    /// # Errors
    ///
    /// [`CommandError`] for validation failures, unknown ids and unknown
    /// users.
    #[instrument(skip(self))]
    pub fn apply(&mut self, command: TodoCommand) -> Result<Reply, CommandError> {
        let reply = match command {
            TodoCommand::Add(draft) => {
                let id = self.store.create(draft).map_err(Self::validation)?.id().clone();
                Reply::Continue(format!("Added {id}\n\n{}", self.render()))
            }
            TodoCommand::Toggle(id) => {
                self.store
                    .toggle_complete(&id)
                    .ok_or_else(|| CommandError::new(format!("No todo {id}")))?;
                Reply::Continue(self.render())
            }
            TodoCommand::Remove(id) => {
                let removed = self
                    .store
                    .remove(&id)
                    .ok_or_else(|| CommandError::new(format!("No todo {id}")))?;
                Reply::Continue(format!("Removed {}\n\n{}", removed.title(), self.render()))
            }
            TodoCommand::Edit(id, edit) => {
                let now = self.store.clock().now();
                let mut updated = self.lookup(&id)?.clone().with_updated_at(now);
                if let Some(title) = edit.title {
                    updated = updated.with_title(title);
                }
                if let Some(description) = edit.description {
                    updated = updated.with_description(description);
                }
                if let Some(priority) = edit.priority {
                    updated = updated.with_priority(priority);
                }
                if let Some(user) = edit.assigned_to {
                    updated = updated.with_assigned_to(Some(user));
                }
                if !edit.tags.is_empty() {
                    let mut tags = updated.tags().clone();
                    for tag in edit.tags {
                        tags.insert(tag);
                    }
                    updated = updated.with_tags(tags);
                }
                self.store.edit(updated).map_err(Self::validation)?;
                Reply::Continue(self.render())
            }
            TodoCommand::Show(id) => Reply::Continue(self.detail(self.lookup(&id)?)),
            TodoCommand::Status(status) => self.update_filter(|c| c.status = status),
            TodoCommand::Priority(priority) => self.update_filter(|c| c.priority = priority),
            TodoCommand::Assignee(assignee) => self.update_filter(|c| c.assignee = assignee),
            TodoCommand::Search(text) => self.update_filter(|c| c.search = text),
            TodoCommand::Clear => {
                self.store.clear_filter();
                Reply::Continue(self.render())
            }
            TodoCommand::Page(n) => {
                self.store.set_page(n);
                Reply::Continue(self.render())
            }
            TodoCommand::Next => {
                self.store.set_page(self.store.current_page().saturating_add(1));
                Reply::Continue(self.render())
            }
            TodoCommand::Prev => {
                self.store.set_page(self.store.current_page().saturating_sub(1));
                Reply::Continue(self.render())
            }
            TodoCommand::List => Reply::Continue(self.render()),
            TodoCommand::User(user) => {
                if self.store.user(&user).is_none() {
                    return Err(CommandError::new(format!("Unknown user {user}")));
                }
                self.store.set_current_user(user.clone());
                Reply::Continue(format!("Acting as {user}"))
            }
            TodoCommand::Export => {
                let view = self.store.view();
                let json = serde_json::to_string_pretty(&view)
                    .map_err(|e| CommandError::new(format!("Export failed: {e}")))?;
                Reply::Continue(json)
            }
            TodoCommand::Reset => {
                self.store.reset();
                Reply::Continue(self.render())
            }
            TodoCommand::Help => Reply::Continue(HELP.to_string()),
            TodoCommand::Quit => {
                debug!(todos = self.store.todos().len(), "Leaving todo list");
                Reply::Quit("Bye!".to_string())
            }
        };
        Ok(reply)
    }
}

impl<C: Clock> Session for TodoSession<C> {
    fn prompt(&self) -> &'static str {
        "todo> "
    }

    fn banner(&self) -> String {
        format!(
            "Todo List ({} todos, acting as {})\nType 'help' for commands.\n\n{}",
            self.store.todos().len(),
            self.store.settings().current_user(),
            self.render()
        )
    }

    fn handle(&mut self, line: &str) -> Result<Reply, CommandError> {
        let command = TodoCommand::parse(line)?;
        self.apply(command)
    }
}
