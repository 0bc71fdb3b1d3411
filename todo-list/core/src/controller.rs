//! View-controller behind the task list screen.
//!
//! `TaskListController` owns the in-memory task collection and reconciles it
//! with the backend. Every operation comes in two halves:
//! - a synchronous `begin_*` step that validates input, applies any local
//!   change and returns a request stamped with the current generation
//! - a `complete_*` step that applies the remote outcome
//!
//! The split lets a UI keep the controller in reactive state and only borrow
//! it around the network call. The async methods (`initialize`, `add_task`,
//! `update_field`, `delete_task`) chain both halves for callers that can hold
//! `&mut self` across the await.
//!
//! `teardown` and `logout` advance the generation, so completions that arrive
//! for a torn-down screen are dropped instead of mutating state.

use crate::client::{Error, ErrorKind, TaskClient};
use crate::config::StorageKeys;
use crate::filter::{TaskFilter, filter_tasks};
use crate::session::{Confirm, Navigator, SessionContext, SessionStore};
use crate::task::{Task, TaskField, TaskId};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

/// Outcome of an inline field edit.
///
/// Edits are applied locally before the backend confirms them and are never
/// rolled back; a failed edit stays visible as `Failed` until edited again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Pending,
    Confirmed,
    Failed(ErrorKind),
}

/// Generation stamp carried by every outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// A task list fetch. Only the most recent fetch may replace the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    ticket: Ticket,
    sequence: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateRequest {
    ticket: Ticket,
    pub draft: Task,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    ticket: Ticket,
    sequence: u64,
    pub field: TaskField,
    pub task: Task,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRequest {
    ticket: Ticket,
    pub id: TaskId,
}

#[derive(Debug, Clone, Copy)]
struct FieldEdit {
    sequence: u64,
    state: EditState,
}

#[derive(Debug, Default)]
pub struct TaskListController {
    tasks: Vec<Task>,
    new_task: String,
    logged_in_user: String,
    session: Option<SessionContext>,
    generation: u64,
    latest_fetch: u64,
    next_edit: u64,
    edits: HashMap<(TaskId, TaskField), FieldEdit>,
    last_error: Option<Error>,
    loading: bool,
}

impl TaskListController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks matching `filter`, in list order.
    pub fn visible_tasks(&self, filter: &TaskFilter) -> Vec<&Task> {
        filter_tasks(&self.tasks, filter)
    }

    pub fn new_task(&self) -> &str {
        &self.new_task
    }

    pub fn set_new_task(&mut self, title: impl Into<String>) {
        self.new_task = title.into();
    }

    pub fn logged_in_user(&self) -> &str {
        &self.logged_in_user
    }

    pub fn session(&self) -> Option<&SessionContext> {
        self.session.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The most recent remote failure, kept until cleared or superseded.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn edit_state(&self, id: TaskId, field: TaskField) -> Option<EditState> {
        self.edits.get(&(id, field)).map(|edit| edit.state)
    }

    fn ticket(&self) -> Ticket {
        Ticket {
            generation: self.generation,
        }
    }

    fn is_current(&self, ticket: Ticket, operation: &str) -> bool {
        if ticket.generation == self.generation {
            true
        } else {
            debug!(
                "Dropping {operation} completion from generation {} (now {})",
                ticket.generation, self.generation
            );
            false
        }
    }

    fn record_failure(&mut self, operation: &str, e: Error) {
        error!("An error occurred while {operation}: {e}");
        self.last_error = Some(e);
    }

    /// Invalidates every outstanding request.
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.loading = false;
    }

    /// Adopts `session` for display and starts loading the task list.
    ///
    /// A fetch started here supersedes any fetch still outstanding.
    pub fn begin_initialize(&mut self, session: Option<SessionContext>) -> FetchRequest {
        self.logged_in_user = session
            .as_ref()
            .map(|session| session.email.clone())
            .unwrap_or_default();
        self.session = session;
        self.loading = true;
        self.latest_fetch += 1;
        FetchRequest {
            ticket: self.ticket(),
            sequence: self.latest_fetch,
        }
    }

    pub fn complete_fetch(&mut self, request: FetchRequest, result: Result<Vec<Task>, Error>) {
        if !self.is_current(request.ticket, "fetch") {
            return;
        }
        if request.sequence != self.latest_fetch {
            match result {
                Ok(tasks) => debug!("Dropping superseded fetch of {} tasks", tasks.len()),
                Err(e) => warn!("Superseded fetch failed: {e}"),
            }
            return;
        }
        self.loading = false;
        match result {
            Ok(tasks) => {
                info!("Loaded {} tasks", tasks.len());
                self.tasks = tasks;
            }
            Err(e) => self.record_failure("fetching tasks", e),
        }
    }

    /// Builds a draft from the pending title. Blank titles produce no request.
    pub fn begin_add(&mut self) -> Option<CreateRequest> {
        let title = self.new_task.trim();
        if title.is_empty() {
            return None;
        }
        Some(CreateRequest {
            ticket: self.ticket(),
            draft: Task::draft(title),
        })
    }

    /// Prepends the created task and clears the pending title.
    ///
    /// On failure the pending title is kept and the draft is discarded.
    pub fn complete_add(&mut self, request: CreateRequest, result: Result<Task, Error>) {
        if !self.is_current(request.ticket, "create") {
            return;
        }
        match result {
            Ok(created) if created.is_persisted() => {
                self.tasks.insert(0, created);
                self.new_task.clear();
            }
            Ok(created) => {
                warn!(
                    "Backend created '{}' without an identifier; not adding it",
                    created.title
                );
            }
            Err(e) => self.record_failure("adding a task", e),
        }
    }

    /// Applies an inline edit locally and returns the update to send.
    ///
    /// Unknown field names and unknown task ids are ignored.
    pub fn begin_update(&mut self, id: TaskId, field: &str, raw: &str) -> Option<UpdateRequest> {
        let field: TaskField = match field.parse() {
            Ok(field) => field,
            Err(e) => {
                debug!("{e}");
                return None;
            }
        };
        let ticket = self.ticket();
        let task = self.tasks.iter_mut().find(|task| task.id == Some(id))?;
        task.apply_field(field, raw);
        let task = task.clone();

        self.next_edit += 1;
        let sequence = self.next_edit;
        self.edits.insert(
            (id, field),
            FieldEdit {
                sequence,
                state: EditState::Pending,
            },
        );
        Some(UpdateRequest {
            ticket,
            sequence,
            field,
            task,
        })
    }

    /// Marks the edit confirmed or failed. The local value is left as edited.
    pub fn complete_update(&mut self, request: UpdateRequest, result: Result<(), Error>) {
        if !self.is_current(request.ticket, "update") {
            return;
        }
        let state = match &result {
            Ok(()) => EditState::Confirmed,
            Err(e) => EditState::Failed(e.kind()),
        };
        // A newer edit of the same field, or a deletion, owns the state now
        let edit = request
            .task
            .id
            .and_then(|id| self.edits.get_mut(&(id, request.field)))
            .filter(|edit| edit.sequence == request.sequence);
        match edit {
            Some(edit) => edit.state = state,
            None => debug!(
                "Update of {} on task {:?} no longer owns its edit state",
                request.field, request.task.id
            ),
        }
        match result {
            Ok(()) => debug!("Task {:?} updated successfully", request.task.id),
            Err(e) => self.record_failure("updating the task", e),
        }
    }

    /// Asks for confirmation and returns the delete to send.
    ///
    /// Tasks without an id and declined confirmations produce no request.
    pub fn begin_delete(
        &mut self,
        id: Option<TaskId>,
        confirm: &impl Confirm,
    ) -> Option<DeleteRequest> {
        let id = id?;
        if !confirm.confirm(DELETE_PROMPT) {
            debug!("Deletion of task {id} cancelled");
            return None;
        }
        Some(DeleteRequest {
            ticket: self.ticket(),
            id,
        })
    }

    pub fn complete_delete(&mut self, request: DeleteRequest, result: Result<(), Error>) {
        if !self.is_current(request.ticket, "delete") {
            return;
        }
        match result {
            Ok(()) => {
                self.tasks.retain(|task| task.id != Some(request.id));
                self.edits.retain(|(id, _), _| *id != request.id);
            }
            Err(e) => self.record_failure("deleting the task", e),
        }
    }

    /// Ends the session, invalidates outstanding requests and leaves the screen.
    ///
    /// No backend call is made.
    pub fn logout(
        &mut self,
        store: &impl SessionStore,
        keys: &StorageKeys,
        navigator: &impl Navigator,
    ) {
        match self.session.take() {
            Some(session) => session.end(store, keys),
            None => store.remove(&keys.token),
        }
        self.logged_in_user.clear();
        self.teardown();
        navigator.go_to_entry();
    }

    pub async fn initialize<C: TaskClient>(
        &mut self,
        client: &C,
        session: Option<SessionContext>,
    ) {
        let request = self.begin_initialize(session);
        let result = client.list_tasks().await;
        self.complete_fetch(request, result);
    }

    pub async fn add_task<C: TaskClient>(&mut self, client: &C) {
        let Some(request) = self.begin_add() else {
            return;
        };
        let result = client.create_task(&request.draft).await;
        self.complete_add(request, result);
    }

    pub async fn update_field<C: TaskClient>(
        &mut self,
        client: &C,
        id: TaskId,
        field: &str,
        raw: &str,
    ) {
        let Some(request) = self.begin_update(id, field, raw) else {
            return;
        };
        let result = client.update_task(&request.task).await;
        self.complete_update(request, result);
    }

    pub async fn delete_task<C: TaskClient>(
        &mut self,
        client: &C,
        id: Option<TaskId>,
        confirm: &impl Confirm,
    ) {
        let Some(request) = self.begin_delete(id, confirm) else {
            return;
        };
        let result = client.delete_task(request.id).await;
        self.complete_delete(request, result);
    }
}
