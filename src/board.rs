//! Task board: the owner's flat task list plus the operations on it.
//!
//! The board keeps the latest fetched list and the active view options.
//! Every successful mutation is followed by a full re-fetch; derived views are
//! recomputed from the flat list on demand.

use crate::error::{TaskError, TaskResult};
use crate::session::SessionProvider;
use crate::store::TaskStore;
use crate::tasks::{
    Mutation, SearchCriteria, SortMode, StatusFilter, TaskCounts, TaskView, ViewOptions,
    active_summary, count_by_status, plan_status_change, project,
};
use crate::types::{NewTask, Task, TaskInput, TaskPatch, TaskStatus};
use tracing::{debug, info, warn};

pub struct TaskBoard<S, P> {
    store: S,
    session: P,
    tasks: Vec<Task>,
    options: ViewOptions,
}

impl<S: TaskStore, P: SessionProvider> TaskBoard<S, P> {
    pub fn new(store: S, session: P) -> Self {
        Self {
            store,
            session,
            tasks: Vec::new(),
            options: ViewOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ViewOptions) -> Self {
        self.options = options;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The latest fetched flat list.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.options.filter = filter;
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.options.sort = sort;
    }

    pub fn set_search(&mut self, search: SearchCriteria) {
        self.options.search = search;
    }

    pub fn clear_search(&mut self) {
        self.options.search = SearchCriteria::default();
    }

    /// Grouped, sorted trees for the current options.
    pub fn view(&self) -> TaskView {
        project(&self.tasks, &self.options)
    }

    /// Totals over every task, independent of filter and search.
    pub fn counts(&self) -> TaskCounts {
        count_by_status(&self.tasks)
    }

    /// Most relevant active tasks for the dashboard card.
    pub fn summary(&self, limit: usize) -> Vec<&Task> {
        active_summary(&self.tasks, limit)
    }

    /// Replace the flat list with the owner's current tasks.
    pub async fn refresh(&mut self) -> TaskResult<&[Task]> {
        let owner = self.session.owner_id()?;
        let tasks = self.store.list(&owner).await?;
        debug!(owner = %owner, count = tasks.len(), "Fetched tasks");
        self.tasks = tasks;
        Ok(&self.tasks)
    }

    /// Create a pending root task.
    pub async fn create_task(&mut self, input: TaskInput) -> TaskResult<Task> {
        input.validate()?;
        let owner = self.session.owner_id()?;

        let created = self
            .store
            .insert(NewTask {
                user_id: owner,
                parent_id: None,
                title: input.title.clone(),
                description: input.description(),
                status: TaskStatus::Pending,
                due_date: input.due_date,
                priority: input.priority,
                recurring: input.recurring,
                has_subtasks: false,
                order: 0,
                depth: 0,
            })
            .await?;
        info!(task_id = %created.id, title = %created.title, "Created task");

        self.refresh().await?;
        Ok(created)
    }

    /// Create a subtask under `parent_id` and flag the parent.
    ///
    /// Insert and flag are separate store calls; a failure between them
    /// leaves the subtask without the parent flag set.
    pub async fn add_subtask(&mut self, parent_id: &str, input: TaskInput) -> TaskResult<Task> {
        input.validate()?;
        let owner = self.session.owner_id()?;
        let parent = self
            .get(parent_id)
            .cloned()
            .ok_or_else(|| TaskError::task_not_found(parent_id))?;

        let created = self
            .store
            .insert(NewTask {
                user_id: owner,
                parent_id: Some(parent.id.clone()),
                title: input.title.clone(),
                description: input.description(),
                status: TaskStatus::Pending,
                due_date: input.due_date,
                priority: input.priority,
                recurring: input.recurring,
                has_subtasks: false,
                order: 0,
                depth: parent.depth + 1,
            })
            .await?;

        self.store
            .update(
                &parent.id,
                TaskPatch {
                    has_subtasks: Some(true),
                    ..Default::default()
                },
            )
            .await?;
        info!(task_id = %created.id, parent_id = %parent.id, "Created subtask");

        self.refresh().await?;
        Ok(created)
    }

    /// Overwrite the user-editable fields of a task.
    pub async fn edit_task(&mut self, task_id: &str, input: TaskInput) -> TaskResult<()> {
        input.validate()?;

        let patch = TaskPatch {
            title: Some(input.title.clone()),
            description: Some(input.description()),
            due_date: Some(input.due_date),
            priority: Some(input.priority),
            recurring: Some(input.recurring),
            ..Default::default()
        };
        self.store.update(task_id, patch).await?;
        info!(task_id = %task_id, "Edited task");

        self.refresh().await?;
        Ok(())
    }

    /// Move a task to `status` and propagate to related tasks.
    ///
    /// Writes are issued one by one in plan order. The first failure stops
    /// the sequence; earlier writes stay applied.
    pub async fn change_status(&mut self, task_id: &str, status: TaskStatus) -> TaskResult<()> {
        let plan = plan_status_change(&self.tasks, task_id, status)?;
        info!(
            task_id = %task_id,
            status = %status,
            writes = plan.len(),
            "Changing task status"
        );

        for (applied, mutation) in plan.into_iter().enumerate() {
            if let Err(err) = self.apply(mutation).await {
                warn!(
                    task_id = %task_id,
                    applied,
                    error = %err,
                    "Status change partially applied"
                );
                return Err(err.into());
            }
        }

        self.refresh().await?;
        Ok(())
    }

    /// Advance a task along pending → in_progress → completed → pending.
    pub async fn cycle_status(&mut self, task_id: &str) -> TaskResult<TaskStatus> {
        let current = self
            .get(task_id)
            .map(|t| t.status)
            .ok_or_else(|| TaskError::task_not_found(task_id))?;
        let next = current.next();
        self.change_status(task_id, next).await?;
        Ok(next)
    }

    /// Hard delete a task. Its subtasks and the parent's flag are untouched.
    pub async fn delete_task(&mut self, task_id: &str) -> TaskResult<()> {
        self.store.delete(task_id).await?;
        info!(task_id = %task_id, "Deleted task");

        self.refresh().await?;
        Ok(())
    }

    async fn apply(&self, mutation: Mutation) -> anyhow::Result<()> {
        match mutation {
            Mutation::SetStatus { task_id, status } => {
                debug!(task_id = %task_id, status = %status, "Applying status");
                self.store.update(&task_id, TaskPatch::status(status)).await
            }
            Mutation::Insert(new_task) => {
                let created = self.store.insert(new_task).await?;
                info!(task_id = %created.id, title = %created.title, "Created recurring instance");
                Ok(())
            }
        }
    }
}
