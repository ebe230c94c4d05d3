//! Task CRUD operations.

use super::{Database, now_ms};
use crate::error::TaskError;
use crate::types::{NewTask, Priority, Recurrence, Task, TaskPatch, TaskStatus};
use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Row, params};
use uuid::Uuid;

fn conversion_error(
    row: &Row,
    column: &str,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    let index = row.as_ref().column_index(column).unwrap_or_default();
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
}

fn due_to_sql(due: Option<DateTime<Utc>>) -> Option<String> {
    due.map(|d| d.to_rfc3339())
}

fn recurring_to_sql(recurring: Option<Recurrence>) -> Result<Option<String>> {
    Ok(match recurring {
        Some(r) => Some(serde_json::to_string(&r)?),
        None => None,
    })
}

pub fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    let status: String = row.get("status")?;
    let priority: Option<String> = row.get("priority")?;
    let due_date: Option<String> = row.get("due_date")?;
    let recurring_json: Option<String> = row.get("recurring")?;

    let status = status
        .parse::<TaskStatus>()
        .map_err(|e| conversion_error(row, "status", e))?;
    let priority = priority
        .map(|p| p.parse::<Priority>())
        .transpose()
        .map_err(|e| conversion_error(row, "priority", e))?;
    let due_date = due_date
        .map(|d| DateTime::parse_from_rfc3339(&d).map(|dt| dt.with_timezone(&Utc)))
        .transpose()
        .map_err(|e| conversion_error(row, "due_date", e))?;
    let recurring = recurring_json
        .map(|s| serde_json::from_str::<Recurrence>(&s))
        .transpose()
        .map_err(|e| conversion_error(row, "recurring", e))?;

    Ok(Task {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        parent_id: row.get("parent_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        status,
        due_date,
        priority,
        recurring,
        has_subtasks: row.get("has_subtasks")?,
        order: row.get("sort_order")?,
        depth: row.get("depth")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl Database {
    /// Insert a task, assigning a UUIDv7 id and timestamps.
    pub fn insert_task(&self, new_task: NewTask) -> Result<Task> {
        let task_id = Uuid::now_v7().to_string();
        let now = now_ms();
        let recurring_json = recurring_to_sql(new_task.recurring)?;

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tasks (
                    id, user_id, parent_id, title, description, status, due_date,
                    priority, recurring, has_subtasks, sort_order, depth, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    &task_id,
                    &new_task.user_id,
                    &new_task.parent_id,
                    &new_task.title,
                    &new_task.description,
                    new_task.status.as_str(),
                    due_to_sql(new_task.due_date),
                    new_task.priority.map(|p| p.as_str()),
                    recurring_json,
                    new_task.has_subtasks,
                    new_task.order,
                    new_task.depth,
                    now,
                    now,
                ],
            )?;

            Ok(Task {
                id: task_id,
                user_id: new_task.user_id,
                parent_id: new_task.parent_id,
                title: new_task.title,
                description: new_task.description,
                status: new_task.status,
                due_date: new_task.due_date,
                priority: new_task.priority,
                recurring: new_task.recurring,
                has_subtasks: new_task.has_subtasks,
                order: new_task.order,
                depth: new_task.depth,
                created_at: now,
                updated_at: now,
            })
        })
    }

    /// Get a task by ID.
    pub fn get_task(&self, task_id: &str) -> Result<Option<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM tasks WHERE id = ?1")?;

            let result = stmt.query_row(params![task_id], parse_task_row);

            match result {
                Ok(task) => Ok(Some(task)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    /// List every task owned by `user_id`, newest first.
    pub fn list_tasks(&self, user_id: &str) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM tasks WHERE user_id = ?1
                 ORDER BY created_at DESC, rowid DESC",
            )?;

            let tasks = stmt
                .query_map(params![user_id], parse_task_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(tasks)
        })
    }

    /// Apply a partial update. Fails if no task has `task_id`.
    pub fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<()> {
        let mut sets: Vec<&str> = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref title) = patch.title {
            sets.push("title = ?");
            params_vec.push(Box::new(title.clone()));
        }
        if let Some(ref description) = patch.description {
            sets.push("description = ?");
            params_vec.push(Box::new(description.clone()));
        }
        if let Some(status) = patch.status {
            sets.push("status = ?");
            params_vec.push(Box::new(status.as_str()));
        }
        if let Some(due_date) = patch.due_date {
            sets.push("due_date = ?");
            params_vec.push(Box::new(due_to_sql(due_date)));
        }
        if let Some(priority) = patch.priority {
            sets.push("priority = ?");
            params_vec.push(Box::new(priority.map(|p| p.as_str())));
        }
        if let Some(recurring) = patch.recurring {
            sets.push("recurring = ?");
            params_vec.push(Box::new(recurring_to_sql(recurring)?));
        }
        if let Some(has_subtasks) = patch.has_subtasks {
            sets.push("has_subtasks = ?");
            params_vec.push(Box::new(has_subtasks));
        }

        sets.push("updated_at = ?");
        params_vec.push(Box::new(now_ms()));
        params_vec.push(Box::new(task_id.to_string()));

        let sql = format!("UPDATE tasks SET {} WHERE id = ?", sets.join(", "));

        self.with_conn(|conn| {
            let params_refs: Vec<&dyn rusqlite::ToSql> =
                params_vec.iter().map(|b| b.as_ref()).collect();
            let updated = conn.execute(&sql, params_refs.as_slice())?;
            if updated == 0 {
                return Err(TaskError::task_not_found(task_id).into());
            }
            Ok(())
        })
    }

    /// Hard delete a single task. Subtasks are left in place.
    pub fn delete_task(&self, task_id: &str) -> Result<()> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM tasks WHERE id = ?1", params![task_id])?;
            if deleted == 0 {
                return Err(TaskError::task_not_found(task_id).into());
            }
            Ok(())
        })
    }
}
