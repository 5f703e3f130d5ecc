//! Table access for `tasks`.
//!
//! Every request is made with the caller's access token, so the backend's
//! row-level policy decides which rows are visible. Inserts always carry the
//! owner explicitly.

use reqwest::Method;
use serde_json::json;
use store::{NewTask, Session, Task, TaskId};

use crate::error::ApiError;
use crate::{check, decode, SupabaseClient};

const TASKS: &str = "/rest/v1/tasks";

impl SupabaseClient {
    /// `GET /rest/v1/tasks?select=*&order=created_at.desc`
    pub async fn fetch_tasks(&self, session: &Session) -> Result<Vec<Task>, ApiError> {
        let response = self
            .authed(Method::GET, TASKS, session)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        decode(response).await
    }

    /// `POST /rest/v1/tasks`, returning the stored row.
    pub async fn insert_task(&self, session: &Session, task: &NewTask) -> Result<Task, ApiError> {
        let response = self
            .authed(Method::POST, TASKS, session)
            .header("Prefer", "return=representation")
            .json(task)
            .send()
            .await?;
        let rows: Vec<Task> = decode(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ApiError::Decode("insert returned no row".to_string()))
    }

    /// `PATCH /rest/v1/tasks?id=eq.{id}`
    pub async fn update_task_completed(
        &self,
        session: &Session,
        id: TaskId,
        completed: bool,
    ) -> Result<(), ApiError> {
        let response = self
            .authed(Method::PATCH, TASKS, session)
            .query(&[("id", format!("eq.{id}"))])
            .json(&json!({ "is_completed": completed }))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// `DELETE /rest/v1/tasks?id=eq.{id}`
    pub async fn delete_task(&self, session: &Session, id: TaskId) -> Result<(), ApiError> {
        let response = self
            .authed(Method::DELETE, TASKS, session)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}
