//! Bulk data ingest and background task tracking.
//!
//! `POST /upload/` accepts a `.csv`, `.xls`, or `.xlsx` file and starts an
//! asynchronous import chain on the server; the same endpoint clears the
//! whole dataset when asked to. Both answers carry a task id that
//! `GET /task-status/` reports on.

use crate::{
    client::{Method, PubTracker, Query, build_request, expect_json},
    error::{Error, Result},
};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::info;

const ACCEPTED_EXTENSIONS: [&str; 3] = [".csv", ".xls", ".xlsx"];

/// Upload a spreadsheet of authors and publications for ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadParam {
    file_name: String,
    bytes: Vec<u8>,
}

impl UploadParam {
    /// Rejects unsupported extensions before any network call.
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Result<Self> {
        let lower = file_name.to_lowercase();
        if !ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            return Err(Error::Validation(
                "file must be .csv, .xls, or .xlsx format".to_owned(),
            ));
        }
        Ok(Self {
            file_name: file_name.to_owned(),
            bytes,
        })
    }
}

/// Server acknowledgement for an accepted ingest or clear request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngestReceipt {
    pub message: String,
    #[serde(default)]
    pub task_id: Option<String>,
}

impl Query for UploadParam {
    type Response = IngestReceipt;

    async fn query(&self, client: &PubTracker) -> Result<Self::Response> {
        let part = Part::bytes(self.bytes.clone()).file_name(self.file_name.clone());
        let form = Form::new().part("csv_file", part);
        info!(file = %self.file_name, size = self.bytes.len(), "uploading dataset");
        let resp = build_request(client, Method::Post, "/upload/")
            .multipart(form)
            .send()
            .await?;
        expect_json(resp).await
    }
}

/// Clear every author, publication, and group from the server.
///
/// Destructive; the confirmation flag is required so a default-constructed
/// request can never wipe the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearDataParam {
    confirmed: bool,
}

impl ClearDataParam {
    pub fn confirmed() -> Self {
        Self { confirmed: true }
    }

    pub fn new(confirmed: bool) -> Result<Self> {
        if !confirmed {
            return Err(Error::Validation(
                "clearing all data requires explicit confirmation".to_owned(),
            ));
        }
        Ok(Self { confirmed })
    }
}

impl Query for ClearDataParam {
    type Response = IngestReceipt;

    async fn query(&self, client: &PubTracker) -> Result<Self::Response> {
        info!("clearing all server data");
        let resp = build_request(client, Method::Post, "/upload/")
            .json(&serde_json::json!({"clear_data": self.confirmed}))
            .send()
            .await?;
        expect_json(resp).await
    }
}

/// Poll the status of a background ingest task.
///
/// `GET /task-status/?task_id={id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatusParam {
    task_id: String,
}

impl TaskStatusParam {
    pub fn new(task_id: &str) -> Result<Self> {
        if task_id.trim().is_empty() {
            return Err(Error::Validation("no task_id provided".to_owned()));
        }
        Ok(Self {
            task_id: task_id.to_owned(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskStatus {
    pub task_id: String,
    pub status: String,
    pub ready: bool,
}

impl Query for TaskStatusParam {
    type Response = TaskStatus;

    async fn query(&self, client: &PubTracker) -> Result<Self::Response> {
        let resp = build_request(client, Method::Get, "/task-status/")
            .query(&[("task_id", &self.task_id)])
            .send()
            .await?;
        expect_json(resp).await
    }
}

/// Ask the server to re-harvest publications for all known authors.
///
/// `POST /fetch-publications/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerFetchParam;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskStarted {
    pub status: String,
    pub task_id: String,
}

impl Query for TriggerFetchParam {
    type Response = TaskStarted;

    async fn query(&self, client: &PubTracker) -> Result<Self::Response> {
        let resp = build_request(client, Method::Post, "/fetch-publications/")
            .send()
            .await?;
        expect_json(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_param_accepts_spreadsheet_extensions() {
        assert!(UploadParam::new("data.csv", vec![1]).is_ok());
        assert!(UploadParam::new("DATA.XLSX", vec![1]).is_ok());
        assert!(UploadParam::new("legacy.xls", vec![1]).is_ok());
    }

    #[test]
    fn test_upload_param_rejects_other_extensions() {
        let err = UploadParam::new("notes.txt", vec![1]).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(UploadParam::new("csv", vec![1]).is_err());
    }

    #[test]
    fn test_clear_requires_confirmation() {
        assert!(ClearDataParam::new(false).is_err());
        assert!(ClearDataParam::new(true).is_ok());
    }

    #[test]
    fn test_task_status_param_rejects_empty_id() {
        assert!(TaskStatusParam::new("  ").is_err());
        assert!(TaskStatusParam::new("abc-123").is_ok());
    }
}
