//! Worker listings, registration, and moderation

use super::{ApiClient, Page};
use crate::error::Result;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A registered service professional
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub worker_id: i64,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    /// Years of experience
    #[serde(default)]
    pub experience: Option<u32>,
}

/// Worker self-registration form.
///
/// Submitted as multipart; the field names are the API's, not ours.
#[derive(Debug, Clone)]
pub struct WorkerRegistration {
    pub full_name: String,
    pub cpf: String,
    pub birth_date: String,
    pub category_name: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub summary: String,
    pub experience: String,
    pub photo: PathBuf,
}

/// Fetch a page of workers in a category
pub async fn find_by_category(
    client: &ApiClient,
    category_name: &str,
    page: u32,
    size: u32,
) -> Result<Page<Worker>> {
    client
        .get(
            "/workers/findWorker",
            &[
                ("categoryName", category_name.to_string()),
                ("page", page.to_string()),
                ("size", size.to_string()),
            ],
        )
        .await
}

/// Submit a worker registration, photo included
pub async fn register(client: &ApiClient, registration: &WorkerRegistration) -> Result<()> {
    let photo = tokio::fs::read(&registration.photo).await?;
    let file_name = registration
        .photo
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());

    let form = Form::new()
        .text("full_name", registration.full_name.clone())
        .text("cpf", registration.cpf.clone())
        .text("birth_date", registration.birth_date.clone())
        .text("categoryName", registration.category_name.clone())
        .text("phone", registration.phone.clone())
        .text("email", registration.email.clone())
        .text("city", registration.city.clone())
        .text("summary", registration.summary.clone())
        .text("experience", registration.experience.clone())
        .part("photoFile", Part::bytes(photo).file_name(file_name));

    client.post_multipart("/workers/newWorker", form).await
}

/// Approve a pending worker registration
pub async fn accept(client: &ApiClient, worker_id: i64) -> Result<()> {
    client
        .post_empty(&format!("/workers/acceptWorker/{}", worker_id))
        .await
}

/// Remove a worker from the directory
pub async fn remove(client: &ApiClient, worker_id: i64) -> Result<()> {
    client
        .delete(&format!("/workers/deleteWorker/{}", worker_id))
        .await
}
