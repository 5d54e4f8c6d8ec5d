use crate::errors::ApiError;
use crate::models::{Habit, NewHabit, NewRecord, RawRecord};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::debug;

/// Thin JSON client for the `habitos` and `registros` collections.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn list_habits(&self) -> Result<Vec<Habit>, ApiError> {
        let habits: Option<Vec<Habit>> = self.get("/api/habitos").await?;
        Ok(habits.unwrap_or_default())
    }

    pub async fn create_habit(&self, habit: &NewHabit) -> Result<Habit, ApiError> {
        self.post("/api/habitos", habit).await
    }

    /// The backend's reply body is not used.
    pub async fn update_habit(&self, habit: &Habit) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/habitos/{}", habit.id));
        debug!("PUT {url}");
        let resp = self.client.put(&url).json(habit).send().await?;
        check_status(resp).await.map(drop)
    }

    pub async fn delete_habit(&self, id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/habitos/{id}"));
        debug!("DELETE {url}");
        let resp = self.client.delete(&url).send().await?;
        check_status(resp).await.map(drop)
    }

    pub async fn list_records(&self) -> Result<Vec<RawRecord>, ApiError> {
        let records: Option<Vec<RawRecord>> = self.get("/api/registros").await?;
        Ok(records.unwrap_or_default())
    }

    pub async fn create_record(&self, record: &NewRecord) -> Result<RawRecord, ApiError> {
        self.post("/api/registros", record).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("GET {url}");
        let resp = self.client.get(&url).send().await?;
        decode(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("POST {url}");
        let resp = self.client.post(&url).json(body).send().await?;
        decode(resp).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn check_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status,
        body: body.trim().to_string(),
    })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let bytes = check_status(resp).await?.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
