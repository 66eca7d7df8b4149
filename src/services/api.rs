//! REST backend client
//!
//! Thin typed wrapper over the `/events/` and `/users/` resources. List
//! endpoints are normalised from either response shape into plain vectors
//! before they reach the query engine.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::models::{
    CreateEventRequest, CreateUserRequest, Event, EventStatus, ListResponse, StatusUpdateRequest,
    UpdateEventRequest, UpdateUserRequest, User,
};
use crate::utils::errors::{PartyBoardError, Result};
use crate::utils::logging::{log_api_error, log_api_request};

/// Upper bound on followed `next` links for one list call
const MAX_PAGES: usize = 50;

/// Error body shapes returned by the backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    detail: Option<String>,
    message: Option<String>,
}

/// Response of the status endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusUpdateResponse {
    pub message: String,
    pub event: Event,
}

/// Typed client for the dashboard REST backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new ApiClient; `token` is sent as a bearer credential
    pub fn new(config: &ApiConfig, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("PartyBoard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // Events

    /// Fetch every event, following page links when the backend paginates
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        self.list("events/").await
    }

    /// Fetch events, reporting failures and falling back to an empty list
    pub async fn fetch_events_or_empty(&self) -> Vec<Event> {
        match self.list_events().await {
            Ok(events) => events,
            Err(e) => {
                log_api_error("events", &e.to_string(), Some("falling back to empty list"));
                Vec::new()
            }
        }
    }

    pub async fn get_event(&self, id: &str) -> Result<Event> {
        let path = format!("events/{}/", id);
        let response = self
            .send(self.request(Method::GET, &path)?, &path)
            .await
            .map_err(|e| not_found_as_event(e, id))?;
        Ok(response.json().await?)
    }

    /// Validate and submit a new event
    pub async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        let request = request.normalized();
        request.validate()?;

        let path = "events/";
        let response = self.send(self.request(Method::POST, path)?.json(&request), path).await?;
        let event: Event = response.json().await?;
        info!(event_id = %event.id, "Event created");
        Ok(event)
    }

    pub async fn update_event(&self, id: &str, request: &UpdateEventRequest) -> Result<Event> {
        let path = format!("events/{}/", id);
        let response = self
            .send(self.request(Method::PATCH, &path)?.json(request), &path)
            .await
            .map_err(|e| not_found_as_event(e, id))?;
        Ok(response.json().await?)
    }

    /// Move an event to a new status; the backend enforces who may do so
    pub async fn update_event_status(&self, id: &str, status: EventStatus) -> Result<Event> {
        let path = format!("events/{}/status/", id);
        let body = StatusUpdateRequest { status };
        let response = self
            .send(self.request(Method::PATCH, &path)?.json(&body), &path)
            .await
            .map_err(|e| not_found_as_event(e, id))?;
        let updated: StatusUpdateResponse = response.json().await?;
        info!(event_id = id, status = %status, "Event status updated");
        Ok(updated.event)
    }

    pub async fn delete_event(&self, id: &str) -> Result<()> {
        let path = format!("events/{}/", id);
        self.send(self.request(Method::DELETE, &path)?, &path)
            .await
            .map_err(|e| not_found_as_event(e, id))?;
        info!(event_id = id, "Event deleted");
        Ok(())
    }

    pub async fn join_event(&self, id: &str) -> Result<()> {
        let path = format!("events/{}/join/", id);
        self.send(self.request(Method::POST, &path)?, &path)
            .await
            .map_err(|e| not_found_as_event(e, id))?;
        Ok(())
    }

    pub async fn leave_event(&self, id: &str) -> Result<()> {
        let path = format!("events/{}/leave/", id);
        self.send(self.request(Method::DELETE, &path)?, &path)
            .await
            .map_err(|e| not_found_as_event(e, id))?;
        Ok(())
    }

    // Users

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.list("users/").await
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User> {
        let path = "users/create/";
        let response = self.send(self.request(Method::POST, path)?.json(request), path).await?;
        Ok(response.json().await?)
    }

    pub async fn update_user(&self, id: &str, request: &UpdateUserRequest) -> Result<User> {
        let path = format!("users/{}/", id);
        let response = self
            .send(self.request(Method::PATCH, &path)?.json(request), &path)
            .await
            .map_err(|e| match e {
                PartyBoardError::Api { status: 404, .. } => PartyBoardError::UserNotFound { user_id: id.to_string() },
                other => other,
            })?;
        Ok(response.json().await?)
    }

    pub async fn delete_user(&self, id: &str) -> Result<()> {
        let path = format!("users/{}/", id);
        self.send(self.request(Method::DELETE, &path)?, &path).await?;
        Ok(())
    }

    // Plumbing

    async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let mut url = self.base_url.join(path)?;
        let mut items = Vec::new();

        for _ in 0..MAX_PAGES {
            let page: ListResponse<T> = self
                .send(self.authorize(self.client.get(url.clone())), path)
                .await?
                .json()
                .await?;

            let next = page.next_page().map(Url::parse).transpose()?;
            items.extend(page.into_items());

            match next {
                Some(next_url) => url = next_url,
                None => {
                    debug!(path = path, count = items.len(), "Fetched list");
                    return Ok(items);
                }
            }
        }

        warn!(path = path, pages = MAX_PAGES, "Stopped following page links");
        Ok(items)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        Ok(self.authorize(self.client.request(method, url)))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and turn non-success statuses into errors
    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response> {
        let request = builder.build()?;
        log_api_request(request.method().as_str(), path);

        let response = self.client.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error.or(b.detail).or(b.message))
            .unwrap_or(body);

        log_api_error(path, &message, Some(status.as_str()));
        Err(match status {
            StatusCode::UNAUTHORIZED => PartyBoardError::Authentication(message),
            StatusCode::FORBIDDEN => PartyBoardError::PermissionDenied(message),
            _ => PartyBoardError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }
}

fn not_found_as_event(error: PartyBoardError, id: &str) -> PartyBoardError {
    match error {
        PartyBoardError::Api { status: 404, .. } => PartyBoardError::EventNotFound {
            event_id: id.to_string(),
        },
        other => other,
    }
}
