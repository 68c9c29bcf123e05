//! Provides a client for the application commands endpoints of the Discord REST API (v10).
//!
//! This module defines the `CommandApi` trait the workflow is written against, the
//! `DiscordClient` implementation, and the generic single-request helper it is built on.

use crate::cli::Config;
use crate::error::Result;
use crate::models::{CommandRecord, ListOutcome, Scope};
use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info, warn};

const BASE_URL: &str = "https://discord.com";
const API_PREFIX: &str = "/api/v10";

/// Body of an HTTP response, parsed as JSON when possible.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Empty,
    Json(Value),
    /// The body was not valid JSON and is kept as received.
    Text(String),
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub data: ResponseBody,
}

/// Operations on registered application commands.
///
/// Neither operation fails: errors are logged and folded into the return value.
#[allow(async_fn_in_trait)]
pub trait CommandApi {
    /// Lists the commands registered in `scope`.
    async fn list_commands(&self, scope: Scope) -> ListOutcome;

    /// Deletes one command. Returns `true` on HTTP 200 or 204.
    async fn delete_command(&self, scope: Scope, command_id: &str, command_name: &str) -> bool;
}

/// Asynchronous client for the Discord application commands API.
pub struct DiscordClient {
    client: Client,
    base_url: String,
    application_id: String,
    bot_token: String,
    guild_id: Option<String>,
}

impl DiscordClient {
    /// Creates a client for `https://discord.com` using the credentials in `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Api` if the HTTP client cannot be built (TLS backend initialisation).
    pub fn new(config: &Config) -> Result<Self> {
        Self::build(config, BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// This is primarily intended for testing purposes (e.g., using a mock server).
    #[cfg(test)]
    pub fn new_with_base_url(config: &Config, base_url: &str) -> Result<Self> {
        Self::build(config, base_url)
    }

    fn build(config: &Config, base_url: &str) -> Result<Self> {
        // No idle connections are kept: every request opens its own connection.
        let client = Client::builder().pool_max_idle_per_host(0).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            application_id: config.application_id.clone(),
            bot_token: config.bot_token.clone(),
            guild_id: config.guild_id.clone().filter(|id| !id.is_empty()),
        })
    }

    /// Path of the command collection for `scope`, or `None` for a guild scope without guild id.
    fn commands_path(&self, scope: Scope) -> Option<String> {
        match scope {
            Scope::Global => Some(format!(
                "{}/applications/{}/commands",
                API_PREFIX, self.application_id
            )),
            Scope::Guild => self.guild_id.as_ref().map(|guild_id| {
                format!(
                    "{}/applications/{}/guilds/{}/commands",
                    API_PREFIX, self.application_id, guild_id
                )
            }),
        }
    }

    /// Performs a single authenticated request and buffers the whole response.
    ///
    /// The body is parsed as JSON if possible, otherwise kept as text. No retry and no
    /// timeout beyond the transport defaults. List and delete never send a request body.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Api` on transport failure and `AppError::JsonParse` if `body`
    /// cannot be serialized. HTTP error statuses are not errors here.
    pub async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<HttpResponse> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header(AUTHORIZATION, format!("Bot {}", self.bot_token))
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;

        let data = if text.is_empty() {
            ResponseBody::Empty
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => ResponseBody::Json(value),
                Err(_) => ResponseBody::Text(text),
            }
        };
        debug!("{} responded with {}", url, status);

        Ok(HttpResponse {
            status,
            headers,
            data,
        })
    }
}

impl CommandApi for DiscordClient {
    async fn list_commands(&self, scope: Scope) -> ListOutcome {
        let Some(path) = self.commands_path(scope) else {
            warn!("Refusing to list {} commands: no guild id configured", scope);
            return ListOutcome::Failed("aucun ID de serveur configuré".to_string());
        };

        let response = match self.send(Method::GET, &path, None).await {
            Ok(response) => response,
            Err(e) => {
                error!("Error fetching {} commands: {}", scope, e);
                return ListOutcome::Failed(format!("erreur de requête: {}", e));
            },
        };

        if response.status != StatusCode::OK {
            log_rate_limit(&response);
            error!(
                "Listing {} commands failed with status {}: {:?}",
                scope, response.status, response.data
            );
            if response.status == StatusCode::UNAUTHORIZED {
                error!("Received 401. Check the bot token.");
            } else if response.status == StatusCode::NOT_FOUND {
                error!("Received 404. Check the application id and guild id.");
            }
            return ListOutcome::Failed(format!("code HTTP {}", response.status.as_u16()));
        }

        match response.data {
            ResponseBody::Empty => ListOutcome::Fetched(Vec::new()),
            ResponseBody::Json(value) => match serde_json::from_value::<Vec<CommandRecord>>(value) {
                Ok(commands) => {
                    info!("Fetched {} {} commands", commands.len(), scope);
                    ListOutcome::Fetched(commands)
                },
                Err(e) => {
                    error!("Unexpected {} commands payload: {}", scope, e);
                    ListOutcome::Failed(format!("réponse inattendue: {}", e))
                },
            },
            ResponseBody::Text(text) => {
                error!("Non-JSON {} commands payload: {}", scope, text);
                ListOutcome::Failed("réponse non JSON".to_string())
            },
        }
    }

    async fn delete_command(&self, scope: Scope, command_id: &str, command_name: &str) -> bool {
        let Some(path) = self.commands_path(scope) else {
            warn!(
                "Refusing to delete {} command {}: no guild id configured",
                scope, command_id
            );
            return false;
        };
        let path = format!("{}/{}", path, command_id);

        match self.send(Method::DELETE, &path, None).await {
            Ok(response)
                if response.status == StatusCode::OK
                    || response.status == StatusCode::NO_CONTENT =>
            {
                info!(
                    "Deleted {} command \"{}\" (ID: {})",
                    scope, command_name, command_id
                );
                true
            },
            Ok(response) => {
                log_rate_limit(&response);
                error!(
                    "Failed to delete {} command \"{}\" (ID: {}): HTTP {}",
                    scope, command_name, command_id, response.status
                );
                false
            },
            Err(e) => {
                error!(
                    "Error deleting {} command \"{}\" (ID: {}): {}",
                    scope, command_name, command_id, e
                );
                false
            },
        }
    }
}

/// Logs the retry delay Discord sends along with a 429 response.
fn log_rate_limit(response: &HttpResponse) {
    if response.status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");
        warn!("Rate limited by Discord, retry after {}s", retry_after);
    }
}
