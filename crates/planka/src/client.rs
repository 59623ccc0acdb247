//! HTTP client for the Planka REST API

use planka_core::credentials::Credentials;
use planka_core::planka::{
    assemble_hierarchy, CardMove, CreateCardPayload, FieldPatch, PlankaAccessTokenResponse,
    PlankaBoardResponse, PlankaCard, PlankaCardResponse, PlankaCommentsResponse,
    PlankaNotificationsResponse, PlankaProjectsResponse, PlankaUser, PlankaUserResponse, Project,
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Single-resource envelope returned by write endpoints
#[derive(Debug, Deserialize)]
struct ItemResponse<T> {
    item: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccessTokenRequest<'a> {
    email_or_username: &'a str,
    password: &'a str,
}

/// Check that an HTTP response was successful, returning a descriptive error otherwise.
pub async fn check_response(
    response: reqwest::Response,
    context: &str,
) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(eyre!("{context} [{status}]: {body}"))
}

/// Exchange a username and password for an access token
pub async fn authenticate(base_url: &str, username: &str, password: &str) -> Result<String> {
    let url = format!("{}/api/access-tokens", base_url.trim_end_matches('/'));
    log::debug!("POST {url}");

    let response = reqwest::Client::new()
        .post(&url)
        .json(&AccessTokenRequest {
            email_or_username: username,
            password,
        })
        .send()
        .await
        .map_err(|e| eyre!("Failed to connect to {}: {}", base_url, e))?;

    let response = check_response(response, "Failed to log in").await?;

    let token: PlankaAccessTokenResponse = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse access token response: {}", e))?;

    Ok(token.item)
}

/// Authenticated Planka client
#[derive(Debug, Clone)]
pub struct PlankaClient {
    http: reqwest::Client,
    base_url: String,
}

impl PlankaClient {
    /// Build a client that sends `token` as a bearer token on every request
    pub fn with_token(base_url: &str, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| eyre!("Invalid header value: {}", e))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Log in with stored credentials
    pub async fn connect(credentials: &Credentials) -> Result<Self> {
        let token =
            authenticate(&credentials.url, &credentials.username, &credentials.password).await?;
        Self::with_token(&credentials.url, &token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, context: &str) -> Result<T> {
        let url = self.url(path);
        log::debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| eyre!("{}: {}", context, e))?;

        let response = check_response(response, context).await?;

        response
            .json()
            .await
            .map_err(|e| eyre!("Failed to parse response from {}: {}", url, e))
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
        context: &str,
    ) -> Result<T> {
        let url = self.url(path);
        log::debug!("{method} {url}");

        let response = self
            .http
            .request(method, &url)
            .json(body)
            .send()
            .await
            .map_err(|e| eyre!("{}: {}", context, e))?;

        let response = check_response(response, context).await?;

        response
            .json()
            .await
            .map_err(|e| eyre!("Failed to parse response from {}: {}", url, e))
    }

    pub async fn fetch_me(&self) -> Result<PlankaUser> {
        let response: PlankaUserResponse = self
            .get_json("users/me", "Failed to fetch current user")
            .await?;
        Ok(response.item)
    }

    pub async fn fetch_projects(&self) -> Result<PlankaProjectsResponse> {
        self.get_json("projects", "Failed to fetch projects").await
    }

    pub async fn fetch_board(&self, board_id: &str) -> Result<PlankaBoardResponse> {
        self.get_json(
            &f!("boards/{}", urlencoding::encode(board_id)),
            "Failed to fetch board",
        )
        .await
    }

    /// Every accessible project with its boards, lists and cards
    ///
    /// Boards are fetched one after the other in the order the server listed them.
    pub async fn fetch_hierarchy(&self) -> Result<Vec<Project>> {
        let projects = self.fetch_projects().await?;

        let mut details = Vec::with_capacity(projects.included.boards.len());
        for board in &projects.included.boards {
            details.push(self.fetch_board(&board.id).await?);
        }

        Ok(assemble_hierarchy(projects, details))
    }

    /// Point lookup of a card
    ///
    /// Any failure, a 404 or a network error alike, reads as "not found".
    pub async fn fetch_card(&self, card_id: &str) -> Option<PlankaCardResponse> {
        match self
            .get_json(
                &f!("cards/{}", urlencoding::encode(card_id)),
                "Failed to fetch card",
            )
            .await
        {
            Ok(card) => Some(card),
            Err(e) => {
                log::debug!("Card {card_id} lookup failed: {e}");
                None
            }
        }
    }

    pub async fn fetch_card_comments(&self, card_id: &str) -> Result<PlankaCommentsResponse> {
        self.get_json(
            &f!("cards/{}/comments", urlencoding::encode(card_id)),
            "Failed to fetch comments",
        )
        .await
    }

    pub async fn create_card(
        &self,
        list_id: &str,
        payload: &CreateCardPayload,
    ) -> Result<PlankaCard> {
        let response: ItemResponse<PlankaCard> = self
            .send_json(
                reqwest::Method::POST,
                &f!("lists/{}/cards", urlencoding::encode(list_id)),
                payload,
                "Failed to create card",
            )
            .await?;
        Ok(response.item)
    }

    async fn patch_card<B: Serialize>(
        &self,
        card_id: &str,
        body: &B,
        context: &str,
    ) -> Result<PlankaCard> {
        let response: ItemResponse<PlankaCard> = self
            .send_json(
                reqwest::Method::PATCH,
                &f!("cards/{}", urlencoding::encode(card_id)),
                body,
                context,
            )
            .await?;
        Ok(response.item)
    }

    pub async fn delete_card(&self, card_id: &str) -> Result<()> {
        let url = self.url(&f!("cards/{}", urlencoding::encode(card_id)));
        log::debug!("DELETE {url}");

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| eyre!("Failed to delete card: {}", e))?;

        check_response(response, "Failed to delete card").await?;
        Ok(())
    }

    pub async fn fetch_notifications(&self) -> Result<PlankaNotificationsResponse> {
        self.get_json("notifications", "Failed to fetch notifications")
            .await
    }
}

/// Remote card writes used by `cards update`
#[allow(async_fn_in_trait)]
pub trait CardWriter {
    async fn move_card(&self, card_id: &str, movement: &CardMove) -> Result<PlankaCard>;

    async fn update_card(&self, card_id: &str, fields: &FieldPatch) -> Result<PlankaCard>;
}

impl CardWriter for PlankaClient {
    async fn move_card(&self, card_id: &str, movement: &CardMove) -> Result<PlankaCard> {
        self.patch_card(card_id, movement, "Failed to move card")
            .await
    }

    async fn update_card(&self, card_id: &str, fields: &FieldPatch) -> Result<PlankaCard> {
        self.patch_card(card_id, fields, "Failed to update card")
            .await
    }
}
