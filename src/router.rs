//! Maps a gateway request onto a [`Service`] operation and renders the result.
//!
//! Nothing here knows about HTTP framing, the binary adapts [`Request`] and
//! [`Response`] to its server of choice.

use std::collections::HashMap;

use http::StatusCode;

use crate::render::Renderer;
use crate::service::{seed::SeedSource, storage::Storage, Error, Service, ServiceResult};

pub const PARAM_GROUP: &str = "grupo";
pub const PARAM_ACTION: &str = "acao";
pub const PARAM_WHO_AM_I: &str = "quem-sou";
pub const PARAM_KEY: &str = "chave";

pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `sortear`
    Draw,
    /// `gerar-links`
    Links,
    /// `ver-amigo`
    Reveal,
    /// anything else, including no action at all
    Index,
}

impl Action {
    pub fn parse(action: Option<&str>) -> Self {
        match action {
            Some("sortear") => Self::Draw,
            Some("gerar-links") => Self::Links,
            Some(crate::link::REVEAL_ACTION) => Self::Reveal,
            _ => Self::Index,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Links => "generate links",
            Self::Reveal => "reveal friend",
            Self::Index => "show group",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Query string parameters.
    pub params: HashMap<String, String>,
    /// Public URL reveal links point to, without trailing slash.
    pub base_url: String,
}

impl Request {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            params: HashMap::new(),
            base_url: base_url.into(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Parameter value, with empty values treated as absent.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl Response {
    fn ok(content_type: &'static str, body: String) -> Self {
        Self {
            status: StatusCode::OK,
            content_type,
            body,
        }
    }

    fn bad_request(body: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            content_type: CONTENT_TYPE_TEXT,
            body,
        }
    }
}

pub struct Router<S, R, P>
where
    S: Storage,
    R: SeedSource,
    P: Renderer,
{
    service: Service<S, R>,
    pages: P,
}

impl<S, R, P> Router<S, R, P>
where
    S: Storage,
    R: SeedSource,
    P: Renderer,
{
    pub fn new(service: Service<S, R>, pages: P) -> Self {
        Self { service, pages }
    }

    pub fn service(&self) -> &Service<S, R> {
        &self.service
    }

    /// Handle one request. Every failure becomes a 400 with a plain text
    /// message, nothing is retried.
    pub async fn handle(&self, request: &Request) -> Response {
        let action = Action::parse(request.param(PARAM_ACTION));
        log::info!(
            "handling request: group={:?}, action={:?}",
            request.param(PARAM_GROUP),
            action
        );

        match self.dispatch(action, request).await {
            Ok(response) => response,
            Err(err) => {
                match &err {
                    Error::Storage(_) | Error::Render(_) => {
                        log::error!("failed to {}: {}", action.describe(), err)
                    }
                    _ => log::info!("failed to {}: {}", action.describe(), err),
                }
                Response::bad_request(format!("failed to {}: {}", action.describe(), err))
            }
        }
    }

    fn required<'r>(request: &'r Request, name: &'static str) -> ServiceResult<&'r str, S> {
        request.param(name).ok_or(Error::MissingParameter(name))
    }

    async fn dispatch(&self, action: Action, request: &Request) -> ServiceResult<Response, S> {
        let group_id = Self::required(request, PARAM_GROUP)?;

        let response = match action {
            Action::Draw => {
                let grants = self.service.draw(group_id).await?;
                let body = self.pages.links(&request.base_url, group_id, &grants)?;
                Response::ok(CONTENT_TYPE_TEXT, body)
            }
            Action::Links => {
                let grants = self.service.links(group_id).await?;
                let body = self.pages.links(&request.base_url, group_id, &grants)?;
                Response::ok(CONTENT_TYPE_TEXT, body)
            }
            Action::Reveal => {
                let participant = Self::required(request, PARAM_WHO_AM_I)?;
                let token = Self::required(request, PARAM_KEY)?;
                let friend = self.service.reveal(group_id, participant, token).await?;
                Response::ok(CONTENT_TYPE_HTML, self.pages.reveal(participant, &friend)?)
            }
            Action::Index => {
                let group = self.service.group(group_id).await?;
                Response::ok(CONTENT_TYPE_HTML, self.pages.index(&group)?)
            }
        };

        Ok(response)
    }
}
