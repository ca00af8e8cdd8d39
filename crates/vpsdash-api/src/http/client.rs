// HTTP backend transport
//
// Wraps `reqwest::Client` with base-URL joining, bearer-token injection,
// status-code mapping and `{ code, message, data }` envelope unwrapping.
// Endpoint methods live in sibling files and only ever see decoded payloads.

use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::SessionSlot;
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::Envelope;

const BODY_PREVIEW_CHARS: usize = 200;

/// Client for a deployed dashboard backend.
///
/// `base_url` is the API root, e.g. `https://panel.example.com/api`.
/// Every path handed to the request helpers is relative to it.
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: Url,
    timeout_secs: u64,
    pub(super) session: SessionSlot,
}

impl HttpBackend {
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, transport.timeout_secs()))
    }

    /// Build on a pre-configured `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, timeout_secs: u64) -> Self {
        Self {
            http,
            base_url,
            timeout_secs,
            session: SessionSlot::new(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether a bearer token is currently held.
    pub fn has_session(&self) -> bool {
        self.session.is_active()
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/{path}`, tolerant of stray slashes on either side.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("GET {}", url);

        let builder = self.apply_auth(self.http.get(url).query(query));
        let resp = builder.send().await.map_err(|e| self.map_send_error(e))?;

        self.parse_envelope(path, resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("POST {}", url);

        let builder = self.apply_auth(self.http.post(url).json(body));
        let resp = builder.send().await.map_err(|e| self.map_send_error(e))?;

        self.parse_envelope(path, resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("PUT {}", url);

        let builder = self.apply_auth(self.http.put(url).json(body));
        let resp = builder.send().await.map_err(|e| self.map_send_error(e))?;

        self.parse_envelope(path, resp).await
    }

    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.bearer() {
            Some(value) => builder.header(AUTHORIZATION, value),
            None => builder,
        }
    }

    fn map_send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }

    /// Map the HTTP status, then unwrap the envelope.
    ///
    /// The body must be a JSON object whose `code` is 0 or 200. When it
    /// carries no `data`, the envelope object itself is decoded as the
    /// payload (`{ "code": 0, "message": "ok" }` as an acknowledgement).
    async fn parse_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        match status {
            StatusCode::UNAUTHORIZED => {
                self.session.clear();
                return Err(Error::SessionExpired);
            }
            StatusCode::FORBIDDEN => return Err(Error::Forbidden),
            StatusCode::NOT_FOUND => {
                return Err(Error::NotFound {
                    path: path.to_owned(),
                });
            }
            s if s.is_server_error() => {
                return Err(Error::Server { status: s.as_u16() });
            }
            s if !s.is_success() => {
                let body = resp.text().await.unwrap_or_default();
                return Err(Error::Rejected {
                    message: format!("HTTP {s}: {}", preview(&body)),
                    code: None,
                });
            }
            _ => {}
        }

        let body = resp.text().await.map_err(|e| self.map_send_error(e))?;
        trace!(body = %preview(&body), "response body");

        let envelope: Envelope = serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body: body.clone(),
        })?;

        if !envelope.is_success() {
            return Err(Error::Rejected {
                message: envelope
                    .message
                    .unwrap_or_else(|| match envelope.code {
                        Some(code) => format!("code={code}"),
                        None => "response carried no status code".into(),
                    }),
                code: envelope.code,
            });
        }

        let decoded = match envelope.data {
            Some(data) => serde_json::from_value(data),
            None => serde_json::from_str(&body),
        };
        decoded.map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
