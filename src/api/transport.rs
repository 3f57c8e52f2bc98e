use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::api::error::ApiError;

const USER_AGENT: &str = concat!("provadmin/", env!("CARGO_PKG_VERSION"));

/// Name of the file non-GET requests are recorded to in replay mode
pub const REPLAY_LOG: &str = "requests.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A request relative to the API base URL
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: &str, body: serde_json::Value) -> Self {
        Self { body: Some(body), ..Self::new(Method::Post, path) }
    }

    pub fn patch(path: &str, body: serde_json::Value) -> Self {
        Self { body: Some(body), ..Self::new(Method::Patch, path) }
    }

    pub fn delete(path: &str) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }
}

/// Raw response: status code and undecoded body
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can carry an API request to a response
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Live transport over HTTPS
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Patch => self.client.patch(&url),
            Method::Delete => self.client.delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        log::debug!("{} {} -> {}", request.method.as_str(), url, status);
        Ok(ApiResponse { status, body })
    }
}

/// Offline transport that answers from fixture files.
///
/// GET `/tenants/7` is served from `tenants_7.json`. With a query string the
/// transport first tries a specialised name, e.g.
/// `analytics_funnel.days-30.offset-30.json`, then the plain one.
/// Other methods are appended to `requests.log` and answered from
/// `<method>_<name>.json` when present, otherwise with 204.
///
/// A fixture whose top level holds `replay_status` is an envelope:
/// `{"replay_status": 409, "body": {...}}`.
pub struct ReplayTransport {
    dir: PathBuf,
}

impl ReplayTransport {
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_fixture(&self, candidates: &[String]) -> Result<Option<ApiResponse>, ApiError> {
        for name in candidates {
            let path = self.dir.join(name);
            if !path.exists() {
                continue;
            }
            log::debug!("Replaying fixture {}", path.display());
            let content = fs::read_to_string(&path)?;
            return unwrap_envelope(content).map(Some);
        }
        Ok(None)
    }

    fn record(&self, request: &ApiRequest) -> Result<(), ApiError> {
        let query: serde_json::Map<String, serde_json::Value> = request
            .query
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        let entry = serde_json::json!({
            "method": request.method.as_str(),
            "path": request.path,
            "query": query,
            "body": request.body,
        });
        let mut log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.dir.join(REPLAY_LOG))?;
        writeln!(log_file, "{}", entry)?;
        Ok(())
    }
}

impl Transport for ReplayTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let stem = fixture_stem(&request.path);

        if request.method == Method::Get {
            let mut candidates = Vec::new();
            if !request.query.is_empty() {
                candidates.push(format!("{}.{}.json", stem, query_suffix(&request.query)));
            }
            candidates.push(format!("{}.json", stem));

            return match self.read_fixture(&candidates)? {
                Some(response) => Ok(response),
                None => Ok(ApiResponse {
                    status: 404,
                    body: serde_json::json!({ "error": format!("no fixture for {}", request.path) }).to_string(),
                }),
            };
        }

        self.record(request)?;
        let candidate = format!("{}_{}.json", request.method.as_str().to_lowercase(), stem);
        match self.read_fixture(&[candidate])? {
            Some(response) => Ok(response),
            None => Ok(ApiResponse { status: 204, body: String::new() }),
        }
    }
}

/// `/analytics/funnel` -> `analytics_funnel`
fn fixture_stem(path: &str) -> String {
    let stem = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    if stem.is_empty() {
        "root".to_string()
    } else {
        stem
    }
}

/// Query pairs sorted by key: `days=30&offset=30` -> `days-30.offset-30`
fn query_suffix(query: &[(String, String)]) -> String {
    let mut pairs: Vec<&(String, String)> = query.iter().collect();
    pairs.sort();
    pairs
        .iter()
        .map(|(k, v)| format!("{}-{}", k, v))
        .collect::<Vec<_>>()
        .join(".")
}

fn unwrap_envelope(content: String) -> Result<ApiResponse, ApiError> {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(&content) {
        if let Some(status) = map.get("replay_status") {
            let status = status
                .as_u64()
                .and_then(|s| u16::try_from(s).ok())
                .filter(|s| (100..=599).contains(s))
                .ok_or_else(|| ApiError::Parse(format!("Invalid replay_status in fixture: {}", status)))?;
            let body = map
                .get("body")
                .map(|b| b.to_string())
                .unwrap_or_default();
            return Ok(ApiResponse { status, body });
        }
    }
    Ok(ApiResponse { status: 200, body: content })
}
