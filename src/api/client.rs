use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::api::error::ApiError;
use crate::api::transport::{ApiRequest, ApiResponse, Transport};

/// Typed access to the platform API over any transport
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use provadmin::api::{ApiClient, HttpTransport};
/// use provadmin::models::Tenant;
///
/// let transport = HttpTransport::new("https://admin.example.com/api", None, Duration::from_secs(30)).unwrap();
/// let client = ApiClient::new(Box::new(transport));
/// let tenants: Vec<Tenant> = client.get_json("/tenants", &[]).unwrap();
/// ```
pub struct ApiClient {
    transport: Box<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    /// GET and decode a JSON body
    pub fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError> {
        let mut request = ApiRequest::get(path);
        for (key, value) in query {
            request = request.with_query(key, value);
        }
        let response = self.execute(&request)?;
        decode(&response)
    }

    /// POST a JSON body and decode the JSON reply
    pub fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let request = ApiRequest::post(path, encode(body)?);
        let response = self.execute(&request)?;
        decode(&response)
    }

    /// PATCH a JSON body; the reply body is ignored
    pub fn patch<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let request = ApiRequest::patch(path, encode(body)?);
        self.execute(&request)?;
        Ok(())
    }

    pub fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(&ApiRequest::delete(path))?;
        Ok(())
    }

    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let response = self.transport.send(request)?;
        if response.is_success() {
            return Ok(response);
        }

        log::debug!(
            "{} {} failed with status {}",
            request.method.as_str(),
            request.path,
            response.status
        );
        Err(match response.status {
            401 | 403 => ApiError::Unauthorized,
            404 => ApiError::NotFound(request.path.clone()),
            status => ApiError::Status {
                status,
                message: error_message(&response.body),
            },
        })
    }
}

fn encode<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Parse(e.to_string()))
}

fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Pull a readable message out of an error body.
/// The API uses either `{"error": ...}` or `{"message": ...}`.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(message) = value.get(key).and_then(|m| m.as_str()) {
                return message.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no details".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Answers every request with a canned response and remembers the requests
    struct CannedTransport {
        status: u16,
        body: String,
        seen: Rc<RefCell<Vec<ApiRequest>>>,
    }

    impl CannedTransport {
        fn new(status: u16, body: &str) -> Self {
            Self { status, body: body.to_string(), seen: Rc::new(RefCell::new(Vec::new())) }
        }
    }

    impl Transport for CannedTransport {
        fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
            self.seen.borrow_mut().push(request.clone());
            Ok(ApiResponse { status: self.status, body: self.body.clone() })
        }
    }

    fn client(status: u16, body: &str) -> ApiClient {
        ApiClient::new(Box::new(CannedTransport::new(status, body)))
    }

    #[test]
    fn test_get_json_decodes_body() {
        let value: serde_json::Value = client(200, r#"{"total": 3}"#).get_json("/x", &[]).unwrap();
        assert_eq!(value["total"], 3);
    }

    #[test]
    fn test_status_mapping() {
        let err = client(401, "").get_json::<serde_json::Value>("/tenants", &[]).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));

        let err = client(404, "").get_json::<serde_json::Value>("/tenants/4", &[]).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref p) if p == "/tenants/4"));

        let err = client(422, r#"{"message": "role is invalid"}"#)
            .patch("/admins/2", &serde_json::json!({"role": "root"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "API error 422: role is invalid");
    }

    #[test]
    fn test_undecodable_body_is_parse_error() {
        let err = client(200, "<html>").get_json::<serde_json::Value>("/x", &[]).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(r#"{"error": "boom"}"#), "boom");
        assert_eq!(error_message("  gateway timeout "), "gateway timeout");
        assert_eq!(error_message(""), "no details");
    }

    #[test]
    fn test_query_is_forwarded() {
        let transport = CannedTransport::new(200, "[]");
        let seen = Rc::clone(&transport.seen);
        let client = ApiClient::new(Box::new(transport));
        let _: Vec<serde_json::Value> = client
            .get_json("/tenants", &[("status", "active".to_string())])
            .unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].path, "/tenants");
        assert_eq!(seen[0].query, vec![("status".to_string(), "active".to_string())]);
    }
}
