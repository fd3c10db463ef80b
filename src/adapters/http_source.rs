use crate::domain::model::RawFields;
use crate::domain::ports::CourseSource;
use crate::domain::services::display::NOT_AVAILABLE;
use crate::utils::error::{RankerError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Body of `GET {endpoint}/{course name}`. Every field may be missing.
#[derive(Debug, Deserialize)]
struct CoursePayload {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, alias = "median_grade")]
    grade: Option<String>,
    #[serde(default)]
    workload: Option<serde_json::Value>,
}

impl From<CoursePayload> for RawFields {
    fn from(payload: CoursePayload) -> Self {
        let workload = match payload.workload {
            Some(serde_json::Value::String(text)) => text,
            Some(serde_json::Value::Number(n)) => format!("{n}%"),
            _ => NOT_AVAILABLE.to_string(),
        };
        RawFields {
            title: payload.title,
            grade: payload.grade,
            workload,
        }
    }
}

/// Course source backed by a JSON course-guide API.
pub struct HttpCourseSource {
    client: Client,
    endpoint: Url,
}

impl HttpCourseSource {
    pub fn new(endpoint: &str, headers: &HashMap<String, String>, timeout_seconds: u64) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        if endpoint.cannot_be_a_base() {
            return Err(RankerError::InvalidConfigValueError {
                field: "source.endpoint".to_string(),
                value: endpoint.to_string(),
                reason: "Endpoint must be a hierarchical http(s) URL".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .default_headers(header_map(headers)?)
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn course_url(&self, name: &str) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name);
        }
        url
    }
}

fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let invalid = |reason: String| RankerError::InvalidConfigValueError {
            field: format!("source.headers.{key}"),
            value: key.clone(),
            reason,
        };
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let mut value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        value.set_sensitive(true);
        map.insert(name, value);
    }
    Ok(map)
}

#[async_trait]
impl CourseSource for HttpCourseSource {
    async fn fetch(&self, name: &str) -> Result<RawFields> {
        let url = self.course_url(name);
        tracing::debug!("Requesting course page: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("⚠️ {} returned {}, treating all fields as N/A", name, status);
            return Ok(RawFields::absent());
        }

        let body = response.bytes().await?;
        match serde_json::from_slice::<CoursePayload>(&body) {
            Ok(payload) => Ok(payload.into()),
            Err(e) => {
                tracing::warn!("⚠️ Could not decode course data for {}: {}", name, e);
                Ok(RawFields::absent())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn source(server: &MockServer) -> HttpCourseSource {
        HttpCourseSource::new(&server.url("/course"), &HashMap::new(), 5).unwrap()
    }

    #[test]
    fn course_names_become_one_path_segment() {
        let source = HttpCourseSource::new("https://atlas.example.edu/course/", &HashMap::new(), 5).unwrap();
        assert_eq!(
            source.course_url("EECS 281").as_str(),
            "https://atlas.example.edu/course/EECS%20281"
        );
        assert_eq!(
            source.course_url("A/B 100").as_str(),
            "https://atlas.example.edu/course/A%2FB%20100"
        );
    }

    #[test]
    fn rejects_non_hierarchical_endpoints() {
        assert!(HttpCourseSource::new("mailto:registrar@example.edu", &HashMap::new(), 5).is_err());
        assert!(HttpCourseSource::new("not a url", &HashMap::new(), 5).is_err());
    }

    #[tokio::test]
    async fn fetch_reads_course_fields() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path_contains("281");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "title": "Data Structures and Algorithms",
                    "median_grade": "A-",
                    "workload": "75%"
                }));
        });

        let fields = source(&server).fetch("EECS 281").await.unwrap();

        mock.assert();
        assert_eq!(fields, RawFields::new(Some("Data Structures and Algorithms"), Some("A-"), "75%"));
    }

    #[tokio::test]
    async fn numeric_workload_gets_percent_sign() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(200)
                .json_body(serde_json::json!({"title": "Calculus II", "workload": 42}));
        });

        let fields = source(&server).fetch("MATH 116").await.unwrap();
        assert_eq!(fields.workload, "42%");
        assert_eq!(fields.grade, None);
    }

    #[tokio::test]
    async fn missing_course_is_all_absent() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(404);
        });

        let fields = source(&server).fetch("EECS 999").await.unwrap();
        assert_eq!(fields, RawFields::absent());
    }

    #[tokio::test]
    async fn undecodable_body_is_all_absent() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(200).body("<html>login required</html>");
        });

        let fields = source(&server).fetch("EECS 281").await.unwrap();
        assert_eq!(fields, RawFields::absent());
    }

    #[tokio::test]
    async fn configured_headers_are_sent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).header("Authorization", "Bearer token-123");
            then.status(200).json_body(serde_json::json!({}));
        });

        let headers = HashMap::from([("Authorization".to_string(), "Bearer token-123".to_string())]);
        let source = HttpCourseSource::new(&server.url("/course"), &headers, 5).unwrap();
        source.fetch("EECS 281").await.unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn truncated_body_is_fatal() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await.unwrap();
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 200\r\n\r\n{\"title\": \"Data",
                )
                .await
                .unwrap();
            // Connection closes before the promised 200 bytes arrive.
        });

        let source = HttpCourseSource::new(&format!("http://{addr}/course"), &HashMap::new(), 5).unwrap();
        let result = source.fetch("EECS 281").await;
        server.await.unwrap();

        assert!(matches!(result, Err(RankerError::Http(_))));
    }

    #[tokio::test]
    async fn unreachable_source_is_fatal() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let source = HttpCourseSource::new("http://127.0.0.1:9/course", &HashMap::new(), 2).unwrap();
        assert!(matches!(
            source.fetch("EECS 281").await,
            Err(RankerError::Http(_))
        ));
    }
}
