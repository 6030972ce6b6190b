//! Shared harness for HTTP API integration tests.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use deskfolio_core::config::AppConfig;

const MULTIPART_BOUNDARY: &str = "deskfolio-test-boundary";

/// An in-process application instance backed by temp storage.
pub struct TestApp {
    router: Router,
    _tmp: tempfile::TempDir,
}

impl TestApp {
    /// Build a fresh app with its own database and blob directory.
    pub async fn spawn() -> Self {
        let tmp = tempfile::tempdir().expect("tempdir");

        let mut config = AppConfig::default();
        config.database.url = format!("sqlite://{}/test.db", tmp.path().display());
        config.storage.root_path = tmp.path().join("blobs").display().to_string();

        let state = deskfolio_api::app::build_state(config)
            .await
            .expect("state init");
        let router = deskfolio_api::build_app(state);

        Self { router, _tmp: tmp }
    }

    /// Issue a request with an optional JSON body.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("request");

        self.send(request).await
    }

    /// Upload a file via multipart form data.
    pub async fn upload(&self, parent_path: &str, file_name: &str, data: &[u8]) -> (StatusCode, Value) {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"path\"\r\n\r\n\
                 {parent_path}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

        let request = Request::builder()
            .method("POST")
            .uri("/api/filesystem/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request");

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("response");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, json)
    }
}
