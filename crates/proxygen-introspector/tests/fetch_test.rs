//! Model retrieval tests against a mock service and saved documents.

use proxygen_introspector::{
    FileModelFetcher, HttpModelFetcher, ModelFetcher, ModelRequest, fetch_module,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn model_document() -> serde_json::Value {
    json!({
        "modules": {
            "app": {
                "rootPath": "app",
                "remoteServiceName": "Default",
                "controllers": {
                    "Acme.BookStore.Books.BookController": {
                        "controllerName": "Book",
                        "type": "Acme.BookStore.Books.BookController",
                        "interfaces": [{"type": "Acme.BookStore.Books.IBookAppService"}],
                        "actions": {}
                    }
                }
            },
            "identity": {"rootPath": "identity", "remoteServiceName": "AbpIdentity"}
        },
        "types": {
            "Acme.BookStore.Books.BookDto": {"properties": []}
        }
    })
}

async fn mock_service(include_types: &str, status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/abp/api-definition"))
        .and(query_param("includeTypes", include_types))
        .respond_with(ResponseTemplate::new(status).set_body_json(model_document()))
        .expect(1)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_http_fetch_model() {
    let server = mock_service("true", 200).await;
    let fetcher = HttpModelFetcher::new(server.uri()).unwrap();

    let model = fetcher.fetch(&ModelRequest::new("app", true)).await.unwrap();

    assert_eq!(model.modules.len(), 2);
    assert_eq!(model.controllers().count(), 1);
    assert!(model.types.contains_key("Acme.BookStore.Books.BookDto"));
}

#[tokio::test]
async fn test_http_fetch_trailing_slash() {
    let server = mock_service("false", 200).await;
    let fetcher = HttpModelFetcher::new(format!("{}/", server.uri())).unwrap();

    let model = fetcher.fetch(&ModelRequest::new("app", false)).await;
    assert!(model.is_ok());
}

#[tokio::test]
async fn test_http_fetch_module_selects() {
    let server = mock_service("true", 200).await;
    let fetcher = HttpModelFetcher::new(server.uri()).unwrap();

    let model = fetch_module(&fetcher, &ModelRequest::new("Identity", true))
        .await
        .unwrap();

    assert_eq!(model.modules.keys().collect::<Vec<_>>(), vec!["identity"]);
    assert_eq!(model.types.len(), 1);
}

#[tokio::test]
async fn test_http_fetch_unknown_module() {
    let server = mock_service("true", 200).await;
    let fetcher = HttpModelFetcher::new(server.uri()).unwrap();

    let err = fetch_module(&fetcher, &ModelRequest::new("saas", true))
        .await
        .unwrap_err();
    assert!(err.is_usage_error());
}

#[tokio::test]
async fn test_http_error_status_is_fetch_error() {
    let server = mock_service("true", 500).await;
    let fetcher = HttpModelFetcher::new(server.uri()).unwrap();

    let err = fetcher
        .fetch(&ModelRequest::new("app", true))
        .await
        .unwrap_err();
    assert!(err.is_fetch_error());
    assert!(err.to_string().contains("/api/abp/api-definition"));
}

#[tokio::test]
async fn test_http_malformed_body_is_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/abp/api-definition"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;
    let fetcher = HttpModelFetcher::new(server.uri()).unwrap();

    let err = fetcher
        .fetch(&ModelRequest::new("app", true))
        .await
        .unwrap_err();
    assert!(err.is_serialization_error());
}

#[tokio::test]
async fn test_http_unreachable_is_fetch_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let fetcher = HttpModelFetcher::new(uri).unwrap();
    let err = fetcher
        .fetch(&ModelRequest::new("app", true))
        .await
        .unwrap_err();
    assert!(err.is_fetch_error());
}

#[tokio::test]
async fn test_file_fetch_model() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("app-generate-proxy.json");
    std::fs::write(&file, model_document().to_string()).unwrap();

    let fetcher = FileModelFetcher::new(&file);
    let model = fetcher.fetch(&ModelRequest::new("app", true)).await.unwrap();

    assert_eq!(model.modules.len(), 2);
    assert_eq!(model.types.len(), 1);
    assert_eq!(fetcher.location(), file.display().to_string());
}

#[tokio::test]
async fn test_file_fetch_without_types() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("model.json");
    std::fs::write(&file, model_document().to_string()).unwrap();

    let model = FileModelFetcher::new(&file)
        .fetch(&ModelRequest::new("app", false))
        .await
        .unwrap();

    assert!(model.types.is_empty());
    assert_eq!(model.controllers().count(), 1);
}

#[tokio::test]
async fn test_file_missing_is_fetch_error() {
    let dir = TempDir::new().unwrap();
    let fetcher = FileModelFetcher::new(dir.path().join("missing.json"));

    let err = fetcher
        .fetch(&ModelRequest::new("app", true))
        .await
        .unwrap_err();
    assert!(err.is_fetch_error());
}
