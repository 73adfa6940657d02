//! Tests for the reqwest transport against a local axum stub

use super::common::*;
use axum::{extract::Multipart, http::StatusCode, response::Json, routing::post, Router};
use minelab_sdk::validate::{validate_cluster, validate_correlation};
use minelab_sdk::{
    AnalysisKind, AnalysisWorkflow, ClusterForm, CorrelationAnalysis, CorrelationForm,
    EndpointTable, FileHandle, HttpTransport, RequestPayload, Transport, TransportError,
    WorkflowState,
};
use serde_json::{json, Map, Value};
use std::time::Duration;

async fn correlation(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({"correlation": 0.8234, "echo": body}))
}

async fn cluster(mut multipart: Multipart) -> Json<Value> {
    let mut received = Map::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let bytes = field.bytes().await.unwrap();
                received.insert(name, json!({"file_name": file_name, "size": bytes.len()}));
            }
            None => {
                received.insert(name, json!(field.text().await.unwrap()));
            }
        }
    }
    Json(json!({
        "points": [[1, 2], [3, 4], [5, 6]],
        "labels": [0, 1, 0],
        "centroids": [[3, 4], [3, 4]],
        "received": received
    }))
}

async fn failing() -> (StatusCode, Json<Value>) {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "bad data"})))
}

async fn garbled() -> &'static str {
    "<html>oops</html>"
}

/// Start the stub on an ephemeral port and return its base URL
async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/api/correlation/", post(correlation))
        .route("/api/kmeans-clustering/", post(cluster))
        .route("/api/apriori/", post(failing))
        .route("/api/decision_tree/", post(garbled));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn transport(base_url: &str) -> HttpTransport {
    HttpTransport::new(base_url, Duration::from_secs(5)).unwrap()
}

fn correlation_payload() -> RequestPayload {
    validate_correlation(&CorrelationForm {
        first: "175, 133, 185".into(),
        second: "65, 67, 71".into(),
    })
    .unwrap()
    .into()
}

#[tokio::test]
async fn test_json_body_is_posted() {
    let base = spawn_stub().await;
    let endpoint = EndpointTable::default().endpoint(AnalysisKind::Correlation);

    let body = transport(&base)
        .send(&endpoint, &correlation_payload())
        .await
        .unwrap();

    assert_eq!(body["echo"], json!({"a": [175.0, 133.0, 185.0], "b": [65.0, 67.0, 71.0]}));
}

#[tokio::test]
async fn test_workflow_over_http_reaches_success() {
    let base = spawn_stub().await;
    let http = transport(&base);
    let mut wf = AnalysisWorkflow::<CorrelationAnalysis>::new();
    let payload = validate_correlation(&CorrelationForm {
        first: "1, 2, 3".into(),
        second: String::new(),
    })
    .unwrap();

    wf.run(&http, &EndpointTable::default(), payload).await;

    match wf.state() {
        WorkflowState::Success(result) => assert_eq!(result.coefficient, Some(0.8234)),
        other => panic!("unexpected state {:?}", other),
    }
}

#[tokio::test]
async fn test_multipart_carries_file_and_fields() {
    let base = spawn_stub().await;
    let (_dir, path) = upload_fixture("points.xlsx");
    let payload: RequestPayload = validate_cluster(&ClusterForm {
        file: Some(FileHandle::new(&path)),
        n_clusters: 4,
    })
    .unwrap()
    .into();
    let endpoint = EndpointTable::default().endpoint(AnalysisKind::Cluster);

    let body = transport(&base).send(&endpoint, &payload).await.unwrap();

    let expected_size = std::fs::metadata(&path).unwrap().len();
    assert_eq!(body["received"]["file"]["file_name"], "points.xlsx");
    assert_eq!(body["received"]["file"]["size"], expected_size);
    assert_eq!(body["received"]["n_clusters"], "4");
}

#[tokio::test]
async fn test_non_success_status_is_http_error() {
    let base = spawn_stub().await;
    let endpoint = EndpointTable::default().endpoint(AnalysisKind::Association);

    let err = transport(&base)
        .send(&endpoint, &correlation_payload())
        .await
        .unwrap_err();

    match &err {
        TransportError::Http { status, body } => {
            assert_eq!(*status, 500);
            assert!(body.contains("bad data"));
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(err.reason(), "bad data");
}

#[tokio::test]
async fn test_unparsable_success_body_is_decode_error() {
    let base = spawn_stub().await;
    let endpoint = EndpointTable::default().endpoint(AnalysisKind::Classification);

    let err = transport(&base)
        .send(&endpoint, &correlation_payload())
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Decode(_)));
}

#[tokio::test]
async fn test_missing_upload_is_attachment_error() {
    let payload: RequestPayload = validate_cluster(&ClusterForm {
        file: Some(FileHandle::new("/definitely/not/here.xlsx")),
        n_clusters: 3,
    })
    .unwrap()
    .into();
    let endpoint = EndpointTable::default().endpoint(AnalysisKind::Cluster);

    let err = transport("http://127.0.0.1:9")
        .send(&endpoint, &payload)
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Attachment { .. }));
    assert!(err.reason().contains("here.xlsx"));
}

#[tokio::test]
async fn test_refused_connection_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = EndpointTable::default().endpoint(AnalysisKind::Correlation);
    let err = transport(&format!("http://{}", addr))
        .send(&endpoint, &correlation_payload())
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Network(_)));
}
