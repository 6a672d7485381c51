mod common;

use common::*;
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_presign(server: &MockServer, expected: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/content"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "presignedUrl": format!("{}/bucket/upload-1?sig=abc", server.uri()),
            "contentKey": "content-key-1"
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn in_memory_upload_returns_content_key() {
    let server = MockServer::start().await;
    let media = b"<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>".to_vec();

    mount_presign(
        &server,
        json!({"fileName": "my article.svg", "fileSize": media.len(), "contentType": "image/svg+xml"}),
    )
    .await;

    Mock::given(method("PUT"))
        .and(path("/bucket/upload-1"))
        .and(header("content-type", "image/svg+xml"))
        .and(header("content-disposition", "attachment; filename=my%20article.svg"))
        .and(header("content-length", media.len().to_string().as_str()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let handle = client(&server)
        .upload_in_memory("my article.svg", media.len() as u64, "image/svg+xml", media.clone())
        .await
        .unwrap();
    assert_eq!(handle.content_key, "content-key-1");

    let requests = server.received_requests().await.unwrap();
    let put = requests.iter().find(|r| r.method.as_str() == "PUT").unwrap();
    assert_eq!(put.body, media);
    // presigned URLs carry their own authorization
    assert!(put.headers.get("authorization").is_none());
}

#[tokio::test]
async fn file_upload_uses_file_name_and_size() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("photo.jpg");
    let mut file = std::fs::File::create(&file_path).unwrap();
    file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]).unwrap();
    drop(file);

    mount_presign(
        &server,
        json!({"fileName": "photo.jpg", "fileSize": 5, "contentType": "image/jpeg"}),
    )
    .await;

    Mock::given(method("PUT"))
        .and(path("/bucket/upload-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let handle = client(&server)
        .upload_file(&file_path, "image/jpeg")
        .await
        .unwrap();
    assert_eq!(handle.content_key, "content-key-1");
}

#[tokio::test]
async fn failed_put_propagates() {
    let server = MockServer::start().await;

    mount_presign(
        &server,
        json!({"fileName": "a.txt", "fileSize": 1, "contentType": "text/plain"}),
    )
    .await;

    Mock::given(method("PUT"))
        .and(path("/bucket/upload-1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("signature expired"))
        .mount(&server)
        .await;

    let err = client(&server)
        .upload_in_memory("a.txt", 1, "text/plain", b"a".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn failed_presign_skips_put() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/content"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client(&server)
        .upload_in_memory("a.txt", 1, "text/plain", b"a".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn size_mismatch_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    let client = client(&server);

    let short = client
        .upload_in_memory("a.txt", 3, "text/plain", b"hello world".to_vec())
        .await
        .unwrap_err();
    assert!(short.is_config());

    let long = client
        .upload_in_memory("b.txt", 50, "text/plain", b"hi".to_vec())
        .await
        .unwrap_err();
    assert!(long.is_config());
    assert!(long.to_string().contains("b.txt"));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let err = client(&server)
        .upload_file(&dir.path().join("nope.bin"), "application/octet-stream")
        .await
        .unwrap_err();
    assert!(matches!(err, starhive_client::ClientError::Io(_)));
}
