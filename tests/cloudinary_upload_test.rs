use anyhow::Result;
use httpmock::prelude::*;
use std::collections::BTreeMap;
use std::io::Write;
use storefront::{CloudinaryClient, ImageHost, StoreError, StorefrontConfig};
use tempfile::NamedTempFile;

fn config_for(api_base: &str) -> Result<StorefrontConfig> {
    let config = StorefrontConfig::from_toml_str(&format!(
        r#"
[cdn]
cloud_name = "lumina"
api_key = "123456"
api_secret = "shh"
api_base = "{}"
timeout_seconds = 5
"#,
        api_base
    ))?;
    Ok(config)
}

fn image_fixture() -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".jpg").tempfile()?;
    file.write_all(b"fake-jpeg-bytes")?;
    Ok(file)
}

#[tokio::test]
async fn test_upload_posts_signed_multipart_form() -> Result<()> {
    let server = MockServer::start();
    let upload_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1_1/lumina/image/upload")
            .body_contains("fake-jpeg-bytes")
            .body_contains("products/lantern")
            .body_contains("alt=Festive lantern|sku=LN-01")
            .body_contains("name=\"signature\"")
            .body_contains("sha256");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "public_id": "products/lantern",
                "secure_url": "https://res.cloudinary.com/lumina/image/upload/v1700000000/products/lantern.jpg",
                "version": 1700000000u64,
                "width": 1200,
                "height": 800,
                "format": "jpg",
                "bytes": 15
            }));
    });

    let host = CloudinaryClient::new(&config_for(&server.base_url())?)?;
    let file = image_fixture()?;
    let mut metadata = BTreeMap::new();
    metadata.insert("sku".to_string(), "LN-01".to_string());
    metadata.insert("alt".to_string(), "Festive lantern".to_string());

    let uploaded = host
        .upload(file.path(), "products/lantern", &metadata)
        .await?;

    upload_mock.assert();
    assert_eq!(uploaded.public_id, "products/lantern");
    assert_eq!(uploaded.version, 1700000000);
    assert_eq!(uploaded.width, Some(1200));
    assert!(uploaded.secure_url.ends_with("products/lantern.jpg"));
    Ok(())
}

#[tokio::test]
async fn test_rejection_is_propagated_without_retry() -> Result<()> {
    let server = MockServer::start();
    let upload_mock = server.mock(|when, then| {
        when.method(POST).path("/v1_1/lumina/image/upload");
        then.status(400)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "error": { "message": "Invalid image file" }
            }));
    });

    let host = CloudinaryClient::new(&config_for(&server.base_url())?)?;
    let file = image_fixture()?;

    let result = host
        .upload(file.path(), "products/broken", &BTreeMap::new())
        .await;

    upload_mock.assert_hits(1);
    match result {
        Err(StoreError::UploadRejected { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid image file");
        }
        other => panic!("expected upload rejection, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_server_error_with_plain_body_keeps_body_as_message() -> Result<()> {
    let server = MockServer::start();
    let upload_mock = server.mock(|when, then| {
        when.method(POST).path("/v1_1/lumina/image/upload");
        then.status(503).body("upstream unavailable");
    });

    let host = CloudinaryClient::new(&config_for(&server.base_url())?)?;
    let file = image_fixture()?;

    let err = host
        .upload(file.path(), "products/lantern", &BTreeMap::new())
        .await
        .unwrap_err();

    upload_mock.assert_hits(1);
    assert!(matches!(
        err,
        StoreError::UploadRejected { status: 503, ref message } if message == "upstream unavailable"
    ));
    Ok(())
}

#[tokio::test]
async fn test_malformed_success_body_is_a_serialization_error() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1_1/lumina/image/upload");
        then.status(200).body("not json");
    });

    let host = CloudinaryClient::new(&config_for(&server.base_url())?)?;
    let file = image_fixture()?;

    let err = host
        .upload(file.path(), "products/lantern", &BTreeMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::SerializationError(_)));
    Ok(())
}

#[tokio::test]
async fn test_missing_file_fails_before_any_request() -> Result<()> {
    let server = MockServer::start();
    let upload_mock = server.mock(|when, then| {
        when.method(POST).path("/v1_1/lumina/image/upload");
        then.status(200);
    });

    let host = CloudinaryClient::new(&config_for(&server.base_url())?)?;
    let err = host
        .upload(
            std::path::Path::new("/definitely/not/here.jpg"),
            "products/ghost",
            &BTreeMap::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::IoError(_)));
    upload_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_unreachable_host_surfaces_transport_error() -> Result<()> {
    let host = CloudinaryClient::new(&config_for("http://127.0.0.1:1")?)?;
    let file = image_fixture()?;

    let err = host
        .upload(file.path(), "products/lantern", &BTreeMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ApiError(_)));
    Ok(())
}
