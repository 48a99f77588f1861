use mockito::Server;

use stripscan::config::ReleaseConfig;
use stripscan::release::{GitHubReleaseSource, Platform, UpdateStatus, check_update, resolve};

const LATEST_PATH: &str = "/repos/webcomics/dosage/releases/latest";

const RELEASE_BODY: &str = r#"{
    "tag_name": "2.1.0",
    "tarball_url": "https://api.github.com/repos/webcomics/dosage/tarball/2.1.0",
    "assets": [
        {
            "content_type": "application/x-msdos-program",
            "browser_download_url": "https://example.com/dosage-2.1.0.exe"
        }
    ]
}"#;

fn source_for(server: &Server) -> GitHubReleaseSource {
    GitHubReleaseSource::new(&format!("{}{}", server.url(), LATEST_PATH)).unwrap()
}

#[tokio::test]
async fn check_update_offers_tarball_when_behind() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RELEASE_BODY)
        .create_async()
        .await;

    let status = check_update(
        &source_for(&server),
        "2.0.0",
        Platform::Other,
        &ReleaseConfig::default(),
    )
    .await;

    mock.assert_async().await;
    assert_eq!(
        status,
        UpdateStatus::UpdateAvailable {
            version: "2.1.0".to_string(),
            asset_url: Some(
                "https://api.github.com/repos/webcomics/dosage/tarball/2.1.0".to_string()
            ),
        }
    );
}

#[tokio::test]
async fn check_update_offers_installer_on_windows() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RELEASE_BODY)
        .create_async()
        .await;

    let status = check_update(
        &source_for(&server),
        "1.9.9",
        Platform::Windows,
        &ReleaseConfig::default(),
    )
    .await;

    mock.assert_async().await;
    assert_eq!(
        status,
        UpdateStatus::UpdateAvailable {
            version: "2.1.0".to_string(),
            asset_url: Some("https://example.com/dosage-2.1.0.exe".to_string()),
        }
    );
}

#[tokio::test]
async fn development_build_is_ahead_of_remote() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RELEASE_BODY)
        .create_async()
        .await;

    let status = resolve(
        &source_for(&server),
        "2.3.0.dev0",
        Platform::Windows,
        &ReleaseConfig::default(),
    )
    .await
    .unwrap();

    mock.assert_async().await;
    assert_eq!(
        status,
        UpdateStatus::AheadOfRemote {
            version: "2.1.0".to_string()
        }
    );
}

#[tokio::test]
async fn server_error_is_reported_as_failure() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST_PATH)
        .with_status(500)
        .expect(2)
        .create_async()
        .await;
    let source = source_for(&server);

    let result = resolve(&source, "2.0.0", Platform::Other, &ReleaseConfig::default()).await;
    let status = check_update(&source, "2.0.0", Platform::Other, &ReleaseConfig::default()).await;

    mock.assert_async().await;
    assert!(result.is_err());
    assert!(matches!(status, UpdateStatus::Unknown(reason) if reason.contains("500")));
}
