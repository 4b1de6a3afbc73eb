mod common;

use common::TempRoot;
use staticd::files::{confine, resolve, Confined, Resolution};
use staticd::http::response::StatusCode;

#[tokio::test]
async fn test_existing_file_is_found() {
    let root = TempRoot::new("resolve-found");
    let file = root.write("index.html", b"hello");

    let resolution = resolve(root.path(), &file).await;

    assert_eq!(resolution.status(), StatusCode::OK);
    match resolution {
        Resolution::Found { contents, content_type } => {
            assert_eq!(&contents[..], b"hello");
            assert_eq!(content_type, "text/html; charset=utf-8");
        }
        other => panic!("expected Found, got {:?}", other),
    }
}

#[tokio::test]
async fn test_found_keeps_exact_bytes() {
    let root = TempRoot::new("resolve-bytes");
    let data: Vec<u8> = (0..=255u8).cycle().take(5000).collect();
    let file = root.write("blob.bin", &data);

    match resolve(root.path(), &file).await {
        Resolution::Found { contents, .. } => assert_eq!(contents.to_vec(), data),
        other => panic!("expected Found, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_extension_has_empty_content_type() {
    let root = TempRoot::new("resolve-noext");
    let file = root.write("LICENSE", b"MIT");

    match resolve(root.path(), &file).await {
        Resolution::Found { content_type, .. } => assert_eq!(content_type, ""),
        other => panic!("expected Found, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let root = TempRoot::new("resolve-missing");

    let resolution = resolve(root.path(), &root.path().join("missing.txt")).await;

    assert_eq!(resolution, Resolution::NotFound);
    assert_eq!(resolution.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_directory_is_read_error() {
    let root = TempRoot::new("resolve-dir");
    let dir = root.mkdir("sub");

    let resolution = resolve(root.path(), &dir).await;

    assert_eq!(resolution, Resolution::ReadError);
    assert_eq!(resolution.status(), StatusCode::BAD_GATEWAY);
}

#[cfg(unix)]
#[tokio::test]
async fn test_file_used_as_directory_is_stat_error() {
    let root = TempRoot::new("resolve-notdir");
    let file = root.write("plain.txt", b"x");

    let resolution = resolve(root.path(), &file.join("child")).await;

    assert_eq!(resolution, Resolution::StatError);
    assert_eq!(resolution.status(), StatusCode::BAD_GATEWAY);
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlink_out_of_root_is_forbidden() {
    let outside = TempRoot::new("resolve-outside");
    let secret = outside.write("secret.txt", b"top secret");
    let root = TempRoot::new("resolve-link");
    let link = root.path().join("leak.txt");
    std::os::unix::fs::symlink(&secret, &link).unwrap();

    let resolution = resolve(root.path(), &link).await;

    assert_eq!(resolution, Resolution::Forbidden);
    assert_eq!(resolution.status(), StatusCode::FORBIDDEN);
}

#[test]
fn test_confine_joins_under_root() {
    let root = TempRoot::new("confine");

    assert_eq!(
        confine(root.path(), "/docs/a.txt"),
        Confined::Inside(root.path().join("docs").join("a.txt"))
    );
    assert_eq!(confine(root.path(), "/docs/../../x"), Confined::Outside);
}

#[test]
fn test_resolution_responses() {
    let cases = [
        (Resolution::NotFound, 404, &b"File not found"[..]),
        (Resolution::ReadError, 502, &b"File read error"[..]),
        (Resolution::StatError, 502, &b"System error"[..]),
        (Resolution::Forbidden, 403, &b"Forbidden"[..]),
    ];

    for (resolution, code, body) in cases {
        let response = resolution.into_response();
        assert_eq!(response.status.as_u16(), code);
        assert_eq!(&response.body[..], body);
    }
}
