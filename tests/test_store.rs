use courier::http::request::{Method, RequestBuilder};
use courier::http::response::StatusCode;
use courier::router::Router;
use courier::store::{FileStore, StoreError};

#[test]
fn test_resolve_rejects_traversal() {
    let store = FileStore::new("/srv/files");

    let names = ["", "../secret", "a/../../b", "/etc/passwd", "./a", "a/./b", "..", "a\\b", "a\0b"];
    for name in names {
        assert!(
            matches!(store.resolve(name), Err(StoreError::InvalidName(_))),
            "{name:?} should be rejected"
        );
    }
}

#[test]
fn test_resolve_joins_under_root() {
    let store = FileStore::new("/srv/files");

    assert_eq!(
        store.resolve("sub/report.txt").unwrap(),
        std::path::PathBuf::from("/srv/files/sub/report.txt")
    );
}

#[tokio::test]
async fn test_write_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    store.write("hello.txt", b"Hello, World!").await.unwrap();

    assert_eq!(store.read("hello.txt").await.unwrap(), b"Hello, World!".to_vec());
}

#[tokio::test]
async fn test_read_spans_many_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let contents: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();

    store.write("big.bin", &contents).await.unwrap();

    assert_eq!(store.read("big.bin").await.unwrap(), contents);
}

#[tokio::test]
async fn test_write_truncates_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    store.write("f", b"a much longer first version").await.unwrap();
    store.write("f", b"short").await.unwrap();

    assert_eq!(store.read("f").await.unwrap(), b"short".to_vec());
}

#[tokio::test]
async fn test_read_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    assert!(matches!(store.read("missing").await, Err(StoreError::Io(_))));
}

#[tokio::test]
async fn test_files_handler_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let router = Router::new(Some(FileStore::new(dir.path())));

    let post = RequestBuilder::new()
        .method(Method::POST)
        .path("/files/upload.bin")
        .body(vec![1, 2, 3, 0, 4])
        .build()
        .unwrap();
    let created = router.dispatch(&post).await;
    assert_eq!(created.status, StatusCode::Created);
    assert!(!created.has_body());

    let get = RequestBuilder::new()
        .method(Method::GET)
        .path("/files/upload.bin")
        .build()
        .unwrap();
    let served = router.dispatch(&get).await;
    assert_eq!(served.status, StatusCode::Ok);
    assert_eq!(served.header("Content-Type"), Some("application/octet-stream"));
    assert_eq!(served.body_bytes(), [1, 2, 3, 0, 4]);
}

#[tokio::test]
async fn test_files_handler_missing_file_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let router = Router::new(Some(FileStore::new(dir.path())));
    let get = RequestBuilder::new()
        .method(Method::GET)
        .path("/files/non_existant_file")
        .build()
        .unwrap();

    let response = router.dispatch(&get).await;

    assert_eq!(response.status, StatusCode::NotFound);
    assert!(!response.has_body());
}

#[tokio::test]
async fn test_files_handler_traversal_never_writes() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");
    std::fs::create_dir(&root).unwrap();
    let router = Router::new(Some(FileStore::new(&root)));

    let post = RequestBuilder::new()
        .method(Method::POST)
        .path("/files/../escaped.txt")
        .body(b"x".to_vec())
        .build()
        .unwrap();

    assert_eq!(router.dispatch(&post).await.status, StatusCode::NotFound);
    assert!(!dir.path().join("escaped.txt").exists());
}

#[tokio::test]
async fn test_files_handler_write_failure_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let router = Router::new(Some(FileStore::new(dir.path().join("does-not-exist"))));

    let post = RequestBuilder::new()
        .method(Method::POST)
        .path("/files/a.txt")
        .body(b"x".to_vec())
        .build()
        .unwrap();
    let response = router.dispatch(&post).await;

    assert_eq!(response.status, StatusCode::InternalServerError);
    assert!(!response.has_body());
}

#[tokio::test]
async fn test_files_handler_other_method_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let router = Router::new(Some(FileStore::new(dir.path())));
    let req = RequestBuilder::new()
        .method(Method::DELETE)
        .path("/files/a.txt")
        .build()
        .unwrap();

    assert_eq!(router.dispatch(&req).await.status, StatusCode::NotFound);
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlink_out_of_root_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");
    let outside = dir.path().join("outside");
    std::fs::create_dir(&root).unwrap();
    std::fs::create_dir(&outside).unwrap();
    std::fs::write(outside.join("secret.txt"), b"top secret").unwrap();
    std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();
    std::os::unix::fs::symlink(outside.join("new.txt"), root.join("dangling")).unwrap();

    let store = FileStore::new(&root);

    assert!(matches!(
        store.read("link/secret.txt").await,
        Err(StoreError::OutsideRoot(_))
    ));
    assert!(matches!(
        store.write("link/planted.txt", b"x").await,
        Err(StoreError::OutsideRoot(_))
    ));
    assert!(matches!(
        store.write("dangling", b"x").await,
        Err(StoreError::OutsideRoot(_))
    ));
    assert!(!outside.join("planted.txt").exists());
    assert!(!outside.join("new.txt").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlink_inside_root_is_followed() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("real")).unwrap();
    std::fs::write(dir.path().join("real/a.txt"), b"inside").unwrap();
    std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("alias")).unwrap();

    let store = FileStore::new(dir.path());

    assert_eq!(store.read("alias/a.txt").await.unwrap(), b"inside".to_vec());
}
