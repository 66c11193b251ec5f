//! Integration tests: local HTTP server, real curl transfers, real extraction.

mod common;

use std::fs;
use std::time::Duration;

use assetfetch_core::fetcher::{self, AssetStatus, FailurePolicy, FetchOptions};
use assetfetch_core::http::{HttpError, DEFAULT_USER_AGENT};
use assetfetch_core::{AssetEntry, FetchError, Manifest};
use common::asset_server;
use common::fixtures::make_zip;
use tempfile::tempdir;

fn bunny_zip() -> Vec<u8> {
    make_zip(&[
        ("bunny.obj", b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n"),
        ("bunny.mtl", b"newmtl fur\n"),
        ("textures/", b""),
        ("textures/fur.png", &[0x89, b'P', b'N', b'G', 0, 1, 2, 3]),
    ])
}

fn teapot_zip() -> Vec<u8> {
    make_zip(&[("teapot/teapot.obj", b"f 1 2 3\n")])
}

#[tokio::test]
async fn archives_and_direct_assets_land_in_place() {
    let noise: Vec<u8> = (0u8..=255).cycle().take(40 * 1024).collect();
    let server = asset_server::start(vec![
        ("/model/bunny/bunny.zip", bunny_zip()),
        ("/model/teapot/teapot.zip", teapot_zip()),
        ("/tex/noise.png", noise.clone()),
    ]);
    let manifest = Manifest::new(vec![
        AssetEntry::archive(server.url("/model/bunny/bunny.zip")),
        AssetEntry::archive(server.url("/model/teapot/teapot.zip")),
        AssetEntry::direct(server.url("/tex/noise.png")),
    ]);

    let dir = tempdir().unwrap();
    let root = dir.path().join("demo_asset");
    let report = fetcher::fetch_all(&manifest, &root, &FetchOptions::default())
        .await
        .expect("fetch_all");

    assert!(report.is_success(), "report: {report:?}");
    assert_eq!(report.succeeded(), 3);

    assert_eq!(
        fs::read(root.join("bunny/bunny.obj")).unwrap(),
        b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n"
    );
    assert_eq!(fs::read(root.join("bunny/bunny.mtl")).unwrap(), b"newmtl fur\n");
    assert_eq!(
        fs::read(root.join("bunny/textures/fur.png")).unwrap(),
        [0x89, b'P', b'N', b'G', 0, 1, 2, 3]
    );
    assert_eq!(
        fs::read(root.join("teapot/teapot/teapot.obj")).unwrap(),
        b"f 1 2 3\n"
    );
    assert_eq!(fs::read(root.join("noise.png")).unwrap(), noise);

    // Only the outputs remain: no scratch or .part files.
    let mut top: Vec<String> = fs::read_dir(&root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    top.sort();
    assert_eq!(top, vec!["bunny", "noise.png", "teapot"]);

    match &report.outcomes[0].status {
        AssetStatus::Done(summary) => {
            assert_eq!(summary.files_written, 3);
            assert_eq!(summary.output_path, root.join("bunny"));
            assert_eq!(summary.bytes_downloaded, bunny_zip().len() as u64);
        }
        other => panic!("expected Done, got {other:?}"),
    }
}

#[tokio::test]
async fn requests_carry_browser_user_agent() {
    let server = asset_server::start(vec![("/a.bin", b"abc".to_vec())]);
    let manifest = Manifest::new(vec![AssetEntry::direct(server.url("/a.bin"))]);
    let dir = tempdir().unwrap();

    let report = fetcher::fetch_all(&manifest, dir.path(), &FetchOptions::default())
        .await
        .unwrap();
    assert!(report.is_success());

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].user_agent.as_deref(), Some(DEFAULT_USER_AGENT));
}

#[tokio::test]
async fn second_run_is_idempotent() {
    let server = asset_server::start(vec![
        ("/m/bunny.zip", bunny_zip()),
        ("/t/sky.hdr", b"#?RADIANCE\n".to_vec()),
    ]);
    let manifest = Manifest::new(vec![
        AssetEntry::archive(server.url("/m/bunny.zip")),
        AssetEntry::direct(server.url("/t/sky.hdr")),
    ]);
    let dir = tempdir().unwrap();
    let opts = FetchOptions::default();

    let first = fetcher::fetch_all(&manifest, dir.path(), &opts).await.unwrap();
    let files_after_first = list_tree(dir.path());
    let second = fetcher::fetch_all(&manifest, dir.path(), &opts).await.unwrap();
    let files_after_second = list_tree(dir.path());

    assert!(first.is_success());
    assert!(second.is_success());
    assert_eq!(files_after_first, files_after_second);
    assert_eq!(server.hits("/m/bunny.zip"), 2);
}

#[tokio::test]
async fn missing_archive_keep_going_completes_the_rest() {
    let server = asset_server::start(vec![
        ("/m/bunny.zip", bunny_zip()),
        ("/m/teapot.zip", teapot_zip()),
    ]);
    let manifest = Manifest::new(vec![
        AssetEntry::archive(server.url("/m/bunny.zip")),
        AssetEntry::archive(server.url("/m/sponza.zip")),
        AssetEntry::archive(server.url("/m/teapot.zip")),
    ]);
    let dir = tempdir().unwrap();

    let report = fetcher::fetch_all(&manifest, dir.path(), &FetchOptions::default())
        .await
        .unwrap();

    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    let err = report.outcomes[1].error().expect("sponza failed");
    assert_eq!(err.url(), server.url("/m/sponza.zip"));
    assert!(matches!(
        err,
        FetchError::Network {
            source: HttpError::Status(404),
            ..
        }
    ));
    assert!(dir.path().join("bunny").is_dir());
    assert!(dir.path().join("teapot").is_dir());
    assert!(!dir.path().join("sponza").exists());
}

#[tokio::test]
async fn missing_archive_fail_fast_skips_the_rest() {
    let server = asset_server::start(vec![
        ("/m/bunny.zip", bunny_zip()),
        ("/m/teapot.zip", teapot_zip()),
    ]);
    let manifest = Manifest::new(vec![
        AssetEntry::archive(server.url("/m/bunny.zip")),
        AssetEntry::archive(server.url("/m/sponza.zip")),
        AssetEntry::archive(server.url("/m/teapot.zip")),
    ]);
    let dir = tempdir().unwrap();
    let opts = FetchOptions {
        failure_policy: FailurePolicy::FailFast,
        ..FetchOptions::default()
    };

    let report = fetcher::fetch_all(&manifest, dir.path(), &opts).await.unwrap();

    assert!(report.outcomes[0].is_done());
    assert!(report.outcomes[1].error().is_some());
    assert!(matches!(report.outcomes[2].status, AssetStatus::Skipped));
    assert_eq!(server.hits("/m/teapot.zip"), 0);
    assert!(!dir.path().join("sponza").exists());
    assert!(!dir.path().join("teapot").exists());
}

#[tokio::test]
async fn corrupt_archive_is_archive_error_without_output_dir() {
    let server = asset_server::start(vec![("/m/broken.zip", b"this is not a zip".to_vec())]);
    let manifest = Manifest::new(vec![AssetEntry::archive(server.url("/m/broken.zip"))]);
    let dir = tempdir().unwrap();

    let report = fetcher::fetch_all(&manifest, dir.path(), &FetchOptions::default())
        .await
        .unwrap();

    let err = report.outcomes[0].error().expect("should fail");
    assert!(matches!(err, FetchError::Archive { .. }), "got {err:?}");
    assert!(!dir.path().join("broken").exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn traversal_entry_is_filesystem_error() {
    let evil = make_zip(&[("ok.txt", b"fine"), ("../../escape.txt", b"nope")]);
    let server = asset_server::start(vec![("/m/evil.zip", evil)]);
    let manifest = Manifest::new(vec![AssetEntry::archive(server.url("/m/evil.zip"))]);
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");

    let report = fetcher::fetch_all(&manifest, &root, &FetchOptions::default())
        .await
        .unwrap();

    let err = report.outcomes[0].error().expect("should fail");
    assert!(matches!(err, FetchError::Filesystem { .. }), "got {err:?}");
    assert!(!dir.path().join("escape.txt").exists());
}

#[tokio::test]
async fn missing_direct_asset_leaves_no_part_file() {
    let server = asset_server::start(vec![]);
    let manifest = Manifest::new(vec![AssetEntry::direct(server.url("/t/missing.png"))]);
    let dir = tempdir().unwrap();

    let report = fetcher::fetch_all(&manifest, dir.path(), &FetchOptions::default())
        .await
        .unwrap();

    assert_eq!(report.failed(), 1);
    assert!(!dir.path().join("missing.png").exists());
    assert!(!dir.path().join("missing.png.part").exists());
}

#[tokio::test]
async fn hung_server_times_out() {
    let server = asset_server::start(vec![]);
    let manifest = Manifest::new(vec![AssetEntry::archive(server.url("/hang/slow.zip"))]);
    let dir = tempdir().unwrap();
    let mut opts = FetchOptions::default();
    opts.http.timeout = Duration::from_secs(1);

    let report = fetcher::fetch_all(&manifest, dir.path(), &opts).await.unwrap();

    match report.outcomes[0].error() {
        Some(FetchError::Network { source, .. }) => assert!(source.is_timeout(), "{source}"),
        other => panic!("expected network timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    // Bind then drop to get a port with nothing listening.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let manifest = Manifest::new(vec![AssetEntry::archive(format!(
        "http://127.0.0.1:{port}/m/bunny.zip"
    ))]);
    let dir = tempdir().unwrap();

    let report = fetcher::fetch_all(&manifest, dir.path(), &FetchOptions::default())
        .await
        .unwrap();

    assert!(matches!(
        report.outcomes[0].error(),
        Some(FetchError::Network {
            source: HttpError::Curl(_),
            ..
        })
    ));
}

#[tokio::test]
async fn parallel_jobs_match_sequential_output() {
    let names = ["bunny", "erato", "rungholt", "sibenik", "dragon"];
    let paths: Vec<String> = names.iter().map(|n| format!("/m/{n}.zip")).collect();
    let routes = names
        .iter()
        .zip(&paths)
        .map(|(name, path)| {
            let obj = format!("{name}.obj");
            (path.as_str(), make_zip(&[(obj.as_str(), name.as_bytes())]))
        })
        .collect();
    let server = asset_server::start(routes);
    let manifest = Manifest::new(
        names
            .iter()
            .map(|n| AssetEntry::archive(server.url(&format!("/m/{n}.zip"))))
            .collect(),
    );

    let seq_dir = tempdir().unwrap();
    let par_dir = tempdir().unwrap();
    let seq = fetcher::fetch_all(&manifest, seq_dir.path(), &FetchOptions::default())
        .await
        .unwrap();
    let par_opts = FetchOptions {
        jobs: 3,
        ..FetchOptions::default()
    };
    let par = fetcher::fetch_all(&manifest, par_dir.path(), &par_opts)
        .await
        .unwrap();

    assert!(seq.is_success());
    assert!(par.is_success());
    assert_eq!(list_tree(seq_dir.path()), list_tree(par_dir.path()));
    let order: Vec<&str> = par
        .outcomes
        .iter()
        .map(|o| o.asset.local_name.as_str())
        .collect();
    assert_eq!(order, names);
}

/// Relative paths and contents of every file under `root`, sorted.
fn list_tree(root: &std::path::Path) -> Vec<(String, Vec<u8>)> {
    fn walk(base: &std::path::Path, dir: &std::path::Path, out: &mut Vec<(String, Vec<u8>)>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(base, &path, out);
            } else {
                let rel = path.strip_prefix(base).unwrap().to_string_lossy().into_owned();
                out.push((rel, fs::read(&path).unwrap()));
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}
