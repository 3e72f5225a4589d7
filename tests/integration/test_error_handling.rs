// エラーハンドリングの統合テスト

#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::TreeFixture;
use folder_monitor::codec::{LeptonCodec, MockCodecBackend};
use folder_monitor::config::Config;
use folder_monitor::core::{ConfigError, MonitorError};
use folder_monitor::notify::{LogNotifier, MockNotifier};
use folder_monitor::storage::local::LocalStorageBackend;
use folder_monitor::FolderMonitor;
use std::fs;
use tempfile::TempDir;

#[cfg(unix)]
#[tokio::test]
async fn test_failing_codec_leaves_source_for_retry() {
    let fixture = TreeFixture::new();
    let source = fixture.drop_file("a/img.lep", b"pixels");
    fixture.drop_file("a/clip.mov", b"mov");

    let monitor = FolderMonitor::new(
        fixture.config.clone(),
        LocalStorageBackend::new(),
        LeptonCodec::locate(fixtures::system_binary("false")).unwrap(),
        LogNotifier::new(),
    );

    for _ in 0..2 {
        let report = monitor.run_cycle().await.unwrap().unwrap();
        assert_eq!(report.moves.failures.len(), 1);
        assert_eq!(report.moves.failures[0].path, source);
        assert!(source.exists());
    }
    assert!(!fixture.local("a/img.JPG").exists());
    assert!(fixture.archive("a/clip.mov").is_file());
}

#[tokio::test]
async fn test_uppercase_lep_is_rejected_but_not_fatal() {
    let fixture = TreeFixture::new();
    let upper = fixture.drop_file("IMG.LEP", b"pixels");
    fixture.drop_file("notes.txt", b"txt");

    let mut codec = MockCodecBackend::new();
    codec.expect_decompress().returning(|_, _| {
        Err(MonitorError::invalid_argument(
            "Only .lep input files and .jpg output files are accepted",
        ))
    });

    let monitor = FolderMonitor::new(
        fixture.config.clone(),
        LocalStorageBackend::new(),
        codec,
        LogNotifier::new(),
    );
    let report = monitor.run_cycle().await.unwrap().unwrap();

    assert_eq!(report.moves.count, 1);
    assert_eq!(report.moves.failures.len(), 1);
    assert!(upper.exists());
}

#[tokio::test]
async fn test_existing_archive_copy_is_not_overwritten() {
    let fixture = TreeFixture::new();
    let source = fixture.drop_file("v/clip.mp4", b"new");
    fixtures::write_file(&fixture.archive("v/clip.mp4"), b"old");

    let monitor = FolderMonitor::new(
        fixture.config.clone(),
        LocalStorageBackend::new(),
        MockCodecBackend::new(),
        LogNotifier::new(),
    );
    let report = monitor.run_cycle().await.unwrap().unwrap();

    assert_eq!(report.moves.count, 0);
    assert_eq!(report.moves.skipped, 1);
    assert!(source.exists());
    assert_eq!(fs::read(fixture.archive("v/clip.mp4")).unwrap(), b"old");
}

#[tokio::test]
async fn test_missing_archive_tree_skips_cycle() {
    let fixture = TreeFixture::new();
    let clip = fixture.drop_file("clip.mp4", b"mp4");
    fs::remove_dir_all(&fixture.config.trees.archive).unwrap();

    let mut notifier = MockNotifier::new();
    notifier.expect_notify().never();

    let monitor = FolderMonitor::new(
        fixture.config.clone(),
        LocalStorageBackend::new(),
        MockCodecBackend::new(),
        notifier,
    );

    assert!(monitor.run_cycle().await.unwrap().is_none());
    assert!(clip.exists());
}

#[test]
fn test_config_errors_are_reported_per_field() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("parameters.json");
    fs::write(&path, r#"{"DropboxDir": "/drop", "NASDir": "/nas"}"#).unwrap();

    let error = Config::load(&path).unwrap_err();

    assert!(matches!(error, ConfigError::Invalid { .. }));
    assert_eq!(error.fields(), vec!["LocalImageDir", "SleepTime"]);
    // 不正な設定ファイルは上書きされない
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        r#"{"DropboxDir": "/drop", "NASDir": "/nas"}"#
    );
}
