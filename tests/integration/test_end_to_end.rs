// エンドツーエンド統合テスト
#![cfg(unix)]

#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::{system_binary, TreeFixture};
use folder_monitor::codec::LeptonCodec;
use folder_monitor::notify::LogNotifier;
use folder_monitor::storage::local::LocalStorageBackend;
use folder_monitor::FolderMonitor;
use std::fs;

fn monitor(
    fixture: &TreeFixture,
    codec_binary: &str,
) -> FolderMonitor<LocalStorageBackend, LeptonCodec, LogNotifier> {
    FolderMonitor::new(
        fixture.config.clone(),
        LocalStorageBackend::new(),
        LeptonCodec::locate(system_binary(codec_binary)).unwrap(),
        LogNotifier::new(),
    )
}

#[tokio::test]
async fn test_lep_image_is_decompressed_then_idle() {
    let fixture = TreeFixture::new();
    let source = fixture.drop_file("a/b/img1.lep", b"compressed-bytes");

    let monitor = monitor(&fixture, "cp");
    let first = monitor.run_cycle().await.unwrap().unwrap();

    assert_eq!(first.moves.count, 1);
    assert!(!source.exists());
    assert_eq!(
        fs::read(fixture.local("a/b/img1.JPG")).unwrap(),
        b"compressed-bytes"
    );

    let second = monitor.run_cycle().await.unwrap().unwrap();
    assert_eq!(second.moves.count, 0);
    assert_eq!(TreeFixture::file_count(&fixture.config.trees.local), 1);
}

#[tokio::test]
async fn test_full_flight_upload() {
    let fixture = TreeFixture::new();
    fixture.drop_file("Site/Cluster1/status.json", br#"{"Name": "Cluster1", "ImageCount": 4}"#);
    fixture.drop_file("Site/Cluster1/Comp-Ortho-Data-Set/DJI_0001.lep", b"1");
    fixture.drop_file("Site/Cluster1/Comp-Ortho-Data-Set/DJI_0002.lep", b"2");
    fixture.drop_file("Site/Videos/flight.MP4", b"video");
    fixture.drop_file("Site/Videos/flight.SRT", b"subs");
    fixture.drop_file("Site/Logs/flight.csv", b"log");
    fixture.drop_file("Site/desktop.ini", b"ignored");
    fixture.drop_file(".dropbox.cache/stale.lep", b"ignored");

    let monitor = monitor(&fixture, "cp");
    let report = monitor.run_cycle().await.unwrap().unwrap();

    assert_eq!(report.moves.count, 6);
    assert_eq!(report.moves.ignored, 2);
    assert!(report.moves.failures.is_empty());
    assert_eq!(report.reconcile.completed_clusters, vec!["Cluster1".to_string()]);

    assert!(fixture.local("Site/Cluster1/Comp-Ortho-Data-Set/DJI_0001.JPG").is_file());
    assert!(fixture.local("Site/Cluster1/Comp-Ortho-Data-Set/DJI_0002.JPG").is_file());
    assert!(fixture.archive("Site/Videos/flight.MP4").is_file());
    assert!(fixture.archive("Site/Videos/flight.SRT").is_file());
    assert!(fixture.archive("Site/Logs/flight.csv").is_file());

    // 除外ファイルだけがソースに残る
    let mut remaining = fixtures::walk_files(&fixture.config.trees.source);
    remaining.sort();
    assert_eq!(
        remaining,
        vec![
            fixture.source(".dropbox.cache/stale.lep"),
            fixture.source("Site/desktop.ini"),
        ]
    );

    let status: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(fixture.local("Site/Cluster1/status.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(status["DownloadComplete"], serde_json::Value::Bool(true));
    assert_eq!(status["Name"], "Cluster1");
}

#[tokio::test]
async fn test_cluster_completes_across_cycles() {
    let fixture = TreeFixture::new();
    fixture.drop_file("Cluster7/status.json", br#"{"ImageCount": 4}"#);
    fixture.drop_file("Cluster7/Comp-Ortho-Data-Set/DJI_0001.lep", b"1");

    let monitor = monitor(&fixture, "cp");
    let first = monitor.run_cycle().await.unwrap().unwrap();
    assert!(first.reconcile.completed_clusters.is_empty());

    fixture.drop_file("Cluster7/Comp-Ortho-Data-Set/DJI_0002.lep", b"2");
    let second = monitor.run_cycle().await.unwrap().unwrap();
    assert_eq!(second.moves.count, 1);
    assert_eq!(second.reconcile.completed_clusters, vec!["Cluster7".to_string()]);

    let third = monitor.run_cycle().await.unwrap().unwrap();
    assert!(third.reconcile.is_empty());
}
