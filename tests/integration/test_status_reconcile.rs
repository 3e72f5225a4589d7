// ステータス照合の統合テスト

#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::{write_file, TreeFixture};
use folder_monitor::codec::MockCodecBackend;
use folder_monitor::engine::StatusReconciler;
use folder_monitor::notify::MockNotifier;
use folder_monitor::storage::local::LocalStorageBackend;
use folder_monitor::FolderMonitor;
use std::fs;
use std::sync::Arc;

fn seed_cluster(fixture: &TreeFixture, name: &str, status: &str, jpgs: usize) {
    write_file(&fixture.local(&format!("{name}/status.json")), status.as_bytes());
    for i in 0..jpgs {
        write_file(
            &fixture.local(&format!("{name}/Comp-Ortho-Data-Set/DJI_{i:04}.JPG")),
            b"jpg",
        );
    }
}

#[test]
fn test_completion_examples() {
    let fixture = TreeFixture::new();
    seed_cluster(&fixture, "Cluster10", r#"{"ImageCount": 10}"#, 5);
    seed_cluster(&fixture, "Cluster9", r#"{"ImageCount": 9}"#, 5);
    seed_cluster(&fixture, "ClusterZero", r#"{"ImageCount": 0}"#, 5);
    seed_cluster(&fixture, "ClusterShort", r#"{"ImageCount": 12}"#, 5);

    let reconciler = StatusReconciler::new(
        fixture.config.trees.local.clone(),
        Arc::new(LocalStorageBackend::new()),
    );
    let mut report = reconciler.run();
    report.completed_clusters.sort();

    assert_eq!(
        report.completed_clusters,
        vec!["Cluster10".to_string(), "Cluster9".to_string()]
    );
    assert!(report.malformed_status_files.is_empty());
    assert_eq!(
        fs::read_to_string(fixture.local("ClusterZero/status.json")).unwrap(),
        r#"{"ImageCount": 0}"#
    );
}

#[test]
fn test_lowercase_jpg_files_do_not_count() {
    let fixture = TreeFixture::new();
    seed_cluster(&fixture, "Cluster1", r#"{"ImageCount": 2}"#, 0);
    write_file(&fixture.local("Cluster1/Comp-Ortho-Data-Set/a.jpg"), b"jpg");

    let reconciler = StatusReconciler::new(
        fixture.config.trees.local.clone(),
        Arc::new(LocalStorageBackend::new()),
    );

    assert!(reconciler.run().completed_clusters.is_empty());
}

#[tokio::test]
async fn test_both_reports_are_sent() {
    let fixture = TreeFixture::new();
    seed_cluster(&fixture, "Cluster1", r#"{"ImageCount": 2}"#, 1);
    seed_cluster(&fixture, "Cluster2", "{\"ImageCount\": ", 0);

    let mut notifier = MockNotifier::new();
    notifier
        .expect_notify()
        .withf(|n| n.subject.starts_with("Cluster Download Report at ") && n.body.contains("Cluster1"))
        .times(1)
        .returning(|_| true);
    notifier
        .expect_notify()
        .withf(|n| n.subject.starts_with("Json file problem at ") && n.body.contains("Cluster2"))
        .times(1)
        .returning(|_| true);

    let monitor = FolderMonitor::new(
        fixture.config.clone(),
        LocalStorageBackend::new(),
        MockCodecBackend::new(),
        notifier,
    );
    let report = monitor.run_cycle().await.unwrap().unwrap();

    assert_eq!(report.reconcile.completed_clusters, vec!["Cluster1".to_string()]);
    assert_eq!(
        report.reconcile.malformed_status_files,
        vec![fixture.local("Cluster2")]
    );
    assert_eq!(
        fs::read_to_string(fixture.local("Cluster2/status.json")).unwrap(),
        "{\"ImageCount\": "
    );
}
