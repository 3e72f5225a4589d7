// 通知メッセージの組み立て

use super::Notification;
use chrono::{DateTime, Local};
use std::path::PathBuf;

fn timestamp(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// ダウンロードが完了したクラスタの報告
pub fn cluster_download_report(
    recipients: &[String],
    clusters: &[String],
    now: DateTime<Local>,
) -> Notification {
    let body = format!(
        "Hi,\n\n\
         The following clusters data set have been fully downloaded and are ready for Ortho generation,\n\n\
         {}\n\n\
         Kind regards,\n\
         Folder Monitor\n",
        clusters.join("\n")
    );
    Notification::new(
        recipients.to_vec(),
        format!("Cluster Download Report at {}", timestamp(now)),
        body,
    )
}

/// JSON として読めなかったステータスファイルの報告
pub fn malformed_status_alert(
    recipients: &[String],
    directories: &[PathBuf],
    now: DateTime<Local>,
) -> Notification {
    let listing = directories
        .iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    let body = format!(
        "Hi,\n\n\
         The status files in the following cluster folders could not be read. \
         Please ensure each one contains a valid JSON object with an ImageCount field.\n\n\
         {listing}\n\n\
         Kind regards,\n\
         Folder Monitor\n"
    );
    Notification::new(
        recipients.to_vec(),
        format!("Json file problem at {}", timestamp(now)),
        body,
    )
}

/// コーデックバイナリが見つからない場合の警告
pub fn codec_missing_alert(recipients: &[String], binary: &std::path::Path) -> Notification {
    Notification::new(
        recipients.to_vec(),
        "Lepton Binary Missing Error",
        format!(
            "Lepton binary cannot be found to perform image decompression!\n\nExpected at: {}\n",
            binary.display()
        ),
    )
}
