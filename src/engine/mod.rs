// エンジン層 - 移動エンジンとステータス照合
// ソースツリーの振り分けと、ローカルツリーの完了判定を担う

pub mod move_engine;
pub mod reconciler;

// 公開API
pub use move_engine::MoveEngine;
pub use reconciler::{is_download_complete, StatusReconciler};
