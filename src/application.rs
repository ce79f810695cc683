// アプリケーション層モジュール
pub mod create_group_handler;
pub mod stream_logger;
pub mod upload_notifier;

// 再エクスポート
pub use create_group_handler::{CreateGroupError, CreateGroupHandler};
pub use stream_logger::{StreamLogger, StreamLoggerError};
pub use upload_notifier::{UploadNotifier, UploadNotifierError};
