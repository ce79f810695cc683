// StreamLogger - DynamoDB Streamsのレコードをログに記録
//
// バッチ全体を1回、続けて各レコードを受信順に1回ずつログ出力する。
// チェックポイントや部分失敗の報告は行わず、再試行はLambda側に任せる。

use aws_lambda_events::event::dynamodb::{Event, EventRecord};
use serde_dynamo::Item;
use thiserror::Error;
use tracing::info;

/// StreamLoggerのエラー型
#[derive(Debug, Error)]
pub enum StreamLoggerError {
    /// バッチまたはレコードのJSONシリアライズに失敗
    #[error("シリアライズに失敗: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// DynamoDB Streamsバッチをログに記録するハンドラー
#[derive(Debug, Clone, Default)]
pub struct StreamLogger;

impl StreamLogger {
    /// 新しいStreamLoggerを作成
    pub fn new() -> Self {
        Self
    }

    /// DynamoDB Streamsイベントを処理
    ///
    /// N件のレコードに対してN+1回ログを出力する（バッチ1回 + レコードごと1回）。
    /// 空のバッチではバッチのログのみを出力する。
    pub fn handle(&self, event: &Event) -> Result<(), StreamLoggerError> {
        let batch_json = serde_json::to_string(event)?;
        info!(
            record_count = event.records.len(),
            batch = %batch_json,
            "DynamoDB Streamsバッチを処理"
        );

        for record in &event.records {
            self.log_record(record)?;
        }

        Ok(())
    }

    /// 単一レコードをログ出力
    fn log_record(&self, record: &EventRecord) -> Result<(), StreamLoggerError> {
        let record_json = serde_json::to_string(record)?;
        let keys = Self::render_keys(&record.change.keys)?;

        info!(
            event_id = %record.event_id,
            event_name = %record.event_name,
            keys = %keys,
            record = %record_json,
            "レコードを処理"
        );

        Ok(())
    }

    /// キーをAttributeValueの型情報を除いたJSONとして描画
    ///
    /// JSONで表現できない値（バイナリ型など）を含む場合はAttributeValue形式のまま出力する。
    fn render_keys(keys: &Item) -> Result<String, StreamLoggerError> {
        match serde_dynamo::from_item::<_, serde_json::Value>(keys.clone()) {
            Ok(plain) => Ok(plain.to_string()),
            Err(_) => Ok(serde_json::to_string(keys)?),
        }
    }
}
