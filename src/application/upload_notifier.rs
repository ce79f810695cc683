// UploadNotifier - S3アップロード通知のログ記録
//
// 各レコードについて、バッチ全体・そのレコードのs3エンティティ・レコード全体・
// オブジェクトキーの4回ログを出力する。

use aws_lambda_events::event::s3::{S3Event, S3EventRecord};
use thiserror::Error;
use tracing::info;

use crate::domain::ObjectKey;

/// UploadNotifierのエラー型
#[derive(Debug, Error)]
pub enum UploadNotifierError {
    /// バッチまたはレコードのJSONシリアライズに失敗
    #[error("シリアライズに失敗: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// S3アップロード通知バッチをログに記録するハンドラー
#[derive(Debug, Clone, Default)]
pub struct UploadNotifier;

impl UploadNotifier {
    /// 新しいUploadNotifierを作成
    pub fn new() -> Self {
        Self
    }

    /// S3イベントを処理
    ///
    /// N件のレコードに対して4×N回ログを出力する。空のバッチでは何も出力しない。
    pub fn handle(&self, event: &S3Event) -> Result<(), UploadNotifierError> {
        if event.records.is_empty() {
            return Ok(());
        }

        let batch_json = serde_json::to_string(event)?;

        for record in &event.records {
            info!(
                record_count = event.records.len(),
                batch = %batch_json,
                "S3イベントバッチ"
            );
            self.log_record(record)?;
        }

        Ok(())
    }

    /// 単一レコードのs3エンティティ、レコード全体、オブジェクトキーをログ出力
    fn log_record(&self, record: &S3EventRecord) -> Result<(), UploadNotifierError> {
        // 先頭レコードではなく処理中のレコード自身のs3エンティティを使う
        let s3_json = serde_json::to_string(&record.s3)?;
        info!(s3 = %s3_json, "S3エンティティ");

        let record_json = serde_json::to_string(record)?;
        info!(record = %record_json, "S3イベントレコード");

        let key = Self::object_key(record);
        info!(
            bucket = record.s3.bucket.name.as_deref().unwrap_or_default(),
            key = %key.raw(),
            decoded_key = %key.decoded(),
            "S3オブジェクトを処理"
        );

        Ok(())
    }

    /// レコードからオブジェクトキーを取り出す（欠落時は空文字列）
    pub fn object_key(record: &S3EventRecord) -> ObjectKey {
        ObjectKey::from_raw(record.s3.object.key.clone().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::logging::capture::{capture_logs, CapturedEvent};
    use serde_json::{json, Value};

    // ==================== ヘルパー関数 ====================

    /// S3通知のレコードJSONを作成
    fn record_json(bucket: &str, key: &str) -> Value {
        json!({
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": "us-east-1",
            "eventTime": "2024-05-01T12:00:00.000Z",
            "eventName": "ObjectCreated:Put",
            "userIdentity": {"principalId": "EXAMPLE"},
            "requestParameters": {"sourceIPAddress": "127.0.0.1"},
            "responseElements": {
                "x-amz-request-id": "EXAMPLE123456789",
                "x-amz-id-2": "EXAMPLE123/5678abcdefghijklambdaisawesome/mnopqrstuvwxyzABCDEFGH"
            },
            "s3": {
                "s3SchemaVersion": "1.0",
                "configurationId": "uploadNotification",
                "bucket": {
                    "name": bucket,
                    "ownerIdentity": {"principalId": "EXAMPLE"},
                    "arn": format!("arn:aws:s3:::{}", bucket)
                },
                "object": {
                    "key": key,
                    "size": 1024,
                    "eTag": "0123456789abcdef0123456789abcdef",
                    "sequencer": "0A1B2C3D4E5F678901"
                }
            }
        })
    }

    fn create_event(records: Vec<Value>) -> S3Event {
        serde_json::from_value(json!({ "Records": records })).unwrap()
    }

    fn parse_field(event: &CapturedEvent, name: &str) -> Value {
        serde_json::from_str(event.field(name).unwrap()).unwrap()
    }

    // ==================== handle テスト ====================

    #[test]
    fn test_empty_batch_logs_nothing() {
        let event = create_event(vec![]);

        let (result, events) = capture_logs(|| UploadNotifier::new().handle(&event));

        assert!(result.is_ok());
        assert!(events.is_empty());
    }

    #[test]
    fn test_logs_four_times_per_record() {
        let event = create_event(vec![
            record_json("uploads", "a.jpg"),
            record_json("uploads", "b.jpg"),
            record_json("uploads", "c.jpg"),
        ]);

        let (result, events) = capture_logs(|| UploadNotifier::new().handle(&event));

        assert!(result.is_ok());
        assert_eq!(events.len(), 12);
    }

    #[test]
    fn test_each_record_logs_its_own_key() {
        let event = create_event(vec![
            record_json("uploads", "first.jpg"),
            record_json("uploads", "second.jpg"),
            record_json("uploads", "third.jpg"),
        ]);

        let (_, events) = capture_logs(|| UploadNotifier::new().handle(&event));

        let keys: Vec<&str> = events
            .chunks(4)
            .map(|chunk| chunk[3].field("key").unwrap())
            .collect();
        assert_eq!(keys, vec!["first.jpg", "second.jpg", "third.jpg"]);
    }

    /// 2件目以降のレコードでも先頭レコードのs3エンティティを出さないことの回帰テスト
    #[test]
    fn test_each_record_logs_its_own_s3_entity() {
        let event = create_event(vec![
            record_json("bucket-one", "first.jpg"),
            record_json("bucket-two", "second.jpg"),
        ]);

        let (_, events) = capture_logs(|| UploadNotifier::new().handle(&event));

        let first_s3 = parse_field(&events[1], "s3");
        let second_s3 = parse_field(&events[5], "s3");
        assert_eq!(first_s3["object"]["key"], "first.jpg");
        assert_eq!(first_s3["bucket"]["name"], "bucket-one");
        assert_eq!(second_s3["object"]["key"], "second.jpg");
        assert_eq!(second_s3["bucket"]["name"], "bucket-two");
    }

    #[test]
    fn test_log_order_within_record() {
        let event = create_event(vec![record_json("uploads", "a.jpg")]);

        let (_, events) = capture_logs(|| UploadNotifier::new().handle(&event));

        let batch = parse_field(&events[0], "batch");
        assert_eq!(batch["Records"].as_array().unwrap().len(), 1);
        assert!(events[1].field("s3").is_some());
        let record = parse_field(&events[2], "record");
        assert_eq!(record["eventName"], "ObjectCreated:Put");
        assert_eq!(events[3].field("bucket"), Some("uploads"));
    }

    #[test]
    fn test_batch_is_logged_for_every_record() {
        let event = create_event(vec![
            record_json("uploads", "a.jpg"),
            record_json("uploads", "b.jpg"),
        ]);

        let (_, events) = capture_logs(|| UploadNotifier::new().handle(&event));

        assert_eq!(events[0].field("record_count"), Some("2"));
        assert_eq!(events[4].field("record_count"), Some("2"));
        assert_eq!(events[0].field("batch"), events[4].field("batch"));
    }

    #[test]
    fn test_encoded_key_is_logged_raw_and_decoded() {
        let event = create_event(vec![record_json("uploads", "team+photos/%E5%86%99%E7%9C%9F.jpg")]);

        let (_, events) = capture_logs(|| UploadNotifier::new().handle(&event));

        assert_eq!(events[3].field("key"), Some("team+photos/%E5%86%99%E7%9C%9F.jpg"));
        assert_eq!(events[3].field("decoded_key"), Some("team photos/写真.jpg"));
    }

    #[test]
    fn test_object_key_extraction() {
        let event = create_event(vec![
            record_json("uploads", "one.txt"),
            record_json("uploads", "two.txt"),
        ]);

        assert_eq!(UploadNotifier::object_key(&event.records[0]).raw(), "one.txt");
        assert_eq!(UploadNotifier::object_key(&event.records[1]).raw(), "two.txt");
    }

    #[test]
    fn test_missing_key_is_empty() {
        let mut record = record_json("uploads", "ignored");
        record["s3"]["object"]
            .as_object_mut()
            .unwrap()
            .remove("key");
        let event = create_event(vec![record]);

        assert_eq!(UploadNotifier::object_key(&event.records[0]).raw(), "");
    }
}
