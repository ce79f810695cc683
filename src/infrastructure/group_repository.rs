/// DynamoDBにグループを保存するためのグループリポジトリ
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::types::AttributeValue;
use thiserror::Error;

use crate::domain::GroupItem;

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),

    /// アイテムのDynamoDB形式への変換に失敗
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// グループ永続化用トレイト
///
/// 実際のDynamoDBとテスト用モックを差し替え可能にする。
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// グループアイテムを保存
    ///
    /// 条件式なしの無条件Putで、同じIDのアイテムがあれば上書きする。
    ///
    /// # 戻り値
    /// * 成功時は`Ok(())`
    /// * 失敗時は`Err(RepositoryError)`
    async fn put(&self, item: &GroupItem) -> Result<(), RepositoryError>;
}

/// GroupRepositoryのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoGroupRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// groupsテーブル名
    table_name: String,
}

impl DynamoGroupRepository {
    /// 新しいDynamoGroupRepositoryを作成
    ///
    /// # 引数
    /// * `client` - DynamoDBクライアント
    /// * `table_name` - groupsテーブルの名前
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// groupsテーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// GroupItemをDynamoDBのアイテム形式に変換
    ///
    /// JSONのnull/bool/数値/文字列/配列/オブジェクトは
    /// それぞれNULL/BOOL/N/S/L/Mになる。
    fn to_item(item: &GroupItem) -> Result<HashMap<String, AttributeValue>, RepositoryError> {
        serde_dynamo::aws_sdk_dynamodb_1::to_item(item)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))
    }
}

#[async_trait]
impl GroupRepository for DynamoGroupRepository {
    async fn put(&self, item: &GroupItem) -> Result<(), RepositoryError> {
        let attributes = Self::to_item(item)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(attributes))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.to_string()))?;

        Ok(())
    }
}
