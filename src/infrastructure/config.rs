/// groupsテーブル設定
///
/// テーブル名は環境変数`GROUPS_TABLE`から一度だけ読み込み、
/// 明示的な値としてハンドラーに渡す。
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;

/// groupsテーブル名を指定する環境変数
pub const GROUPS_TABLE_ENV: &str = "GROUPS_TABLE";

/// groups設定のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GroupsConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// groupsテーブルの設定
#[derive(Debug, Clone, PartialEq)]
pub struct GroupsConfig {
    /// groupsテーブル名
    table_name: String,
}

impl GroupsConfig {
    /// 明示的な値で新しいGroupsConfigを作成
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
        }
    }

    /// 環境変数からGroupsConfigを作成
    ///
    /// 環境変数:
    /// - GROUPS_TABLE: グループ保存用DynamoDBテーブル名
    pub fn from_env() -> Result<Self, GroupsConfigError> {
        let table_name = std::env::var(GROUPS_TABLE_ENV)
            .map_err(|_| GroupsConfigError::MissingEnvVar(GROUPS_TABLE_ENV.to_string()))?;

        Ok(Self { table_name })
    }

    /// groupsテーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

/// 環境からAWS設定を読み込み、DynamoDBクライアントを作成
///
/// 認証情報とリージョンはaws-configのデフォルトチェーンで解決する。
pub async fn load_dynamodb_client() -> DynamoDbClient {
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    DynamoDbClient::new(&aws_config)
}
