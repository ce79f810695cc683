// グループ作成ハンドラー
//
// HTTPリクエストのJSONボディに新しいグループIDを付与してgroupsテーブルに保存し、
// 201レスポンスで作成したアイテムを返す。

use lambda_http::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Request, Response};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::GroupItem;
use crate::infrastructure::{GroupRepository, RepositoryError};

/// グループ作成のエラー型
///
/// 各エラーはHTTPステータスコードに対応する:
/// - 入力エラー（EmptyBody, InvalidJson, NotAnObject）: 400
/// - 保存エラー（Repository）: 502
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CreateGroupError {
    /// ボディが空、またはJSONの`null`
    #[error("リクエストボディがありません")]
    EmptyBody,

    /// ボディがJSONとしてパースできない
    #[error("リクエストボディがJSONとして不正です: {0}")]
    InvalidJson(String),

    /// ボディがJSONオブジェクトではない
    #[error("リクエストボディがJSONオブジェクトではありません")]
    NotAnObject,

    /// groupsテーブルへの書き込みに失敗
    #[error("グループの保存に失敗: {0}")]
    Repository(#[from] RepositoryError),
}

impl CreateGroupError {
    /// エラーに対応するHTTPステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            CreateGroupError::EmptyBody
            | CreateGroupError::InvalidJson(_)
            | CreateGroupError::NotAnObject => StatusCode::BAD_REQUEST,
            CreateGroupError::Repository(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// エラーレスポンスの`error`フィールドに入れる種別
    pub fn kind(&self) -> &'static str {
        match self {
            CreateGroupError::Repository(_) => "bad_gateway",
            _ => "bad_request",
        }
    }
}

/// 201レスポンスのボディ
#[derive(Debug, Serialize)]
struct CreatedBody<'a> {
    #[serde(rename = "newItem")]
    new_item: &'a GroupItem,
}

/// エラーレスポンスのボディ
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

/// グループ作成リクエストを処理するハンドラー
pub struct CreateGroupHandler<R>
where
    R: GroupRepository,
{
    /// グループリポジトリ
    repository: R,
}

impl<R> CreateGroupHandler<R>
where
    R: GroupRepository,
{
    /// 新しいCreateGroupHandlerを作成
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// HTTPリクエストを処理してレスポンスを生成
    ///
    /// 入力エラーと保存エラーはステータスコード付きのレスポンスに変換する。
    /// `Err`になるのはレスポンスの構築に失敗した場合のみ。
    pub async fn handle(&self, request: &Request) -> Result<Response<Body>, lambda_http::Error> {
        info!(
            method = %request.method(),
            path = %request.uri().path(),
            "グループ作成リクエストを受信"
        );

        let result = match Self::request_body(request) {
            Ok(body) => self.create(body).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(item) => {
                info!(group_id = item.id(), "グループを作成");
                let body = serde_json::to_string(&CreatedBody { new_item: &item })?;
                Self::build_response(StatusCode::CREATED, body)
            }
            Err(err) => {
                match &err {
                    CreateGroupError::Repository(_) => {
                        error!(error = %err, "グループの保存に失敗")
                    }
                    _ => warn!(error = %err, "不正なグループ作成リクエスト"),
                }
                let body = serde_json::to_string(&ErrorBody {
                    error: err.kind(),
                    message: err.to_string(),
                })?;
                Self::build_response(err.status_code(), body)
            }
        }
    }

    /// ボディからGroupItemを作成して保存
    ///
    /// # 処理フロー
    /// 1. ボディをJSONオブジェクトとしてパース
    /// 2. 新しいUUIDを付与（ボディの`id`より優先）
    /// 3. groupsテーブルに無条件でPut
    pub async fn create(&self, body: Option<&str>) -> Result<GroupItem, CreateGroupError> {
        let fields = match Self::parse_body(body)? {
            Value::Object(fields) => fields,
            _ => return Err(CreateGroupError::NotAnObject),
        };

        let item = GroupItem::create(fields);
        self.repository.put(&item).await?;

        Ok(item)
    }

    /// ボディ文字列をJSONとしてパース
    fn parse_body(body: Option<&str>) -> Result<Value, CreateGroupError> {
        let text = match body {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(CreateGroupError::EmptyBody),
        };

        match serde_json::from_str(text) {
            Ok(Value::Null) => Err(CreateGroupError::EmptyBody),
            Ok(value) => Ok(value),
            Err(e) => Err(CreateGroupError::InvalidJson(e.to_string())),
        }
    }

    /// リクエストからボディ文字列を取り出す
    fn request_body(request: &Request) -> Result<Option<&str>, CreateGroupError> {
        match request.body() {
            Body::Text(text) => Ok(Some(text.as_str())),
            Body::Binary(bytes) => std::str::from_utf8(bytes)
                .map(Some)
                .map_err(|e| CreateGroupError::InvalidJson(e.to_string())),
            _ => Ok(None),
        }
    }

    /// CORSヘッダー付きのJSONレスポンスを構築
    fn build_response(
        status: StatusCode,
        body: String,
    ) -> Result<Response<Body>, lambda_http::Error> {
        let response = Response::builder()
            .status(status)
            .header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::Text(body))?;

        Ok(response)
    }
}
