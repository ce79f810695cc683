/// グループ作成 HTTP Lambdaエントリポイント
///
/// API Gateway経由のPOSTリクエストのJSONボディにIDを付与してgroupsテーブルに保存し、
/// 作成したアイテムを201レスポンスで返却する。
use std::sync::Arc;

use group_events::application::CreateGroupHandler;
use group_events::infrastructure::config::load_dynamodb_client;
use group_events::infrastructure::{init_logging, DynamoGroupRepository, GroupsConfig};
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // 設定はコールドスタート時に一度だけ読み込む
    let config = match GroupsConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "groups設定読み込み失敗");
            return Err(err.into());
        }
    };

    // DynamoDBクライアントは呼び出し間で共有する
    let client = load_dynamodb_client().await;
    let repository = DynamoGroupRepository::new(client, config.table_name().to_string());
    let handler = Arc::new(CreateGroupHandler::new(repository));

    info!(table_name = config.table_name(), "グループ作成Lambda関数を初期化");

    run(service_fn(move |request: Request| {
        let handler = handler.clone();
        async move { handle(&handler, request).await }
    }))
    .await
}

/// HTTPリクエストハンドラー
async fn handle(
    handler: &CreateGroupHandler<DynamoGroupRepository>,
    request: Request,
) -> Result<Response<Body>, Error> {
    let request_id = request
        .lambda_context_ref()
        .map(|context| context.request_id.clone())
        .unwrap_or_default();
    let span = tracing::info_span!("invocation", request_id = %request_id);

    handler.handle(&request).instrument(span).await
}
