/// DynamoDB Streamsロガー Lambda関数
///
/// groupsテーブルのストリームイベントを受け取り、バッチと各レコードをログに記録する。
/// エラー時はLambdaのエラーとして返し、再試行はイベントソース側の設定に任せる。
use aws_lambda_events::event::dynamodb::Event;
use group_events::application::StreamLogger;
use group_events::infrastructure::init_logging;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing::{error, info_span};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    let func = service_fn(handler);
    lambda_runtime::run(func).await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
async fn handler(event: LambdaEvent<Event>) -> Result<(), Error> {
    let span = info_span!("invocation", request_id = %event.context.request_id);

    span.in_scope(|| {
        StreamLogger::new().handle(&event.payload).map_err(|err| {
            error!(error = %err, "DynamoDB Streamsバッチの処理に失敗");
            Error::from(err)
        })
    })
}
