/// S3アップロード通知 Lambda関数
///
/// バケットへのアップロード通知を受け取り、各オブジェクトのメタデータとキーをログに記録する。
use aws_lambda_events::event::s3::S3Event;
use group_events::application::UploadNotifier;
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
async fn handler(event: LambdaEvent<S3Event>) -> Result<(), Error> {
    let span = info_span!("invocation", request_id = %event.context.request_id);

    span.in_scope(|| {
        UploadNotifier::new().handle(&event.payload).map_err(|err| {
            error!(error = %err, "S3イベントの処理に失敗");
            Error::from(err)
        })
    })
}
