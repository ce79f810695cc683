// S3オブジェクトキー
//
// S3イベント通知のキーはURLエンコードされている（スペースは`+`）。
// ログ出力用に生のキーとデコード済みキーの両方を保持する。

/// S3イベント通知から取り出したオブジェクトキー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey {
    raw: String,
    decoded: String,
}

impl ObjectKey {
    /// 通知に含まれる生のキーからObjectKeyを作成
    ///
    /// デコードに失敗した場合（不正なUTF-8など）は生のキーをそのまま使う。
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let plus_decoded = raw.replace('+', " ");
        let decoded = match urlencoding::decode(&plus_decoded) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw.clone(),
        };

        Self { raw, decoded }
    }

    /// 通知に含まれていたままのキー
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// URLデコード済みのキー
    pub fn decoded(&self) -> &str {
        &self.decoded
    }
}
