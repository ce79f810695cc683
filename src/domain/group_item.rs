/// グループアイテム
///
/// リクエストボディのフィールドと生成されたIDを合成した、
/// groupsテーブルに保存されるレコード。
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// グループIDを保持する予約フィールド名
pub const GROUP_ID_FIELD: &str = "id";

/// groupsテーブルに保存するアイテム
///
/// リクエストボディの全フィールドに加え、`id`フィールドを必ず持つ。
/// `id`は常にリクエストごとに新規生成され、ボディ側の`id`は上書きされる。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GroupItem {
    fields: Map<String, Value>,
}

impl GroupItem {
    /// 新しいUUID v4を生成してGroupItemを作成
    ///
    /// # Arguments
    /// * `body` - パース済みのリクエストボディ（JSONオブジェクト）
    pub fn create(body: Map<String, Value>) -> Self {
        Self::with_id(Uuid::new_v4(), body)
    }

    /// 指定したIDでGroupItemを作成
    ///
    /// ボディのフィールドを先に入れ、IDを最後に挿入するため
    /// ボディに`id`があっても生成IDが優先される。
    pub fn with_id(id: Uuid, body: Map<String, Value>) -> Self {
        let mut fields = body;
        fields.insert(GROUP_ID_FIELD.to_string(), Value::String(id.to_string()));
        Self { fields }
    }

    /// グループIDを取得
    pub fn id(&self) -> &str {
        // with_idで必ず文字列として挿入している
        self.fields
            .get(GROUP_ID_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// 全フィールドへの参照を取得
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
