use garde::Validate;
use kernel::model::list::ListOptions;
use serde::{Deserialize, Serialize};

pub mod auth;
pub mod event;
pub mod hotel;
pub mod invoice;
pub mod reservation;
pub mod room;
pub mod service;
pub mod user;

// 一覧系エンドポイント共通のクエリパラメータ
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[garde(range(min = 1))]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[garde(range(min = 0))]
    #[serde(default)]
    pub offset: i64,
}

const fn default_limit() -> i64 {
    10
}

impl From<ListQuery> for ListOptions {
    fn from(value: ListQuery) -> Self {
        let ListQuery { limit, offset } = value;
        ListOptions { limit, offset }
    }
}

// 年単位の集計エンドポイントで使うクエリパラメータ。
// 省略時は今年が対象になる
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct YearQuery {
    #[garde(inner(range(min = 2000, max = 9999)))]
    pub year: Option<i32>,
}

// 返すものが操作結果のメッセージだけのときの応答
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: &str) -> Self {
        Self {
            success: true,
            msg: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_falls_back_to_its_defaults() {
        let query: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset, 0);
    }

    #[test]
    fn a_zero_limit_fails_validation() {
        let query: ListQuery = serde_json::from_str(r#"{"limit": 0}"#).unwrap();
        assert!(query.validate(&()).is_err());
    }
}
