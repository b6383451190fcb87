use crate::models::common::{PaginationQuery, pagination::deserialize_opt_bool};
use serde::Deserialize;

// 仅由业务操作成功后内部创建
#[derive(Debug, Clone)]
pub struct CreateNotificationRequest {
    pub user_id: Option<i64>,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub unread_only: Option<bool>,
}
