use std::sync::Arc;

use crate::models::notifications::requests::CreateNotificationRequest;
use crate::storage::Storage;

/// 业务操作成功之后给操作者写一条通知
///
/// 通知写入失败不影响已经完成的业务操作，只记录日志。
pub async fn notify(
    storage: &Arc<dyn Storage>,
    user_id: i64,
    title: &str,
    message: impl Into<String>,
) {
    let req = CreateNotificationRequest {
        user_id: Some(user_id),
        title: title.to_string(),
        message: message.into(),
    };

    if let Err(e) = storage.create_notification(req).await {
        tracing::warn!("Failed to create notification '{}' for user {}: {}", title, user_id, e);
    }
}
