use serde::Serialize;

use super::entities::Notification;
use crate::models::common::PaginatedResponse;

pub type NotificationListResponse = PaginatedResponse<Notification>;

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub unread_count: u64,
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub marked_count: u64,
}
