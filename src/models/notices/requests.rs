use crate::models::common::PaginationQuery;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoticeRequest {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoticeRequest {
    pub title: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoticeListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
}
