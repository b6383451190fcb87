use super::entities::Notice;
use crate::models::common::PaginatedResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NoticeResponse {
    pub notice: Notice,
}

pub type NoticeListResponse = PaginatedResponse<Notice>;
