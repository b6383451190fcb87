use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 创建教师（同时创建账号，入职日期取创建当天）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeacherRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub subject: String,
    pub phone: String,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTeacherRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub phone: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeacherListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}
