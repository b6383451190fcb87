use super::entities::{RoleFlags, User};
use serde::Serialize;

// 当前账号信息
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user: User,
    pub flags: RoleFlags,
    pub student_id: Option<i64>,
    pub teacher_id: Option<i64>,
}
