use serde::Serialize;

use crate::models::users::entities::RoleFlags;

// 各类记录总数
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardCounts {
    pub students: u64,
    pub teachers: u64,
    pub classrooms: u64,
    pub notices: u64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub flags: RoleFlags,
    #[serde(flatten)]
    pub counts: DashboardCounts,
    pub unread_notifications: u64,
}
