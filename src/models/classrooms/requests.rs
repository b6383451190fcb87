use crate::models::common::PaginationQuery;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassRoomRequest {
    pub class_name: String,
    pub section: String,
    pub class_teacher_id: Option<i64>,
    #[serde(default)]
    pub total_students: i32,
    pub capacity: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassRoomListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}
