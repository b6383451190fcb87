use super::entities::Teacher;
use crate::models::common::PaginatedResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TeacherResponse {
    pub teacher: Teacher,
}

pub type TeacherListResponse = PaginatedResponse<Teacher>;
