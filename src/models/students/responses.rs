use super::entities::Student;
use crate::models::common::PaginatedResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub student: Student,
}

pub type StudentListResponse = PaginatedResponse<Student>;
