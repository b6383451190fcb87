use super::entities::ClassRoom;
use crate::models::common::PaginatedResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ClassRoomResponse {
    pub classroom: ClassRoom,
}

pub type ClassRoomListResponse = PaginatedResponse<ClassRoom>;
