pub mod attendance;
pub mod auth;
pub mod classrooms;
pub mod common;
pub mod dashboard;
pub mod files;
pub mod notices;
pub mod notifications;
pub mod results;
pub mod students;
pub mod teachers;
pub mod users;

pub use common::{ApiResponse, ErrorCode, PaginatedResponse, PaginationInfo, PaginationQuery};

// 应用启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
