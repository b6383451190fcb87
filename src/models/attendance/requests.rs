use super::entities::AttendanceStatus;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceEntry {
    pub student_id: i64,
    pub status: AttendanceStatus,
}

// 批量点名，date 缺省为当天
#[derive(Debug, Clone, Deserialize)]
pub struct MarkAttendanceRequest {
    pub date: Option<chrono::NaiveDate>,
    pub records: Vec<AttendanceEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceQuery {
    pub date: Option<chrono::NaiveDate>,
}
