use super::entities::AttendanceRecord;
use serde::Serialize;

// 某一天的考勤汇总
#[derive(Debug, Serialize)]
pub struct AttendanceDayResponse {
    pub date: chrono::NaiveDate,
    pub records: Vec<AttendanceRecord>,
    pub present_count: usize,
    pub absent_count: usize,
}

#[derive(Debug, Serialize)]
pub struct MarkAttendanceResponse {
    pub date: chrono::NaiveDate,
    pub marked: usize,
}

#[derive(Debug, Serialize)]
pub struct MyAttendanceResponse {
    pub items: Vec<AttendanceRecord>,
}
