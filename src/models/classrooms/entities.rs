use serde::{Deserialize, Serialize};

// 班级，total_students 为手工录入的数字
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRoom {
    pub id: i64,
    pub class_name: String,
    pub section: String,
    pub class_teacher_id: Option<i64>,
    pub total_students: i32,
    pub capacity: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
