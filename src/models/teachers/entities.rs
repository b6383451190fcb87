use serde::{Deserialize, Serialize};

// 教师档案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub subject: String,
    pub phone: String,
    pub joining_date: chrono::NaiveDate,
    pub profile_image: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
