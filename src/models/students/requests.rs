use super::entities::Gender;
use crate::models::common::PaginationQuery;
use serde::{Deserialize, Deserializer};

// 创建学生（同时创建账号）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentRequest {
    pub username: String,
    pub password: String,
    pub roll_number: i64,
    pub classroom_id: Option<i64>,
    pub gender: Gender,
    pub date_of_birth: chrono::NaiveDate,
    #[serde(default)]
    pub address: String,
    pub profile_image: Option<String>,
}

// 更新学生档案，未提供的字段保持不变
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudentRequest {
    pub roll_number: Option<i64>,
    /// 缺省不修改，显式 null 取消分班
    #[serde(default, deserialize_with = "present_or_null")]
    pub classroom_id: Option<Option<i64>>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub address: Option<String>,
    pub profile_image: Option<String>,
}

// 字段出现即为 Some，值为 null 时得到 Some(None)
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// 列表查询
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classroom_id_distinguishes_missing_and_null() {
        let missing: UpdateStudentRequest = serde_json::from_str(r#"{"address":"x"}"#).unwrap();
        assert_eq!(missing.classroom_id, None);

        let cleared: UpdateStudentRequest =
            serde_json::from_str(r#"{"classroom_id":null}"#).unwrap();
        assert_eq!(cleared.classroom_id, Some(None));

        let assigned: UpdateStudentRequest =
            serde_json::from_str(r#"{"classroom_id":3}"#).unwrap();
        assert_eq!(assigned.classroom_id, Some(Some(3)));
    }
}
