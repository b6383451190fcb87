use super::entities::SubjectScores;
use serde::Deserialize;

// 保存（新建或覆盖）某学生的成绩
#[derive(Debug, Clone, Deserialize)]
pub struct SaveResultRequest {
    pub student_id: i64,
    #[serde(flatten)]
    pub scores: SubjectScores,
}
