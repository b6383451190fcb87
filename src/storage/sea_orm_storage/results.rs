use super::SeaOrmStorage;
use crate::entity::results::{ActiveModel, Column, Entity as Results};
use crate::errors::{CampusError, Result};
use crate::models::results::entities::{StudentResult, SubjectScores};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set, sea_query::OnConflict};

impl SeaOrmStorage {
    /// 新建或覆盖学生成绩，派生字段每次重新计算
    pub async fn save_result_impl(
        &self,
        student_id: i64,
        scores: SubjectScores,
    ) -> Result<StudentResult> {
        let summary = scores.summarize();
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            subject1: Set(scores.subject1),
            subject2: Set(scores.subject2),
            subject3: Set(scores.subject3),
            subject4: Set(scores.subject4),
            subject5: Set(scores.subject5),
            subject6: Set(scores.subject6),
            subject7: Set(scores.subject7),
            total: Set(summary.total),
            percentage: Set(summary.percentage),
            grade: Set(summary.grade.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Results::insert(model)
            .on_conflict(
                OnConflict::column(Column::StudentId)
                    .update_columns([
                        Column::Subject1,
                        Column::Subject2,
                        Column::Subject3,
                        Column::Subject4,
                        Column::Subject5,
                        Column::Subject6,
                        Column::Subject7,
                        Column::Total,
                        Column::Percentage,
                        Column::Grade,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        self.get_result_by_student_id_impl(student_id)
            .await?
            .ok_or_else(|| CampusError::database_operation("保存成绩后读取失败"))
    }

    pub async fn get_result_by_student_id_impl(
        &self,
        student_id: i64,
    ) -> Result<Option<StudentResult>> {
        let result = Results::find()
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_result()))
    }
}
