//! 成绩实体

use sea_orm::entity::prelude::*;

use super::users::ts_to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub student_id: i64,
    pub subject1: i32,
    pub subject2: i32,
    pub subject3: i32,
    pub subject4: i32,
    pub subject5: i32,
    pub subject6: i32,
    pub subject7: i32,
    pub total: i32,
    #[sea_orm(column_type = "Double")]
    pub percentage: f64,
    pub grade: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_result(self) -> crate::models::results::entities::StudentResult {
        use crate::models::results::entities::{StudentResult, SubjectScores};

        let scores = SubjectScores {
            subject1: self.subject1,
            subject2: self.subject2,
            subject3: self.subject3,
            subject4: self.subject4,
            subject5: self.subject5,
            subject6: self.subject6,
            subject7: self.subject7,
        };
        // 等级以存储值为准，解析失败时按分数重新推导
        let grade = self
            .grade
            .parse()
            .unwrap_or_else(|_| scores.summarize().grade);

        StudentResult {
            id: self.id,
            student_id: self.student_id,
            scores,
            total: self.total,
            percentage: self.percentage,
            grade,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
