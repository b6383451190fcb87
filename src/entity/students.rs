//! 学生实体

use sea_orm::entity::prelude::*;

use super::users::ts_to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    #[sea_orm(unique)]
    pub roll_number: i64,
    pub classroom_id: Option<i64>,
    pub gender: String,
    pub date_of_birth: Date,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub profile_image: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::classrooms::Entity",
        from = "Column::ClassroomId",
        to = "super::classrooms::Column::Id",
        on_delete = "SetNull"
    )]
    Classroom,
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
    #[sea_orm(has_one = "super::results::Entity")]
    StudentResult,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classroom.def()
    }
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl Related<super::results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentResult.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 需要账号的用户名一起组装
    pub fn into_student(self, username: String) -> crate::models::students::entities::Student {
        use crate::models::students::entities::{Gender, Student};

        Student {
            id: self.id,
            user_id: self.user_id,
            username,
            roll_number: self.roll_number,
            classroom_id: self.classroom_id,
            gender: self.gender.parse().unwrap_or(Gender::Male),
            date_of_birth: self.date_of_birth,
            address: self.address,
            profile_image: self.profile_image,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
