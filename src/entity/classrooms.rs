//! 班级实体

use sea_orm::entity::prelude::*;

use super::users::ts_to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classrooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_name: String,
    pub section: String,
    pub class_teacher_id: Option<i64>,
    pub total_students: i32,
    pub capacity: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ClassTeacherId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    ClassTeacher,
    #[sea_orm(has_many = "super::students::Entity")]
    Students,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassTeacher.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_classroom(self) -> crate::models::classrooms::entities::ClassRoom {
        crate::models::classrooms::entities::ClassRoom {
            id: self.id,
            class_name: self.class_name,
            section: self.section,
            class_teacher_id: self.class_teacher_id,
            total_students: self.total_students,
            capacity: self.capacity,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
