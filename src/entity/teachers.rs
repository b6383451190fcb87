//! 教师实体

use sea_orm::entity::prelude::*;

use super::users::ts_to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub subject: String,
    pub phone: String,
    pub joining_date: Date,
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
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher(self, username: String) -> crate::models::teachers::entities::Teacher {
        crate::models::teachers::entities::Teacher {
            id: self.id,
            user_id: self.user_id,
            username,
            full_name: self.full_name,
            email: self.email,
            subject: self.subject,
            phone: self.phone,
            joining_date: self.joining_date,
            profile_image: self.profile_image,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
