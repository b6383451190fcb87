//! 账号实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub roles: String,
    pub is_superuser: bool,
    pub dark_mode: bool,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::students::Entity")]
    Student,
    #[sea_orm(has_one = "super::teachers::Entity")]
    Teacher,
    #[sea_orm(has_many = "super::notices::Entity")]
    Notices,
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::notices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notices.def()
    }
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub(crate) fn ts_to_datetime(ts: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::<chrono::Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{RoleSet, User};

        User {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
            roles: RoleSet::from_column(&self.roles),
            is_superuser: self.is_superuser,
            dark_mode: self.dark_mode,
            last_login: self.last_login.map(ts_to_datetime),
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
