use super::SeaOrmStorage;
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::teachers::{Column as TeacherColumn, Entity as Teachers};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{CampusError, Result};
use crate::models::users::{entities::User, requests::CreateUserRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

/// 在给定连接（或事务）上插入账号，唯一约束冲突映射为 Conflict
pub(super) async fn insert_user<C: ConnectionTrait>(
    conn: &C,
    req: CreateUserRequest,
    now: i64,
) -> Result<crate::entity::users::Model> {
    let model = ActiveModel {
        username: Set(req.username),
        password_hash: Set(req.password_hash),
        roles: Set(req.roles.to_column()),
        is_superuser: Set(req.is_superuser),
        dark_mode: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(model.insert(conn).await?)
}

impl SeaOrmStorage {
    /// 创建账号
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();
        let model = insert_user(&self.db, req, now).await?;
        Ok(model.into_user())
    }

    /// 通过 ID 获取账号
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取账号
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 删除账号，档案、公告与通知由外键级联删除
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("删除账号失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn update_password_impl(&self, id: i64, password_hash: String) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(
                Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("更新密码失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn update_dark_mode_impl(&self, id: i64, dark_mode: bool) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(Column::DarkMode, sea_orm::sea_query::Expr::value(dark_mode))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("更新界面设置失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计账号数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("统计账号数量失败: {e}")))?;

        Ok(count)
    }

    /// 账号关联的学生档案与教师档案
    pub async fn get_profile_ids_impl(&self, user_id: i64) -> Result<(Option<i64>, Option<i64>)> {
        let student = Students::find()
            .filter(StudentColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询学生档案失败: {e}")))?;

        let teacher = Teachers::find()
            .filter(TeacherColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询教师档案失败: {e}")))?;

        Ok((student.map(|s| s.id), teacher.map(|t| t.id)))
    }
}
