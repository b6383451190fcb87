use super::SeaOrmStorage;
use super::users::insert_user;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{CampusError, Result};
use crate::models::{
    PaginationInfo,
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListParams, UpdateTeacherRequest},
        responses::TeacherListResponse,
    },
    users::{
        entities::{Role, RoleSet},
        requests::CreateUserRequest,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 在一个事务中创建教师账号与档案，入职日期为当天
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        let now = chrono::Utc::now();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CampusError::database_operation(format!("开启事务失败: {e}")))?;

        let user = insert_user(
            &txn,
            CreateUserRequest {
                username: req.username,
                password_hash: req.password,
                roles: RoleSet::single(Role::Teacher),
                is_superuser: false,
            },
            now.timestamp(),
        )
        .await?;

        let teacher = ActiveModel {
            user_id: Set(user.id),
            full_name: Set(req.full_name),
            email: Set(req.email),
            subject: Set(req.subject),
            phone: Set(req.phone),
            joining_date: Set(now.date_naive()),
            profile_image: Set(req.profile_image),
            created_at: Set(now.timestamp()),
            updated_at: Set(now.timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit()
            .await
            .map_err(|e| CampusError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(teacher.into_teacher(user.username))
    }

    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|(t, u)| t.into_teacher(u.map(|u| u.username).unwrap_or_default())))
    }

    /// 分页列出教师，按姓名排序
    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: TeacherListParams,
    ) -> Result<TeacherListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Teachers::find().find_also_related(Users);

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::FullName.like(contains_pattern(pattern)))
                    .add(Column::Email.like(contains_pattern(pattern)))
                    .add(UserColumn::Username.like(contains_pattern(pattern))),
            );
        }

        let paginator = select
            .order_by_asc(Column::FullName)
            .order_by_asc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询教师总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询教师页数失败: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(TeacherListResponse {
            items: rows
                .into_iter()
                .map(|(t, u)| t.into_teacher(u.map(|u| u.username).unwrap_or_default()))
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_teacher_impl(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        let existing = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询教师失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name);
        }
        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(subject) = update.subject {
            model.subject = Set(subject);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(phone);
        }
        if let Some(profile_image) = update.profile_image {
            model.profile_image = Set(Some(profile_image));
        }

        model.update(&self.db).await?;

        self.get_teacher_by_id_impl(id).await
    }
}
