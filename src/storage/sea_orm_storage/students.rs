use super::SeaOrmStorage;
use super::users::insert_user;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{CampusError, Result};
use crate::models::{
    PaginationInfo,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListParams, UpdateStudentRequest},
        responses::StudentListResponse,
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
    /// 在一个事务中创建学生账号与档案
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

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
                roles: RoleSet::single(Role::Student),
                is_superuser: false,
            },
            now,
        )
        .await?;

        let student = ActiveModel {
            user_id: Set(user.id),
            roll_number: Set(req.roll_number),
            classroom_id: Set(req.classroom_id),
            gender: Set(req.gender.as_str().to_string()),
            date_of_birth: Set(req.date_of_birth),
            address: Set(req.address),
            profile_image: Set(req.profile_image),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit()
            .await
            .map_err(|e| CampusError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(student.into_student(user.username))
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|(s, u)| s.into_student(u.map(|u| u.username).unwrap_or_default())))
    }

    pub async fn get_student_by_user_id_impl(&self, user_id: i64) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::UserId.eq(user_id))
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|(s, u)| s.into_student(u.map(|u| u.username).unwrap_or_default())))
    }

    /// 分页列出学生，按学号升序
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListParams,
    ) -> Result<StudentListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Students::find().find_also_related(Users);

        // 用户名模糊匹配，纯数字时同时匹配学号
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let search = search.trim();
            let mut cond = Condition::any().add(UserColumn::Username.like(contains_pattern(search)));
            if let Ok(roll) = search.parse::<i64>() {
                cond = cond.add(Column::RollNumber.eq(roll));
            }
            select = select.filter(cond);
        }

        let paginator = select.order_by_asc(Column::RollNumber).paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询学生总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询学生页数失败: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(StudentListResponse {
            items: rows
                .into_iter()
                .map(|(s, u)| s.into_student(u.map(|u| u.username).unwrap_or_default()))
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 部分更新学生档案
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let existing = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询学生失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(roll_number) = update.roll_number {
            model.roll_number = Set(roll_number);
        }
        if let Some(classroom_id) = update.classroom_id {
            model.classroom_id = Set(classroom_id);
        }
        if let Some(gender) = update.gender {
            model.gender = Set(gender.as_str().to_string());
        }
        if let Some(date_of_birth) = update.date_of_birth {
            model.date_of_birth = Set(date_of_birth);
        }
        if let Some(address) = update.address {
            model.address = Set(address);
        }
        if let Some(profile_image) = update.profile_image {
            model.profile_image = Set(Some(profile_image));
        }

        // 学号唯一冲突经 From<DbErr> 转换为 Conflict
        model.update(&self.db).await?;

        self.get_student_by_id_impl(id).await
    }
}
