use super::SeaOrmStorage;
use crate::entity::classrooms::{ActiveModel, Column, Entity as Classrooms};
use crate::errors::{CampusError, Result};
use crate::models::{
    PaginationInfo,
    classrooms::{
        entities::ClassRoom,
        requests::{ClassRoomListParams, CreateClassRoomRequest},
        responses::ClassRoomListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建班级，(班级名, 分班) 重复时返回 Conflict
    pub async fn create_classroom_impl(&self, req: CreateClassRoomRequest) -> Result<ClassRoom> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_name: Set(req.class_name),
            section: Set(req.section),
            class_teacher_id: Set(req.class_teacher_id),
            total_students: Set(req.total_students),
            capacity: Set(req.capacity),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into_classroom())
    }

    pub async fn get_classroom_by_id_impl(&self, id: i64) -> Result<Option<ClassRoom>> {
        let result = Classrooms::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_classroom()))
    }

    pub async fn list_classrooms_with_pagination_impl(
        &self,
        query: ClassRoomListParams,
    ) -> Result<ClassRoomListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Classrooms::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::ClassName.like(contains_pattern(pattern)))
                    .add(Column::Section.like(contains_pattern(pattern))),
            );
        }

        let paginator = select
            .order_by_asc(Column::ClassName)
            .order_by_asc(Column::Section)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询班级总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询班级页数失败: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(ClassRoomListResponse {
            items: rows.into_iter().map(|m| m.into_classroom()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 删除班级，学生的班级字段由外键置空
    pub async fn delete_classroom_impl(&self, id: i64) -> Result<bool> {
        let result = Classrooms::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
