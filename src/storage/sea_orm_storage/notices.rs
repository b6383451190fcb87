use super::SeaOrmStorage;
use crate::entity::notices::{ActiveModel, Column, Entity as Notices};
use crate::errors::{CampusError, Result};
use crate::models::{
    PaginationInfo,
    notices::{
        entities::Notice,
        requests::{CreateNoticeRequest, NoticeListParams, UpdateNoticeRequest},
        responses::NoticeListResponse,
    },
};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, Set, TransactionTrait};

impl SeaOrmStorage {
    pub async fn create_notice_impl(
        &self,
        created_by: i64,
        req: CreateNoticeRequest,
    ) -> Result<Notice> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            message: Set(req.message),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into_notice())
    }

    pub async fn get_notice_by_id_impl(&self, id: i64) -> Result<Option<Notice>> {
        let result = Notices::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询公告失败: {e}")))?;

        Ok(result.map(|m| m.into_notice()))
    }

    /// 公告列表，最新在前
    pub async fn list_notices_with_pagination_impl(
        &self,
        query: NoticeListParams,
    ) -> Result<NoticeListResponse> {
        let (page, size) = query.pagination.normalized();

        let paginator = Notices::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询公告总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询公告页数失败: {e}")))?;
        let notices = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询公告列表失败: {e}")))?;

        Ok(NoticeListResponse {
            items: notices.into_iter().map(|m| m.into_notice()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_notice_impl(
        &self,
        id: i64,
        update: UpdateNoticeRequest,
    ) -> Result<Option<Notice>> {
        if self.get_notice_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(message) = update.message {
            model.message = Set(message);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("更新公告失败: {e}")))?;

        Ok(Some(result.into_notice()))
    }

    /// 删除公告并返回删除前的内容，不存在时返回 None
    pub async fn delete_notice_impl(&self, id: i64) -> Result<Option<Notice>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CampusError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = Notices::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询公告失败: {e}")))?
        else {
            return Ok(None);
        };

        let result = Notices::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| CampusError::database_operation(format!("删除公告失败: {e}")))?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        txn.commit()
            .await
            .map_err(|e| CampusError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(existing.into_notice()))
    }
}
