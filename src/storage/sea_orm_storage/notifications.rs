//! 通知存储操作

use super::SeaOrmStorage;
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{CampusError, Result};
use crate::models::{
    PaginationInfo,
    notifications::{
        entities::Notification,
        requests::{CreateNotificationRequest, NotificationListParams},
        responses::NotificationListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建通知，默认未读
    pub async fn create_notification_impl(
        &self,
        req: CreateNotificationRequest,
    ) -> Result<Notification> {
        let model = ActiveModel {
            user_id: Set(req.user_id),
            title: Set(req.title),
            message: Set(req.message),
            is_read: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("创建通知失败: {e}")))?;

        Ok(result.into_notification())
    }

    pub async fn get_notification_by_id_impl(
        &self,
        notification_id: i64,
    ) -> Result<Option<Notification>> {
        let result = Notifications::find_by_id(notification_id)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询通知失败: {e}")))?;

        Ok(result.map(|m| m.into_notification()))
    }

    /// 列出发给该账号的通知（分页，最新在前）
    pub async fn list_notifications_with_pagination_impl(
        &self,
        user_id: i64,
        query: NotificationListParams,
    ) -> Result<NotificationListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Notifications::find().filter(Column::UserId.eq(user_id));

        // 未读筛选
        if let Some(true) = query.unread_only {
            select = select.filter(Column::IsRead.eq(false));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询通知总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询通知页数失败: {e}")))?;
        let notifications = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询通知列表失败: {e}")))?;

        Ok(NotificationListResponse {
            items: notifications
                .into_iter()
                .map(|m| m.into_notification())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 标记已读，只会置为 true
    pub async fn mark_notification_read_impl(&self, notification_id: i64) -> Result<bool> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, Expr::value(true))
            .filter(Column::Id.eq(notification_id))
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("标记通知已读失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 标记该账号全部通知为已读，返回本次变更的条数
    pub async fn mark_all_notifications_read_impl(&self, user_id: i64) -> Result<u64> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, Expr::value(true))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("批量标记已读失败: {e}")))?;

        Ok(result.rows_affected)
    }

    pub async fn delete_notification_impl(&self, notification_id: i64) -> Result<bool> {
        let result = Notifications::delete_by_id(notification_id)
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("删除通知失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_unread_notifications_impl(&self, user_id: i64) -> Result<u64> {
        let count = Notifications::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询未读通知数量失败: {e}")))?;

        Ok(count)
    }
}
