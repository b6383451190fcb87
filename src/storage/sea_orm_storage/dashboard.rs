use super::SeaOrmStorage;
use crate::entity::prelude::{Classrooms, Notices, Students, Teachers};
use crate::errors::{CampusError, Result};
use crate::models::dashboard::DashboardCounts;
use sea_orm::{EntityTrait, PaginatorTrait};

impl SeaOrmStorage {
    /// 仪表盘统计
    pub async fn dashboard_counts_impl(&self) -> Result<DashboardCounts> {
        let map_err = |e: sea_orm::DbErr| CampusError::database_operation(format!("统计失败: {e}"));

        Ok(DashboardCounts {
            students: Students::find().count(&self.db).await.map_err(map_err)?,
            teachers: Teachers::find().count(&self.db).await.map_err(map_err)?,
            classrooms: Classrooms::find().count(&self.db).await.map_err(map_err)?,
            notices: Notices::find().count(&self.db).await.map_err(map_err)?,
        })
    }
}
