use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{CampusError, Result};
use crate::models::attendance::entities::{AttendanceRecord, AttendanceStatus};
use sea_orm::{
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::OnConflict,
};

impl SeaOrmStorage {
    /// 批量登记某天考勤
    ///
    /// 同一学生重复出现时以最后一条为准；任一学生不存在则整批失败，不写入任何记录。
    /// 返回实际写入（新建或覆盖）的学生数。
    pub async fn mark_attendance_impl(
        &self,
        date: chrono::NaiveDate,
        entries: Vec<(i64, AttendanceStatus)>,
    ) -> Result<usize> {
        let collapsed: BTreeMap<i64, AttendanceStatus> = entries.into_iter().collect();
        if collapsed.is_empty() {
            return Ok(0);
        }

        let ids: Vec<i64> = collapsed.keys().copied().collect();
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CampusError::database_operation(format!("开启事务失败: {e}")))?;

        let found: BTreeSet<i64> = Students::find()
            .select_only()
            .column(StudentColumn::Id)
            .filter(StudentColumn::Id.is_in(ids.clone()))
            .into_tuple::<i64>()
            .all(&txn)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .collect();

        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !found.contains(id))
            .map(|id| id.to_string())
            .collect();
        if !missing.is_empty() {
            // txn 在此处被丢弃即回滚
            return Err(CampusError::not_found(format!(
                "Student(s) not found: {}",
                missing.join(", ")
            )));
        }

        for (student_id, status) in &collapsed {
            let model = ActiveModel {
                student_id: Set(*student_id),
                date: Set(date),
                status: Set(status.as_str().to_string()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };

            Attendance::insert(model)
                .on_conflict(
                    OnConflict::columns([Column::StudentId, Column::Date])
                        .update_columns([Column::Status, Column::UpdatedAt])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit()
            .await
            .map_err(|e| CampusError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(collapsed.len())
    }

    /// 某天全部考勤，按学号排序
    pub async fn list_attendance_by_date_impl(
        &self,
        date: chrono::NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        let rows = Attendance::find()
            .filter(Column::Date.eq(date))
            .find_also_related(Students)
            .all(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询考勤失败: {e}")))?;

        let user_ids: Vec<i64> = rows
            .iter()
            .filter_map(|(_, s)| s.as_ref().map(|s| s.user_id))
            .collect();
        let usernames = self.usernames_by_ids(user_ids).await?;

        let mut records: Vec<AttendanceRecord> = rows
            .into_iter()
            .filter_map(|(a, s)| {
                let s = s?;
                let username = usernames.get(&s.user_id).cloned().unwrap_or_default();
                Some(a.into_record(username, s.roll_number))
            })
            .collect();
        records.sort_by_key(|r| r.roll_number);

        Ok(records)
    }

    /// 某学生的全部考勤，日期倒序
    pub async fn list_attendance_for_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<AttendanceRecord>> {
        let Some((student, user)) = Students::find_by_id(student_id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(Vec::new());
        };
        let username = user.map(|u| u.username).unwrap_or_default();

        let rows = Attendance::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|a| a.into_record(username.clone(), student.roll_number))
            .collect())
    }

    async fn usernames_by_ids(&self, ids: Vec<i64>) -> Result<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Users::find()
            .select_only()
            .column(UserColumn::Id)
            .column(UserColumn::Username)
            .filter(UserColumn::Id.is_in(ids))
            .into_tuple::<(i64, String)>()
            .all(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(rows.into_iter().collect())
    }
}
