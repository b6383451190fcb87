//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod attendance;
mod classrooms;
mod dashboard;
mod notices;
mod notifications;
mod results;
mod students;
mod teachers;
mod users;


use crate::config::AppConfig;
use crate::errors::{CampusError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接数据库并执行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout_secs: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout_secs).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout_secs).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| CampusError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 测试用内存库
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Self {
        Self::connect("sqlite::memory:", 1, 5)
            .await
            .expect("failed to open in-memory database")
    }

    /// SQLite 专用连接（文件库启用 WAL，内存库固定单连接）
    async fn connect_sqlite(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CampusError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory");
        }

        // 内存库的每个连接都是独立的数据库，且连接关闭后数据即丢失
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(pool_size.max(1))
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .connect_with(opt)
            .await
            .map_err(|e| CampusError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL）
    async fn connect_generic(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(timeout_secs))
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| CampusError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 推断数据库类型
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CampusError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    attendance::entities::{AttendanceRecord, AttendanceStatus},
    classrooms::{
        entities::ClassRoom,
        requests::{ClassRoomListParams, CreateClassRoomRequest},
        responses::ClassRoomListResponse,
    },
    dashboard::DashboardCounts,
    notices::{
        entities::Notice,
        requests::{CreateNoticeRequest, NoticeListParams, UpdateNoticeRequest},
        responses::NoticeListResponse,
    },
    notifications::{
        entities::Notification,
        requests::{CreateNotificationRequest, NotificationListParams},
        responses::NotificationListResponse,
    },
    results::entities::{StudentResult, SubjectScores},
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListParams, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListParams, UpdateTeacherRequest},
        responses::TeacherListResponse,
    },
    users::{entities::User, requests::CreateUserRequest},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账号
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn update_password(&self, id: i64, password_hash: String) -> Result<bool> {
        self.update_password_impl(id, password_hash).await
    }

    async fn update_dark_mode(&self, id: i64, dark_mode: bool) -> Result<bool> {
        self.update_dark_mode_impl(id, dark_mode).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn get_profile_ids(&self, user_id: i64) -> Result<(Option<i64>, Option<i64>)> {
        self.get_profile_ids_impl(user_id).await
    }

    // 学生
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(req).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListParams,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    // 教师
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        self.create_teacher_impl(req).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListParams,
    ) -> Result<TeacherListResponse> {
        self.list_teachers_with_pagination_impl(query).await
    }

    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, update).await
    }

    // 班级
    async fn create_classroom(&self, req: CreateClassRoomRequest) -> Result<ClassRoom> {
        self.create_classroom_impl(req).await
    }

    async fn get_classroom_by_id(&self, id: i64) -> Result<Option<ClassRoom>> {
        self.get_classroom_by_id_impl(id).await
    }

    async fn list_classrooms_with_pagination(
        &self,
        query: ClassRoomListParams,
    ) -> Result<ClassRoomListResponse> {
        self.list_classrooms_with_pagination_impl(query).await
    }

    async fn delete_classroom(&self, id: i64) -> Result<bool> {
        self.delete_classroom_impl(id).await
    }

    // 考勤
    async fn mark_attendance(
        &self,
        date: chrono::NaiveDate,
        entries: Vec<(i64, AttendanceStatus)>,
    ) -> Result<usize> {
        self.mark_attendance_impl(date, entries).await
    }

    async fn list_attendance_by_date(
        &self,
        date: chrono::NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_by_date_impl(date).await
    }

    async fn list_attendance_for_student(&self, student_id: i64) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_for_student_impl(student_id).await
    }

    // 公告
    async fn create_notice(&self, created_by: i64, req: CreateNoticeRequest) -> Result<Notice> {
        self.create_notice_impl(created_by, req).await
    }

    async fn get_notice_by_id(&self, id: i64) -> Result<Option<Notice>> {
        self.get_notice_by_id_impl(id).await
    }

    async fn list_notices_with_pagination(
        &self,
        query: NoticeListParams,
    ) -> Result<NoticeListResponse> {
        self.list_notices_with_pagination_impl(query).await
    }

    async fn update_notice(&self, id: i64, update: UpdateNoticeRequest) -> Result<Option<Notice>> {
        self.update_notice_impl(id, update).await
    }

    async fn delete_notice(&self, id: i64) -> Result<Option<Notice>> {
        self.delete_notice_impl(id).await
    }

    // 通知
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification> {
        self.create_notification_impl(req).await
    }

    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>> {
        self.get_notification_by_id_impl(id).await
    }

    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListParams,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(user_id, query)
            .await
    }

    async fn mark_notification_read(&self, id: i64) -> Result<bool> {
        self.mark_notification_read_impl(id).await
    }

    async fn mark_all_notifications_read(&self, user_id: i64) -> Result<u64> {
        self.mark_all_notifications_read_impl(user_id).await
    }

    async fn delete_notification(&self, id: i64) -> Result<bool> {
        self.delete_notification_impl(id).await
    }

    async fn count_unread_notifications(&self, user_id: i64) -> Result<u64> {
        self.count_unread_notifications_impl(user_id).await
    }

    // 成绩
    async fn save_result(&self, student_id: i64, scores: SubjectScores) -> Result<StudentResult> {
        self.save_result_impl(student_id, scores).await
    }

    async fn get_result_by_student_id(&self, student_id: i64) -> Result<Option<StudentResult>> {
        self.get_result_by_student_id_impl(student_id).await
    }

    // 仪表盘
    async fn dashboard_counts(&self) -> Result<DashboardCounts> {
        self.dashboard_counts_impl().await
    }
}
