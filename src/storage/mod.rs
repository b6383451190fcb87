use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号
    // 创建账号（password_hash 已哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 删除账号，级联删除学生/教师档案、公告与通知
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn update_password(&self, id: i64, password_hash: String) -> Result<bool>;
    async fn update_dark_mode(&self, id: i64, dark_mode: bool) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;
    // 账号关联的 (学生档案 ID, 教师档案 ID)
    async fn get_profile_ids(&self, user_id: i64) -> Result<(Option<i64>, Option<i64>)>;

    /// 学生
    // 在同一事务中创建账号与档案，req.password 必须是哈希值
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListParams,
    ) -> Result<StudentListResponse>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;

    /// 教师
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListParams,
    ) -> Result<TeacherListResponse>;
    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>>;

    /// 班级
    async fn create_classroom(&self, req: CreateClassRoomRequest) -> Result<ClassRoom>;
    async fn get_classroom_by_id(&self, id: i64) -> Result<Option<ClassRoom>>;
    async fn list_classrooms_with_pagination(
        &self,
        query: ClassRoomListParams,
    ) -> Result<ClassRoomListResponse>;
    async fn delete_classroom(&self, id: i64) -> Result<bool>;

    /// 考勤
    // 按 (学生, 日期) 批量写入；存在未知学生时整体失败
    async fn mark_attendance(
        &self,
        date: chrono::NaiveDate,
        entries: Vec<(i64, AttendanceStatus)>,
    ) -> Result<usize>;
    async fn list_attendance_by_date(&self, date: chrono::NaiveDate)
    -> Result<Vec<AttendanceRecord>>;
    async fn list_attendance_for_student(&self, student_id: i64) -> Result<Vec<AttendanceRecord>>;

    /// 公告
    async fn create_notice(&self, created_by: i64, req: CreateNoticeRequest) -> Result<Notice>;
    async fn get_notice_by_id(&self, id: i64) -> Result<Option<Notice>>;
    async fn list_notices_with_pagination(
        &self,
        query: NoticeListParams,
    ) -> Result<NoticeListResponse>;
    async fn update_notice(&self, id: i64, update: UpdateNoticeRequest) -> Result<Option<Notice>>;
    // 返回被删除的公告，删除前的标题用于通知
    async fn delete_notice(&self, id: i64) -> Result<Option<Notice>>;

    /// 通知
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification>;
    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>>;
    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListParams,
    ) -> Result<NotificationListResponse>;
    async fn mark_notification_read(&self, id: i64) -> Result<bool>;
    async fn mark_all_notifications_read(&self, user_id: i64) -> Result<u64>;
    async fn delete_notification(&self, id: i64) -> Result<bool>;
    async fn count_unread_notifications(&self, user_id: i64) -> Result<u64>;

    /// 成绩
    // 按学生新建或覆盖，总分/百分比/等级每次重新计算
    async fn save_result(&self, student_id: i64, scores: SubjectScores) -> Result<StudentResult>;
    async fn get_result_by_student_id(&self, student_id: i64) -> Result<Option<StudentResult>>;

    /// 仪表盘
    async fn dashboard_counts(&self) -> Result<DashboardCounts>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
