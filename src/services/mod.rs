pub mod attendance;
pub mod auth;
pub mod classrooms;
pub mod dashboard;
pub mod files;
pub mod notices;
pub mod notifications;
pub mod results;
pub mod students;
pub mod teachers;

#[cfg(test)]
pub(crate) mod test_support;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classrooms::ClassRoomService;
pub use dashboard::DashboardService;
pub use files::FileService;
pub use notices::NoticeService;
pub use notifications::NotificationService;
pub use results::ResultService;
pub use students::StudentService;
pub use teachers::TeacherService;
