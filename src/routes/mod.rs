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

pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use classrooms::configure_classroom_routes;
pub use dashboard::configure_dashboard_routes;
pub use files::configure_file_routes;
pub use notices::configure_notice_routes;
pub use notifications::configure_notification_routes;
pub use results::configure_result_routes;
pub use students::configure_student_routes;
pub use teachers::configure_teacher_routes;

#[cfg(test)]
mod tests;
