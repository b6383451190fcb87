//! 预导入模块

pub use super::attendance::{
    ActiveModel as AttendanceActiveModel, Entity as Attendance, Model as AttendanceModel,
};
pub use super::classrooms::{
    ActiveModel as ClassroomActiveModel, Entity as Classrooms, Model as ClassroomModel,
};
pub use super::notices::{ActiveModel as NoticeActiveModel, Entity as Notices, Model as NoticeModel};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
pub use super::results::{ActiveModel as ResultActiveModel, Entity as Results, Model as ResultModel};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
