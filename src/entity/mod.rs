//! SeaORM 实体定义
//!
//! 与 models 模块中的业务实体分离，存储层读写这些实体后再转换为业务实体。

pub mod prelude;

pub mod attendance;
pub mod classrooms;
pub mod notices;
pub mod notifications;
pub mod results;
pub mod students;
pub mod teachers;
pub mod users;
