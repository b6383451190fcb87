//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_campus_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CampusError {
            $($variant(String),)*
        }

        impl CampusError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CampusError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CampusError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CampusError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CampusError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CampusError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_campus_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Constraint Conflict"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
}

impl CampusError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为唯一约束 / 引用约束冲突
    pub fn is_conflict(&self) -> bool {
        matches!(self, CampusError::Conflict(_))
    }

    /// 冲突是否发生在指定列上
    ///
    /// 依赖数据库报错文本中的列名：SQLite `users.username`，
    /// PostgreSQL `users_username_key`，MySQL `users.username`。
    pub fn is_conflict_on(&self, column: &str) -> bool {
        matches!(self, CampusError::Conflict(msg) if msg.contains(column))
    }
}

impl fmt::Display for CampusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CampusError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CampusError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => CampusError::Conflict(msg),
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(msg)) => {
                CampusError::Conflict(msg)
            }
            _ => CampusError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CampusError {
    fn from(err: std::io::Error) -> Self {
        CampusError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CampusError {
    fn from(err: serde_json::Error) -> Self {
        CampusError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CampusError {
    fn from(err: chrono::ParseError) -> Self {
        CampusError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CampusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CampusError::cache_connection("test").code(), "E001");
        assert_eq!(CampusError::database_config("test").code(), "E003");
        assert_eq!(CampusError::validation("test").code(), "E007");
        assert_eq!(CampusError::conflict("test").code(), "E010");
        assert_eq!(CampusError::authorization("test").code(), "E013");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CampusError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            CampusError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = CampusError::validation("Roll number must be positive");
        assert_eq!(err.message(), "Roll number must be positive");
    }

    #[test]
    fn test_format_simple() {
        let err = CampusError::conflict("students.roll_number");
        let formatted = err.format_simple();
        assert!(formatted.contains("Constraint Conflict"));
        assert!(formatted.contains("students.roll_number"));
        assert!(err.is_conflict());
        assert!(err.is_conflict_on("roll_number"));
        assert!(!err.is_conflict_on("username"));
    }

    #[test]
    fn test_db_error_without_sql_cause_is_operation_error() {
        let err: CampusError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "E005");
        assert!(!err.is_conflict());
    }
}
