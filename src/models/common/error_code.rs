use serde::Serialize;

/// 业务错误码，随 `ApiResponse.code` 返回
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,
    PasswordMismatch = 2001,
    OldPasswordIncorrect = 2002,
    UserPasswordInvalid = 2003,
    PasswordChangeFailed = 2004,

    // 账号
    UserNotFound = 3000,
    UserNameInvalid = 3001,
    UserNameAlreadyExists = 3002,

    // 学生
    StudentNotFound = 3100,
    StudentCreationFailed = 3101,
    StudentUpdateFailed = 3102,
    StudentDeleteFailed = 3103,
    RollNumberAlreadyExists = 3104,
    StudentInvalid = 3105,

    // 教师
    TeacherNotFound = 3200,
    TeacherCreationFailed = 3201,
    TeacherUpdateFailed = 3202,
    TeacherDeleteFailed = 3203,
    TeacherEmailAlreadyExists = 3204,
    TeacherInvalid = 3205,

    // 班级
    ClassroomNotFound = 4000,
    ClassroomCreationFailed = 4001,
    ClassroomDeleteFailed = 4002,
    ClassroomAlreadyExists = 4003,
    ClassroomInvalid = 4004,

    // 考勤
    AttendanceInvalid = 5000,
    AttendanceMarkFailed = 5001,
    AttendanceStudentNotFound = 5002,

    // 公告
    NoticeNotFound = 6000,
    NoticeCreationFailed = 6001,
    NoticeUpdateFailed = 6002,
    NoticeDeleteFailed = 6003,
    NoticeInvalid = 6004,

    // 通知
    NotificationNotFound = 7000,
    NotificationForbidden = 7001,

    // 成绩
    ResultNotFound = 8000,
    ResultInvalid = 8001,
    ResultSaveFailed = 8002,

    // 文件
    FileNotFound = 9000,
    FileUploadFailed = 9001,
    FileTypeNotAllowed = 9002,
    FileSizeExceeded = 9003,
    MultifileUploadNotAllowed = 9004,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::Forbidden as i32, 1003);
        assert_eq!(ErrorCode::PasswordMismatch as i32, 2001);
        assert_eq!(ErrorCode::OldPasswordIncorrect as i32, 2002);
    }
}
