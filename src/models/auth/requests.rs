use serde::Deserialize;

// 登录请求
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// 修改密码
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

// 显示偏好
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub dark_mode: bool,
}
