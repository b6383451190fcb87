use super::entities::RoleSet;

// 新账号（存储层使用，password_hash 已经过哈希）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub password_hash: String,
    pub roles: RoleSet,
    pub is_superuser: bool,
}
