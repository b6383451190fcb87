use crate::config::{AppConfig, Argon2Config};
use crate::errors::{CampusError, Result};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// 使用全局配置的 Argon2id 参数哈希密码
pub fn hash_password(password: &str) -> Result<String> {
    hash_password_with(password, &AppConfig::get().argon2)
}

pub fn hash_password_with(password: &str, cfg: &Argon2Config) -> Result<String> {
    let params = Params::new(cfg.memory_cost, cfg.time_cost, cfg.parallelism, None)
        .map_err(|e| CampusError::validation(format!("Argon2 参数错误: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CampusError::validation(format!("密码哈希失败: {e}")))?;
    Ok(hash.to_string())
}

/// 校验密码（参数取自哈希串本身）
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
