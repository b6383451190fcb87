use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;
use super::structs::DEV_JWT_SECRET;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 内置默认值，保证缺省字段可以反序列化
            .add_source(Config::try_from(&AppConfig::default())?)
            // 然后加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("CAMPUS")
                    .separator("__")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("cache.redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option(
                "cache.redis.key_prefix",
                std::env::var("REDIS_KEY_PREFIX").ok(),
            )?
            .set_override_option("upload.dir", std::env::var("UPLOAD_DIR").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 是否仍在使用内置的开发用 JWT 密钥
    pub fn uses_default_jwt_secret(&self) -> bool {
        self.jwt.secret == DEV_JWT_SECRET
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_development() {
        let config = AppConfig::default();
        assert!(config.is_development());
        assert!(!config.is_production());
        assert!(config.uses_default_jwt_secret());
        assert_eq!(config.server_bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_load_without_config_files_uses_defaults() {
        // 工作目录下没有 config.toml，只依赖内置默认值
        let config = AppConfig::load().unwrap();
        assert!(config.cors.allowed_origins.is_empty());
        assert_eq!(config.upload.allowed_types, AppConfig::default().upload.allowed_types);
        assert!(config.server.workers > 0);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "cors": { "max_age": 60 },
            "server": { "port": 9000 }
        }))
        .unwrap();
        assert_eq!(config.cors.max_age, 60);
        assert!(config.cors.allowed_origins.is_empty());
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_default_upload_types_are_images() {
        let config = AppConfig::default();
        assert!(config.upload.allowed_types.iter().all(|t| t.starts_with('.')));
        assert!(config.upload.allowed_types.contains(&".png".to_string()));
    }
}
