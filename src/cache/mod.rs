//! 缓存层
//!
//! 通过插件注册表选择后端（Moka 内存缓存或 Redis），
//! 目前用于保存已注销的访问令牌。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并在加载时注册一个缓存插件
///
/// 插件类型需提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $plugin:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache = <$plugin>::new()
                            .map_err($crate::errors::CampusError::cache_connection)?;
                        Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                    })
                }),
            );
        }
    };
}

/// 访问令牌注销列表的缓存键
pub fn revoked_token_key(token: &str) -> String {
    format!("revoked:{token}")
}
