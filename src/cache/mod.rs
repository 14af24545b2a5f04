//! 缓存层
//!
//! 仅用于会话令牌到用户的解析缓存；业务实体一律每次请求从存储层读取。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 注册缓存插件的宏
///
/// 在插件模块中调用，利用 ctor 在程序启动时将构造函数写入注册表。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $constructor:ident) => {
        #[ctor::ctor]
        fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                ::std::sync::Arc::new(|| {
                    ::std::boxed::Box::pin(async {
                        let cache = $constructor::new()
                            .map_err($crate::errors::CourseHubError::cache_connection)?;
                        Ok(::std::boxed::Box::new(cache)
                            as ::std::boxed::Box<dyn $crate::cache::ObjectCache>)
                    })
                        as $crate::cache::register::BoxedObjectCacheFuture
                }),
            );
        }
    };
}
