//! 缓存后端注册表
//!
//! 各后端模块通过 declare_object_cache_plugin! 在进程启动时自注册，
//! 运行期按配置的 cache.type 名称取出对应的构造函数。

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use crate::cache::traits::ObjectCache;
use crate::errors::Result;

pub type BoxedObjectCacheFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type ObjectCacheConstructor = Arc<dyn Fn() -> BoxedObjectCacheFuture + Send + Sync>;

static OBJECT_CACHE_REGISTRY: Lazy<RwLock<HashMap<String, ObjectCacheConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_object_cache_plugin(name: impl Into<String>, constructor: ObjectCacheConstructor) {
    OBJECT_CACHE_REGISTRY
        .write()
        .expect("Cache registry lock poisoned")
        .insert(name.into(), constructor);
}

pub fn get_object_cache_plugin(name: &str) -> Option<ObjectCacheConstructor> {
    OBJECT_CACHE_REGISTRY
        .read()
        .expect("Cache registry lock poisoned")
        .get(name)
        .cloned()
}

/// 已注册的后端名称，按字典序
pub fn registered_backends() -> Vec<String> {
    let mut names: Vec<String> = OBJECT_CACHE_REGISTRY
        .read()
        .expect("Cache registry lock poisoned")
        .keys()
        .cloned()
        .collect();
    names.sort();
    names
}

pub fn debug_object_cache_registry() {
    let names = registered_backends();
    if names.is_empty() {
        tracing::debug!("No object cache backends registered");
    } else {
        tracing::debug!("Registered object cache backends: {}", names.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheResult;
    use async_trait::async_trait;

    struct NullCache;

    #[async_trait]
    impl ObjectCache for NullCache {
        async fn get_raw(&self, _key: &str) -> CacheResult<String> {
            CacheResult::NotFound
        }
        async fn insert_raw(&self, _key: String, _value: String, _ttl: u64) {}
        async fn remove(&self, _key: &str) {}
        async fn invalidate_all(&self) {}
    }

    #[actix_web::test]
    async fn test_registered_backend_is_constructible() {
        register_object_cache_plugin(
            "null-test",
            Arc::new(|| {
                Box::pin(async { Ok(Box::new(NullCache) as Box<dyn ObjectCache>) })
                    as BoxedObjectCacheFuture
            }),
        );

        assert!(registered_backends().contains(&"null-test".to_string()));

        let constructor = get_object_cache_plugin("null-test").expect("backend not registered");
        let cache = constructor().await.unwrap();
        assert_eq!(cache.get_raw("missing").await, CacheResult::NotFound);
    }

    #[test]
    fn test_unknown_backend_is_absent() {
        assert!(get_object_cache_plugin("no-such-backend").is_none());
    }
}
