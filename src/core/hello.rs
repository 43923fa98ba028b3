//! Namespace x environment handle collections

use super::{
    cache::HandleCache,
    error::{DebugError, Result},
    key::HandleKey,
    metrics::CacheMetrics,
    provider::SharedProvider,
    proxy::ProxyHandle,
};
use crate::debugger::DebugProvider;
use std::collections::HashMap;
use std::ops::Index;
use std::sync::Arc;

/// Every `namespace:environment` combination as one filter pattern string.
///
/// Environment-major: all namespaces for the first environment, then all
/// namespaces for the next one. The result can be assigned to `DEBUG` or
/// passed to [`DebugProvider::enable`].
///
/// ```
/// use hello_debug::create_debug_patterns;
///
/// assert_eq!(
///     create_debug_patterns(&["app", "api"], &["dev", "prod"]),
///     "app:dev,api:dev,app:prod,api:prod"
/// );
/// ```
pub fn create_debug_patterns<N, E>(namespaces: &[N], environments: &[E]) -> String
where
    N: AsRef<str>,
    E: AsRef<str>,
{
    environments
        .iter()
        .flat_map(|env| {
            namespaces
                .iter()
                .map(move |namespace| HandleKey::new(namespace.as_ref(), env.as_ref()))
        })
        .map(|key| key.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Push `label` unless already present, keeping first-seen order
fn push_unique(order: &mut Vec<String>, label: &str) -> bool {
    if order.iter().any(|existing| existing == label) {
        return false;
    }
    order.push(label.to_string());
    true
}

/// Proxies of one namespace, keyed by environment
#[derive(Debug, Clone)]
pub struct Environments {
    namespace: String,
    order: Vec<String>,
    handles: HashMap<String, ProxyHandle>,
}

impl Environments {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn get(&self, environment: &str) -> Option<&ProxyHandle> {
        self.handles.get(environment)
    }

    pub fn contains(&self, environment: &str) -> bool {
        self.handles.contains_key(environment)
    }

    /// Environment labels in construction order
    pub fn environments(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `(environment, proxy)` pairs in construction order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProxyHandle)> {
        self.order
            .iter()
            .filter_map(|env| self.handles.get(env).map(|proxy| (env.as_str(), proxy)))
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Index<&str> for Environments {
    type Output = ProxyHandle;

    /// # Panics
    ///
    /// Panics if the environment was not part of the collection.
    fn index(&self, environment: &str) -> &ProxyHandle {
        match self.handles.get(environment) {
            Some(proxy) => proxy,
            None => panic!(
                "unknown environment '{}' for namespace '{}'",
                environment, self.namespace
            ),
        }
    }
}

/// A fixed collection of lazily-created debug handles.
///
/// Built from a list of namespaces and a list of environments; holds one
/// [`ProxyHandle`] per combination. Building performs no provider calls: a
/// real handle is created the first time its proxy is used and then reused
/// for the lifetime of the collection.
///
/// ```
/// use hello_debug::prelude::*;
///
/// let hello = Hello::new(["app", "api", "db"], ["dev", "prod"]);
///
/// assert_eq!(hello.len(), 3);
/// assert_eq!(hello["db"].len(), 2);
/// assert_eq!(hello.resolved_count(), 0);
///
/// hello["app"]["dev"].set_enabled(true)?;
/// assert_eq!(hello.resolved_count(), 1);
/// # Ok::<(), DebugError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Hello {
    order: Vec<String>,
    environments: Vec<String>,
    namespaces: HashMap<String, Environments>,
    cache: Arc<HandleCache>,
}

impl Hello {
    /// Build a collection bound to the process-wide [`DebugProvider`]
    #[must_use]
    pub fn new<N, E>(namespaces: N, environments: E) -> Self
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self::with_provider(namespaces, environments, DebugProvider::global())
    }

    /// Build a collection whose handles come from `provider`
    #[must_use]
    pub fn with_provider<N, E>(namespaces: N, environments: E, provider: SharedProvider) -> Self
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let mut env_order = Vec::new();
        for env in environments {
            push_unique(&mut env_order, env.as_ref());
        }

        let cache = Arc::new(HandleCache::new(provider));
        let mut order = Vec::new();
        let mut map = HashMap::new();

        for namespace in namespaces {
            let namespace = namespace.as_ref();
            if !push_unique(&mut order, namespace) {
                continue;
            }

            let handles = env_order
                .iter()
                .map(|env| {
                    let proxy = ProxyHandle::new(HandleKey::new(namespace, env), Arc::clone(&cache));
                    (env.clone(), proxy)
                })
                .collect();

            map.insert(
                namespace.to_string(),
                Environments {
                    namespace: namespace.to_string(),
                    order: env_order.clone(),
                    handles,
                },
            );
        }

        Self {
            order,
            environments: env_order,
            namespaces: map,
            cache,
        }
    }

    /// Create a builder for Hello
    #[must_use]
    pub fn builder() -> HelloBuilder {
        HelloBuilder::new()
    }

    pub fn get(&self, namespace: &str) -> Option<&Environments> {
        self.namespaces.get(namespace)
    }

    /// Proxy for one pair, or which label was unknown
    pub fn handle(&self, namespace: &str, environment: &str) -> Result<&ProxyHandle> {
        let envs = self
            .namespaces
            .get(namespace)
            .ok_or_else(|| DebugError::UnknownNamespace(namespace.to_string()))?;

        envs.get(environment)
            .ok_or_else(|| DebugError::unknown_environment(namespace, environment))
    }

    /// Namespace labels in construction order
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Environment labels in construction order
    pub fn environments(&self) -> impl Iterator<Item = &str> {
        self.environments.iter().map(String::as_str)
    }

    /// `(namespace, environments)` pairs in construction order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Environments)> {
        self.order
            .iter()
            .filter_map(|ns| self.namespaces.get(ns).map(|envs| (ns.as_str(), envs)))
    }

    /// Every proxy, namespace-major
    pub fn handles(&self) -> impl Iterator<Item = &ProxyHandle> {
        self.iter().flat_map(|(_, envs)| envs.iter().map(|(_, proxy)| proxy))
    }

    /// Number of namespaces
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Filter patterns enabling every handle in this collection
    pub fn patterns(&self) -> String {
        create_debug_patterns(&self.order, &self.environments)
    }

    /// Number of real handles created so far
    pub fn resolved_count(&self) -> usize {
        self.cache.len()
    }

    pub fn metrics(&self) -> &CacheMetrics {
        self.cache.metrics()
    }
}

impl Index<&str> for Hello {
    type Output = Environments;

    /// # Panics
    ///
    /// Panics if the namespace was not part of the collection.
    fn index(&self, namespace: &str) -> &Environments {
        match self.namespaces.get(namespace) {
            Some(envs) => envs,
            None => panic!("unknown namespace '{}'", namespace),
        }
    }
}

/// Builder for constructing Hello with a fluent API
///
/// # Example
/// ```
/// use hello_debug::prelude::*;
///
/// let hello = Hello::builder()
///     .namespace("app")
///     .namespaces(["api", "db"])
///     .environments(["dev", "prod"])
///     .build();
///
/// assert_eq!(hello.namespaces().collect::<Vec<_>>(), ["app", "api", "db"]);
/// ```
#[derive(Default)]
pub struct HelloBuilder {
    namespaces: Vec<String>,
    environments: Vec<String>,
    provider: Option<SharedProvider>,
}

impl HelloBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespaces.push(namespace.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn namespaces<I>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.namespaces.extend(namespaces.into_iter().map(Into::into));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environments.push(environment.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn environments<I>(mut self, environments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.environments
            .extend(environments.into_iter().map(Into::into));
        self
    }

    /// Use `provider` instead of the process-wide [`DebugProvider`]
    #[must_use = "builder methods return a new value"]
    pub fn provider(mut self, provider: SharedProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn build(self) -> Hello {
        let provider: SharedProvider = match self.provider {
            Some(provider) => provider,
            None => DebugProvider::global(),
        };
        Hello::with_provider(self.namespaces, self.environments, provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::handle::Handle;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn failing_provider(calls: Arc<AtomicUsize>) -> SharedProvider {
        Arc::new(move |key: &str| -> Result<Arc<dyn Handle>> {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(DebugError::provider(key, "not wired in this test"))
        })
    }

    #[test]
    fn test_patterns_environment_major() {
        assert_eq!(create_debug_patterns(&["app"], &["dev"]), "app:dev");
        assert_eq!(
            create_debug_patterns(&["app", "api", "db"], &["dev"]),
            "app:dev,api:dev,db:dev"
        );
        assert_eq!(
            create_debug_patterns(&["app"], &["dev", "prod", "test"]),
            "app:dev,app:prod,app:test"
        );
        assert_eq!(
            create_debug_patterns(&["app", "api"], &["dev", "prod"]),
            "app:dev,api:dev,app:prod,api:prod"
        );
    }

    #[test]
    fn test_patterns_empty_inputs() {
        let none: [&str; 0] = [];
        assert_eq!(create_debug_patterns(&none, &["dev"]), "");
        assert_eq!(create_debug_patterns(&["app"], &none), "");
    }

    #[test]
    fn test_structure_matches_labels() {
        let calls = Arc::new(AtomicUsize::new(0));
        let hello = Hello::with_provider(
            ["app", "api"],
            ["dev", "prod"],
            failing_provider(Arc::clone(&calls)),
        );

        assert_eq!(hello.namespaces().collect::<Vec<_>>(), ["app", "api"]);
        for (_, envs) in hello.iter() {
            assert_eq!(envs.environments().collect::<Vec<_>>(), ["dev", "prod"]);
        }
        assert_eq!(hello["api"]["prod"].key().as_str(), "api:prod");
        assert_eq!(hello.handles().count(), 4);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_duplicates_collapse() {
        let calls = Arc::new(AtomicUsize::new(0));
        let hello = Hello::with_provider(
            ["app", "api", "app"],
            ["dev", "dev"],
            failing_provider(calls),
        );

        assert_eq!(hello.len(), 2);
        assert_eq!(hello["app"].len(), 1);
        assert_eq!(hello.patterns(), "app:dev,api:dev");
    }

    #[test]
    fn test_empty_inputs_build_empty_maps() {
        let calls = Arc::new(AtomicUsize::new(0));
        let none: Vec<String> = Vec::new();

        let hello = Hello::with_provider(none.clone(), ["dev"], failing_provider(Arc::clone(&calls)));
        assert!(hello.is_empty());

        let hello = Hello::with_provider(["app"], none, failing_provider(calls));
        assert_eq!(hello.len(), 1);
        assert!(hello["app"].is_empty());
    }

    #[test]
    fn test_handle_lookup_errors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let hello = Hello::with_provider(["app"], ["dev"], failing_provider(calls));

        assert!(hello.handle("app", "dev").is_ok());
        assert!(matches!(
            hello.handle("web", "dev"),
            Err(DebugError::UnknownNamespace(_))
        ));
        assert!(matches!(
            hello.handle("app", "staging"),
            Err(DebugError::UnknownEnvironment { .. })
        ));
        assert!(hello.get("web").is_none());
    }

    #[test]
    #[should_panic(expected = "unknown namespace 'web'")]
    fn test_index_unknown_namespace_panics() {
        let calls = Arc::new(AtomicUsize::new(0));
        let hello = Hello::with_provider(["app"], ["dev"], failing_provider(calls));
        let _ = &hello["web"];
    }

    #[test]
    fn test_provider_error_surfaces_on_access() {
        let calls = Arc::new(AtomicUsize::new(0));
        let hello = Hello::with_provider(["app"], ["dev"], failing_provider(Arc::clone(&calls)));

        let err = hello["app"]["dev"].enabled().unwrap_err();
        assert!(matches!(err, DebugError::Provider { ref key, .. } if key == "app:dev"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(hello.resolved_count(), 0);
        assert_eq!(hello.metrics().provider_failures(), 1);
    }

    #[test]
    fn test_builder_uses_given_provider() {
        let calls = Arc::new(AtomicUsize::new(0));
        let hello = Hello::builder()
            .namespaces(["app", "api"])
            .environment("dev")
            .provider(failing_provider(Arc::clone(&calls)))
            .build();

        assert_eq!(hello.patterns(), "app:dev,api:dev");
        assert!(hello["api"]["dev"].log(format_args!("x")).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_collections_do_not_share_caches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = failing_provider(Arc::clone(&calls));
        let first = Hello::with_provider(["app"], ["dev"], Arc::clone(&provider));
        let second = Hello::with_provider(["app"], ["dev"], provider);

        assert!(!first["app"]["dev"].same_handle(&second["app"]["dev"]));
    }

    #[test]
    fn test_colliding_keys_resolve_to_one_handle() {
        struct Named(String);

        impl Handle for Named {
            fn log(&self, _args: std::fmt::Arguments<'_>) -> Result<()> {
                Ok(())
            }

            fn enabled(&self) -> bool {
                false
            }

            fn set_enabled(&self, _enabled: bool) {}

            fn namespace(&self) -> &str {
                &self.0
            }
        }

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let hello = Hello::with_provider(
            ["a:b", "a"],
            ["c", "b:c"],
            Arc::new(move |key: &str| -> Result<Arc<dyn Handle>> {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(Named(key.to_string())))
            }),
        );

        let left = hello["a:b"]["c"].resolve().unwrap();
        let right = hello["a"]["b:c"].resolve().unwrap();

        assert_eq!(left.namespace(), "a:b:c");
        assert!(Arc::ptr_eq(&left, &right));
        assert!(hello["a:b"]["c"].same_handle(&hello["a"]["b:c"]));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(hello.resolved_count(), 1);
    }
}
