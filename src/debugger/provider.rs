//! Provider of [`Debugger`] handles

use super::config::DebugConfig;
use super::debugger::Debugger;
use super::filter::DebugFilter;
use crate::appenders::ConsoleAppender;
use crate::core::{Handle, HandleProvider, Result, Sink};
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Arc<DebugProvider>> = OnceLock::new();

/// State shared by a provider and every debugger it created
pub(crate) struct DebugState {
    pub(crate) config: DebugConfig,
    pub(crate) sink: Arc<Sink>,
    /// Programmatic patterns; `None` means read `config.env_var`
    patterns: RwLock<Option<String>>,
    /// Last parsed filter with the raw string it came from
    filter: RwLock<(String, Arc<DebugFilter>)>,
}

impl DebugState {
    fn active_patterns(&self) -> String {
        if let Some(patterns) = self.patterns.read().as_ref() {
            return patterns.clone();
        }
        std::env::var(&self.config.env_var).unwrap_or_default()
    }

    /// Filter for the patterns active right now
    fn current_filter(&self) -> Arc<DebugFilter> {
        let raw = self.active_patterns();

        {
            let cached = self.filter.read();
            if cached.0 == raw {
                return Arc::clone(&cached.1);
            }
        }

        let filter = Arc::new(DebugFilter::parse(&raw));
        *self.filter.write() = (raw, Arc::clone(&filter));
        filter
    }

    pub(crate) fn enabled(&self, namespace: &str) -> bool {
        self.current_filter().enabled(namespace)
    }
}

/// Creates [`Debugger`]s that share one configuration, one set of filter
/// patterns and one output [`Sink`].
///
/// Patterns come from the configured environment variable (`DEBUG` by
/// default), read at every `enabled` check, until [`enable`] or [`disable`]
/// installs programmatic patterns; [`reset`] goes back to the variable.
///
/// ```
/// use hello_debug::prelude::*;
///
/// let provider = DebugProvider::new(DebugConfig::new().with_env_var("DOC_DEBUG"));
/// provider.enable(create_debug_patterns(&["app"], &["dev", "test"]));
///
/// assert!(provider.enabled("app:dev"));
/// assert!(!provider.enabled("app:prod"));
///
/// assert_eq!(provider.disable(), "app:dev,app:test");
/// assert!(!provider.enabled("app:dev"));
/// ```
///
/// [`enable`]: DebugProvider::enable
/// [`disable`]: DebugProvider::disable
/// [`reset`]: DebugProvider::reset
pub struct DebugProvider {
    state: Arc<DebugState>,
}

impl DebugProvider {
    /// Provider writing to stderr through a [`ConsoleAppender`]
    #[must_use]
    pub fn new(config: DebugConfig) -> Self {
        let sink = Sink::new().with_appender(ConsoleAppender::from_config(&config));
        Self::with_sink(config, Arc::new(sink))
    }

    /// Provider writing to a caller-supplied sink
    #[must_use]
    pub fn with_sink(config: DebugConfig, sink: Arc<Sink>) -> Self {
        Self {
            state: Arc::new(DebugState {
                config,
                sink,
                patterns: RwLock::new(None),
                filter: RwLock::new((String::new(), Arc::new(DebugFilter::default()))),
            }),
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(DebugConfig::from_env())
    }

    /// The process-wide provider, configured from the environment on first
    /// use. Collections built without an explicit provider all bind to it.
    pub fn global() -> Arc<DebugProvider> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(DebugProvider::from_env())))
    }

    pub fn create(&self, namespace: impl Into<String>) -> Debugger {
        Debugger::new(namespace.into(), Arc::clone(&self.state))
    }

    /// Replace the active patterns, ignoring the environment variable
    pub fn enable(&self, patterns: impl Into<String>) {
        *self.state.patterns.write() = Some(patterns.into());
    }

    /// Disable every namespace, returning the previously active patterns in
    /// normalized `names,-skips` form so they can be passed back to `enable`
    pub fn disable(&self) -> String {
        let previous = self.patterns();
        *self.state.patterns.write() = Some(String::new());
        previous
    }

    /// Follow the environment variable again
    pub fn reset(&self) {
        *self.state.patterns.write() = None;
    }

    /// Active patterns, normalized
    pub fn patterns(&self) -> String {
        self.state.current_filter().to_string()
    }

    pub fn enabled(&self, namespace: &str) -> bool {
        self.state.enabled(namespace)
    }

    pub fn config(&self) -> &DebugConfig {
        &self.state.config
    }

    pub fn sink(&self) -> &Arc<Sink> {
        &self.state.sink
    }
}

impl HandleProvider for DebugProvider {
    fn provide(&self, key: &str) -> Result<Arc<dyn Handle>> {
        Ok(Arc::new(self.create(key)))
    }
}
