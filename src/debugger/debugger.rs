//! The default debug handle

use super::color::select_color;
use super::provider::DebugState;
use crate::core::{DebugEntry, DebugError, Handle, PropertyValue, Result};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

/// A namespaced debug logger.
///
/// `enabled` is evaluated on every call: an explicit [`set_enabled`] wins,
/// otherwise the provider's current patterns decide, so a change to the
/// `DEBUG` variable is picked up by debuggers created before it.
///
/// [`set_enabled`]: Handle::set_enabled
pub struct Debugger {
    namespace: String,
    color: u8,
    use_colors: AtomicBool,
    enable_override: RwLock<Option<bool>>,
    prev: Mutex<Option<DateTime<Utc>>>,
    diff_ms: AtomicI64,
    state: Arc<DebugState>,
}

impl Debugger {
    pub(crate) fn new(namespace: String, state: Arc<DebugState>) -> Self {
        Self {
            color: select_color(&namespace),
            use_colors: AtomicBool::new(state.config.use_colors),
            enable_override: RwLock::new(None),
            prev: Mutex::new(None),
            diff_ms: AtomicI64::new(0),
            namespace,
            state,
        }
    }

    /// ANSI color code used for this namespace
    pub fn color(&self) -> u8 {
        self.color
    }

    pub fn use_colors(&self) -> bool {
        self.use_colors.load(Ordering::Relaxed)
    }

    pub fn set_use_colors(&self, use_colors: bool) {
        self.use_colors.store(use_colors, Ordering::Relaxed);
    }

    /// Milliseconds between the last two emitted lines
    pub fn diff(&self) -> i64 {
        self.diff_ms.load(Ordering::Relaxed)
    }

    /// Drop an explicit `set_enabled` and follow the patterns again
    pub fn clear_enabled_override(&self) {
        *self.enable_override.write() = None;
    }

    /// Child debugger `<namespace><delimiter><suffix>`, `:` by default.
    ///
    /// The child shares this debugger's provider and output but none of its
    /// per-handle state.
    pub fn extend(&self, suffix: &str, delimiter: Option<&str>) -> Debugger {
        let namespace = format!(
            "{}{}{}",
            self.namespace,
            delimiter.unwrap_or(":"),
            suffix
        );
        Debugger::new(namespace, Arc::clone(&self.state))
    }

    /// Record an emission at `now`, returning ms since the previous one
    fn advance_clock(&self, now: DateTime<Utc>) -> i64 {
        let mut prev = self.prev.lock();
        let diff = prev
            .map(|p| (now - p).num_milliseconds())
            .unwrap_or(0);
        *prev = Some(now);
        self.diff_ms.store(diff, Ordering::Relaxed);
        diff
    }
}

impl Handle for Debugger {
    fn log(&self, args: fmt::Arguments<'_>) -> Result<()> {
        if !self.enabled() {
            return Ok(());
        }

        let now = Utc::now();
        let diff = self.advance_clock(now);
        let entry = DebugEntry::new(self.namespace.as_str(), args.to_string())
            .with_timestamp(now)
            .with_diff(diff)
            .with_color(self.color)
            .with_colors(self.use_colors());

        self.state.sink.write(&entry)
    }

    fn enabled(&self) -> bool {
        if let Some(forced) = *self.enable_override.read() {
            return forced;
        }
        self.state.enabled(&self.namespace)
    }

    fn set_enabled(&self, enabled: bool) {
        *self.enable_override.write() = Some(enabled);
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "enabled" => Some(self.enabled().into()),
            "namespace" => Some(self.namespace.as_str().into()),
            "color" => Some(i64::from(self.color).into()),
            "use_colors" => Some(self.use_colors().into()),
            "diff" => Some(self.diff().into()),
            _ => None,
        }
    }

    fn set_property(&self, name: &str, value: PropertyValue) -> Result<()> {
        match name {
            "enabled" => self.set_enabled(value.expect_bool(name)?),
            "use_colors" => self.set_use_colors(value.expect_bool(name)?),
            "namespace" | "color" | "diff" => {
                return Err(DebugError::read_only(&self.namespace, name))
            }
            _ => return Err(DebugError::unknown_property(&self.namespace, name)),
        }
        Ok(())
    }
}

impl fmt::Debug for Debugger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debugger")
            .field("namespace", &self.namespace)
            .field("color", &self.color)
            .field("enable_override", &*self.enable_override.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Appender, Sink};
    use crate::debugger::{DebugConfig, DebugProvider};

    struct Capture(Arc<Mutex<Vec<DebugEntry>>>);

    impl Appender for Capture {
        fn append(&mut self, entry: &DebugEntry) -> Result<()> {
            self.0.lock().push(entry.clone());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "capture"
        }
    }

    fn provider(env_var: &str) -> (DebugProvider, Arc<Mutex<Vec<DebugEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::new(Sink::new().with_appender(Capture(Arc::clone(&entries))));
        let config = DebugConfig::new().with_env_var(env_var).with_colors(false);
        (DebugProvider::with_sink(config, sink), entries)
    }

    #[test]
    fn test_disabled_debugger_writes_nothing() {
        let (provider, entries) = provider("HELLO_DEBUG_UNIT_DISABLED");
        let debugger = provider.create("app:dev");

        debugger.log(format_args!("invisible")).unwrap();
        assert!(entries.lock().is_empty());
    }

    #[test]
    fn test_enabled_debugger_writes_entry() {
        let (provider, entries) = provider("HELLO_DEBUG_UNIT_ENABLED");
        let debugger = provider.create("app:dev");
        debugger.set_enabled(true);

        debugger.log(format_args!("port {}", 8080)).unwrap();

        let entries = entries.lock();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].namespace, "app:dev");
        assert_eq!(entries[0].message, "port 8080");
        assert_eq!(entries[0].color, debugger.color());
        assert!(!entries[0].colored);
    }

    #[test]
    fn test_override_beats_patterns() {
        let (provider, _) = provider("HELLO_DEBUG_UNIT_OVERRIDE");
        provider.enable("app:*");
        let debugger = provider.create("app:dev");

        assert!(debugger.enabled());
        debugger.set_enabled(false);
        assert!(!debugger.enabled());
        debugger.clear_enabled_override();
        assert!(debugger.enabled());
    }

    #[test]
    fn test_properties() {
        let (provider, _) = provider("HELLO_DEBUG_UNIT_PROPS");
        let debugger = provider.create("db:test");

        assert_eq!(
            debugger.property("namespace"),
            Some(PropertyValue::Text("db:test".to_string()))
        );
        assert_eq!(
            debugger.property("color"),
            Some(PropertyValue::Int(i64::from(debugger.color())))
        );
        assert_eq!(debugger.property("diff"), Some(PropertyValue::Int(0)));
        assert_eq!(debugger.property("then"), None);

        debugger.set_property("use_colors", true.into()).unwrap();
        assert!(debugger.use_colors());

        let err = debugger.set_property("color", 3i64.into()).unwrap_err();
        assert!(matches!(err, DebugError::ReadOnlyProperty { .. }));
        let err = debugger.set_property("level", "info".into()).unwrap_err();
        assert!(matches!(err, DebugError::UnknownProperty { .. }));
    }

    #[test]
    fn test_extend_derives_namespace() {
        let (provider, _) = provider("HELLO_DEBUG_UNIT_EXTEND");
        provider.enable("app:dev:*");
        let parent = provider.create("app:dev");

        let child = parent.extend("cache", None);
        assert_eq!(child.namespace(), "app:dev:cache");
        assert!(child.enabled());
        assert!(!parent.enabled());

        let dotted = parent.extend("db", Some("."));
        assert_eq!(dotted.namespace(), "app:dev.db");
    }

    #[test]
    fn test_diff_tracks_previous_emission() {
        let (provider, entries) = provider("HELLO_DEBUG_UNIT_DIFF");
        let debugger = provider.create("app:dev");
        debugger.set_enabled(true);

        debugger.log(format_args!("first")).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        debugger.log(format_args!("second")).unwrap();

        let entries = entries.lock();
        assert_eq!(entries[0].diff_ms, 0);
        assert!(entries[1].diff_ms >= 15, "diff was {}", entries[1].diff_ms);
        assert_eq!(debugger.diff(), entries[1].diff_ms);
    }
}
