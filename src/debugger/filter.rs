//! `DEBUG` pattern parsing and namespace matching

use std::fmt;

/// Parsed set of enable and skip patterns.
///
/// Patterns are separated by commas or whitespace. A leading `-` turns a
/// pattern into a skip; `*` matches any run of characters.
///
/// ```
/// use hello_debug::DebugFilter;
///
/// let filter = DebugFilter::parse("app:*,-app:prod");
/// assert!(filter.enabled("app:dev"));
/// assert!(!filter.enabled("app:prod"));
/// assert!(!filter.enabled("api:dev"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugFilter {
    names: Vec<String>,
    skips: Vec<String>,
}

impl DebugFilter {
    pub fn parse(patterns: &str) -> Self {
        let mut filter = Self::default();

        for pattern in patterns
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
        {
            match pattern.strip_prefix('-') {
                Some(skip) => filter.skips.push(skip.to_string()),
                None => filter.names.push(pattern.to_string()),
            }
        }

        filter
    }

    /// Whether `namespace` passes this filter.
    ///
    /// Skips win over names. A namespace that itself ends in `*` is always
    /// enabled.
    pub fn enabled(&self, namespace: &str) -> bool {
        if namespace.ends_with('*') {
            return true;
        }

        if self
            .skips
            .iter()
            .any(|skip| matches_template(namespace, skip))
        {
            return false;
        }

        self.names
            .iter()
            .any(|name| matches_template(namespace, name))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn skips(&self) -> &[String] {
        &self.skips
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.skips.is_empty()
    }
}

impl fmt::Display for DebugFilter {
    /// `names,-skips`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .names
            .iter()
            .cloned()
            .chain(self.skips.iter().map(|skip| format!("-{}", skip)))
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&rendered)
    }
}

/// Wildcard match where `*` in `template` spans any (possibly empty) run.
///
/// Linear backtracking over the last `*` seen; no recursion.
fn matches_template(search: &str, template: &str) -> bool {
    let search = search.as_bytes();
    let template = template.as_bytes();

    let mut search_idx = 0;
    let mut template_idx = 0;
    let mut star_idx: Option<usize> = None;
    let mut match_idx = 0;

    while search_idx < search.len() {
        if template_idx < template.len()
            && (template[template_idx] == search[search_idx] || template[template_idx] == b'*')
        {
            if template[template_idx] == b'*' {
                star_idx = Some(template_idx);
                match_idx = search_idx;
                template_idx += 1;
            } else {
                search_idx += 1;
                template_idx += 1;
            }
        } else if let Some(star) = star_idx {
            template_idx = star + 1;
            match_idx += 1;
            search_idx = match_idx;
        } else {
            return false;
        }
    }

    while template_idx < template.len() && template[template_idx] == b'*' {
        template_idx += 1;
    }

    template_idx == template.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_separators() {
        let filter = DebugFilter::parse("app:dev, api:dev  db:*,,-db:prod");
        assert_eq!(filter.names(), ["app:dev", "api:dev", "db:*"]);
        assert_eq!(filter.skips(), ["db:prod"]);
    }

    #[test]
    fn test_empty_filter_disables_everything() {
        let filter = DebugFilter::parse("");
        assert!(filter.is_empty());
        assert!(!filter.enabled("app:dev"));
    }

    #[test]
    fn test_exact_and_wildcard_matches() {
        let filter = DebugFilter::parse("app:dev,*:test");
        assert!(filter.enabled("app:dev"));
        assert!(!filter.enabled("app:devx"));
        assert!(filter.enabled("db:test"));
        assert!(!filter.enabled("db:prod"));
    }

    #[test]
    fn test_star_matches_everything_but_skips() {
        let filter = DebugFilter::parse("*,-api:*");
        assert!(filter.enabled("app:dev"));
        assert!(!filter.enabled("api:dev"));
    }

    #[test]
    fn test_namespace_ending_in_star_always_enabled() {
        let filter = DebugFilter::parse("-app:*");
        assert!(filter.enabled("app:*"));
    }

    #[test]
    fn test_template_backtracking() {
        assert!(matches_template("app:worker:dev", "app:*:dev"));
        assert!(matches_template("app::dev", "app:*:dev"));
        assert!(!matches_template("app:worker:prod", "app:*:dev"));
        assert!(matches_template("abcabc", "*abc"));
        assert!(matches_template("", "**"));
    }

    #[test]
    fn test_display_round_trips_patterns() {
        let filter = DebugFilter::parse("app:dev -api:prod db:*");
        assert_eq!(filter.to_string(), "app:dev,db:*,-api:prod");
        assert_eq!(DebugFilter::parse(&filter.to_string()), filter);
    }
}
