//! Code predicates composed from a [`GenerationRule`].

use crate::document::GenerationRule;

/// A predicate over a code.
pub trait CodeFilter {
    fn accepts(&self, code: &str) -> bool;
}

/// Code starts with one of the prefixes. An empty list accepts everything.
#[derive(Debug, Clone, Default)]
pub struct PrefixFilter {
    prefixes: Vec<String>,
}

impl PrefixFilter {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }
}

impl CodeFilter for PrefixFilter {
    fn accepts(&self, code: &str) -> bool {
        self.prefixes.is_empty() || self.prefixes.iter().any(|p| code.starts_with(p.as_str()))
    }
}

/// Code ends with one of the suffixes. An empty list accepts everything.
#[derive(Debug, Clone, Default)]
pub struct SuffixFilter {
    suffixes: Vec<String>,
}

impl SuffixFilter {
    pub fn new(suffixes: Vec<String>) -> Self {
        Self { suffixes }
    }
}

impl CodeFilter for SuffixFilter {
    fn accepts(&self, code: &str) -> bool {
        self.suffixes.is_empty() || self.suffixes.iter().any(|s| code.ends_with(s.as_str()))
    }
}

/// Inclusive bounds on the code's character count; a bound of 0 or less
/// leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: i64,
    pub max: i64,
}

impl CodeFilter for LengthBounds {
    fn accepts(&self, code: &str) -> bool {
        let len = i64::try_from(code.chars().count()).unwrap_or(i64::MAX);
        (self.min <= 0 || len >= self.min) && (self.max <= 0 || len <= self.max)
    }
}

/// The filters of one rule, applied in order, plus the code rewrite.
pub struct RulePipeline {
    filters: Vec<Box<dyn CodeFilter>>,
    append: Option<String>,
}

impl RulePipeline {
    pub fn from_rule(rule: &GenerationRule) -> Self {
        let filters: Vec<Box<dyn CodeFilter>> = vec![
            Box::new(PrefixFilter::new(rule.prefix.clone())),
            Box::new(SuffixFilter::new(rule.suffix.clone())),
            Box::new(LengthBounds {
                min: rule.min_length,
                max: rule.max_length,
            }),
        ];
        Self {
            filters,
            append: rule.append().map(str::to_string),
        }
    }

    /// The key `code` contributes under, or `None` when a filter rejects it.
    pub fn apply(&self, code: &str) -> Option<String> {
        if !self.filters.iter().all(|f| f.accepts(code)) {
            return None;
        }
        Some(match &self.append {
            Some(suffix) => format!("{code}{suffix}"),
            None => code.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prefix_filter() {
        let filter = PrefixFilter::new(strings(&["G", "Ha"]));
        assert!(filter.accepts("Gga"));
        assert!(filter.accepts("Hab"));
        assert!(!filter.accepts("Hb"));
        assert!(PrefixFilter::default().accepts("anything"));
    }

    #[test]
    fn test_suffix_filter() {
        let filter = SuffixFilter::new(strings(&["a"]));
        assert!(filter.accepts("Gga"));
        assert!(!filter.accepts("Ggb"));
        assert!(SuffixFilter::default().accepts(""));
    }

    #[test]
    fn test_length_bounds() {
        let bounds = LengthBounds { min: 2, max: 3 };
        assert!(!bounds.accepts("a"));
        assert!(bounds.accepts("ab"));
        assert!(bounds.accepts("abc"));
        assert!(!bounds.accepts("abcd"));

        let open_max = LengthBounds { min: 2, max: 0 };
        assert!(open_max.accepts("abcdefgh"));
        let open_min = LengthBounds { min: 0, max: 1 };
        assert!(open_min.accepts(""));
        assert!(!open_min.accepts("ab"));
    }

    #[test]
    fn test_negative_bounds_are_open() {
        let bounds = LengthBounds { min: -1, max: -5 };
        assert!(bounds.accepts(""));
        assert!(bounds.accepts("abcdef"));
        let capped = LengthBounds { min: -3, max: 2 };
        assert!(capped.accepts("a"));
        assert!(!capped.accepts("abc"));
    }

    #[test]
    fn test_length_counts_characters() {
        let bounds = LengthBounds { min: 0, max: 2 };
        assert!(bounds.accepts("字根"));
    }

    #[test]
    fn test_pipeline_appends_after_filtering() {
        let rule = GenerationRule {
            prefix: strings(&["G"]),
            max_length: 3,
            append_suffix: Some("_".to_string()),
            ..GenerationRule::default()
        };
        let pipeline = RulePipeline::from_rule(&rule);
        assert_eq!(pipeline.apply("Gga").as_deref(), Some("Gga_"));
        assert_eq!(pipeline.apply("Ggaa"), None);
        assert_eq!(pipeline.apply("Hga"), None);
    }

    #[test]
    fn test_empty_append_is_ignored() {
        let rule = GenerationRule {
            append_suffix: Some(String::new()),
            ..GenerationRule::default()
        };
        assert_eq!(RulePipeline::from_rule(&rule).apply("ab").as_deref(), Some("ab"));
    }
}
