//! Longest-prefix substitution for node labels and colors.
use crate::errors::DepGraphError;
use crate::graph::Package;

pub const GOROOT_COLOR: &str = "palegreen";
pub const CGO_COLOR: &str = "darkgoldenrod1";
pub const DEFAULT_COLOR: &str = "paleturquoise";

/// Ordered `(prefix, replacement)` pairs. Re-adding a prefix replaces its replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixRules {
    rules: Vec<(String, String)>,
}

impl PrefixRules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, prefix: &str, replacement: &str) {
        if let Some(rule) = self.rules.iter_mut().find(|(p, _)| p == prefix) {
            rule.1 = replacement.to_string();
        } else {
            self.rules.push((prefix.to_string(), replacement.to_string()));
        }
    }

    /// Append every rule of `other`, replacing rules with the same prefix.
    pub fn extend(&mut self, other: &PrefixRules) {
        for (p, r) in &other.rules {
            self.push(p, r);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// The rule with the longest prefix of `s`; ties go to the earlier rule.
    #[must_use]
    pub fn longest_match(&self, s: &str) -> Option<(&str, &str)> {
        let mut best: Option<(&str, &str)> = None;
        for (prefix, replacement) in &self.rules {
            if s.starts_with(prefix.as_str()) && best.map_or(true, |(b, _)| prefix.len() > b.len()) {
                best = Some((prefix.as_str(), replacement.as_str()));
            }
        }
        best
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for PrefixRules {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut rules = Self::new();
        for (p, r) in iter {
            rules.push(p, r);
        }
        rules
    }
}

/// Parse `a=b,c=d` name substitutions. A bare `a` means "strip prefix `a`".
///
/// # Errors
/// Returns `DepGraphError::Configuration` for an entry with more than one `=`.
pub fn parse_name_rules(entries: &[String]) -> Result<PrefixRules, DepGraphError> {
    let mut rules = PrefixRules::new();
    for entry in entries {
        let parts: Vec<&str> = entry.split('=').collect();
        match parts.as_slice() {
            [prefix] => rules.push(prefix, ""),
            [prefix, replacement] => rules.push(prefix, replacement),
            _ => {
                return Err(DepGraphError::Configuration(format!(
                    "wrong prefix substitution spec: {entry}"
                )))
            }
        }
    }
    Ok(rules)
}

/// Parse `prefix=color` entries; each must contain exactly one `=`.
///
/// # Errors
/// Returns `DepGraphError::Configuration` for any malformed entry.
pub fn parse_color_rules(entries: &[String]) -> Result<PrefixRules, DepGraphError> {
    let mut rules = PrefixRules::new();
    for entry in entries {
        match entry.split('=').collect::<Vec<_>>().as_slice() {
            [prefix, color] => rules.push(prefix, color),
            _ => return Err(DepGraphError::Configuration(format!("wrong color spec: {entry}"))),
        }
    }
    Ok(rules)
}

#[derive(Debug, Clone, Default)]
pub struct RewriteConfig {
    pub names: PrefixRules,
    pub colors: PrefixRules,
}

#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    config: RewriteConfig,
}

impl Rewriter {
    #[must_use]
    pub fn new(config: RewriteConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn rewrite_name(&self, path: &str) -> String {
        match self.config.names.longest_match(path) {
            Some((prefix, replacement)) => format!("{replacement}{}", &path[prefix.len()..]),
            None => path.to_string(),
        }
    }

    #[must_use]
    pub fn rewrite_color(&self, path: &str, default: &str) -> String {
        self.config.colors.longest_match(path).map_or(default, |(_, color)| color).to_string()
    }

    /// Fill color for `pkg` before any color rule is applied.
    #[must_use]
    pub fn default_color(pkg: &Package) -> &'static str {
        if pkg.goroot {
            GOROOT_COLOR
        } else if pkg.has_native_sources() {
            CGO_COLOR
        } else {
            DEFAULT_COLOR
        }
    }
}
