//! The exception-handler collaborator.
//!
//! The engine reports every detected problem here and carries on with
//! best-effort output; the handler alone decides, from user-configured
//! patterns, whether a given report aborts the build.

use crate::error::PluginError;
use forge_model::config::PolicyConfig;

/// Ordered error-kind patterns; first match wins.
///
/// A pattern is an error kind name, or `*` for any, optionally prefixed with
/// `!` to exempt that kind. `["!validation", "*"]` terminates on everything
/// except validation reports. No match means the build continues.
#[derive(Debug, Clone, Default)]
pub struct TerminationPolicy {
    patterns: Vec<String>,
}

impl TerminationPolicy {
    pub fn new(patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(policy: &PolicyConfig) -> Self {
        Self {
            patterns: policy.terminate_on.clone(),
        }
    }

    /// Whether a report of the given kind aborts the build.
    pub fn terminates(&self, kind: &str) -> bool {
        for pattern in &self.patterns {
            let (negated, pattern) = match pattern.strip_prefix('!') {
                Some(rest) => (true, rest),
                None => (false, pattern.as_str()),
            };
            if pattern == "*" || pattern == kind {
                return !negated;
            }
        }
        false
    }
}

/// Collects reports and applies the termination policy per report.
#[derive(Debug, Default)]
pub struct ExceptionHandler {
    policy: TerminationPolicy,
    reports: Vec<PluginError>,
}

impl ExceptionHandler {
    pub fn new(policy: TerminationPolicy) -> Self {
        Self {
            policy,
            reports: Vec::new(),
        }
    }

    /// Record a problem. Returns `Err` when the policy marks it fatal, in
    /// which case callers propagate with `?` and the build unwinds.
    pub fn handle(&mut self, error: PluginError) -> Result<(), PluginError> {
        tracing::warn!(kind = error.kind(), "{error}");
        self.reports.push(error.clone());
        if self.policy.terminates(error.kind()) {
            return Err(error);
        }
        Ok(())
    }

    pub fn reports(&self) -> &[PluginError] {
        &self.reports
    }

    pub fn has_reports(&self) -> bool {
        !self.reports.is_empty()
    }
}
