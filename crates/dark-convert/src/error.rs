//! Error and diagnostic types for the converter
//!
//! Fatal problems are reported as [`ConvertError`]. Everything else (an
//! unknown panel type, a malformed target, an unsupported override) is
//! recorded as a [`ConversionWarning`] and the conversion carries on.

use dark_core::ManifestError;
use miette::Diagnostic;
use thiserror::Error;

/// Converter error
#[derive(Debug, Error, Diagnostic)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    #[diagnostic(code(dark::convert::io))]
    Io(#[from] std::io::Error),

    #[error("Invalid dashboard JSON: {0}")]
    #[diagnostic(
        code(dark::convert::json),
        help("Export the dashboard from Grafana with \"Share > Export > Save to file\"")
    )]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    #[diagnostic(code(dark::convert::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid manifest options: {0}")]
    #[diagnostic(
        code(dark::convert::manifest),
        help("A GrafanaDashboard manifest needs both a name and a folder")
    )]
    Manifest(#[from] ManifestError),
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

// =============================================================================
// WARNING SYSTEM
// =============================================================================

/// Warning severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WarningSeverity {
    /// Informational - a value was defaulted
    Info,
    /// Warning - a field was dropped or defaulted after an unrecognized value
    Warning,
    /// Unsupported - an item of an unknown kind was skipped
    Unsupported,
    /// Error - a malformed item was skipped
    Error,
}

impl WarningSeverity {
    /// Get the icon for this severity
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Warning => "⚠",
            Self::Unsupported => "✗",
            Self::Error => "✗",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Unsupported => "unsupported",
            Self::Error => "error",
        }
    }
}

/// Kind of dashboard item a warning is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WarningCategory {
    Panel,
    Target,
    Variable,
    Annotation,
    Link,
    Alert,
    /// Time series field override
    Override,
    /// A single setting inside an otherwise valid item
    Field,
}

impl WarningCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Panel => "panel",
            Self::Target => "target",
            Self::Variable => "variable",
            Self::Annotation => "annotation",
            Self::Link => "link",
            Self::Alert => "alert",
            Self::Override => "override",
            Self::Field => "field",
        }
    }
}

/// Something the converter skipped or defaulted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionWarning {
    pub severity: WarningSeverity,
    pub category: WarningCategory,
    /// Title or name of the item concerned, empty when it has none
    pub subject: String,
    /// Human-readable message
    pub message: String,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl ConversionWarning {
    fn new(
        severity: WarningSeverity,
        category: WarningCategory,
        subject: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            subject: subject.to_string(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Create an info-level warning
    pub fn info(category: WarningCategory, subject: &str, message: impl Into<String>) -> Self {
        Self::new(WarningSeverity::Info, category, subject, message)
    }

    /// Create a warning-level warning
    pub fn warning(category: WarningCategory, subject: &str, message: impl Into<String>) -> Self {
        Self::new(WarningSeverity::Warning, category, subject, message)
    }

    /// Create an unsupported item warning
    pub fn unsupported(
        category: WarningCategory,
        subject: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::new(WarningSeverity::Unsupported, category, subject, message)
    }

    /// Create an error-level warning
    pub fn error(category: WarningCategory, subject: &str, message: impl Into<String>) -> Self {
        Self::new(WarningSeverity::Error, category, subject, message)
    }

    /// Add suggestion to warning
    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }
}

impl std::fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: [severity] category 'subject' - message
        write!(f, "[{}] {}", self.severity.label(), self.category.label())?;

        if !self.subject.is_empty() {
            write!(f, " '{}'", self.subject)?;
        }

        write!(f, " - {}", self.message)?;

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  {} {}", self.severity.icon(), suggestion)?;
        }

        Ok(())
    }
}

// =============================================================================
// DIAGNOSTICS SINK
// =============================================================================

/// Collects the warnings raised during one conversion.
///
/// Every warning is also emitted as a `tracing` event, so callers that only
/// install a subscriber still see what was skipped.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<ConversionWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning
    pub fn push(&mut self, warning: ConversionWarning) {
        match warning.severity {
            WarningSeverity::Info => tracing::debug!(
                category = warning.category.label(),
                subject = %warning.subject,
                "{}",
                warning.message
            ),
            severity => tracing::warn!(
                severity = severity.label(),
                category = warning.category.label(),
                subject = %warning.subject,
                "{}",
                warning.message
            ),
        }

        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[ConversionWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<ConversionWarning> {
        self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}

// =============================================================================
// PREDEFINED WARNINGS
// =============================================================================

/// Factory functions for the warnings raised by several decoders
pub mod warnings {
    use super::*;

    /// An item could not be deserialized at all
    pub fn malformed(
        category: WarningCategory,
        subject: &str,
        err: &serde_json::Error,
    ) -> ConversionWarning {
        ConversionWarning::error(category, subject, format!("malformed {}: {}", category.label(), err))
    }

    /// A panel of a type the converter does not handle
    pub fn unknown_panel(title: &str, kind: &str) -> ConversionWarning {
        ConversionWarning::unsupported(
            WarningCategory::Panel,
            title,
            format!("unhandled panel type '{}': skipped", kind),
        )
    }

    /// A setting holding a value outside of its known vocabulary
    pub fn unknown_value(
        category: WarningCategory,
        subject: &str,
        field: &str,
        value: &str,
    ) -> ConversionWarning {
        ConversionWarning::warning(
            category,
            subject,
            format!("unknown {} '{}': ignored", field, value),
        )
    }

    /// A cosmetic panel setting with an unknown value, replaced by its default
    pub fn fallback(subject: &str, field: &str, value: &str, default: &str) -> ConversionWarning {
        ConversionWarning::info(
            WarningCategory::Field,
            subject,
            format!("{} '{}' not recognized: using '{}'", field, value, default),
        )
    }

    /// A setting holding an unknown value, replaced by a default
    pub fn defaulted(
        category: WarningCategory,
        subject: &str,
        field: &str,
        value: &str,
        default: &str,
    ) -> ConversionWarning {
        ConversionWarning::warning(
            category,
            subject,
            format!("unknown {} '{}': defaulting to '{}'", field, value, default),
        )
    }
}
