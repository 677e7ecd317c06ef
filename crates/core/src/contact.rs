//! Contact record vocabulary: enumerated fields, the email pattern and the
//! field-level checks used before anything is persisted.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;

/// Entity name used in not-found errors.
pub const ENTITY_CONTACT: &str = "Contact";

// ---------------------------------------------------------------------------
// Field names (wire format)
// ---------------------------------------------------------------------------

pub const FIELD_ID: &str = "_id";
pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_PROJECT_TYPE: &str = "projectType";
pub const FIELD_PRIORITY: &str = "priority";

// ---------------------------------------------------------------------------
// Email pattern
// ---------------------------------------------------------------------------

/// Simple `local@domain.tld` pattern. Word characters are ASCII only.
pub const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

// ---------------------------------------------------------------------------
// Enumerated fields
// ---------------------------------------------------------------------------

/// Returned when a string is not a member of one of the enumerated fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}. Valid values: {valid}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub valid: String,
}

/// Kind of work a contact is enquiring about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectType {
    #[serde(rename = "AI Model")]
    AiModel,
    #[serde(rename = "ML Pipeline")]
    MlPipeline,
    #[serde(rename = "Data Analysis")]
    DataAnalysis,
    #[serde(rename = "Other")]
    Other,
}

impl ProjectType {
    pub const ALL: [ProjectType; 4] = [
        ProjectType::AiModel,
        ProjectType::MlPipeline,
        ProjectType::DataAnalysis,
        ProjectType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::AiModel => "AI Model",
            ProjectType::MlPipeline => "ML Pipeline",
            ProjectType::DataAnalysis => "Data Analysis",
            ProjectType::Other => "Other",
        }
    }
}

/// How urgently a contact should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

macro_rules! string_enum_impls {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                        valid: <$ty>::ALL.map(|v| v.as_str()).join(", "),
                    })
            }
        }

        impl TryFrom<String> for $ty {
            type Error = UnknownVariant;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

string_enum_impls!(ProjectType, "project type");
string_enum_impls!(Priority, "priority");

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

/// Trim a text field and drop it when nothing is left.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Require a non-blank text field. Records `message` against `field` when
/// the value is missing or blank.
pub fn require_text(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&str>,
    message: &str,
) -> Option<String> {
    let value = non_blank(value);
    if value.is_none() {
        errors.add(field, message);
    }
    value
}

/// Check a text field that may be omitted but must not be blank when given.
pub fn optional_text(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&str>,
    message: &str,
) -> Option<String> {
    value.and_then(|v| require_text(errors, field, Some(v), message))
}

/// Check an email address that may be omitted but must match the pattern
/// when given.
pub fn optional_email(errors: &mut FieldErrors, value: Option<&str>) -> Option<String> {
    let email = optional_text(errors, FIELD_EMAIL, value, "Email is required")?;
    if is_valid_email(&email) {
        Some(email)
    } else {
        errors.add(FIELD_EMAIL, "Invalid email address");
        None
    }
}

/// Require a valid email address.
pub fn require_email(errors: &mut FieldErrors, value: Option<&str>) -> Option<String> {
    if non_blank(value).is_none() {
        errors.add(FIELD_EMAIL, "Email is required");
        return None;
    }
    optional_email(errors, value)
}

/// Parse an optional enumerated field, recording unknown values.
pub fn parse_variant<T>(errors: &mut FieldErrors, field: &'static str, value: Option<&str>) -> Option<T>
where
    T: FromStr<Err = UnknownVariant>,
{
    match value?.parse() {
        Ok(v) => Some(v),
        Err(e) => {
            errors.add(field, e.to_string());
            None
        }
    }
}

/// Normalise an optional phone number: blank means absent.
pub fn normalize_phone(value: Option<&str>) -> Option<String> {
    non_blank(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- email ---------------------------------------------------------------

    #[test]
    fn accepts_simple_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@example.co.uk"));
        assert!(is_valid_email("dev-ops_1@sub-domain.example.io"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@b.comma"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a..b@c.com"));
        assert!(!is_valid_email("a b@c.com"));
    }

    #[test]
    fn rejects_non_ascii_word_characters() {
        assert!(!is_valid_email("josé@example.com"));
    }

    // -- enums ---------------------------------------------------------------

    #[test]
    fn project_type_round_trips_display_names() {
        for pt in ProjectType::ALL {
            assert_eq!(pt.as_str().parse::<ProjectType>().unwrap(), pt);
        }
    }

    #[test]
    fn project_type_serializes_with_spaces() {
        let json = serde_json::to_value(ProjectType::DataAnalysis).unwrap();
        assert_eq!(json, "Data Analysis");
    }

    #[test]
    fn unknown_project_type_lists_valid_values() {
        let err = "Blockchain".parse::<ProjectType>().unwrap_err();
        assert_eq!(err.value, "Blockchain");
        assert!(err.to_string().contains("AI Model, ML Pipeline, Data Analysis, Other"));
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn priority_parsing_is_case_sensitive() {
        assert!("High".parse::<Priority>().is_ok());
        assert!("high".parse::<Priority>().is_err());
    }

    // -- field checks --------------------------------------------------------

    #[test]
    fn require_text_trims_and_rejects_blank() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            require_text(&mut errors, FIELD_NAME, Some("  Ada "), "Name is required"),
            Some("Ada".to_string())
        );
        assert!(errors.is_empty());

        assert_eq!(
            require_text(&mut errors, FIELD_NAME, Some("   "), "Name is required"),
            None
        );
        assert_eq!(errors.get(FIELD_NAME).unwrap(), ["Name is required"]);
    }

    #[test]
    fn optional_text_skips_missing_values() {
        let mut errors = FieldErrors::new();
        assert_eq!(optional_text(&mut errors, FIELD_MESSAGE, None, "Message is required"), None);
        assert!(errors.is_empty());
    }

    #[test]
    fn require_email_distinguishes_missing_from_invalid() {
        let mut errors = FieldErrors::new();
        require_email(&mut errors, None);
        assert_eq!(errors.get(FIELD_EMAIL).unwrap(), ["Email is required"]);

        let mut errors = FieldErrors::new();
        require_email(&mut errors, Some("nope"));
        assert_eq!(errors.get(FIELD_EMAIL).unwrap(), ["Invalid email address"]);
    }

    #[test]
    fn parse_variant_records_unknown_values() {
        let mut errors = FieldErrors::new();
        let parsed: Option<Priority> = parse_variant(&mut errors, FIELD_PRIORITY, Some("Urgent"));
        assert!(parsed.is_none());
        assert!(errors.contains(FIELD_PRIORITY));
    }

    #[test]
    fn blank_phone_is_absent() {
        assert_eq!(normalize_phone(Some("  ")), None);
        assert_eq!(normalize_phone(Some(" 555-0100 ")), Some("555-0100".to_string()));
    }
}
