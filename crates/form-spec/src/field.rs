use serde::{Deserialize, Serialize};

/// Prefix the page templates put in front of field identifiers.
pub const FIELD_ID_PREFIX: &str = "form-";

/// Closed set of field kinds the site forms know how to validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    FirstName,
    LastName,
    Email,
    Phone,
    Service,
    Position,
    Privacy,
    Consent,
    Cv,
}

impl FieldKind {
    pub const ALL: [FieldKind; 9] = [
        FieldKind::FirstName,
        FieldKind::LastName,
        FieldKind::Email,
        FieldKind::Phone,
        FieldKind::Service,
        FieldKind::Position,
        FieldKind::Privacy,
        FieldKind::Consent,
        FieldKind::Cv,
    ];

    /// Key used in page markup and in the message catalog.
    pub fn key(self) -> &'static str {
        match self {
            FieldKind::FirstName => "firstName",
            FieldKind::LastName => "lastName",
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::Service => "service",
            FieldKind::Position => "position",
            FieldKind::Privacy => "privacy",
            FieldKind::Consent => "consent",
            FieldKind::Cv => "cv",
        }
    }

    pub fn value_kind(self) -> ValueKind {
        match self {
            FieldKind::FirstName | FieldKind::LastName | FieldKind::Email | FieldKind::Phone => {
                ValueKind::Text
            }
            FieldKind::Service | FieldKind::Position => ValueKind::Choice,
            FieldKind::Privacy | FieldKind::Consent => ValueKind::Checked,
            FieldKind::Cv => ValueKind::Files,
        }
    }

    /// Resolves a page identifier (`email`, `form-email`) to its kind.
    ///
    /// Identifiers that match neither form carry no validator.
    pub fn from_identifier(id: &str) -> Option<FieldKind> {
        let bare = id.strip_prefix(FIELD_ID_PREFIX).unwrap_or(id);
        Self::from_key(bare)
    }

    pub fn from_key(key: &str) -> Option<FieldKind> {
        FieldKind::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

/// Native value kind of a form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Text,
    Choice,
    Checked,
    Files,
}

impl ValueKind {
    /// Value a freshly rendered control of this kind holds.
    pub fn empty_value(self) -> FieldValue {
        match self {
            ValueKind::Text => FieldValue::Text(String::new()),
            ValueKind::Choice => FieldValue::Choice(String::new()),
            ValueKind::Checked => FieldValue::Checked(false),
            ValueKind::Files => FieldValue::Files(Vec::new()),
        }
    }
}

/// File picked in a file-set control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    #[serde(default)]
    pub size: u64,
}

impl FileRef {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Current value of a form control, read in its native kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Choice(String),
    Checked(bool),
    Files(Vec<FileRef>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn choice(value: impl Into<String>) -> Self {
        FieldValue::Choice(value.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Text(_) => ValueKind::Text,
            FieldValue::Choice(_) => ValueKind::Choice,
            FieldValue::Checked(_) => ValueKind::Checked,
            FieldValue::Files(_) => ValueKind::Files,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) | FieldValue::Choice(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Checked(checked) => Some(*checked),
            _ => None,
        }
    }

    pub fn as_files(&self) -> Option<&[FileRef]> {
        match self {
            FieldValue::Files(files) => Some(files),
            _ => None,
        }
    }
}

/// Visual validity state of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    #[default]
    Untouched,
    Valid,
    Invalid,
}

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub field_id: String,
    pub valid: bool,
}
