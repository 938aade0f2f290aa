use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::field::{FieldKind, FieldValue};

// `s` and `d` are literal letters and the `.` before the suffix matches any character.
// The phone class `[ds-+()]` is an out-of-order range; its `-` is a literal hyphen here.
const EMAIL_PATTERN: &str = r"^[^s@]+@[^s@]+.[^s@]+$";
const PHONE_PATTERN: &str = r"^[ds+()\-]{10,}$";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern compiles"));

const MIN_NAME_CHARS: usize = 2;

pub type Predicate = fn(&FieldValue) -> bool;

/// Predicate plus the catalog key of its failure message.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    pub kind: FieldKind,
    pub message_key: &'static str,
    predicate: Predicate,
}

impl Validator {
    pub fn new(kind: FieldKind, message_key: &'static str, predicate: Predicate) -> Self {
        Self {
            kind,
            message_key,
            predicate,
        }
    }

    pub fn check(&self, value: &FieldValue) -> bool {
        (self.predicate)(value)
    }
}

/// Immutable mapping from field kind to validator, built once at startup.
#[derive(Debug, Clone)]
pub struct ValidatorRegistry {
    entries: BTreeMap<FieldKind, Validator>,
}

impl ValidatorRegistry {
    /// Registry with a validator for every [`FieldKind`].
    pub fn standard() -> Self {
        let entries = FieldKind::ALL
            .into_iter()
            .map(|kind| (kind, standard_validator(kind)))
            .collect();
        Self { entries }
    }

    pub fn get(&self, kind: FieldKind) -> Option<&Validator> {
        self.entries.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_validator(kind: FieldKind) -> Validator {
    match kind {
        FieldKind::FirstName => Validator::new(kind, "field.firstName.invalid", is_name),
        FieldKind::LastName => Validator::new(kind, "field.lastName.invalid", is_name),
        FieldKind::Email => Validator::new(kind, "field.email.invalid", is_email),
        FieldKind::Phone => Validator::new(kind, "field.phone.invalid", is_phone),
        FieldKind::Service => Validator::new(kind, "field.service.invalid", is_selected),
        FieldKind::Position => Validator::new(kind, "field.position.invalid", is_selected),
        FieldKind::Privacy => Validator::new(kind, "field.privacy.invalid", is_checked),
        FieldKind::Consent => Validator::new(kind, "field.consent.invalid", is_checked),
        FieldKind::Cv => Validator::new(kind, "field.cv.invalid", has_files),
    }
}

pub fn is_name(value: &FieldValue) -> bool {
    // Length in UTF-16 code units, as browsers count it.
    matches!(
        value,
        FieldValue::Text(text) if text.trim().encode_utf16().count() >= MIN_NAME_CHARS
    )
}

pub fn is_email(value: &FieldValue) -> bool {
    matches!(value, FieldValue::Text(text) if EMAIL_RE.is_match(text))
}

pub fn is_phone(value: &FieldValue) -> bool {
    matches!(value, FieldValue::Text(text) if PHONE_RE.is_match(text))
}

pub fn is_selected(value: &FieldValue) -> bool {
    matches!(value, FieldValue::Choice(choice) if !choice.is_empty())
}

pub fn is_checked(value: &FieldValue) -> bool {
    matches!(value, FieldValue::Checked(true))
}

pub fn has_files(value: &FieldValue) -> bool {
    matches!(value, FieldValue::Files(files) if !files.is_empty())
}
