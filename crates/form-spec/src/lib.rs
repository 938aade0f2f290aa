#![allow(missing_docs)]

pub mod field;
pub mod i18n;
pub mod validators;

pub use field::{
    FIELD_ID_PREFIX, FieldKind, FieldValue, FileRef, ValidationResult, Validity, ValueKind,
};
pub use i18n::{Catalog, CatalogError, DEFAULT_LOCALE, normalize_locale};
pub use validators::{Predicate, Validator, ValidatorRegistry};
