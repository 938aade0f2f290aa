use proptest::prelude::*;

use form_spec::{Catalog, FieldKind, FieldValue, FileRef, ValidatorRegistry, ValueKind};

fn check(kind: FieldKind, value: FieldValue) -> bool {
    ValidatorRegistry::standard()
        .get(kind)
        .expect("every kind has a validator")
        .check(&value)
}

#[test]
fn registry_covers_every_kind_once() {
    let registry = ValidatorRegistry::standard();
    assert_eq!(registry.len(), FieldKind::ALL.len());
    for kind in FieldKind::ALL {
        assert_eq!(registry.get(kind).map(|v| v.kind), Some(kind));
    }
}

#[test]
fn identifiers_resolve_with_and_without_prefix() {
    assert_eq!(FieldKind::from_identifier("email"), Some(FieldKind::Email));
    assert_eq!(
        FieldKind::from_identifier("form-firstName"),
        Some(FieldKind::FirstName)
    );
    assert_eq!(FieldKind::from_identifier("cv"), Some(FieldKind::Cv));
    assert_eq!(FieldKind::from_identifier("message"), None);
    assert_eq!(FieldKind::from_identifier("form-form-email"), None);
}

#[test]
fn every_failure_message_exists_in_both_catalogs() {
    let registry = ValidatorRegistry::standard();
    for locale in ["nl", "en"] {
        let catalog = Catalog::for_locale(locale);
        for kind in FieldKind::ALL {
            let key = registry.get(kind).map(|v| v.message_key).unwrap_or_default();
            assert!(catalog.contains(key), "{locale} misses {key}");
        }
    }
}

#[test]
fn dutch_messages_are_the_default() {
    let catalog = Catalog::default();
    assert_eq!(
        catalog.text("field.firstName.invalid"),
        "Voornaam moet minimaal 2 tekens bevatten"
    );
}

#[test]
fn email_pattern_treats_s_as_a_literal_letter() {
    assert!(check(FieldKind::Email, FieldValue::text("jan@voorbeeld.nl")));
    // `s` is excluded, whitespace is not.
    assert!(!check(FieldKind::Email, FieldValue::text("sanne@voorbeeld.nl")));
    assert!(check(FieldKind::Email, FieldValue::text("jan de@voorbeeld.nl")));
    // The dot before the suffix matches any character.
    assert!(check(FieldKind::Email, FieldValue::text("jan@voorbeeldXnl")));
    assert!(!check(FieldKind::Email, FieldValue::text("jan.voorbeeld.nl")));
    assert!(!check(FieldKind::Email, FieldValue::text("jan@@voorbeeld.nl")));
}

#[test]
fn phone_pattern_accepts_only_its_literal_class() {
    assert!(check(FieldKind::Phone, FieldValue::text("dddddddddd")));
    assert!(check(FieldKind::Phone, FieldValue::text("+(dd)-sssdd")));
    // Digits are not part of the class.
    assert!(!check(FieldKind::Phone, FieldValue::text("0612345678")));
    assert!(!check(FieldKind::Phone, FieldValue::text("ddddddddd")));
    assert!(!check(FieldKind::Phone, FieldValue::text("dddd dddddd")));
}

#[test]
fn name_length_counts_utf16_units() {
    // One astral character is two units, as the browser measures it.
    assert!(check(FieldKind::FirstName, FieldValue::text("😀")));
    assert!(!check(FieldKind::LastName, FieldValue::text(" Ø ")));
    assert!(check(FieldKind::LastName, FieldValue::text("Øy")));
}

#[test]
fn choices_require_a_selection() {
    assert!(check(FieldKind::Service, FieldValue::choice("apk")));
    assert!(!check(FieldKind::Service, FieldValue::choice("")));
    assert!(!check(FieldKind::Position, FieldValue::choice("")));
}

#[test]
fn wrong_value_kind_never_passes() {
    assert!(!check(FieldKind::FirstName, FieldValue::Checked(true)));
    assert!(!check(FieldKind::Privacy, FieldValue::text("true")));
    assert!(!check(FieldKind::Cv, FieldValue::text("cv.pdf")));
}

#[test]
fn empty_values_match_their_kind() {
    for kind in FieldKind::ALL {
        let empty = kind.value_kind().empty_value();
        assert_eq!(empty.kind(), kind.value_kind());
        assert!(!check(kind, empty), "{kind:?} accepted its empty value");
    }
    assert_eq!(FieldKind::Cv.value_kind(), ValueKind::Files);
}

proptest! {
    #[test]
    fn names_need_two_trimmed_chars(core in "[a-zA-Zé]{0,6}", pad in " {0,3}") {
        let value = format!("{pad}{core}{pad}");
        let expected = core.chars().count() >= 2;
        prop_assert_eq!(check(FieldKind::FirstName, FieldValue::Text(value.clone())), expected);
        prop_assert_eq!(check(FieldKind::LastName, FieldValue::Text(value)), expected);
    }

    #[test]
    fn consent_only_accepts_true(checked in any::<bool>()) {
        prop_assert_eq!(check(FieldKind::Privacy, FieldValue::Checked(checked)), checked);
        prop_assert_eq!(check(FieldKind::Consent, FieldValue::Checked(checked)), checked);
    }

    #[test]
    fn file_sets_need_one_file(count in 0usize..4) {
        let files = (0..count).map(|idx| FileRef::new(format!("cv-{idx}.pdf"), 1024)).collect();
        prop_assert_eq!(check(FieldKind::Cv, FieldValue::Files(files)), count > 0);
    }
}
