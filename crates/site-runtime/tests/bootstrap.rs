mod common;

use std::cell::Cell;

use form_spec::FieldValue;
use site_runtime::document::ElementRef;
use site_runtime::modules::{FORMS, HEADER};
use site_runtime::{
    App, AppContext, Dispatch, Document, EventKind, FormsModule, HeaderModule, Module, ModuleKey,
    SetupError, SiteConfig, Subscription, default_modules,
};

use common::{CONTACT, blur, contact_form, input, page};

#[derive(Default)]
struct CountingModule {
    runs: Cell<usize>,
}

impl Module for CountingModule {
    fn key(&self) -> ModuleKey {
        ModuleKey("counting")
    }

    fn setup(
        &self,
        _ctx: &mut AppContext,
        _document: &mut Document,
    ) -> Result<Vec<Subscription>, SetupError> {
        self.runs.set(self.runs.get() + 1);
        Ok(Vec::new())
    }
}

#[test]
fn bootstrapping_twice_runs_each_setup_once() {
    let counting = CountingModule::default();
    let mut app = App::new(SiteConfig::default(), page());

    assert_eq!(app.bootstrap(&[&counting, &counting]), 1);
    assert_eq!(app.bootstrap(&[&counting]), 0);

    assert_eq!(counting.runs.get(), 1);
    assert!(app.is_initialized());
    assert!(app.context().registry.is_initialized(ModuleKey("counting")));
}

#[test]
fn default_modules_wire_header_and_forms() {
    let mut app = App::new(SiteConfig::default(), page());
    assert_eq!(app.bootstrap(&default_modules()), 2);
    let subscriptions = app.subscriptions();

    assert!(subscriptions.iter().any(|s| s.module == HEADER
        && s.target == ElementRef::Window
        && s.event == EventKind::Scroll));
    assert!(subscriptions.iter().any(|s| s.module == FORMS
        && s.target == ElementRef::ToastStack
        && s.event == EventKind::Click));
    for form in [common::CONTACT, common::APPLICATION] {
        assert!(subscriptions.iter().any(|s| s.target
            == ElementRef::Form(form.to_string())
            && s.event == EventKind::Submit));
    }
    // One blur and one input subscription per field, across both forms.
    let field_subs = subscriptions
        .iter()
        .filter(|s| matches!(s.target, ElementRef::Field { .. }))
        .count();
    assert_eq!(field_subs, 2 * (7 + 7));
}

#[test]
fn forms_setup_adds_missing_feedback_slots() {
    let document = Document::new().with_form(contact_form());
    let mut app = App::new(SiteConfig::default(), document);
    app.bootstrap(&[&FormsModule]);

    let form = app.document().form(CONTACT).expect("contact form");
    assert!(form.fields.iter().all(|f| f.feedback.is_some()));
    assert!(form.fields.iter().all(|f| f.feedback_text().is_none()));
}

#[test]
fn missing_header_skips_only_the_header_module() {
    let document = Document::new().with_form(contact_form());
    let mut app = App::new(SiteConfig::default(), document);

    assert_eq!(app.bootstrap(&[&HeaderModule, &FormsModule]), 1);
    assert!(app.subscriptions().iter().all(|s| s.module == FORMS));
    assert_eq!(blur(&mut app, CONTACT, "form-email"), Dispatch::Validated(false));
}

#[test]
fn page_without_forms_rejects_forms_setup() {
    let mut ctx = AppContext::new(SiteConfig::default());
    let mut document = Document::new().with_header();

    let err = FormsModule
        .setup(&mut ctx, &mut document)
        .expect_err("no forms on the page");
    assert!(matches!(err, SetupError::MissingElement(ref name) if name == "form"));
}

#[test]
fn teardown_removes_a_modules_subscriptions() {
    let mut app = common::app();
    let forms_subs = app
        .subscriptions()
        .iter()
        .filter(|s| s.module == FORMS)
        .count();

    assert_eq!(app.teardown(FORMS), forms_subs);
    assert_eq!(blur(&mut app, CONTACT, "form-email"), Dispatch::Unhandled);
    assert!(app.subscriptions().iter().all(|s| s.module == HEADER));

    // Input still lands in the document, it just triggers nothing.
    input(&mut app, CONTACT, "form-email", FieldValue::text("x"));
    assert_eq!(
        app.document()
            .form(CONTACT)
            .and_then(|f| f.field("form-email"))
            .map(|f| f.value.clone()),
        Some(FieldValue::text("x"))
    );

    // The init flag stays set, so a teardown does not allow a second setup.
    assert!(app.context().registry.is_initialized(FORMS));
    assert_eq!(app.teardown(FORMS), 0);
}

#[test]
fn unknown_fields_and_forms_are_unhandled() {
    let mut app = common::app();
    assert_eq!(blur(&mut app, "newsletter", "email"), Dispatch::Unhandled);
    assert_eq!(blur(&mut app, CONTACT, "form-fax"), Dispatch::Unhandled);
}
