//! Headless model of the page elements the form subsystem reads and mutates.

use form_spec::{FieldKind, FieldValue, FileRef, Validity, ValueKind};
use serde_json::{Map, Value};

use crate::scheduler::TimerId;
use crate::submit::SubmitPhase;
use crate::toast::ToastId;

/// Value form encoding sends for a checked box without an explicit value.
pub const CHECKED_VALUE: &str = "on";

/// Address of an event target on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementRef {
    Form(String),
    Field { form: String, field: String },
    Toast(ToastId),
    /// Every toast in the stack; used for delegated close handling.
    ToastStack,
    Window,
}

impl ElementRef {
    pub fn field(form: impl Into<String>, field: impl Into<String>) -> Self {
        ElementRef::Field {
            form: form.into(),
            field: field.into(),
        }
    }

    /// Whether a subscription on `self` receives events fired at `target`.
    pub fn matches(&self, target: &ElementRef) -> bool {
        match (self, target) {
            (ElementRef::ToastStack, ElementRef::Toast(_)) => true,
            _ => self == target,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    Shake,
}

/// Element next to a field that shows its validation message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackSlot {
    pub text: String,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub id: String,
    pub kind: Option<FieldKind>,
    pub value: FieldValue,
    initial: FieldValue,
    pub validity: Validity,
    pub aria_invalid: bool,
    pub feedback: Option<FeedbackSlot>,
    pub animation: Option<Animation>,
    pub(crate) animation_timer: Option<TimerId>,
}

impl Field {
    /// Field whose validator is resolved from `id` once, here.
    pub fn new(id: impl Into<String>, value: FieldValue) -> Self {
        let id = id.into();
        let kind = FieldKind::from_identifier(&id);
        Self {
            id,
            kind,
            initial: value.clone(),
            value,
            validity: Validity::Untouched,
            aria_invalid: false,
            feedback: None,
            animation: None,
            animation_timer: None,
        }
    }

    /// Field with the empty value of its resolved kind, or empty text when unknown.
    pub fn for_id(id: impl Into<String>) -> Self {
        let id = id.into();
        let value = FieldKind::from_identifier(&id)
            .map(FieldKind::value_kind)
            .unwrap_or(ValueKind::Text)
            .empty_value();
        Self::new(id, value)
    }

    pub fn with_feedback(mut self) -> Self {
        self.feedback = Some(FeedbackSlot::default());
        self
    }

    pub fn initial_value(&self) -> &FieldValue {
        &self.initial
    }

    pub fn set_value(&mut self, value: FieldValue) {
        self.value = value;
    }

    pub fn feedback_text(&self) -> Option<&str> {
        self.feedback
            .as_ref()
            .filter(|slot| slot.visible)
            .map(|slot| slot.text.as_str())
    }

    fn reset(&mut self) {
        self.value = self.initial.clone();
        self.validity = Validity::Untouched;
        self.aria_invalid = false;
        if let Some(slot) = self.feedback.as_mut() {
            slot.visible = false;
        }
    }
}

/// Submit button of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
    pub disabled: bool,
    pub busy: bool,
    original_label: Option<String>,
}

impl SubmitControl {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            busy: false,
            original_label: None,
        }
    }

    pub(crate) fn begin_busy(&mut self, busy_label: String) {
        if self.original_label.is_none() {
            self.original_label = Some(std::mem::replace(&mut self.label, busy_label));
        }
        self.disabled = true;
        self.busy = true;
    }

    pub(crate) fn restore(&mut self) {
        if let Some(original) = self.original_label.take() {
            self.label = original;
        }
        self.disabled = false;
        self.busy = false;
    }
}

#[derive(Debug, Clone)]
pub struct Form {
    pub id: String,
    pub fields: Vec<Field>,
    /// Set once a submit attempt failed validation; cleared by a successful send.
    pub attempted: bool,
    pub submit: Option<SubmitControl>,
    pub phase: SubmitPhase,
    pub scrolled_to: Option<String>,
}

impl Form {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
            attempted: false,
            submit: None,
            phase: SubmitPhase::Idle,
            scrolled_to: None,
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_submit(mut self, label: impl Into<String>) -> Self {
        self.submit = Some(SubmitControl::new(label));
        self
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|field| field.id == id)
    }

    pub fn first_invalid(&self) -> Option<&Field> {
        self.fields.iter().find(|field| field.validity == Validity::Invalid)
    }

    /// Gives every field without a feedback slot an empty, hidden one.
    pub fn ensure_feedback_slots(&mut self) -> usize {
        let mut created = 0;
        for field in self.fields.iter_mut().filter(|f| f.feedback.is_none()) {
            field.feedback = Some(FeedbackSlot::default());
            created += 1;
        }
        created
    }

    /// Restores initial values and clears every validation marking.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.reset();
        }
        self.attempted = false;
        self.scrolled_to = None;
    }

    /// Field identifier to string value, as sent to the endpoint.
    ///
    /// Unchecked boxes are omitted and file sets are never encoded.
    pub fn request_body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        for field in &self.fields {
            let encoded = match &field.value {
                FieldValue::Text(text) | FieldValue::Choice(text) => Some(text.clone()),
                FieldValue::Checked(true) => Some(CHECKED_VALUE.to_string()),
                FieldValue::Checked(false) | FieldValue::Files(_) => None,
            };
            if let Some(encoded) = encoded {
                body.insert(field.id.clone(), Value::String(encoded));
            }
        }
        body
    }

    pub fn attached_files(&self) -> Vec<&FileRef> {
        self.fields
            .iter()
            .filter_map(|field| field.value.as_files())
            .flatten()
            .collect()
    }
}

/// Scroll-aware page header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    pub elevated: bool,
    pub scroll_y: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    pub forms: Vec<Form>,
    pub header: Option<Header>,
    pub focused: Option<ElementRef>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(mut self, form: Form) -> Self {
        self.forms.push(form);
        self
    }

    pub fn with_header(mut self) -> Self {
        self.header = Some(Header::default());
        self
    }

    pub fn form(&self, id: &str) -> Option<&Form> {
        self.forms.iter().find(|form| form.id == id)
    }

    pub fn form_mut(&mut self, id: &str) -> Option<&mut Form> {
        self.forms.iter_mut().find(|form| form.id == id)
    }

    pub fn field_mut(&mut self, form: &str, field: &str) -> Option<&mut Field> {
        self.form_mut(form)?.field_mut(field)
    }
}
