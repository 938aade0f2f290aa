use std::time::Duration;

use form_spec::{Catalog, ValidationResult, ValidatorRegistry, Validity};
use tracing::trace;

use crate::document::{Animation, Field, Form};
use crate::scheduler::{Scheduler, Task};

/// Applies validators to fields and keeps their visual and ARIA state in sync.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'a> {
    validators: &'a ValidatorRegistry,
    catalog: &'a Catalog,
    shake: Duration,
}

impl<'a> Engine<'a> {
    pub fn new(validators: &'a ValidatorRegistry, catalog: &'a Catalog, shake: Duration) -> Self {
        Self {
            validators,
            catalog,
            shake,
        }
    }

    /// Validates one field against its current value.
    ///
    /// Fields without a validator pass and keep their state. Calling this twice with an
    /// unchanged value leaves the same visible state.
    pub fn validate(
        &self,
        form_id: &str,
        field: &mut Field,
        scheduler: &mut Scheduler<Task>,
    ) -> bool {
        let Some(validator) = field.kind.and_then(|kind| self.validators.get(kind)) else {
            return true;
        };

        let valid = validator.check(&field.value);
        trace!(form = form_id, field = %field.id, valid, "field validated");

        if valid {
            field.validity = Validity::Valid;
            field.aria_invalid = false;
            if let Some(slot) = field.feedback.as_mut() {
                slot.visible = false;
            }
            return true;
        }

        field.validity = Validity::Invalid;
        field.aria_invalid = true;
        if let Some(slot) = field.feedback.as_mut() {
            slot.text = self.catalog.text(validator.message_key);
            slot.visible = true;
        }

        field.animation = Some(Animation::Shake);
        if let Some(previous) = field.animation_timer.take() {
            scheduler.cancel(previous);
        }
        field.animation_timer = Some(scheduler.schedule(
            self.shake,
            Task::ClearAnimation {
                form: form_id.to_string(),
                field: field.id.clone(),
            },
        ));
        false
    }

    /// Validates every field of a form; all fields are checked even after a failure.
    pub fn validate_form(
        &self,
        form: &mut Form,
        scheduler: &mut Scheduler<Task>,
    ) -> Vec<ValidationResult> {
        let form_id = form.id.clone();
        form.fields
            .iter_mut()
            .map(|field| ValidationResult {
                valid: self.validate(&form_id, field, scheduler),
                field_id: field.id.clone(),
            })
            .collect()
    }
}
