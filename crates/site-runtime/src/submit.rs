//! Submission pipeline: full-form validation, one in-flight request per form, and
//! interpretation of the endpoint's answer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::app::AppContext;
use crate::document::Form;
use crate::engine::Engine;
use crate::scheduler::Task;
use crate::toast::Severity;
use crate::transport::{SubmitResponse, TransportError};

/// Where a form is in its submit cycle.
///
/// `Invalid`, `Succeeded` and `Failed` are settled phases: like `Idle`, they accept a new
/// submit, which starts over at `Validating`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Invalid,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmitPhase {
    pub fn is_in_flight(self) -> bool {
        matches!(self, SubmitPhase::Validating | SubmitPhase::Submitting)
    }
}

/// Snapshot of a form's values at submit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub form_id: String,
    pub endpoint: String,
    pub body: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    Validation { fields: Vec<String> },
    Network(String),
    Rejected { message: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success { acknowledgement: String },
    Failure(FailureCause),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success { .. })
    }
}

/// Result of starting a submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStart {
    /// At least one field failed; nothing was sent.
    Invalid { fields: Vec<String> },
    /// A request for this form is still outstanding.
    Busy,
    /// The form validated but has no submit control, so nothing is sent.
    NoControl,
    /// The control is disabled and the request is ready to send.
    Ready(SubmissionRequest),
}

pub fn begin_submit(ctx: &mut AppContext, form: &mut Form) -> SubmitStart {
    if form.phase.is_in_flight() {
        debug!(form = %form.id, "submit ignored while a request is outstanding");
        return SubmitStart::Busy;
    }

    form.phase = SubmitPhase::Validating;
    let engine = Engine::new(&ctx.validators, &ctx.catalog, ctx.config.timing.shake());
    let invalid: Vec<String> = engine
        .validate_form(form, &mut ctx.scheduler)
        .into_iter()
        .filter(|result| !result.valid)
        .map(|result| result.field_id)
        .collect();
    form.attempted = true;

    if !invalid.is_empty() {
        form.phase = SubmitPhase::Invalid;
        info!(form = %form.id, invalid = ?invalid, "submit blocked by validation");
        let summary = ctx.catalog.text("form.invalid_summary");
        ctx.notify(summary, Severity::Danger);
        if let Some(first) = form.first_invalid().map(|field| field.id.clone()) {
            form.scrolled_to = Some(first.clone());
            ctx.scheduler.schedule(
                ctx.config.timing.focus_delay(),
                Task::FocusField {
                    form: form.id.clone(),
                    field: first,
                },
            );
        }
        return SubmitStart::Invalid { fields: invalid };
    }

    let busy_label = ctx.catalog.text("form.busy_label");
    let Some(control) = form.submit.as_mut() else {
        debug!(form = %form.id, "form has no submit control; nothing sent");
        form.phase = SubmitPhase::Idle;
        return SubmitStart::NoControl;
    };
    control.begin_busy(busy_label);
    form.phase = SubmitPhase::Submitting;

    let files = form.attached_files().len();
    if files > 0 {
        warn!(form = %form.id, files, "attached files are not part of the JSON body");
    }

    let request = SubmissionRequest {
        form_id: form.id.clone(),
        endpoint: ctx.config.endpoint.clone(),
        body: form.request_body(),
    };
    info!(form = %form.id, endpoint = %request.endpoint, "submitting form");
    SubmitStart::Ready(request)
}

/// Settles an outstanding request. Returns `None` when the form was not submitting.
pub fn complete_submit(
    ctx: &mut AppContext,
    form: &mut Form,
    result: Result<SubmitResponse, TransportError>,
) -> Option<SubmissionOutcome> {
    if form.phase != SubmitPhase::Submitting {
        warn!(form = %form.id, phase = ?form.phase, "no pending request to settle");
        return None;
    }

    if let Some(control) = form.submit.as_mut() {
        control.restore();
    }

    let outcome = match result {
        Ok(response) if response.success => {
            let acknowledgement = ctx.catalog.text("form.sent");
            ctx.notify(acknowledgement.clone(), Severity::Success);
            form.reset();
            form.phase = SubmitPhase::Succeeded;
            info!(form = %form.id, "submission accepted");
            SubmissionOutcome::Success { acknowledgement }
        }
        Ok(response) => {
            let text = response
                .message
                .clone()
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| ctx.catalog.text("form.rejected"));
            ctx.notify(text, Severity::Danger);
            form.phase = SubmitPhase::Failed;
            warn!(form = %form.id, reason = ?response.message, "submission rejected");
            SubmissionOutcome::Failure(FailureCause::Rejected {
                message: response.message,
            })
        }
        Err(err) => {
            let text = ctx.catalog.text("form.network_error");
            ctx.notify(text, Severity::Danger);
            form.phase = SubmitPhase::Failed;
            warn!(form = %form.id, error = %err, "submission failed");
            SubmissionOutcome::Failure(FailureCause::Network(err.to_string()))
        }
    };
    Some(outcome)
}
