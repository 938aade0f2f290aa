#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use form_spec::{FieldValue, FileRef};
use site_runtime::{
    App, Dispatch, Document, Event, Field, Form, SiteConfig, SubmissionRequest, SubmitResponse,
    SubmitTransport, TransportError, default_modules,
};

pub const CONTACT: &str = "contact-form";
pub const APPLICATION: &str = "application-form";
pub const SUBMIT_LABEL: &str = "Verstuur";

pub fn contact_form() -> Form {
    Form::new(CONTACT)
        .with_field(Field::for_id("form-firstName"))
        .with_field(Field::for_id("form-lastName"))
        .with_field(Field::for_id("form-email"))
        .with_field(Field::for_id("form-phone"))
        .with_field(Field::for_id("form-service"))
        .with_field(Field::for_id("form-privacy"))
        .with_field(Field::for_id("message"))
        .with_submit(SUBMIT_LABEL)
}

pub fn application_form() -> Form {
    Form::new(APPLICATION)
        .with_field(Field::for_id("firstName"))
        .with_field(Field::for_id("lastName"))
        .with_field(Field::for_id("email"))
        .with_field(Field::for_id("phone"))
        .with_field(Field::for_id("position"))
        .with_field(Field::for_id("cv"))
        .with_field(Field::for_id("consent"))
        .with_submit("Solliciteer")
}

pub fn page() -> Document {
    Document::new()
        .with_header()
        .with_form(contact_form())
        .with_form(application_form())
}

pub fn app() -> App {
    app_with(SiteConfig::default())
}

pub fn app_with(config: SiteConfig) -> App {
    let mut app = App::new(config, page());
    app.bootstrap(&default_modules());
    app
}

pub fn input(app: &mut App, form: &str, field: &str, value: FieldValue) -> Dispatch {
    app.dispatch(Event::Input {
        form: form.to_string(),
        field: field.to_string(),
        value,
    })
}

pub fn blur(app: &mut App, form: &str, field: &str) -> Dispatch {
    app.dispatch(Event::Blur {
        form: form.to_string(),
        field: field.to_string(),
    })
}

pub fn fill_contact(app: &mut App) {
    for (field, value) in [
        ("form-firstName", FieldValue::text("Jan")),
        ("form-lastName", FieldValue::text("Jansen")),
        ("form-email", FieldValue::text("jan@voorbeeld.nl")),
        ("form-phone", FieldValue::text("dddddddddd")),
        ("form-service", FieldValue::choice("webdesign")),
        ("form-privacy", FieldValue::Checked(true)),
        ("message", FieldValue::text("Graag een offerte")),
    ] {
        input(app, CONTACT, field, value);
    }
}

pub fn fill_application(app: &mut App) {
    for (field, value) in [
        ("firstName", FieldValue::text("Eva")),
        ("lastName", FieldValue::text("de Boer")),
        ("email", FieldValue::text("eva@voorbeeld.nl")),
        ("phone", FieldValue::text("(ddd)-ddd-dddd")),
        ("position", FieldValue::choice("developer")),
        ("cv", FieldValue::Files(vec![FileRef::new("cv.pdf", 48_213)])),
        ("consent", FieldValue::Checked(true)),
    ] {
        input(app, APPLICATION, field, value);
    }
}

#[derive(Debug, Clone)]
pub enum Reply {
    Respond(SubmitResponse),
    Unreachable,
}

/// Transport that records every request and answers with a canned reply.
#[derive(Debug)]
pub struct RecordingTransport {
    reply: Reply,
    requests: Mutex<Vec<SubmissionRequest>>,
}

impl RecordingTransport {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn accepting() -> Self {
        Self::new(Reply::Respond(SubmitResponse::accepted()))
    }

    pub fn requests(&self) -> Vec<SubmissionRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl SubmitTransport for RecordingTransport {
    async fn send(&self, request: &SubmissionRequest) -> Result<SubmitResponse, TransportError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        match &self.reply {
            Reply::Respond(response) => Ok(response.clone()),
            Reply::Unreachable => Err(TransportError::Unavailable("connection refused".into())),
        }
    }
}
