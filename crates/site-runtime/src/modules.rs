//! Built-in feature modules.

use tracing::debug;

use crate::app::{AppContext, EventKind, Handler, Module, SetupError, Subscription};
use crate::document::{Document, ElementRef};
use crate::rate_limit::{Debouncer, Throttle};
use crate::registry::ModuleKey;

pub const FORMS: ModuleKey = ModuleKey("forms");
pub const HEADER: ModuleKey = ModuleKey("header");

/// Inline validation, submission and toast dismissal for every form on the page.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormsModule;

impl Module for FormsModule {
    fn key(&self) -> ModuleKey {
        FORMS
    }

    fn setup(
        &self,
        ctx: &mut AppContext,
        document: &mut Document,
    ) -> Result<Vec<Subscription>, SetupError> {
        if document.forms.is_empty() {
            return Err(SetupError::MissingElement("form".into()));
        }

        let debounce = ctx.config.timing.debounce();
        let mut subscriptions = vec![Subscription::new(
            FORMS,
            ElementRef::ToastStack,
            EventKind::Click,
            Handler::DismissToast,
        )];

        for form in &mut document.forms {
            let created = form.ensure_feedback_slots();
            debug!(form = %form.id, fields = form.fields.len(), created, "wiring form");
            for field in &form.fields {
                let target = ElementRef::field(form.id.clone(), field.id.clone());
                subscriptions.push(Subscription::new(
                    FORMS,
                    target.clone(),
                    EventKind::Blur,
                    Handler::Validate,
                ));
                subscriptions.push(Subscription::new(
                    FORMS,
                    target,
                    EventKind::Input,
                    Handler::DebouncedRevalidate(Debouncer::new(debounce)),
                ));
            }
            subscriptions.push(Subscription::new(
                FORMS,
                ElementRef::Form(form.id.clone()),
                EventKind::Submit,
                Handler::Submit,
            ));
        }
        Ok(subscriptions)
    }
}

/// Elevates the page header once the window scrolls past a threshold.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderModule;

impl Module for HeaderModule {
    fn key(&self) -> ModuleKey {
        HEADER
    }

    fn setup(
        &self,
        ctx: &mut AppContext,
        document: &mut Document,
    ) -> Result<Vec<Subscription>, SetupError> {
        if document.header.is_none() {
            return Err(SetupError::MissingElement("header".into()));
        }
        Ok(vec![Subscription::new(
            HEADER,
            ElementRef::Window,
            EventKind::Scroll,
            Handler::ElevateHeader(Throttle::new(ctx.config.timing.scroll_throttle())),
        )])
    }
}

/// Modules wired on every page, in bootstrap order.
pub fn default_modules() -> [&'static dyn Module; 2] {
    [&HeaderModule, &FormsModule]
}
