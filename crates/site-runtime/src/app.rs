//! Application context, module wiring and event dispatch.

use std::time::Duration;

use form_spec::{Catalog, FieldValue, ValidatorRegistry, Validity};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::SiteConfig;
use crate::document::{Document, ElementRef};
use crate::engine::Engine;
use crate::rate_limit::{Debouncer, Throttle};
use crate::registry::{InitRegistry, ModuleKey};
use crate::scheduler::{Scheduler, Task};
use crate::submit::{self, FailureCause, SubmissionOutcome, SubmitStart};
use crate::toast::{Severity, ToastId, ToastQueue};
use crate::transport::{SubmitResponse, SubmitTransport, TransportError};

/// State shared by every module, created once per page and passed to each setup.
#[derive(Debug)]
pub struct AppContext {
    pub config: SiteConfig,
    pub registry: InitRegistry,
    pub catalog: Catalog,
    pub validators: ValidatorRegistry,
    pub scheduler: Scheduler<Task>,
    pub toasts: ToastQueue,
}

impl AppContext {
    pub fn new(config: SiteConfig) -> Self {
        let toasts = ToastQueue::new(config.timing.toast_timeout(), config.timing.toast_exit());
        Self {
            catalog: Catalog::for_locale(&config.locale),
            validators: ValidatorRegistry::standard(),
            registry: InitRegistry::new(),
            scheduler: Scheduler::new(),
            toasts,
            config,
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> ToastId {
        self.toasts.notify(message, severity, &mut self.scheduler)
    }

    /// Runs `setup` the first time `key` is seen; later calls are no-ops.
    pub fn ensure_init<R>(
        &mut self,
        key: ModuleKey,
        setup: impl FnOnce(&mut AppContext) -> R,
    ) -> Option<R> {
        if !self.registry.mark(key) {
            return None;
        }
        Some(setup(self))
    }

    /// Engine over this context's validators and catalog.
    pub fn engine(&self) -> Engine<'_> {
        Engine::new(&self.validators, &self.catalog, self.config.timing.shake())
    }
}

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("required element '{0}' is missing from the page")]
    MissingElement(String),
}

/// A feature that wires event subscriptions onto the page.
pub trait Module {
    fn key(&self) -> ModuleKey;

    fn setup(
        &self,
        ctx: &mut AppContext,
        document: &mut Document,
    ) -> Result<Vec<Subscription>, SetupError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Blur,
    Input,
    Submit,
    Click,
    Scroll,
}

/// What a subscription does when its event fires.
#[derive(Debug, Clone)]
pub enum Handler {
    Validate,
    /// Re-checks a field that is currently invalid once typing pauses.
    DebouncedRevalidate(Debouncer),
    Submit,
    DismissToast,
    ElevateHeader(Throttle),
}

#[derive(Debug, Clone)]
pub struct Subscription {
    pub module: ModuleKey,
    pub target: ElementRef,
    pub event: EventKind,
    pub handler: Handler,
}

impl Subscription {
    pub fn new(module: ModuleKey, target: ElementRef, event: EventKind, handler: Handler) -> Self {
        Self {
            module,
            target,
            event,
            handler,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Input {
        form: String,
        field: String,
        value: FieldValue,
    },
    Blur {
        form: String,
        field: String,
    },
    Submit {
        form: String,
    },
    CloseToast(ToastId),
    Scroll {
        y: f64,
    },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Input { .. } => EventKind::Input,
            Event::Blur { .. } => EventKind::Blur,
            Event::Submit { .. } => EventKind::Submit,
            Event::CloseToast(_) => EventKind::Click,
            Event::Scroll { .. } => EventKind::Scroll,
        }
    }

    pub fn target(&self) -> ElementRef {
        match self {
            Event::Input { form, field, .. } | Event::Blur { form, field } => {
                ElementRef::field(form.clone(), field.clone())
            }
            Event::Submit { form } => ElementRef::Form(form.clone()),
            Event::CloseToast(id) => ElementRef::Toast(*id),
            Event::Scroll { .. } => ElementRef::Window,
        }
    }
}

/// What dispatching an event did.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Unhandled,
    Handled,
    Validated(bool),
    Submit(SubmitStart),
}

/// A page: its document, shared context and wired subscriptions.
#[derive(Debug)]
pub struct App {
    ctx: AppContext,
    document: Document,
    subscriptions: Vec<Subscription>,
    initialized: bool,
}

impl App {
    pub fn new(config: SiteConfig, document: Document) -> Self {
        Self::with_context(AppContext::new(config), document)
    }

    pub fn with_context(ctx: AppContext, document: Document) -> Self {
        Self {
            ctx,
            document,
            subscriptions: Vec::new(),
            initialized: false,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.ctx
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Wires each module at most once. Repeated calls are no-ops.
    ///
    /// A module whose setup fails is skipped; the others still initialize.
    pub fn bootstrap(&mut self, modules: &[&dyn Module]) -> usize {
        if self.initialized {
            debug!("bootstrap already ran");
            return 0;
        }
        self.initialized = true;

        let mut wired = 0;
        for module in modules {
            let key = module.key();
            let document = &mut self.document;
            match self.ctx.ensure_init(key, |ctx| module.setup(ctx, document)) {
                None => debug!(module = %key, "module already initialized"),
                Some(Ok(subscriptions)) => {
                    info!(module = %key, subscriptions = subscriptions.len(), "module wired");
                    self.subscriptions.extend(subscriptions);
                    wired += 1;
                }
                Some(Err(err)) => warn!(module = %key, error = %err, "module skipped"),
            }
        }
        wired
    }

    /// Drops every subscription of `module`. Its init flag stays set.
    pub fn teardown(&mut self, module: ModuleKey) -> usize {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|sub| sub.module != module);
        before - self.subscriptions.len()
    }

    pub fn dispatch(&mut self, event: Event) -> Dispatch {
        if let Event::Input { form, field, value } = &event
            && let Some(target) = self.document.field_mut(form, field)
        {
            target.set_value(value.clone());
        }

        let kind = event.kind();
        let target = event.target();
        let mut result = Dispatch::Unhandled;
        for idx in 0..self.subscriptions.len() {
            let sub = &self.subscriptions[idx];
            if sub.event != kind || !sub.target.matches(&target) {
                continue;
            }
            result = self.run_handler(idx, &event);
        }
        result
    }

    fn run_handler(&mut self, idx: usize, event: &Event) -> Dispatch {
        let Self {
            ctx,
            document,
            subscriptions,
            ..
        } = self;
        match (&mut subscriptions[idx].handler, event) {
            (Handler::Validate, Event::Blur { form, field }) => {
                let engine = Engine::new(&ctx.validators, &ctx.catalog, ctx.config.timing.shake());
                match document.field_mut(form, field) {
                    Some(target) => {
                        Dispatch::Validated(engine.validate(form, target, &mut ctx.scheduler))
                    }
                    None => Dispatch::Unhandled,
                }
            }
            (Handler::DebouncedRevalidate(debouncer), Event::Input { form, field, .. }) => {
                debouncer.call(
                    &mut ctx.scheduler,
                    Task::Revalidate {
                        form: form.clone(),
                        field: field.clone(),
                    },
                );
                Dispatch::Handled
            }
            (Handler::Submit, Event::Submit { form }) => match document.form_mut(form) {
                Some(target) => Dispatch::Submit(submit::begin_submit(ctx, target)),
                None => Dispatch::Unhandled,
            },
            (Handler::DismissToast, Event::CloseToast(id)) => {
                ctx.toasts.dismiss(*id, &mut ctx.scheduler);
                Dispatch::Handled
            }
            (Handler::ElevateHeader(throttle), Event::Scroll { y }) => {
                let threshold = ctx.config.header.elevate_after_px;
                if let Some(header) = document.header.as_mut() {
                    throttle.call(ctx.scheduler.now(), || {
                        header.scroll_y = *y;
                        header.elevated = *y > threshold;
                    });
                }
                Dispatch::Handled
            }
            _ => Dispatch::Unhandled,
        }
    }

    /// Settles the outstanding request of `form_id` with the transport's result.
    pub fn complete_submission(
        &mut self,
        form_id: &str,
        result: Result<SubmitResponse, TransportError>,
    ) -> Option<SubmissionOutcome> {
        let form = self.document.form_mut(form_id)?;
        submit::complete_submit(&mut self.ctx, form, result)
    }

    /// Fires a submit on `form_id` and, when it is ready, performs the exchange.
    ///
    /// Returns `None` when nothing was attempted: the form is not wired, has no submit
    /// control, or already has a request in flight.
    pub async fn submit(
        &mut self,
        form_id: &str,
        transport: &dyn SubmitTransport,
    ) -> Option<SubmissionOutcome> {
        let Dispatch::Submit(start) = self.dispatch(Event::Submit {
            form: form_id.to_string(),
        }) else {
            return None;
        };
        match start {
            SubmitStart::Ready(request) => {
                let result = transport.send(&request).await;
                self.complete_submission(form_id, result)
            }
            SubmitStart::Invalid { fields } => {
                Some(SubmissionOutcome::Failure(FailureCause::Validation { fields }))
            }
            SubmitStart::Busy | SubmitStart::NoControl => None,
        }
    }

    /// Advances virtual time, running every task that comes due on the way.
    pub fn advance(&mut self, by: Duration) -> usize {
        let until = self.ctx.scheduler.now() + by;
        let mut ran = 0;
        while let Some(task) = self.ctx.scheduler.pop_due(until) {
            self.run_task(task);
            ran += 1;
        }
        self.ctx.scheduler.jump_to(until);
        ran
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::Revalidate { form, field } => {
                let ctx = &mut self.ctx;
                let engine = Engine::new(&ctx.validators, &ctx.catalog, ctx.config.timing.shake());
                if let Some(target) = self.document.field_mut(&form, &field)
                    && target.validity == Validity::Invalid
                {
                    engine.validate(&form, target, &mut ctx.scheduler);
                }
            }
            Task::ClearAnimation { form, field } => {
                if let Some(target) = self.document.field_mut(&form, &field) {
                    target.animation = None;
                    target.animation_timer = None;
                }
            }
            Task::FocusField { form, field } => {
                if self.document.field_mut(&form, &field).is_some() {
                    self.document.focused = Some(ElementRef::field(form, field));
                }
            }
            Task::ToastExpire(id) => self.ctx.toasts.expire(id, &mut self.ctx.scheduler),
            Task::ToastRemove(id) => {
                self.ctx.toasts.remove(id);
            }
        }
    }
}
