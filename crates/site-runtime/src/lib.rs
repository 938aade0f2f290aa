//! Headless runtime for the site's contact and application forms.
//!
//! Pages are modelled as a [`Document`]; feature modules wire subscriptions onto it once,
//! events are dispatched through [`App`], and deferred work runs on a virtual clock.

pub mod app;
pub mod config;
pub mod document;
pub mod engine;
pub mod logging;
pub mod modules;
pub mod rate_limit;
pub mod registry;
pub mod scheduler;
pub mod submit;
pub mod toast;
pub mod transport;

pub use app::{
    App, AppContext, Dispatch, Event, EventKind, Handler, Module, SetupError, Subscription,
};
pub use config::{ConfigError, SiteConfig, TimingConfig};
pub use document::{Document, Field, Form, Header, SubmitControl};
pub use engine::Engine;
pub use logging::{LoggingError, init_tracing};
pub use modules::{FormsModule, HeaderModule, default_modules};
pub use rate_limit::{Debouncer, Throttle};
pub use registry::{InitRegistry, ModuleKey};
pub use scheduler::{Scheduler, Task, TimerId};
pub use submit::{FailureCause, SubmissionOutcome, SubmissionRequest, SubmitPhase, SubmitStart};
pub use toast::{Severity, Toast, ToastId, ToastPhase, ToastQueue};
pub use transport::{HttpTransport, SubmitResponse, SubmitTransport, TransportError};
