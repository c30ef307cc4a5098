//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `crudgen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateRenderer`: Template rendering
//!   - `ProcessRunner`: External generator invocation
//!   - `ChangeSource`: Filesystem change subscriptions
//!   - `WatchReporter`: Watch-session progress output
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    ChangeEvent, ChangeSource, Filesystem, ProcessOutput, ProcessRunner, SilentReporter,
    Subscription, SubscriptionRequest, TemplateRenderer, WatchChannel, WatchReporter,
};
