//! Setup for the main transfer manager application.
//!
//! The [`setup`](bootstrap::app::setup) only builds the application and its
//! dependencies, but it does not start the application. The application is
//! started by the [`start`](crate::app::start) function.
//!
//! - [`app`]: loads the configuration, creates the storage directories and
//!   builds the [`Manager`](crate::core::Manager).
//! - [`config`]: the configuration sources.
//! - [`logging`]: the `tracing` subscriber.
//! - [`jobs`]: the long running tasks the application starts.
pub mod app;
pub mod config;
pub mod jobs;
pub mod logging;
