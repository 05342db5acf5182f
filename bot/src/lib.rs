//! Homework status bot: the process around `homework-core`.
//!
//! # Overview
//! Loads configuration from the environment, executes the core's HTTP
//! requests with a blocking `ureq` agent, and drives `Poller::tick` on a
//! fixed schedule until the operator interrupts it.

pub mod config;
pub mod runner;
pub mod source;
pub mod transport;

pub use config::{load_dotenv_from, startup_config, Config, ConfigError};
pub use runner::{poll_until, run};
pub use source::{PracticumSource, TelegramTransport};
