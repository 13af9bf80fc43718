pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use app::session::{BookView, Command, Response, Session};
pub use config::DeskConfig;
pub use crate::core::library::{Library, DEFAULT_LOAN_PERIOD_DAYS};
pub use crate::core::{Book, Clock, Loan, ManualClock, Member, SystemClock};
pub use utils::error::{DeskError, Result};
