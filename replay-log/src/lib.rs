//! Logging facade for the replay tools.
//!
//! # Setup
//!
//! To enable logging, invoke the [`init`] function with a [`LogConfig`]. The
//! configuration implements `serde` traits, so it can be obtained from
//! configuration files or command line flags.
//!
//! # Logging
//!
//! The basic use of the log crate is through the five logging macros: [`error!`],
//! [`warn!`], [`info!`], [`debug!`] and [`trace!`] where `error!` represents the
//! highest-priority log messages and `trace!` the lowest. Log messages should
//! start lowercase and end without punctuation. Choose the log level according
//! to these rules:
//!
//! - [`error!`] for bugs and invalid behavior.
//! - [`warn!`] for undesirable behavior.
//! - [`info!`] for messages relevant to the average user.
//! - [`debug!`] for messages usually relevant to debugging.
//! - [`trace!`] for full auxiliary information.
//!
//! # Testing
//!
//! For unit testing, there is a separate initialization macro [`init_test!`]
//! that should be called at the beginning of the test method. It enables test
//! mode of the logger and customizes log levels for the current crate.
//!
//! ```ignore
//! #[test]
//! fn test_something() {
//!     replay_log::init_test!();
//! }
//! ```

#![warn(missing_docs)]

mod setup;
pub use setup::*;

mod utils;
pub use utils::*;

#[cfg(feature = "test")]
mod test;
#[cfg(feature = "test")]
pub use test::*;

// Expose the minimal log facade.
#[doc(inline)]
pub use log::{debug, error, info, log, trace, warn};
