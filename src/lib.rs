// MIT License - Copyright (c) 2026 Peter Wright
//
//! # christie-lan-control
//!
//! TCP/IP control of Christie projectors (Eclipse, M RGB and Griffyn series)
//! through the TruLife+ serial command protocol on port 3002.
//!
//! Every operation is one self-contained transaction: connect, send a
//! parenthesized command such as `(PWR?)`, read a single reply of at most
//! 48 bytes within a one second timeout, disconnect. A projector that stays
//! silent yields [`Response::NoResponse`] rather than an error, and replies
//! that match no known pattern classify as `Unknown`.
//!
//! Only status, power and shutter are modeled; [`ChristieProjector::raw`]
//! sends any other command from the vendor reference.
//!
//! ## Quick Start
//!
//! ```no_run
//! use christie_lan_control::{ChristieProjector, ProjectorConfig, ShutterState};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ProjectorConfig::builder()
//!         .host("192.168.1.128")
//!         .timeout_ms(1000)
//!         .build();
//!
//!     let projector = ChristieProjector::new(config);
//!     let power = projector.set_power_state(true)?;
//!     println!("Power: {}", power);
//!
//!     if projector.get_shutter_state()? == ShutterState::Closed {
//!         projector.set_shutter_state(false)?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod projector;
pub mod protocol;
pub mod transport;

// Re-exports for convenience
pub use config::{Endpoint, ProjectorConfig, ProjectorConfigBuilder};
pub use error::{ProjectorError, Result};
pub use projector::ChristieProjector;
pub use protocol::{classify_power, classify_shutter, Command, PowerState, ShutterState};
pub use transport::{Connection, DirectTcpTransport, Response, Transport};
