// MIT License - Copyright (c) 2026 Peter Wright
// Christie TruLife+ protocol constants

use std::time::Duration;

/// TCP port the projector listens on for TruLife+ serial commands.
pub const DEFAULT_PORT: u16 = 3002;

/// Maximum number of bytes read for a single response.
pub const DEFAULT_RESPONSE_LENGTH: usize = 48;

/// Receive timeout applied to every transaction.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Upper bound on TCP connection establishment, per resolved address.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Text shown to console users when a transaction times out.
pub const NOT_RESPONDING: &str = "Projector is not responding";

/// Mnemonics used by the modeled commands.
pub const MNEMONIC_STATUS: &str = "SST";
pub const MNEMONIC_POWER: &str = "PWR";
pub const MNEMONIC_SHUTTER: &str = "SHU";

/// Lower-cased response patterns.
///
/// The power pattern keeps its double quotes: the projector reports
/// `"On"` quoted, and a bare `on` also matches words like `connected`.
pub const PATTERN_POWER_ON: &str = "\"on\"";
pub const PATTERN_POWER_STANDBY: &str = "standby";
pub const PATTERN_SHUTTER_CLOSED: &str = "closed";
pub const PATTERN_SHUTTER_OPEN: &str = "open";
