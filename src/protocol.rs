// MIT License - Copyright (c) 2026 Peter Wright

use std::fmt;

use crate::constants::{
    MNEMONIC_POWER, MNEMONIC_SHUTTER, MNEMONIC_STATUS, PATTERN_POWER_ON, PATTERN_POWER_STANDBY,
    PATTERN_SHUTTER_CLOSED, PATTERN_SHUTTER_OPEN,
};
use crate::error::{ProjectorError, Result};
use crate::transport::Response;

/// Commands that can be sent to the projector.
///
/// Requests are plain text in the TruLife+ serial syntax, `(MNEMONIC?)` for
/// queries and `(MNEMONIC ARG)` for settings, with no trailing newline.
/// Responses are free-form text without framing, read in a single chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `(SST?)` — System status. The reply is returned verbatim.
    Status,
    /// `(PWR?)` — Query power state.
    QueryPower,
    /// `(PWR <0|1>)` — Power on (1) or to standby (0).
    /// The reply is not reliable, so the state is re-queried afterwards.
    SetPower { on: bool },
    /// `(SHU?)` — Query shutter state.
    QueryShutter,
    /// `(SHU <1|0>)` — Close (1) or open (0) the shutter.
    /// The projector acknowledges with no payload.
    SetShutter { closed: bool },
    /// Raw command string (for any unlisted commands).
    Raw(String),
}

impl Command {
    /// Convert the command to its wire string representation.
    pub fn to_wire_string(&self) -> String {
        match self {
            Command::Status => format!("({}?)", MNEMONIC_STATUS),
            Command::QueryPower => format!("({}?)", MNEMONIC_POWER),
            Command::SetPower { on } => format!("({} {})", MNEMONIC_POWER, switch_token(*on)),
            Command::QueryShutter => format!("({}?)", MNEMONIC_SHUTTER),
            Command::SetShutter { closed } => {
                format!("({} {})", MNEMONIC_SHUTTER, switch_token(*closed))
            }
            Command::Raw(s) => s.clone(),
        }
    }

    /// Number of response bytes to wait for, given the configured default.
    ///
    /// Shutter settings never produce a reply, so nothing is read for them.
    pub fn response_length(&self, default: usize) -> usize {
        match self {
            Command::SetShutter { .. } => 0,
            _ => default,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire_string())
    }
}

fn switch_token(value: bool) -> char {
    if value {
        '1'
    } else {
        '0'
    }
}

/// Projector power state as reported by `(PWR?)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    On,
    Standby,
    /// The reply matched no known pattern, or there was no reply.
    Unknown,
}

impl PowerState {
    pub fn from_response(response: &Response) -> Self {
        match response.text() {
            Some(text) => classify_power(text),
            None => PowerState::Unknown,
        }
    }

    /// `Some(true)` when on, `Some(false)` in standby, `None` when unknown.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            PowerState::On => Some(true),
            PowerState::Standby => Some(false),
            PowerState::Unknown => None,
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PowerState::On => "on",
            PowerState::Standby => "standby",
            PowerState::Unknown => "unknown",
        })
    }
}

/// Shutter state as reported by `(SHU?)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutterState {
    Closed,
    Open,
    /// The reply matched no known pattern, or there was no reply.
    Unknown,
}

impl ShutterState {
    pub fn from_response(response: &Response) -> Self {
        match response.text() {
            Some(text) => classify_shutter(text),
            None => ShutterState::Unknown,
        }
    }

    /// `Some(true)` when closed, `Some(false)` when open, `None` when unknown.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            ShutterState::Closed => Some(true),
            ShutterState::Open => Some(false),
            ShutterState::Unknown => None,
        }
    }
}

impl fmt::Display for ShutterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShutterState::Closed => "closed",
            ShutterState::Open => "open",
            ShutterState::Unknown => "unknown",
        })
    }
}

/// Classify a `(PWR?)` reply.
///
/// Matching is case-insensitive. A quoted `"on"` wins over `standby` when
/// both are present.
pub fn classify_power(text: &str) -> PowerState {
    let lower = text.to_lowercase();
    if lower.contains(PATTERN_POWER_ON) {
        PowerState::On
    } else if lower.contains(PATTERN_POWER_STANDBY) {
        PowerState::Standby
    } else {
        PowerState::Unknown
    }
}

/// Classify a `(SHU?)` reply.
///
/// Matching is case-insensitive. `closed` wins over `open` when both are
/// present.
pub fn classify_shutter(text: &str) -> ShutterState {
    let lower = text.to_lowercase();
    if lower.contains(PATTERN_SHUTTER_CLOSED) {
        ShutterState::Closed
    } else if lower.contains(PATTERN_SHUTTER_OPEN) {
        ShutterState::Open
    } else {
        ShutterState::Unknown
    }
}

/// Parse a textual boolean (`true`/`false`, `1`/`0`, `yes`/`no`).
pub fn parse_switch(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ProjectorError::InvalidArgument {
            value: value.to_string(),
        }),
    }
}

/// Parse a power argument: `on`, `off`/`standby`, or any [`parse_switch`] value.
pub fn parse_power_arg(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "on" => Ok(true),
        "off" | "standby" => Ok(false),
        _ => parse_switch(value),
    }
}

/// Parse a shutter argument: `close`/`closed`, `open`, or any [`parse_switch`] value.
pub fn parse_shutter_arg(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "close" | "closed" => Ok(true),
        "open" => Ok(false),
        _ => parse_switch(value),
    }
}
