// MIT License - Copyright (c) 2026 Peter Wright

use tracing::{debug, warn};

use crate::config::ProjectorConfig;
use crate::error::Result;
use crate::protocol::{parse_power_arg, parse_shutter_arg, Command, PowerState, ShutterState};
use crate::transport::{DirectTcpTransport, Response, Transport};

/// High-level interface to a Christie TruLife+ projector.
///
/// Holds no device state: every call is one fresh transaction (two for
/// [`set_power_state`](Self::set_power_state)), and nothing is cached
/// between calls.
///
/// # Example
///
/// ```no_run
/// use christie_lan_control::{ChristieProjector, PowerState, ProjectorConfig};
///
/// fn main() -> anyhow::Result<()> {
///     let config = ProjectorConfig::builder().host("192.168.1.128").build();
///     let projector = ChristieProjector::new(config);
///
///     if projector.get_power_state()? != PowerState::On {
///         projector.set_power_state(true)?;
///     }
///     projector.set_shutter_state(false)?;
///     println!("{}", projector.get_status()?);
///     Ok(())
/// }
/// ```
pub struct ChristieProjector<T: Transport = DirectTcpTransport> {
    transport: T,
    response_length: usize,
}

impl ChristieProjector<DirectTcpTransport> {
    /// Create a client that talks to the projector over TCP.
    pub fn new(config: ProjectorConfig) -> Self {
        debug!("Projector client for {}", config.endpoint());
        Self::with_transport(DirectTcpTransport::new(&config), config.response_length)
    }
}

impl<T: Transport> ChristieProjector<T> {
    /// Create a client over any transport, with the given query response length.
    pub fn with_transport(transport: T, response_length: usize) -> Self {
        Self {
            transport,
            response_length,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a command and return the raw reply.
    pub fn send(&self, command: &Command) -> Result<Response> {
        let wire = command.to_wire_string();
        let max_len = command.response_length(self.response_length);
        debug!("Transaction: {} (max {} bytes)", wire, max_len);
        self.transport.transact(&wire, max_len)
    }

    /// Send an arbitrary command string with the configured response length.
    pub fn raw(&self, command: &str) -> Result<Response> {
        self.send(&Command::Raw(command.to_string()))
    }

    /// Send an arbitrary command string, reading at most `max_response_bytes`.
    ///
    /// Pass 0 for commands known to produce no reply.
    pub fn raw_with_len(&self, command: &str, max_response_bytes: usize) -> Result<Response> {
        debug!("Transaction: {} (max {} bytes)", command, max_response_bytes);
        self.transport.transact(command, max_response_bytes)
    }

    /// `(SST?)`: the status text, verbatim.
    pub fn get_status(&self) -> Result<Response> {
        self.send(&Command::Status)
    }

    /// `(PWR?)`: whether the projector is on or in standby.
    pub fn get_power_state(&self) -> Result<PowerState> {
        let response = self.send(&Command::QueryPower)?;
        let state = PowerState::from_response(&response);
        if state == PowerState::Unknown && !response.is_no_response() {
            warn!("Unrecognized power state response: {}", response);
        }
        Ok(state)
    }

    /// `(PWR 1)` / `(PWR 0)`, then re-query the power state.
    ///
    /// The reply to the set command is discarded; the returned state comes
    /// from a separate `(PWR?)` transaction.
    pub fn set_power_state(&self, on: bool) -> Result<PowerState> {
        let ack = self.send(&Command::SetPower { on })?;
        debug!("Power set response discarded: {:?}", ack);
        self.get_power_state()
    }

    /// Like [`set_power_state`](Self::set_power_state), parsing a textual
    /// argument first. Nothing is sent if the argument is not a boolean.
    pub fn set_power_state_str(&self, value: &str) -> Result<PowerState> {
        let on = parse_power_arg(value)?;
        self.set_power_state(on)
    }

    /// `(SHU?)`: whether the shutter is closed or open.
    pub fn get_shutter_state(&self) -> Result<ShutterState> {
        let response = self.send(&Command::QueryShutter)?;
        let state = ShutterState::from_response(&response);
        if state == ShutterState::Unknown && !response.is_no_response() {
            warn!("Unrecognized shutter state response: {}", response);
        }
        Ok(state)
    }

    /// `(SHU 1)` closes, `(SHU 0)` opens.
    ///
    /// No reply is read and no confirmation query follows, so this normally
    /// returns [`Response::NoResponse`].
    pub fn set_shutter_state(&self, closed: bool) -> Result<Response> {
        self.send(&Command::SetShutter { closed })
    }

    /// Like [`set_shutter_state`](Self::set_shutter_state), parsing a textual
    /// argument first. Nothing is sent if the argument is not a boolean.
    pub fn set_shutter_state_str(&self, value: &str) -> Result<Response> {
        let closed = parse_shutter_arg(value)?;
        self.set_shutter_state(closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProjectorError;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Records every transaction and replays canned responses.
    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<(String, usize)>>,
        replies: Mutex<VecDeque<Response>>,
    }

    impl RecordingTransport {
        fn with_replies(replies: &[&str]) -> Self {
            let transport = Self::default();
            for reply in replies {
                transport.push_reply(Response::Text(reply.to_string()));
            }
            transport
        }

        fn push_reply(&self, response: Response) {
            self.replies.lock().unwrap().push_back(response);
        }

        fn sent(&self) -> Vec<(String, usize)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Transport for RecordingTransport {
        fn transact(&self, command: &str, max_response_bytes: usize) -> Result<Response> {
            self.sent
                .lock()
                .unwrap()
                .push((command.to_string(), max_response_bytes));
            if max_response_bytes == 0 {
                return Ok(Response::NoResponse);
            }
            Ok(self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Response::NoResponse))
        }
    }

    fn projector(replies: &[&str]) -> ChristieProjector<RecordingTransport> {
        ChristieProjector::with_transport(RecordingTransport::with_replies(replies), 48)
    }

    #[test]
    fn test_get_status_is_verbatim() {
        let p = projector(&["(SST? ) -> \"On\", \"Open\""]);
        assert_eq!(
            p.get_status().unwrap(),
            Response::Text("(SST? ) -> \"On\", \"Open\"".to_string())
        );
        assert_eq!(p.transport().sent(), vec![("(SST?)".to_string(), 48)]);
    }

    #[test]
    fn test_get_power_state() {
        assert_eq!(projector(&["(PWR!001 \"On\")"]).get_power_state().unwrap(), PowerState::On);
        assert_eq!(
            projector(&["(PWR!000 \"Standby\")"]).get_power_state().unwrap(),
            PowerState::Standby
        );
        assert_eq!(projector(&["#$%^"]).get_power_state().unwrap(), PowerState::Unknown);
        assert_eq!(projector(&[]).get_power_state().unwrap(), PowerState::Unknown);
    }

    #[test]
    fn test_set_power_state_confirms_with_query() {
        for on in [true, false] {
            let reply = if on { "\"On\"" } else { "\"Standby\"" };
            let p = projector(&["ignored", reply]);
            let state = p.set_power_state(on).unwrap();
            assert_eq!(state.as_bool(), Some(on));

            let token = if on { "(PWR 1)" } else { "(PWR 0)" };
            assert_eq!(
                p.transport().sent(),
                vec![(token.to_string(), 48), ("(PWR?)".to_string(), 48)]
            );
        }
    }

    #[test]
    fn test_set_power_state_unconfirmed() {
        // The set reply says "On" but the confirmation query times out.
        let p = projector(&["\"On\""]);
        assert_eq!(p.set_power_state(true).unwrap(), PowerState::Unknown);
    }

    #[test]
    fn test_get_shutter_state() {
        assert_eq!(
            projector(&["(SHU!001 \"Closed\")"]).get_shutter_state().unwrap(),
            ShutterState::Closed
        );
        assert_eq!(
            projector(&["(SHU!000 \"Open\")"]).get_shutter_state().unwrap(),
            ShutterState::Open
        );
        assert_eq!(projector(&["(SHU?)"]).get_shutter_state().unwrap(), ShutterState::Unknown);
    }

    #[test]
    fn test_set_shutter_state_no_confirmation() {
        for closed in [true, false] {
            let p = projector(&["\"Closed\""]);
            assert_eq!(p.set_shutter_state(closed).unwrap(), Response::NoResponse);

            let token = if closed { "(SHU 1)" } else { "(SHU 0)" };
            assert_eq!(p.transport().sent(), vec![(token.to_string(), 0)]);
        }
    }

    #[test]
    fn test_invalid_argument_sends_nothing() {
        let p = projector(&["\"On\""]);
        for bad in ["maybe", "", "null", "2"] {
            assert!(matches!(
                p.set_power_state_str(bad),
                Err(ProjectorError::InvalidArgument { .. })
            ));
            assert!(matches!(
                p.set_shutter_state_str(bad),
                Err(ProjectorError::InvalidArgument { .. })
            ));
        }
        assert!(p.transport().sent().is_empty());
    }

    #[test]
    fn test_textual_setters() {
        let p = projector(&["", "\"On\""]);
        assert_eq!(p.set_power_state_str("on").unwrap(), PowerState::On);
        p.set_shutter_state_str("open").unwrap();
        assert_eq!(
            p.transport().sent(),
            vec![
                ("(PWR 1)".to_string(), 48),
                ("(PWR?)".to_string(), 48),
                ("(SHU 0)".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_raw_commands() {
        let p = projector(&["(LMP!12345)"]);
        assert_eq!(p.raw("(LMP?)").unwrap().text(), Some("(LMP!12345)"));
        assert_eq!(p.raw_with_len("(SHU 1)", 0).unwrap(), Response::NoResponse);
        assert_eq!(
            p.transport().sent(),
            vec![("(LMP?)".to_string(), 48), ("(SHU 1)".to_string(), 0)]
        );
    }

    #[test]
    fn test_transport_errors_propagate() {
        struct Unreachable;
        impl Transport for Unreachable {
            fn transact(&self, _command: &str, _max: usize) -> Result<Response> {
                Err(ProjectorError::Connection {
                    address: "10.0.0.9:3002".to_string(),
                    source: std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
                })
            }
        }

        let p = ChristieProjector::with_transport(Unreachable, 48);
        assert!(matches!(p.get_power_state(), Err(ProjectorError::Connection { .. })));
        assert!(matches!(p.set_shutter_state(true), Err(ProjectorError::Connection { .. })));
    }
}
