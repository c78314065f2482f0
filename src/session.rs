// Copyright 2025 Dustin McAfee
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The RFB session: handshake and message loop.
//!
//! [`VncSession::establish`] drives the RFB 3.8 handshake (protocol version,
//! security negotiation with optional VNC authentication, client and server
//! init) over an already-connected byte stream, then hands back a session.
//! The session is a synchronous request/response pump:
//! [`VncSession::wait_event`] pulls one client message at a time, and the
//! `send_*` operations push server messages, each buffered and flushed as a
//! single write to avoid fragmenting the transport.
//!
//! # Protocol Flow
//!
//! 1. **Handshake**: version exchange and security negotiation
//! 2. **Initialization**: `ClientInit` / `ServerInit` exchange
//! 3. **Normal operation**: client messages in, server pushes out
//!
//! # Concurrency
//!
//! One session owns one stream. Nothing here spawns tasks or takes locks;
//! every operation borrows the session mutably, so pulls and pushes are
//! serialized by the caller. A host that wants to push from another thread
//! must coordinate access to the session itself. Closing the stream is the
//! only way to cancel a blocked operation.

use bytes::{BufMut, BytesMut};
use log::{debug, error, info};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::auth::VncAuth;
use crate::error::{Result, RfbError};
use crate::events::ClientEvent;
use crate::pixel_format::{Colour, PixelFormat};
use crate::protocol::{
    Encoding, Key, ProtocolVersion, SecurityType, ServerInit, UpdateRectangle,
    CLIENT_MSG_CLIENT_CUT_TEXT, CLIENT_MSG_FRAMEBUFFER_UPDATE_REQUEST, CLIENT_MSG_KEY_EVENT,
    CLIENT_MSG_POINTER_EVENT, CLIENT_MSG_SET_ENCODINGS, CLIENT_MSG_SET_PIXEL_FORMAT,
    PROTOCOL_VERSION, SECURITY_RESULT_FAILED, SECURITY_RESULT_OK, SERVER_MSG_BELL,
    SERVER_MSG_FRAMEBUFFER_UPDATE, SERVER_MSG_SERVER_CUT_TEXT, SERVER_MSG_SET_COLOUR_MAP_ENTRIES,
};
use crate::wire;

/// Limit clipboard size to prevent memory exhaustion attacks.
const MAX_CUT_TEXT: usize = 10 * 1024 * 1024;

/// The security scheme the server offers during the handshake.
///
/// The server offers exactly one scheme; a client that selects anything
/// else fails the handshake.
#[derive(Debug, Clone)]
pub enum SecurityConfig {
    /// No authentication.
    None,
    /// VNC authentication: DES challenge/response under a shared password.
    VncAuth {
        /// The shared password. Only the first 8 bytes are significant.
        password: String,
    },
}

impl SecurityConfig {
    fn security_type(&self) -> SecurityType {
        match self {
            Self::None => SecurityType::None,
            Self::VncAuth { .. } => SecurityType::VncAuthentication,
        }
    }
}

/// Server-side configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Framebuffer width in pixels.
    pub width: u16,
    /// Framebuffer height in pixels.
    pub height: u16,
    /// Desktop name advertised in `ServerInit`.
    pub desktop_name: String,
    /// The server's native pixel format, advertised in `ServerInit`.
    pub pixel_format: PixelFormat,
    /// The security scheme to offer.
    pub security: SecurityConfig,
}

impl SessionConfig {
    /// Creates a configuration with the default pixel format
    /// ([`PixelFormat::bgrx8888`]) and no authentication.
    #[must_use]
    pub fn new(width: u16, height: u16, desktop_name: impl Into<String>) -> Self {
        Self {
            width,
            height,
            desktop_name: desktop_name.into(),
            pixel_format: PixelFormat::bgrx8888(),
            security: SecurityConfig::None,
        }
    }
}

/// A single RFB session over an established byte stream.
///
/// Created by [`VncSession::establish`]; released with the underlying
/// stream via [`VncSession::into_inner`] or by dropping it. After any error
/// the stream state is undefined and the session must be discarded.
pub struct VncSession<S> {
    /// The underlying bidirectional byte stream.
    stream: S,
    /// The protocol version the client reported. Informational only: the
    /// server always speaks RFB 3.8.
    protocol_version: ProtocolVersion,
    /// Whether the client asked to share the desktop with other viewers.
    shared_connection: bool,
    /// The pixel format currently in effect for this client.
    pixel_format: PixelFormat,
    /// Scratch buffer for variable-length message payloads. Grows to the
    /// largest payload seen; event payloads are split off so they stay
    /// valid across calls.
    scratch: BytesMut,
}

impl<S> VncSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Performs the server side of the RFB 3.8 handshake and returns the
    /// established session.
    ///
    /// The sequence is fixed: the server writes its version literal, reads
    /// the client's, offers the single configured security type, runs the
    /// authentication sub-dialog if VNC authentication is configured,
    /// writes the security result, reads `ClientInit` and writes
    /// `ServerInit`.
    ///
    /// The server commits to RFB 3.8 regardless of the version the client
    /// reports; the parsed version is only surfaced through
    /// [`protocol_version`](Self::protocol_version).
    ///
    /// # Errors
    ///
    /// * [`RfbError::ProtocolMismatch`] - malformed client version literal,
    ///   or the client selected a security type that was not offered.
    /// * [`RfbError::AuthenticationFailed`] - the VNC authentication
    ///   response did not match the challenge.
    /// * [`RfbError::UnexpectedEnd`] / [`RfbError::Io`] - transport failure.
    ///
    /// On any error the handshake aborts before a session exists, so
    /// callers never observe a half-initialized session.
    pub async fn establish(mut stream: S, config: &SessionConfig) -> Result<Self> {
        // Protocol version exchange.
        stream.write_all(PROTOCOL_VERSION.as_bytes()).await?;
        stream.flush().await?;

        let mut version_buf = [0u8; 12];
        wire::read_exact(&mut stream, &mut version_buf).await?;
        let protocol_version = ProtocolVersion::parse(&version_buf)?;
        debug!("client reports protocol version {protocol_version}");

        // Security negotiation: one offered type.
        let offered = config.security.security_type();
        stream.write_all(&[1, offered as u8]).await?;
        stream.flush().await?;

        let selected = wire::read_u8(&mut stream).await?;
        if selected != offered as u8 {
            write_security_failure(&mut stream, "security type not offered").await?;
            return Err(RfbError::ProtocolMismatch(format!(
                "client selected security type {selected}, offered {}",
                offered as u8
            )));
        }

        // Authentication sub-dialog.
        if let SecurityConfig::VncAuth { ref password } = config.security {
            let auth = VncAuth::new(Some(password.clone()));
            let challenge = auth.generate_challenge();
            stream.write_all(&challenge).await?;
            stream.flush().await?;

            let mut response = [0u8; 16];
            wire::read_exact(&mut stream, &mut response).await?;

            if !auth.verify_response(&response, &challenge) {
                error!("VNC authentication failed");
                write_security_failure(&mut stream, "authentication failed").await?;
                return Err(RfbError::AuthenticationFailed);
            }
        }

        let mut ok = BytesMut::with_capacity(4);
        ok.put_u32(SECURITY_RESULT_OK);
        stream.write_all(&ok).await?;
        stream.flush().await?;

        // ClientInit: the shared-desktop flag.
        let shared_connection = wire::read_u8(&mut stream).await? != 0;

        // ServerInit.
        let server_init = ServerInit {
            framebuffer_width: config.width,
            framebuffer_height: config.height,
            pixel_format: config.pixel_format.clone(),
            name: config.desktop_name.clone(),
        };
        let mut init_buf = BytesMut::new();
        server_init.write_to(&mut init_buf)?;
        stream.write_all(&init_buf).await?;
        stream.flush().await?;

        info!("VNC handshake completed (shared={shared_connection})");

        Ok(Self {
            stream,
            protocol_version,
            shared_connection,
            pixel_format: config.pixel_format.clone(),
            scratch: BytesMut::new(),
        })
    }
}

impl<S> VncSession<S>
where
    S: AsyncRead + Unpin,
{
    /// Waits for the next client message and returns it as an event.
    ///
    /// Returns `Ok(None)` when the stream reaches end-of-file at a message
    /// boundary; end-of-file in the middle of a message is
    /// [`RfbError::UnexpectedEnd`]. An unknown message type is a
    /// [`RfbError::ProtocolViolation`].
    ///
    /// `SetPixelFormat` replaces the session's current pixel format as a
    /// side effect before the event is returned.
    pub async fn wait_event(&mut self) -> Result<Option<ClientEvent>> {
        let mut first = [0u8; 1];
        if self.stream.read(&mut first).await? == 0 {
            debug!("client closed the connection");
            return Ok(None);
        }

        let event = match first[0] {
            CLIENT_MSG_SET_PIXEL_FORMAT => {
                wire::skip_padding(&mut self.stream, 3).await?;
                let mut format_buf = [0u8; 16];
                wire::read_exact(&mut self.stream, &mut format_buf).await?;
                let format = PixelFormat::from_bytes(&format_buf);

                if !format.is_valid() {
                    error!(
                        "client requested invalid pixel format (bpp={}, depth={}, truecolour={}, shifts=R{},G{},B{})",
                        format.bits_per_pixel,
                        format.depth,
                        format.true_colour_flag,
                        format.red_shift,
                        format.green_shift,
                        format.blue_shift
                    );
                    return Err(RfbError::ProtocolViolation(
                        "invalid pixel format requested".to_string(),
                    ));
                }

                self.pixel_format = format.clone();
                debug!(
                    "client set pixel format: {}bpp, depth={}, big_endian={}",
                    format.bits_per_pixel, format.depth, format.big_endian_flag
                );
                ClientEvent::SetPixelFormat(format)
            }
            CLIENT_MSG_SET_ENCODINGS => {
                wire::skip_padding(&mut self.stream, 1).await?;
                let count = wire::read_u16(&mut self.stream).await?;
                let mut encodings = Vec::with_capacity(usize::from(count));
                for _ in 0..count {
                    encodings.push(Encoding::new(wire::read_i32(&mut self.stream).await?));
                }
                debug!("client set {count} encodings");
                ClientEvent::SetEncodings(encodings)
            }
            CLIENT_MSG_FRAMEBUFFER_UPDATE_REQUEST => {
                let incremental = wire::read_u8(&mut self.stream).await? != 0;
                let x = wire::read_u16(&mut self.stream).await?;
                let y = wire::read_u16(&mut self.stream).await?;
                let width = wire::read_u16(&mut self.stream).await?;
                let height = wire::read_u16(&mut self.stream).await?;
                ClientEvent::FramebufferUpdateRequest {
                    incremental,
                    x,
                    y,
                    width,
                    height,
                }
            }
            CLIENT_MSG_KEY_EVENT => {
                let down = wire::read_u8(&mut self.stream).await? != 0;
                wire::skip_padding(&mut self.stream, 2).await?;
                let key = Key::new(wire::read_u32(&mut self.stream).await?);
                ClientEvent::KeyEvent { key, down }
            }
            CLIENT_MSG_POINTER_EVENT => {
                let button_mask = wire::read_u8(&mut self.stream).await?;
                let x = wire::read_u16(&mut self.stream).await?;
                let y = wire::read_u16(&mut self.stream).await?;
                ClientEvent::PointerEvent { x, y, button_mask }
            }
            CLIENT_MSG_CLIENT_CUT_TEXT => {
                wire::skip_padding(&mut self.stream, 3).await?;
                let length = wire::read_u32(&mut self.stream).await? as usize;
                if length > MAX_CUT_TEXT {
                    error!("cut text too large: {length} bytes (max {MAX_CUT_TEXT})");
                    return Err(RfbError::ProtocolViolation(format!(
                        "cut text of {length} bytes exceeds the {MAX_CUT_TEXT} byte limit"
                    )));
                }
                self.scratch.resize(length, 0);
                wire::read_exact(&mut self.stream, &mut self.scratch[..]).await?;
                ClientEvent::ClientCutText(self.scratch.split().freeze())
            }
            unknown => {
                error!("unknown client message type {unknown}");
                return Err(RfbError::ProtocolViolation(format!(
                    "unknown client message type {unknown}"
                )));
            }
        };
        Ok(Some(event))
    }
}

impl<S> VncSession<S>
where
    S: AsyncWrite + Unpin,
{
    /// Sends a `FramebufferUpdate` carrying the given rectangles.
    ///
    /// Each rectangle's payload is written verbatim; the caller is
    /// responsible for having encoded it to match its encoding tag. The
    /// whole message is assembled in one buffer and flushed as a single
    /// write to minimize transport segmentation.
    ///
    /// # Errors
    ///
    /// Returns [`RfbError::Overflow`] if more than `u16::MAX` rectangles
    /// are supplied.
    pub async fn send_framebuffer_update(&mut self, rectangles: &[UpdateRectangle]) -> Result<()> {
        let count = u16::try_from(rectangles.len())
            .map_err(|_| RfbError::Overflow("rectangle count"))?;

        let payload: usize = rectangles.iter().map(|r| 12 + r.data.len()).sum();
        let mut buf = BytesMut::with_capacity(4 + payload);
        buf.put_u8(SERVER_MSG_FRAMEBUFFER_UPDATE);
        buf.put_u8(0); // padding
        buf.put_u16(count);
        for rectangle in rectangles {
            rectangle.write_to(&mut buf);
        }

        self.stream.write_all(&buf).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Sends a `SetColourMapEntries` message.
    ///
    /// Channels are clamped to `[0.0, 1.0]` and scaled to 16 bits.
    ///
    /// # Errors
    ///
    /// Returns [`RfbError::Overflow`] if more than `u16::MAX` colours are
    /// supplied.
    pub async fn send_set_colour_map_entries(
        &mut self,
        first_colour: u16,
        colours: &[Colour],
    ) -> Result<()> {
        let count =
            u16::try_from(colours.len()).map_err(|_| RfbError::Overflow("colour count"))?;

        let mut buf = BytesMut::with_capacity(6 + colours.len() * 6);
        buf.put_u8(SERVER_MSG_SET_COLOUR_MAP_ENTRIES);
        buf.put_u8(0); // padding
        buf.put_u16(first_colour);
        buf.put_u16(count);
        for colour in colours {
            for channel in colour.map_entry_channels() {
                buf.put_u16(channel);
            }
        }

        self.stream.write_all(&buf).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Rings the client's bell: a single message-type byte.
    pub async fn send_bell(&mut self) -> Result<()> {
        self.stream.write_all(&[SERVER_MSG_BELL]).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Sends clipboard bytes to the client. The protocol declares the text
    /// ISO-8859-1; it is written verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`RfbError::Overflow`] if the text does not fit the
    /// protocol's u32 length field.
    pub async fn send_server_cut_text(&mut self, text: &[u8]) -> Result<()> {
        let length =
            u32::try_from(text.len()).map_err(|_| RfbError::Overflow("cut text length"))?;

        let mut buf = BytesMut::with_capacity(8 + text.len());
        buf.put_u8(SERVER_MSG_SERVER_CUT_TEXT);
        buf.put_bytes(0, 3);
        buf.put_u32(length);
        buf.put_slice(text);

        self.stream.write_all(&buf).await?;
        self.stream.flush().await?;
        Ok(())
    }
}

impl<S> VncSession<S> {
    /// The protocol version the client reported during the handshake.
    #[must_use]
    pub fn protocol_version(&self) -> ProtocolVersion {
        self.protocol_version
    }

    /// Whether the client asked for a shared connection.
    #[must_use]
    pub fn shared_connection(&self) -> bool {
        self.shared_connection
    }

    /// The pixel format currently in effect for this client.
    #[must_use]
    pub fn pixel_format(&self) -> &PixelFormat {
        &self.pixel_format
    }

    /// Consumes the session and returns the underlying stream.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.stream
    }
}

/// Writes the failed security result word followed by the length-prefixed
/// UTF-8 reason string, as RFB 3.8 requires on the failure path.
async fn write_security_failure<S>(stream: &mut S, reason: &str) -> Result<()>
where
    S: AsyncWrite + Unpin,
{
    let mut buf = BytesMut::with_capacity(8 + reason.len());
    buf.put_u32(SECURITY_RESULT_FAILED);
    buf.put_u32(reason.len() as u32);
    buf.put_slice(reason.as_bytes());
    stream.write_all(&buf).await?;
    stream.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_over<S>(stream: S) -> VncSession<S> {
        VncSession {
            stream,
            protocol_version: ProtocolVersion { major: 3, minor: 8 },
            shared_connection: false,
            pixel_format: PixelFormat::bgrx8888(),
            scratch: BytesMut::new(),
        }
    }

    #[tokio::test]
    async fn key_event_dispatch() {
        let bytes: &[u8] = &[0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0xff, 0x0d];
        let mut session = session_over(bytes);
        match session.wait_event().await.unwrap() {
            Some(ClientEvent::KeyEvent { key, down }) => {
                assert_eq!(key, Key::RETURN);
                assert!(down);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn framebuffer_update_request_dispatch() {
        let bytes: &[u8] = &[0x03, 0x00, 0x00, 0x0a, 0x00, 0x14, 0x00, 0x80, 0x00, 0x60];
        let mut session = session_over(bytes);
        match session.wait_event().await.unwrap() {
            Some(ClientEvent::FramebufferUpdateRequest {
                incremental,
                x,
                y,
                width,
                height,
            }) => {
                assert!(!incremental);
                assert_eq!((x, y, width, height), (10, 20, 128, 96));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn pointer_event_dispatch() {
        let bytes: &[u8] = &[0x05, 0x07, 0x01, 0x00, 0x00, 0x50];
        let mut session = session_over(bytes);
        match session.wait_event().await.unwrap() {
            Some(ClientEvent::PointerEvent { x, y, button_mask }) => {
                assert_eq!((x, y, button_mask), (256, 80, 0b111));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn set_pixel_format_updates_session() {
        let mut message = vec![0x00, 0, 0, 0];
        let mut format_bytes = BytesMut::new();
        let mut new_format = PixelFormat::bgrx8888();
        new_format.big_endian_flag = true;
        new_format.write_to(&mut format_bytes);
        message.extend_from_slice(&format_bytes);

        let mut session = session_over(&message[..]);
        match session.wait_event().await.unwrap() {
            Some(ClientEvent::SetPixelFormat(format)) => assert_eq!(format, new_format),
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(session.pixel_format(), &new_format);
    }

    #[tokio::test]
    async fn invalid_pixel_format_is_rejected() {
        // bpp 13 is not a format the protocol knows.
        let mut message = vec![0x00, 0, 0, 0];
        message.extend_from_slice(&[13, 24, 0, 1, 0, 255, 0, 255, 0, 255, 16, 8, 0, 0, 0, 0]);
        let mut session = session_over(&message[..]);
        assert!(matches!(
            session.wait_event().await,
            Err(RfbError::ProtocolViolation(_))
        ));
    }

    #[tokio::test]
    async fn set_encodings_preserves_unknown_tags() {
        let bytes: &[u8] = &[
            0x02, 0x00, 0x00, 0x03, // three encodings
            0x00, 0x00, 0x00, 0x00, // raw
            0xff, 0xff, 0xff, 0x11, // cursor pseudo (-239)
            0x12, 0x34, 0x56, 0x78, // unknown, preserved
        ];
        let mut session = session_over(bytes);
        match session.wait_event().await.unwrap() {
            Some(ClientEvent::SetEncodings(encodings)) => {
                assert_eq!(
                    encodings,
                    vec![
                        Encoding::RAW,
                        Encoding::CURSOR_PSEUDO,
                        Encoding::new(0x1234_5678)
                    ]
                );
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn cut_text_payload_outlives_next_call() {
        let bytes: &[u8] = &[
            0x06, 0, 0, 0, 0x00, 0x00, 0x00, 0x02, b'H', b'I', // cut text "HI"
            0x06, 0, 0, 0, 0x00, 0x00, 0x00, 0x01, b'!', // cut text "!"
        ];
        let mut session = session_over(bytes);
        let first = match session.wait_event().await.unwrap() {
            Some(ClientEvent::ClientCutText(text)) => text,
            other => panic!("unexpected event: {other:?}"),
        };
        let second = match session.wait_event().await.unwrap() {
            Some(ClientEvent::ClientCutText(text)) => text,
            other => panic!("unexpected event: {other:?}"),
        };
        assert_eq!(&first[..], b"HI");
        assert_eq!(&second[..], b"!");
    }

    #[tokio::test]
    async fn eof_at_boundary_is_none() {
        let bytes: &[u8] = &[];
        let mut session = session_over(bytes);
        assert!(session.wait_event().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn eof_mid_message_is_unexpected_end() {
        // A key event cut off after the down flag.
        let bytes: &[u8] = &[0x04, 0x01];
        let mut session = session_over(bytes);
        assert!(matches!(
            session.wait_event().await,
            Err(RfbError::UnexpectedEnd)
        ));
    }

    #[tokio::test]
    async fn unknown_message_type_is_violation() {
        let bytes: &[u8] = &[0x63];
        let mut session = session_over(bytes);
        assert!(matches!(
            session.wait_event().await,
            Err(RfbError::ProtocolViolation(_))
        ));
    }

    #[tokio::test]
    async fn bell_is_one_byte() {
        let mut session = session_over(std::io::Cursor::new(Vec::new()));
        session.send_bell().await.unwrap();
        assert_eq!(session.into_inner().into_inner(), vec![0x02]);
    }

    #[tokio::test]
    async fn server_cut_text_layout() {
        let mut session = session_over(std::io::Cursor::new(Vec::new()));
        session.send_server_cut_text(b"HI").await.unwrap();
        assert_eq!(
            session.into_inner().into_inner(),
            vec![0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, b'H', b'I']
        );
    }

    #[tokio::test]
    async fn framebuffer_update_layout() {
        let mut session = session_over(std::io::Cursor::new(Vec::new()));
        let rectangles = [
            UpdateRectangle {
                x: 0,
                y: 0,
                width: 1,
                height: 1,
                encoding: Encoding::RAW,
                data: vec![0xDE, 0xAD, 0xBE, 0xEF],
            },
            UpdateRectangle {
                x: 4,
                y: 8,
                width: 2,
                height: 2,
                encoding: Encoding::new(-1000),
                data: vec![],
            },
        ];
        session.send_framebuffer_update(&rectangles).await.unwrap();

        let mut expected = vec![0x00, 0x00, 0x00, 0x02];
        expected.extend_from_slice(&[0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0]);
        expected.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        expected.extend_from_slice(&[0, 4, 0, 8, 0, 2, 0, 2]);
        expected.extend_from_slice(&(-1000i32).to_be_bytes());
        assert_eq!(session.into_inner().into_inner(), expected);
    }

    #[tokio::test]
    async fn colour_map_entries_layout() {
        let mut session = session_over(std::io::Cursor::new(Vec::new()));
        session
            .send_set_colour_map_entries(
                4,
                &[Colour::new(0.0, 1.0, 2.0)], // over-range blue clamps
            )
            .await
            .unwrap();
        assert_eq!(
            session.into_inner().into_inner(),
            vec![0x01, 0x00, 0x00, 0x04, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }
}
