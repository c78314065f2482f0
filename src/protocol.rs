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

//! RFB protocol constants and wire structures.
//!
//! This module provides the fundamental building blocks for RFB protocol
//! communication: the protocol version literal, message type and security
//! type constants, the open `Encoding` and `Key` value sets, and the
//! `ServerInit` and update-rectangle wire writers. It follows the RFB
//! protocol as specified in RFC 6143.

use std::fmt;

use bytes::{BufMut, BytesMut};

use crate::error::{Result, RfbError};
use crate::pixel_format::PixelFormat;

/// The RFB protocol version string advertised by the server.
///
/// This server implements RFB protocol version 3.8. The version string must
/// be exactly 12 bytes including the newline character.
pub const PROTOCOL_VERSION: &str = "RFB 003.008\n";

// Client-to-Server message types

/// Message type: client requests to change the pixel format.
pub const CLIENT_MSG_SET_PIXEL_FORMAT: u8 = 0;

/// Message type: client specifies supported encodings, ordered by preference.
pub const CLIENT_MSG_SET_ENCODINGS: u8 = 2;

/// Message type: client requests a framebuffer update for a region.
pub const CLIENT_MSG_FRAMEBUFFER_UPDATE_REQUEST: u8 = 3;

/// Message type: client sends a key press or release.
pub const CLIENT_MSG_KEY_EVENT: u8 = 4;

/// Message type: client sends a pointer position and button state.
pub const CLIENT_MSG_POINTER_EVENT: u8 = 5;

/// Message type: client transfers clipboard contents to the server.
pub const CLIENT_MSG_CLIENT_CUT_TEXT: u8 = 6;

// Server-to-Client message types

/// Message type: server sends a framebuffer update.
pub const SERVER_MSG_FRAMEBUFFER_UPDATE: u8 = 0;

/// Message type: server sets colour map entries (indexed colour modes).
pub const SERVER_MSG_SET_COLOUR_MAP_ENTRIES: u8 = 1;

/// Message type: server rings the bell.
pub const SERVER_MSG_BELL: u8 = 2;

/// Message type: server transfers clipboard contents to the client.
pub const SERVER_MSG_SERVER_CUT_TEXT: u8 = 3;

// Security results

/// Security result: handshake succeeded.
pub const SECURITY_RESULT_OK: u32 = 0;

/// Security result: handshake failed; a reason string follows.
pub const SECURITY_RESULT_FAILED: u32 = 1;

/// The security types of the RFB 3.8 handshake. A closed set: any other
/// wire value is a protocol violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SecurityType {
    /// Connection failure marker.
    Invalid = 0,
    /// No authentication.
    None = 1,
    /// DES challenge-response authentication (RFC 6143 Section 7.2.2).
    VncAuthentication = 2,
}

impl SecurityType {
    /// Maps a wire byte to a security type, or `None` for values outside
    /// the closed set.
    #[must_use]
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Invalid),
            1 => Some(Self::None),
            2 => Some(Self::VncAuthentication),
            _ => None,
        }
    }
}

/// An RFB protocol version as exchanged in the 12-byte handshake literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolVersion {
    /// Major version number.
    pub major: u32,
    /// Minor version number.
    pub minor: u32,
}

impl ProtocolVersion {
    /// Parses the fixed 12-byte ASCII form `"RFB xxx.yyy\n"`.
    ///
    /// # Errors
    ///
    /// Any deviation in the literal framing (the `"RFB "` prefix, the dot,
    /// the trailing newline, or non-digit version fields) fails with
    /// [`RfbError::ProtocolMismatch`].
    pub fn parse(bytes: &[u8; 12]) -> Result<Self> {
        let framed = bytes.starts_with(b"RFB ") && bytes[7] == b'.' && bytes[11] == b'\n';
        let digits = |field: &[u8]| field.iter().all(u8::is_ascii_digit);
        if !framed || !digits(&bytes[4..7]) || !digits(&bytes[8..11]) {
            return Err(RfbError::ProtocolMismatch(format!(
                "malformed version literal {:?}",
                String::from_utf8_lossy(bytes)
            )));
        }

        let field = |range: std::ops::Range<usize>| {
            bytes[range]
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'))
        };
        Ok(Self {
            major: field(4..7),
            minor: field(8..11),
        })
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// An RFB encoding tag.
///
/// The set is open: clients may list tags this crate has no name for, and
/// those wire values are preserved verbatim rather than rejected. Named
/// constants cover the tags enumerated by RFC 6143 plus the common
/// pseudo-encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Encoding(i32);

impl Encoding {
    /// Raw encoding: uncompressed pixel data. The only encoding whose
    /// payload this server produces itself.
    pub const RAW: Self = Self(0);
    /// CopyRect: copy a region already present on the client.
    pub const COPY_RECT: Self = Self(1);
    /// Rise-and-run-length encoding.
    pub const RRE: Self = Self(2);
    /// Hextile encoding.
    pub const HEXTILE: Self = Self(5);
    /// Tiled run-length encoding.
    pub const TRLE: Self = Self(15);
    /// Zlib-compressed tiled run-length encoding.
    pub const ZRLE: Self = Self(16);
    /// Pseudo-encoding: cursor shape updates.
    pub const CURSOR_PSEUDO: Self = Self(-239);
    /// Pseudo-encoding: desktop size changes.
    pub const DESKTOP_SIZE_PSEUDO: Self = Self(-223);

    /// Wraps a raw wire value.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the signed 32-bit wire value.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

/// An X11 keysym as carried in `KeyEvent` messages.
///
/// The set is open: every 32-bit value is admissible and passes through
/// unchanged. Constants name the common control and function keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(u32);

#[allow(missing_docs)] // Constants named after their X11 keysyms
impl Key {
    pub const BACK_SPACE: Self = Self(0xff08);
    pub const TAB: Self = Self(0xff09);
    pub const RETURN: Self = Self(0xff0d);
    pub const ESCAPE: Self = Self(0xff1b);
    pub const INSERT: Self = Self(0xff63);
    pub const DELETE: Self = Self(0xffff);
    pub const HOME: Self = Self(0xff50);
    pub const LEFT: Self = Self(0xff51);
    pub const UP: Self = Self(0xff52);
    pub const RIGHT: Self = Self(0xff53);
    pub const DOWN: Self = Self(0xff54);
    pub const PAGE_UP: Self = Self(0xff55);
    pub const PAGE_DOWN: Self = Self(0xff56);
    pub const END: Self = Self(0xff57);
    pub const F1: Self = Self(0xffbe);
    pub const F2: Self = Self(0xffbf);
    pub const F3: Self = Self(0xffc0);
    pub const F4: Self = Self(0xffc1);
    pub const F5: Self = Self(0xffc2);
    pub const F6: Self = Self(0xffc3);
    pub const F7: Self = Self(0xffc4);
    pub const F8: Self = Self(0xffc5);
    pub const F9: Self = Self(0xffc6);
    pub const F10: Self = Self(0xffc7);
    pub const F11: Self = Self(0xffc8);
    pub const F12: Self = Self(0xffc9);
    pub const SHIFT_L: Self = Self(0xffe1);
    pub const SHIFT_R: Self = Self(0xffe2);
    pub const CONTROL_L: Self = Self(0xffe3);
    pub const CONTROL_R: Self = Self(0xffe4);
    pub const META_L: Self = Self(0xffe7);
    pub const META_R: Self = Self(0xffe8);
    pub const ALT_L: Self = Self(0xffe9);
    pub const ALT_R: Self = Self(0xffea);

    /// Wraps a raw keysym value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the 32-bit keysym value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// The `ServerInit` message sent at the end of the handshake: framebuffer
/// dimensions, the server's native pixel format, and the desktop name.
#[derive(Debug, Clone)]
pub struct ServerInit {
    /// Width of the framebuffer in pixels.
    pub framebuffer_width: u16,
    /// Height of the framebuffer in pixels.
    pub framebuffer_height: u16,
    /// The pixel format the server will use until the client changes it.
    pub pixel_format: PixelFormat,
    /// The desktop name shown by the viewer.
    pub name: String,
}

impl ServerInit {
    /// Serializes the message: width, height, 16-byte pixel format, u32
    /// name length, name bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RfbError::Overflow`] if the desktop name does not fit the
    /// protocol's u32 length field.
    pub fn write_to(&self, buf: &mut BytesMut) -> Result<()> {
        let name_len = u32::try_from(self.name.len())
            .map_err(|_| RfbError::Overflow("desktop name length"))?;
        buf.put_u16(self.framebuffer_width);
        buf.put_u16(self.framebuffer_height);
        self.pixel_format.write_to(buf);
        buf.put_u32(name_len);
        buf.put_slice(self.name.as_bytes());
        Ok(())
    }
}

/// One rectangle of a `FramebufferUpdate` message.
///
/// `data` is the finished on-wire payload for `encoding`; the session
/// writes it verbatim and never re-encodes it.
#[derive(Debug, Clone)]
pub struct UpdateRectangle {
    /// X coordinate of the top-left corner.
    pub x: u16,
    /// Y coordinate of the top-left corner.
    pub y: u16,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// The encoding tag of `data`.
    pub encoding: Encoding,
    /// Encoding-specific payload, written to the wire as is.
    pub data: Vec<u8>,
}

impl UpdateRectangle {
    /// Writes the rectangle header and payload.
    ///
    /// Header: x, y, width, height as big-endian u16, then the encoding as
    /// a signed 32-bit integer, then the payload bytes.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.put_u16(self.x);
        buf.put_u16(self.y);
        buf.put_u16(self.width);
        buf.put_u16(self.height);
        buf.put_i32(self.encoding.raw());
        buf.put_slice(&self.data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonical_version() {
        let version = ProtocolVersion::parse(b"RFB 003.008\n").unwrap();
        assert_eq!(version, ProtocolVersion { major: 3, minor: 8 });
    }

    #[test]
    fn parse_other_versions() {
        let version = ProtocolVersion::parse(b"RFB 003.003\n").unwrap();
        assert_eq!(version, ProtocolVersion { major: 3, minor: 3 });
        let version = ProtocolVersion::parse(b"RFB 004.000\n").unwrap();
        assert_eq!(version, ProtocolVersion { major: 4, minor: 0 });
    }

    #[test]
    fn parse_rejects_malformed_literals() {
        let malformed: [&[u8; 12]; 5] = [
            b"RFB 003 008\n", // missing dot
            b"RFB 003.008 ",  // missing newline
            b"rfb 003.008\n", // wrong prefix case
            b"RFB 0x3.008\n", // non-digit field
            b"RFB003.0008\n", // missing space
        ];
        for literal in malformed {
            assert!(matches!(
                ProtocolVersion::parse(literal),
                Err(RfbError::ProtocolMismatch(_))
            ));
        }
    }

    #[test]
    fn security_type_closed_set() {
        assert_eq!(SecurityType::from_wire(0), Some(SecurityType::Invalid));
        assert_eq!(SecurityType::from_wire(1), Some(SecurityType::None));
        assert_eq!(
            SecurityType::from_wire(2),
            Some(SecurityType::VncAuthentication)
        );
        assert_eq!(SecurityType::from_wire(5), None);
        assert_eq!(SecurityType::from_wire(255), None);
    }

    #[test]
    fn encoding_preserves_unknown_tags() {
        assert_eq!(Encoding::new(-512).raw(), -512);
        assert_eq!(Encoding::new(0x4832_3634).raw(), 0x4832_3634);
        assert_eq!(Encoding::RAW.raw(), 0);
        assert_eq!(Encoding::ZRLE.raw(), 16);
        assert_eq!(Encoding::CURSOR_PSEUDO.raw(), -239);
    }

    #[test]
    fn key_constants_and_pass_through() {
        assert_eq!(Key::RETURN.raw(), 0xff0d);
        assert_eq!(Key::new(0x0061).raw(), 0x61); // latin 'a' passes through
    }

    #[test]
    fn server_init_layout() {
        let init = ServerInit {
            framebuffer_width: 800,
            framebuffer_height: 600,
            pixel_format: PixelFormat::bgrx8888(),
            name: "test".to_string(),
        };
        let mut buf = BytesMut::new();
        init.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), 2 + 2 + 16 + 4 + 4);
        assert_eq!(&buf[..4], &[0x03, 0x20, 0x02, 0x58]);
        assert_eq!(&buf[20..24], &[0, 0, 0, 4]);
        assert_eq!(&buf[24..], b"test");
    }

    #[test]
    fn update_rectangle_header_layout() {
        let rect = UpdateRectangle {
            x: 10,
            y: 20,
            width: 128,
            height: 96,
            encoding: Encoding::RAW,
            data: vec![0xAA, 0xBB],
        };
        let mut buf = BytesMut::new();
        rect.write_to(&mut buf);
        assert_eq!(
            &buf[..],
            &[0, 10, 0, 20, 0, 128, 0, 96, 0, 0, 0, 0, 0xAA, 0xBB]
        );
    }
}
