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

//! Client events surfaced to the host application.

use bytes::Bytes;

use crate::pixel_format::PixelFormat;
use crate::protocol::{Encoding, Key};

/// One message received from the client, as returned by
/// [`VncSession::wait_event`](crate::VncSession::wait_event).
///
/// Variable-length payloads are owned (`Bytes` split off the session's
/// scratch buffer), so an event remains valid after the next `wait_event`
/// call.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// The client changed its pixel format. The session's current format
    /// has already been replaced when this event is surfaced.
    SetPixelFormat(PixelFormat),

    /// The client listed the encodings it supports, in preference order.
    /// Unknown tags are preserved verbatim.
    SetEncodings(Vec<Encoding>),

    /// The client requested a framebuffer update for a region.
    FramebufferUpdateRequest {
        /// True if the client only needs changes since its last update; the
        /// server may freely answer with a full update.
        incremental: bool,
        /// X coordinate of the requested region.
        x: u16,
        /// Y coordinate of the requested region.
        y: u16,
        /// Width of the requested region.
        width: u16,
        /// Height of the requested region.
        height: u16,
    },

    /// A key press or release.
    KeyEvent {
        /// The X11 keysym of the key.
        key: Key,
        /// True if pressed, false if released.
        down: bool,
    },

    /// A pointer position and button state.
    PointerEvent {
        /// X coordinate of the pointer.
        x: u16,
        /// Y coordinate of the pointer.
        y: u16,
        /// Bitmask of pressed buttons (bit 0 = left, 1 = middle, 2 = right).
        button_mask: u8,
    },

    /// Clipboard bytes from the client, declared ISO-8859-1 by the protocol.
    ClientCutText(Bytes),
}
