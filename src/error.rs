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

//! Error types for the RFB protocol core.
//!
//! Nothing in this crate recovers from an error locally: every failure aborts
//! the current operation and surfaces to the host, which must discard the
//! session. A partial write leaves the stream in an undefined state.

use thiserror::Error;

/// Errors produced by the RFB protocol core.
#[derive(Debug, Error)]
pub enum RfbError {
    /// The stream closed in the middle of a message.
    #[error("stream closed mid-message")]
    UnexpectedEnd,

    /// The peer sent a malformed version literal or selected a security type
    /// that was not offered.
    #[error("protocol mismatch: {0}")]
    ProtocolMismatch(String),

    /// The peer sent an unknown message type, or an unknown value where a
    /// closed set was required.
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// The VNC authentication response did not match the challenge.
    #[error("VNC authentication failed")]
    AuthenticationFailed,

    /// The negotiated pixel format cannot be produced (indexed colour).
    #[error("unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    /// A length exceeds the protocol's representable range.
    #[error("length exceeds protocol field range: {0}")]
    Overflow(&'static str),

    /// Underlying transport error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RfbError>;
