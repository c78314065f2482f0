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

//! # rfbcore
//!
//! The server side of the Remote Framebuffer (RFB) protocol — the wire
//! protocol underlying VNC — as specified by RFC 6143, protocol version 3.8.
//!
//! This crate is the protocol core only. It takes an already-connected,
//! bidirectional byte stream (anything `AsyncRead + AsyncWrite + Unpin`),
//! drives the handshake (version exchange, security negotiation, optional
//! VNC authentication, `ClientInit`/`ServerInit`), and then exchanges
//! client input events against server-initiated pushes. Listening sockets,
//! process startup, pixel capture, and encoders beyond raw payload
//! pass-through belong to the host application.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rfbcore::{ClientEvent, SessionConfig, VncSession};
//! use tokio::io::{AsyncRead, AsyncWrite};
//!
//! # async fn run(stream: impl AsyncRead + AsyncWrite + Unpin) -> rfbcore::Result<()> {
//! let config = SessionConfig::new(1280, 800, "my desktop");
//! let mut session = VncSession::establish(stream, &config).await?;
//!
//! while let Some(event) = session.wait_event().await? {
//!     match event {
//!         ClientEvent::KeyEvent { key, down } => {
//!             // feed the key into the application
//!             let _ = (key, down);
//!         }
//!         ClientEvent::FramebufferUpdateRequest { .. } => {
//!             // assemble UpdateRectangle payloads and push them back
//!         }
//!         _ => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! One session per connection, single-threaded and synchronous: every
//! operation borrows the session mutably and blocks on the stream. The core
//! spawns no tasks and holds no locks; a host that pushes updates from
//! another thread must serialize access to the session itself. Cancellation
//! is closing the stream.
//!
//! ## Security
//!
//! The VNC authentication scheme (security type 2) is implemented with the
//! bit-exact DES cipher the protocol mandates, including the historical
//! per-byte key bit reversal. It is an interoperability feature, not a
//! security boundary: DES is broken and the protocol is unencrypted. Run
//! untrusted links through a tunnel.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod des;
pub mod error;
pub mod events;
pub mod pixel_format;
pub mod protocol;
pub mod session;

mod wire;

// Re-exports
pub use error::{Result, RfbError};
pub use events::ClientEvent;
pub use pixel_format::{Colour, PixelFormat};
pub use protocol::{Encoding, Key, ProtocolVersion, SecurityType, UpdateRectangle};
pub use session::{SecurityConfig, SessionConfig, VncSession};

/// VNC protocol version literal spoken by this server.
pub const PROTOCOL_VERSION: &str = protocol::PROTOCOL_VERSION;
