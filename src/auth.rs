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

//! VNC authentication (security type 2, RFC 6143 Section 7.2.2).
//!
//! The server sends a 16-byte random challenge; the client encrypts it with
//! DES under a key derived from the shared password and sends the result
//! back. The server performs the same encryption and compares.
//!
//! The key derivation carries a historical quirk: the password is truncated
//! or NUL-padded to 8 bytes, and the bits of each byte are reversed before
//! the bytes are used as the DES key (the original VNC implementation stored
//! key bytes LSB-first).
//!
//! VNC authentication is a legacy scheme with no real security; it exists
//! here for interoperability with existing viewers only.

use rand::Rng;

use crate::des;

/// Handles the VNC authentication challenge/response exchange.
pub struct VncAuth {
    /// The shared password. `None` means authentication always fails.
    password: Option<String>,
}

impl VncAuth {
    /// Creates a new `VncAuth` with the given password.
    pub fn new(password: Option<String>) -> Self {
        Self { password }
    }

    /// Generates a cryptographically random 16-byte challenge.
    #[allow(clippy::unused_self)] // Method for symmetry with verify_response
    pub fn generate_challenge(&self) -> [u8; 16] {
        let mut rng = rand::rng();
        let mut challenge = [0u8; 16];
        rng.fill(&mut challenge);
        challenge
    }

    /// Verifies a client's 16-byte response against the challenge.
    ///
    /// Re-encrypts the challenge under the password key and compares with
    /// an accumulated XOR so the comparison does not short-circuit. Returns
    /// `false` if no password is configured or the response has the wrong
    /// length.
    pub fn verify_response(&self, response: &[u8], challenge: &[u8; 16]) -> bool {
        if response.len() != 16 {
            return false;
        }
        let Some(ref password) = self.password else {
            return false;
        };

        let expected = encrypt_challenge(password, challenge);
        let mut diff = 0u8;
        for (a, b) in expected.iter().zip(response) {
            diff |= a ^ b;
        }
        diff == 0
    }
}

/// Encrypts a 16-byte challenge as two independent DES-ECB blocks under the
/// bit-reversed password key.
fn encrypt_challenge(password: &str, challenge: &[u8; 16]) -> [u8; 16] {
    let subkeys = des::subkeys_encrypt(password_key(password));

    let mut response = *challenge;
    let (first, second) = response.split_at_mut(8);
    des::process_block(first.try_into().expect("8-byte block"), &subkeys);
    des::process_block(second.try_into().expect("8-byte block"), &subkeys);
    response
}

/// Derives the 64-bit DES key from a password: first 8 bytes, NUL-padded,
/// each byte bit-reversed, assembled big-endian.
fn password_key(password: &str) -> u64 {
    let mut key = [0u8; 8];
    for (slot, &byte) in key.iter_mut().zip(password.as_bytes().iter().take(8)) {
        *slot = byte.reverse_bits();
    }
    u64::from_be_bytes(key)
}
