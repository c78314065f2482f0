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

//! Single-DES block cipher.
//!
//! The RFB VNC Authentication scheme (RFC 6143 Section 7.2.2) requires DES,
//! so this module implements it from the FIPS 46 tables. DES is
//! cryptographically broken; its only value here is wire compatibility with
//! existing VNC clients. Do not use it for anything else.
//!
//! The API splits key scheduling from block processing: [`subkeys_encrypt`]
//! and [`subkeys_decrypt`] derive the 16 round subkeys from a 64-bit key
//! (decryption is the same schedule applied in reverse order), and
//! [`process_block`] runs one 8-byte block through the Feistel network in
//! place.

/// Initial permutation (IP). Entries are 1-based bit positions counted from
/// the most significant bit of the 64-bit block.
#[rustfmt::skip]
const IP: [u8; 64] = [
    58,50,42,34,26,18,10, 2,
    60,52,44,36,28,20,12, 4,
    62,54,46,38,30,22,14, 6,
    64,56,48,40,32,24,16, 8,
    57,49,41,33,25,17, 9, 1,
    59,51,43,35,27,19,11, 3,
    61,53,45,37,29,21,13, 5,
    63,55,47,39,31,23,15, 7,
];

/// Final permutation (IP⁻¹).
#[rustfmt::skip]
const FP: [u8; 64] = [
    40, 8,48,16,56,24,64,32,
    39, 7,47,15,55,23,63,31,
    38, 6,46,14,54,22,62,30,
    37, 5,45,13,53,21,61,29,
    36, 4,44,12,52,20,60,28,
    35, 3,43,11,51,19,59,27,
    34, 2,42,10,50,18,58,26,
    33, 1,41, 9,49,17,57,25,
];

/// Permuted choice 1: 64-bit key → 56 bits (C28 ‖ D28), parity bits dropped.
#[rustfmt::skip]
const PC1: [u8; 56] = [
    57,49,41,33,25,17, 9,
     1,58,50,42,34,26,18,
    10, 2,59,51,43,35,27,
    19,11, 3,60,52,44,36,
    63,55,47,39,31,23,15,
     7,62,54,46,38,30,22,
    14, 6,61,53,45,37,29,
    21,13, 5,28,20,12, 4,
];

/// Permuted choice 2: 56-bit CD → 48-bit round subkey.
#[rustfmt::skip]
const PC2: [u8; 48] = [
    14,17,11,24, 1, 5,
     3,28,15, 6,21,10,
    23,19,12, 4,26, 8,
    16, 7,27,20,13, 2,
    41,52,31,37,47,55,
    30,40,51,45,33,48,
    44,49,39,56,34,53,
    46,42,50,36,29,32,
];

/// Left-rotation amounts for the 16 key-schedule rounds.
#[rustfmt::skip]
const ROTATIONS: [u8; 16] = [1,1,2,2,2,2,2,2,1,2,2,2,2,2,2,1];

/// Expansion E: 32-bit half-block → 48 bits.
#[rustfmt::skip]
const E: [u8; 48] = [
    32, 1, 2, 3, 4, 5,
     4, 5, 6, 7, 8, 9,
     8, 9,10,11,12,13,
    12,13,14,15,16,17,
    16,17,18,19,20,21,
    20,21,22,23,24,25,
    24,25,26,27,28,29,
    28,29,30,31,32, 1,
];

/// P permutation applied to the S-box output.
#[rustfmt::skip]
const P: [u8; 32] = [
    16, 7,20,21,
    29,12,28,17,
     1,15,23,26,
     5,18,31,10,
     2, 8,24,14,
    32,27, 3, 9,
    19,13,30, 6,
    22,11, 4,25,
];

/// The eight S-boxes, each 4 rows × 16 columns.
#[rustfmt::skip]
const SBOX: [[u8; 64]; 8] = [
    // S1
    [14, 4,13, 1, 2,15,11, 8, 3,10, 6,12, 5, 9, 0, 7,
      0,15, 7, 4,14, 2,13, 1,10, 6,12,11, 9, 5, 3, 8,
      4, 1,14, 8,13, 6, 2,11,15,12, 9, 7, 3,10, 5, 0,
     15,12, 8, 2, 4, 9, 1, 7, 5,11, 3,14,10, 0, 6,13],
    // S2
    [15, 1, 8,14, 6,11, 3, 4, 9, 7, 2,13,12, 0, 5,10,
      3,13, 4, 7,15, 2, 8,14,12, 0, 1,10, 6, 9,11, 5,
      0,14, 7,11,10, 4,13, 1, 5, 8,12, 6, 9, 3, 2,15,
     13, 8,10, 1, 3,15, 4, 2,11, 6, 7,12, 0, 5,14, 9],
    // S3
    [10, 0, 9,14, 6, 3,15, 5, 1,13,12, 7,11, 4, 2, 8,
     13, 7, 0, 9, 3, 4, 6,10, 2, 8, 5,14,12,11,15, 1,
     13, 6, 4, 9, 8,15, 3, 0,11, 1, 2,12, 5,10,14, 7,
      1,10,13, 0, 6, 9, 8, 7, 4,15,14, 3,11, 5, 2,12],
    // S4
    [ 7,13,14, 3, 0, 6, 9,10, 1, 2, 8, 5,11,12, 4,15,
     13, 8,11, 5, 6,15, 0, 3, 4, 7, 2,12, 1,10,14, 9,
     10, 6, 9, 0,12,11, 7,13,15, 1, 3,14, 5, 2, 8, 4,
      3,15, 0, 6,10, 1,13, 8, 9, 4, 5,11,12, 7, 2,14],
    // S5
    [ 2,12, 4, 1, 7,10,11, 6, 8, 5, 3,15,13, 0,14, 9,
     14,11, 2,12, 4, 7,13, 1, 5, 0,15,10, 3, 9, 8, 6,
      4, 2, 1,11,10,13, 7, 8,15, 9,12, 5, 6, 3, 0,14,
     11, 8,12, 7, 1,14, 2,13, 6,15, 0, 9,10, 4, 5, 3],
    // S6
    [12, 1,10,15, 9, 2, 6, 8, 0,13, 3, 4,14, 7, 5,11,
     10,15, 4, 2, 7,12, 9, 5, 6, 1,13,14, 0,11, 3, 8,
      9,14,15, 5, 2, 8,12, 3, 7, 0, 4,10, 1,13,11, 6,
      4, 3, 2,12, 9, 5,15,10,11,14, 1, 7, 6, 0, 8,13],
    // S7
    [ 4,11, 2,14,15, 0, 8,13, 3,12, 9, 7, 5,10, 6, 1,
     13, 0,11, 7, 4, 9, 1,10,14, 3, 5,12, 2,15, 8, 6,
      1, 4,11,13,12, 3, 7,14,10,15, 6, 8, 0, 5, 9, 2,
      6,11,13, 8, 1, 4,10, 7, 9, 5, 0,15,14, 2, 3,12],
    // S8
    [13, 2, 8, 4, 6,15,11, 1,10, 9, 3,14, 5, 0,12, 7,
      1,15,13, 8,10, 3, 7, 4,12, 5, 6,11, 0,14, 9, 2,
      7,11, 4, 1, 9,12,14, 2, 0, 6,10,13,15, 3, 5, 8,
      2, 1,14, 7, 4,10, 8,13,15,12, 9, 0, 3, 5, 6,11],
];

/// The 16-round subkey schedule. Each entry holds one 48-bit round key in the
/// low bits of a `u64`.
pub type SubKeys = [u64; 16];

/// Apply a 1-based permutation table to an LSB-aligned `width`-bit value.
///
/// Table entries index bits from the most significant end of the input, per
/// the FIPS 46 convention. The output holds `table.len()` bits, LSB-aligned.
fn permute(src: u64, width: u32, table: &[u8]) -> u64 {
    let mut out = 0u64;
    for &pos in table {
        out = (out << 1) | ((src >> (width - u32::from(pos))) & 1);
    }
    out
}

/// Rotate a 28-bit half-key left by `n` positions.
fn rotate28(half: u32, n: u8) -> u32 {
    ((half << n) | (half >> (28 - n))) & 0x0FFF_FFFF
}

/// Derive the 16 round subkeys from a 64-bit key, in encryption order.
///
/// The key is taken as a big-endian 64-bit integer; the eight parity bits
/// are discarded by PC-1.
pub fn subkeys_encrypt(key: u64) -> SubKeys {
    let cd = permute(key, 64, &PC1);
    let mut c = ((cd >> 28) as u32) & 0x0FFF_FFFF;
    let mut d = (cd as u32) & 0x0FFF_FFFF;

    let mut subkeys = [0u64; 16];
    for (round, &shift) in ROTATIONS.iter().enumerate() {
        c = rotate28(c, shift);
        d = rotate28(d, shift);
        subkeys[round] = permute((u64::from(c) << 28) | u64::from(d), 56, &PC2);
    }
    subkeys
}

/// Derive the subkey schedule for decryption: the encryption schedule in
/// reverse order.
pub fn subkeys_decrypt(key: u64) -> SubKeys {
    let mut subkeys = subkeys_encrypt(key);
    subkeys.reverse();
    subkeys
}

/// The Feistel round function f(R, K).
///
/// Expands R to 48 bits, mixes in the round key, substitutes through the
/// eight S-boxes (row from bits 1 and 6 of each group, column from bits
/// 2–5), and applies the P permutation.
fn feistel(r: u32, subkey: u64) -> u32 {
    let mixed = permute(u64::from(r), 32, &E) ^ subkey;

    let mut substituted = 0u32;
    for (i, sbox) in SBOX.iter().enumerate() {
        let group = ((mixed >> (42 - 6 * i)) & 0x3F) as usize;
        let row = ((group >> 4) & 2) | (group & 1);
        let col = (group >> 1) & 0xF;
        substituted = (substituted << 4) | u32::from(sbox[row * 16 + col]);
    }

    permute(u64::from(substituted), 32, &P) as u32
}

/// Run one 8-byte block through the cipher in place.
///
/// Pass a schedule from [`subkeys_encrypt`] to encrypt or from
/// [`subkeys_decrypt`] to decrypt. The block is interpreted as a big-endian
/// 64-bit integer: initial permutation, 16 Feistel rounds
/// (`L' = R`, `R' = L ⊕ f(R, Kᵢ)`), half swap, final permutation.
pub fn process_block(block: &mut [u8; 8], subkeys: &SubKeys) {
    let permuted = permute(u64::from_be_bytes(*block), 64, &IP);

    let mut l = (permuted >> 32) as u32;
    let mut r = permuted as u32;
    for &subkey in subkeys {
        let next = l ^ feistel(r, subkey);
        l = r;
        r = next;
    }

    let preoutput = (u64::from(r) << 32) | u64::from(l);
    *block = permute(preoutput, 64, &FP).to_be_bytes();
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The 19 known-answer vectors published with the 1977 standard
    /// (key, plaintext, ciphertext).
    #[rustfmt::skip]
    const KNOWN_ANSWERS: [(u64, u64, u64); 19] = [
        (0x7CA1_1045_4A1A_6E57, 0x01A1_D6D0_3977_6742, 0x690F_5B0D_9A26_939B),
        (0x0131_D961_9DC1_376E, 0x5CD5_4CA8_3DEF_57DA, 0x7A38_9D10_354B_D271),
        (0x07A1_133E_4A0B_2686, 0x0248_D438_06F6_7172, 0x868E_BB51_CAB4_599A),
        (0x3849_674C_2602_319E, 0x5145_4B58_2DDF_440A, 0x7178_876E_01F1_9B2A),
        (0x04B9_15BA_43FE_B5B6, 0x42FD_4430_5957_7FA2, 0xAF37_FB42_1F8C_4095),
        (0x0113_B970_FD34_F2CE, 0x059B_5E08_51CF_143A, 0x86A5_60F1_0EC6_D85B),
        (0x0170_F175_468F_B5E6, 0x0756_D8E0_7747_61D2, 0x0CD3_DA02_0021_DC09),
        (0x4329_7FAD_38E3_73FE, 0x7625_14B8_29BF_486A, 0xEA67_6B2C_B7DB_2B7A),
        (0x07A7_1370_45DA_2A16, 0x3BDD_1190_4937_2802, 0xDFD6_4A81_5CAF_1A0F),
        (0x0468_9104_C2FD_3B2F, 0x2695_5F68_35AF_609A, 0x5C51_3C9C_4886_C088),
        (0x37D0_6BB5_16CB_7546, 0x164D_5E40_4F27_5232, 0x0A2A_EEAE_3FF4_AB77),
        (0x1F08_260D_1AC2_465E, 0x6B05_6E18_759F_5CCA, 0xEF1B_F03E_5DFA_575A),
        (0x5840_2364_1ABA_6176, 0x004B_D6EF_0917_6062, 0x88BF_0DB6_D70D_EE56),
        (0x0258_1616_4629_B007, 0x480D_3900_6EE7_62F2, 0xA1F9_9155_4102_0B56),
        (0x4979_3EBC_79B3_258F, 0x4375_40C8_698F_3CFA, 0x6FBF_1CAF_CFFD_0556),
        (0x4FB0_5E15_15AB_73A7, 0x072D_43A0_7707_5292, 0x2F22_E49B_AB7C_A1AC),
        (0x49E9_5D6D_4CA2_29BF, 0x02FE_5577_8117_F12A, 0x5A6B_612C_C26C_CE4A),
        (0x0183_10DC_409B_26D6, 0x1D9D_5C50_18F7_28C2, 0x5F4C_038E_D12B_2E41),
        (0x1C58_7F1C_1392_4FEF, 0x3055_3228_6D6F_295A, 0x63FA_C0D0_34D9_F793),
    ];

    #[test]
    fn known_answer_vectors_encrypt() {
        for &(key, plaintext, ciphertext) in &KNOWN_ANSWERS {
            let subkeys = subkeys_encrypt(key);
            let mut block = plaintext.to_be_bytes();
            process_block(&mut block, &subkeys);
            assert_eq!(
                u64::from_be_bytes(block),
                ciphertext,
                "encrypt mismatch for key {key:016X}"
            );
        }
    }

    #[test]
    fn known_answer_vectors_decrypt() {
        for &(key, plaintext, ciphertext) in &KNOWN_ANSWERS {
            let subkeys = subkeys_decrypt(key);
            let mut block = ciphertext.to_be_bytes();
            process_block(&mut block, &subkeys);
            assert_eq!(
                u64::from_be_bytes(block),
                plaintext,
                "decrypt mismatch for key {key:016X}"
            );
        }
    }

    #[test]
    fn zero_key_zero_block() {
        // DES with the all-zero key maps the all-zero block to 8CA64DE9C1B123A7.
        let subkeys = subkeys_encrypt(0);
        let mut block = [0u8; 8];
        process_block(&mut block, &subkeys);
        assert_eq!(u64::from_be_bytes(block), 0x8CA6_4DE9_C1B1_23A7);
    }

    #[test]
    fn decrypt_schedule_is_reversed_encrypt_schedule() {
        let enc = subkeys_encrypt(0x0123_4567_89AB_CDEF);
        let dec = subkeys_decrypt(0x0123_4567_89AB_CDEF);
        for i in 0..16 {
            assert_eq!(enc[i], dec[15 - i]);
        }
    }

    #[test]
    fn encrypt_then_decrypt_round_trips() {
        let key = 0x133457799BBCDFF1;
        let enc = subkeys_encrypt(key);
        let dec = subkeys_decrypt(key);

        let mut block = *b"\x01\x23\x45\x67\x89\xAB\xCD\xEF";
        let original = block;
        process_block(&mut block, &enc);
        assert_ne!(block, original);
        process_block(&mut block, &dec);
        assert_eq!(block, original);
    }

    #[test]
    fn subkeys_are_48_bit() {
        for subkey in subkeys_encrypt(0xFFFF_FFFF_FFFF_FFFF) {
            assert_eq!(subkey >> 48, 0);
        }
    }
}
