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

//! Wire-level read primitives.
//!
//! All multi-byte integers in RFB protocol framing are big-endian. These
//! helpers read exact byte counts from the stream and map a short read
//! (`ErrorKind::UnexpectedEof`) to [`RfbError::UnexpectedEnd`]; every other
//! transport error passes through as [`RfbError::Io`]. Padding bytes are
//! read and discarded, never validated.

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{Result, RfbError};

fn map_eof(err: std::io::Error) -> RfbError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        RfbError::UnexpectedEnd
    } else {
        RfbError::Io(err)
    }
}

/// Reads exactly `buf.len()` bytes.
pub async fn read_exact<S>(stream: &mut S, buf: &mut [u8]) -> Result<()>
where
    S: AsyncRead + Unpin,
{
    stream.read_exact(buf).await.map_err(map_eof)?;
    Ok(())
}

/// Reads one byte.
pub async fn read_u8<S>(stream: &mut S) -> Result<u8>
where
    S: AsyncRead + Unpin,
{
    let mut buf = [0u8; 1];
    read_exact(stream, &mut buf).await?;
    Ok(buf[0])
}

/// Reads a big-endian u16.
pub async fn read_u16<S>(stream: &mut S) -> Result<u16>
where
    S: AsyncRead + Unpin,
{
    let mut buf = [0u8; 2];
    read_exact(stream, &mut buf).await?;
    Ok(u16::from_be_bytes(buf))
}

/// Reads a big-endian u32.
pub async fn read_u32<S>(stream: &mut S) -> Result<u32>
where
    S: AsyncRead + Unpin,
{
    let mut buf = [0u8; 4];
    read_exact(stream, &mut buf).await?;
    Ok(u32::from_be_bytes(buf))
}

/// Reads a big-endian i32.
pub async fn read_i32<S>(stream: &mut S) -> Result<i32>
where
    S: AsyncRead + Unpin,
{
    let mut buf = [0u8; 4];
    read_exact(stream, &mut buf).await?;
    Ok(i32::from_be_bytes(buf))
}

/// Reads and discards `count` padding bytes.
pub async fn skip_padding<S>(stream: &mut S, count: usize) -> Result<()>
where
    S: AsyncRead + Unpin,
{
    debug_assert!(count <= 3, "RFB messages pad with at most 3 bytes");
    let mut buf = [0u8; 3];
    read_exact(stream, &mut buf[..count]).await
}
