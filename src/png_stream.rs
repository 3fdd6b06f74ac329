//! Placeholder PNG byte streams
//!
//! Builds the minimal signature + IHDR + IDAT + IEND stream written for every
//! placeholder asset, and reads the chunk layout of a PNG-shaped stream back.
//!
//! The trailing field of each placeholder chunk is the 32-bit complement of
//! the byte sum of its payload, not a CRC-32, and the IDAT payload is a fixed
//! five bytes whatever the dimensions. Strict PNG decoders reject these files.

use crate::{Error, Result};
use byteorder::{BigEndian, ByteOrder};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

pub const IHDR: [u8; 4] = *b"IHDR";
pub const IDAT: [u8; 4] = *b"IDAT";
pub const IEND: [u8; 4] = *b"IEND";

/// Length, type and trailing fields around every chunk payload
pub const CHUNK_OVERHEAD: usize = 12;

/// Bit depth 8, truecolor, deflate, adaptive filtering, no interlace
const IHDR_FORMAT: [u8; 5] = [8, 2, 0, 0, 0];

const PLACEHOLDER_IDAT: [u8; 5] = [0x00, 0x00, 0x7F, 0xFF, 0x00];

/// One chunk of a PNG stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub tag: [u8; 4],
    pub data: Vec<u8>,
    /// Trailing integrity field as stored in the stream
    pub check: u32,
}

impl Chunk {
    /// Chunk whose trailing field is the placeholder checksum of `data`
    pub fn placeholder(tag: [u8; 4], data: Vec<u8>) -> Self {
        let check = placeholder_checksum(&data);
        Self { tag, data, check }
    }

    /// Type tag as text, or "????" for non-ASCII tags
    pub fn tag_str(&self) -> &str {
        std::str::from_utf8(&self.tag).unwrap_or("????")
    }

    pub fn encoded_len(&self) -> usize {
        CHUNK_OVERHEAD + self.data.len()
    }

    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        push_u32(buf, self.data.len() as u32);
        buf.extend_from_slice(&self.tag);
        buf.extend_from_slice(&self.data);
        push_u32(buf, self.check);
    }
}

/// Bitwise complement of the byte sum of `data`
pub fn placeholder_checksum(data: &[u8]) -> u32 {
    !data
        .iter()
        .fold(0u32, |sum, &byte| sum.wrapping_add(u32::from(byte)))
}

/// Placeholder stream for an image of the given dimensions
///
/// Only the IHDR payload depends on `width` and `height`; every stream is
/// 62 bytes long.
pub fn placeholder_png(width: u32, height: u32) -> Vec<u8> {
    let mut header = Vec::with_capacity(13);
    push_u32(&mut header, width);
    push_u32(&mut header, height);
    header.extend_from_slice(&IHDR_FORMAT);

    let chunks = [
        Chunk::placeholder(IHDR, header),
        Chunk::placeholder(IDAT, PLACEHOLDER_IDAT.to_vec()),
        Chunk::placeholder(IEND, Vec::new()),
    ];

    let len = PNG_SIGNATURE.len() + chunks.iter().map(Chunk::encoded_len).sum::<usize>();
    let mut png = Vec::with_capacity(len);
    png.extend_from_slice(&PNG_SIGNATURE);
    for chunk in &chunks {
        chunk.encode_into(&mut png);
    }

    png
}

/// Split a PNG-shaped stream into its chunks
///
/// Stops after `IEND` or at the end of input. Trailing fields are returned
/// as stored and not checked.
pub fn read_chunks(bytes: &[u8]) -> Result<Vec<Chunk>> {
    if !bytes.starts_with(&PNG_SIGNATURE) {
        return Err(Error::BadSignature);
    }

    let mut chunks = Vec::new();
    let mut offset = PNG_SIGNATURE.len();

    while offset < bytes.len() {
        let header = bytes
            .get(offset..offset + 8)
            .ok_or(Error::Truncated { offset })?;
        let len = BigEndian::read_u32(&header[..4]) as usize;
        let mut tag = [0u8; 4];
        tag.copy_from_slice(&header[4..]);

        let data_start = offset + 8;
        let data_end = data_start
            .checked_add(len)
            .ok_or(Error::Truncated { offset })?;
        let data = bytes
            .get(data_start..data_end)
            .ok_or(Error::Truncated { offset })?;
        let check = bytes
            .get(data_end..data_end + 4)
            .map(BigEndian::read_u32)
            .ok_or(Error::Truncated { offset })?;

        chunks.push(Chunk {
            tag,
            data: data.to_vec(),
            check,
        });
        offset = data_end + 4;

        if tag == IEND {
            break;
        }
    }

    Ok(chunks)
}

/// Width and height from the first chunk, if it is a well-formed IHDR
pub fn ihdr_dimensions(chunks: &[Chunk]) -> Option<(u32, u32)> {
    let first = chunks.first()?;
    if first.tag != IHDR || first.data.len() != 13 {
        return None;
    }

    Some((
        BigEndian::read_u32(&first.data[0..4]),
        BigEndian::read_u32(&first.data[4..8]),
    ))
}

fn push_u32(buf: &mut Vec<u8>, value: u32) {
    let mut field = [0u8; 4];
    BigEndian::write_u32(&mut field, value);
    buf.extend_from_slice(&field);
}
