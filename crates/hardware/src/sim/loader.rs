//! Memory image parsing and stimulus decoding.
//!
//! The `-i` flag points at a hex memory image in `$readmemh` form: whitespace
//! separated octet values, `@ADDR` directives to move the load cursor, and
//! `//` comments. The loaded memory holds injection records back to back:
//!
//! ```text
//! [port: 1 octet][length: 2 octets, little endian][payload: length octets]
//! ```
//!
//! A record with length zero terminates the stream; bytes past it are ignored.
//! Each record becomes one frame driven into the named ingress port.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::common::error::BenchError;

/// Rejection of a memory image file or its record stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    /// A token was neither a hex octet nor an `@ADDR` directive.
    #[error("line {line}: invalid token '{token}'")]
    BadToken {
        /// 1-based line number in the image file.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// An octet or `@ADDR` directive landed outside the memory.
    #[error("line {line}: address {addr:#x} is outside the {size} byte memory")]
    AddressRange {
        /// 1-based line number in the image file.
        line: usize,
        /// The out-of-range address.
        addr: usize,
        /// Memory size in bytes.
        size: usize,
    },

    /// A record names a port the bridge does not have.
    #[error("record at offset {offset:#x} names port {port}, but the bridge has {ports} ports")]
    BadPort {
        /// Byte offset of the record header.
        offset: usize,
        /// The out-of-range port number.
        port: u8,
        /// Number of ports the bridge exposes.
        ports: usize,
    },

    /// A record's payload runs past the end of the loaded image.
    #[error("record at offset {offset:#x} needs {need} payload octets, only {have} remain")]
    Truncated {
        /// Byte offset of the record header.
        offset: usize,
        /// Payload octets the header promises.
        need: usize,
        /// Octets actually present after the header.
        have: usize,
    },
}

/// One frame to inject, decoded from the image record stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Injection {
    /// Ingress port the frame arrives on.
    pub port: usize,
    /// Frame octets in wire order.
    pub octets: Vec<u8>,
}

/// Parses `$readmemh`-style text into a byte image.
///
/// The returned vector is truncated to the highest address written, so an
/// image that only touches the first few hundred bytes stays small.
///
/// # Arguments
///
/// * `text` - The image file contents.
/// * `memory_bytes` - Size of the address space the image may touch.
///
/// # Errors
///
/// Returns an [`ImageError`] for malformed tokens or out-of-range addresses.
pub fn parse_image(text: &str, memory_bytes: usize) -> Result<Vec<u8>, ImageError> {
    let mut memory = vec![0u8; memory_bytes];
    let mut cursor = 0usize;
    let mut high_water = 0usize;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split("//").next().unwrap_or("");
        for token in content.split_whitespace() {
            if let Some(addr_text) = token.strip_prefix('@') {
                let addr =
                    usize::from_str_radix(addr_text, 16).map_err(|_| ImageError::BadToken {
                        line,
                        token: token.to_string(),
                    })?;
                if addr > memory_bytes {
                    return Err(ImageError::AddressRange {
                        line,
                        addr,
                        size: memory_bytes,
                    });
                }
                cursor = addr;
                continue;
            }
            let octet = u8::from_str_radix(token, 16).map_err(|_| ImageError::BadToken {
                line,
                token: token.to_string(),
            })?;
            if cursor >= memory_bytes {
                return Err(ImageError::AddressRange {
                    line,
                    addr: cursor,
                    size: memory_bytes,
                });
            }
            memory[cursor] = octet;
            cursor += 1;
            high_water = high_water.max(cursor);
        }
    }

    memory.truncate(high_water);
    Ok(memory)
}

/// Decodes the record stream in a loaded image into injections.
///
/// Decoding stops at a zero-length record or when fewer than a full header's
/// worth of octets remain.
///
/// # Arguments
///
/// * `memory` - The loaded image, as returned by [`parse_image`].
/// * `ports` - Number of ingress ports a record may name.
///
/// # Errors
///
/// Returns an [`ImageError`] if a record names a port out of range or promises
/// more payload than the image holds.
pub fn decode_records(memory: &[u8], ports: usize) -> Result<Vec<Injection>, ImageError> {
    let mut injections = Vec::new();
    let mut offset = 0usize;

    while offset + 3 <= memory.len() {
        let port = memory[offset];
        let len = usize::from(u16::from_le_bytes([memory[offset + 1], memory[offset + 2]]));
        if len == 0 {
            break;
        }
        if usize::from(port) >= ports {
            return Err(ImageError::BadPort {
                offset,
                port,
                ports,
            });
        }
        let start = offset + 3;
        let end = start + len;
        if end > memory.len() {
            return Err(ImageError::Truncated {
                offset,
                need: len,
                have: memory.len() - start,
            });
        }
        injections.push(Injection {
            port: usize::from(port),
            octets: memory[start..end].to_vec(),
        });
        offset = end;
    }

    Ok(injections)
}

/// Reads and parses a memory image file.
///
/// # Errors
///
/// Returns a [`BenchError`] if the file cannot be read or the image is
/// malformed.
pub fn read_image_file(path: &Path, memory_bytes: usize) -> Result<Vec<u8>, BenchError> {
    let text = fs::read_to_string(path)?;
    Ok(parse_image(&text, memory_bytes)?)
}

/// Reads an image file and decodes its record stream into injections.
///
/// # Errors
///
/// Returns a [`BenchError`] if the file cannot be read or either the image or
/// its records are malformed.
pub fn load_stimulus(
    path: &Path,
    ports: usize,
    memory_bytes: usize,
) -> Result<Vec<Injection>, BenchError> {
    let memory = read_image_file(path, memory_bytes)?;
    Ok(decode_records(&memory, ports)?)
}
