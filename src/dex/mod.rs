//! Binary DEX format: bounds-checked readers, the structural parser and the disassembler.

#[macro_use]
pub mod error;

pub mod dex_file;
pub(crate) mod leb;
pub mod instructions;
pub mod opcode_format;
pub(crate) mod opcodes;

pub use dex_file::DexFile;
pub use error::{DexError, DexErrorKind};

use crate::dex::leb::{decode_sleb128, decode_uleb128, decode_uleb128p1};

#[inline]
fn require(bytes: &[u8], ix: usize, width: usize, what: &str) -> Result<(), DexError>
{
    match ix.checked_add(width)
    {
        Some(end) if end <= bytes.len() => Ok(()),
        _ => fail!("Unexpected end of stream reading {} at index {}", what, ix),
    }
}

// Basic type reading; every reader advances `ix` only on success
pub(crate) fn read_u1(bytes: &[u8], ix: &mut usize) -> Result<u8, DexError>
{
    require(bytes, *ix, 1, "u1")?;
    let result = bytes[*ix];
    *ix += 1;
    Ok(result)
}

pub(crate) fn read_u2(bytes: &[u8], ix: &mut usize) -> Result<u16, DexError>
{
    require(bytes, *ix, 2, "u2")?;
    let result = u16::from_le_bytes([bytes[*ix], bytes[*ix + 1]]);
    *ix += 2;
    Ok(result)
}

pub(crate) fn read_u4(bytes: &[u8], ix: &mut usize) -> Result<u32, DexError>
{
    require(bytes, *ix, 4, "u4")?;
    let mut b = [0u8; 4];
    b.copy_from_slice(&bytes[*ix..*ix + 4]);
    *ix += 4;
    Ok(u32::from_le_bytes(b))
}

/// Eight byte little-endian read.
pub(crate) fn read_u8(bytes: &[u8], ix: &mut usize) -> Result<u64, DexError>
{
    require(bytes, *ix, 8, "u8")?;
    let mut b = [0u8; 8];
    b.copy_from_slice(&bytes[*ix..*ix + 8]);
    *ix += 8;
    Ok(u64::from_le_bytes(b))
}

pub(crate) fn read_uleb128(bytes: &[u8], ix: &mut usize) -> Result<u32, DexError>
{
    let tail = bytes.get(*ix..).unwrap_or(&[]);
    let (val, size) = decode_uleb128(tail).map_err(|e| err!(e, "index {}", *ix))?;
    *ix += size;
    Ok(val)
}

pub(crate) fn read_uleb128p1(bytes: &[u8], ix: &mut usize) -> Result<i32, DexError>
{
    let tail = bytes.get(*ix..).unwrap_or(&[]);
    let (val, size) = decode_uleb128p1(tail).map_err(|e| err!(e, "index {}", *ix))?;
    *ix += size;
    Ok(val)
}

pub(crate) fn read_sleb128(bytes: &[u8], ix: &mut usize) -> Result<i32, DexError>
{
    let tail = bytes.get(*ix..).unwrap_or(&[]);
    let (val, size) = decode_sleb128(tail).map_err(|e| err!(e, "index {}", *ix))?;
    *ix += size;
    Ok(val)
}

pub(crate) fn read_x<'a>(bytes: &'a [u8], ix: &mut usize, length: usize) -> Result<&'a [u8], DexError>
{
    require(bytes, *ix, length, "byte array")?;
    let v = &bytes[*ix..*ix + length];
    *ix += length;
    Ok(v)
}

/// Read a `string_data_item`: the uleb128 UTF-16 length followed by NUL-terminated MUTF-8.
pub(crate) fn read_mutf8(bytes: &[u8], ix: &mut usize) -> Result<String, DexError>
{
    let start = *ix;
    let mut cur = start;
    let utf16_size = read_uleb128(bytes, &mut cur)? as usize;
    let data_start = cur;
    let Some(len) = bytes[data_start..].iter().position(|b| *b == 0) else {
        fail!("Unterminated string data at index {}", start);
    };
    let raw = &bytes[data_start..data_start + len];
    let (decoded, units) = match cesu8::from_java_cesu8(raw)
    {
        Ok(s) =>
        {
            let units = s.encode_utf16().count();
            (s.into_owned(), units)
        }
        Err(_) => match decode_mutf8_lossy(raw)
        {
            Some(decoded) => decoded,
            None => fail!("Invalid MUTF-8 string data at index {}", start),
        },
    };
    if units != utf16_size
    {
        fail!(
            "String data at index {} declares {} UTF-16 units but decodes to {}",
            start, utf16_size, units
        );
    }
    *ix = data_start + len + 1;
    Ok(decoded)
}

// Unpaired surrogates are legal in string data but not in a `String`; they become U+FFFD.
// Returns the text and the number of UTF-16 units encoded, or None for ill-formed bytes.
fn decode_mutf8_lossy(raw: &[u8]) -> Option<(String, usize)>
{
    let mut units = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len()
    {
        let lead = raw[i];
        let cont = |k: usize| raw.get(i + k).filter(|b| *b & 0xC0 == 0x80).map(|b| (*b & 0x3F) as u16);
        let (unit, width) = match lead
        {
            0x01..=0x7F => (lead as u16, 1),
            0xC0..=0xDF => (((lead & 0x1F) as u16) << 6 | cont(1)?, 2),
            0xE0..=0xEF => (((lead & 0x0F) as u16) << 12 | cont(1)? << 6 | cont(2)?, 3),
            _ => return None,
        };
        units.push(unit);
        i += width;
    }
    let text = char::decode_utf16(units.iter().copied())
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    Some((text, units.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_width_reads_are_little_endian()
    {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09];
        let mut ix = 0;
        assert_eq!(read_u1(&bytes, &mut ix).unwrap(), 0x01);
        assert_eq!(read_u2(&bytes, &mut ix).unwrap(), 0x0302);
        assert_eq!(read_u4(&bytes, &mut ix).unwrap(), 0x07060504);
        assert_eq!(ix, 7);
        ix = 0;
        assert_eq!(read_u8(&bytes, &mut ix).unwrap(), 0x0807060504030201);
    }

    #[test]
    fn reads_never_pass_the_end()
    {
        let bytes = [0xAA, 0xBB, 0xCC];
        let mut ix = 2;
        let e = read_u2(&bytes, &mut ix).unwrap_err();
        assert_eq!(e.kind(), DexErrorKind::MalformedInput);
        assert_eq!(ix, 2, "cursor must not move on failure");
        assert!(read_u4(&bytes, &mut 0).is_err());
        assert!(read_u8(&bytes, &mut 0).is_err());
        assert!(read_x(&bytes, &mut 1, 3).is_err());
        assert!(read_u1(&bytes, &mut usize::MAX).is_err());
        assert!(read_uleb128(&bytes, &mut 10).is_err());
    }

    #[test]
    fn mutf8_strings()
    {
        // "hi", then the MUTF-8 encoding of U+0000 inside "a\0b"
        let bytes = [0x02, b'h', b'i', 0x00, 0x03, b'a', 0xC0, 0x80, b'b', 0x00];
        let mut ix = 0;
        assert_eq!(read_mutf8(&bytes, &mut ix).unwrap(), "hi");
        assert_eq!(ix, 4);
        assert_eq!(read_mutf8(&bytes, &mut ix).unwrap(), "a\u{0}b");
        assert_eq!(ix, bytes.len());
    }

    #[test]
    fn mutf8_keeps_unpaired_surrogates()
    {
        // lone U+D800
        let lone = [0x01, 0xED, 0xA0, 0x80, 0x00];
        let mut ix = 0;
        assert_eq!(read_mutf8(&lone, &mut ix).unwrap(), "\u{FFFD}");
        assert_eq!(ix, lone.len());

        // lone U+D800, then the pair D83D DE00
        let mixed = [0x03, 0xED, 0xA0, 0x80, 0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80, 0x00];
        assert_eq!(read_mutf8(&mixed, &mut 0).unwrap(), "\u{FFFD}\u{1F600}");

        // the declared length counts raw units, not replacement characters
        let miscounted = [0x02, 0xED, 0xA0, 0x80, 0x00];
        assert_eq!(read_mutf8(&miscounted, &mut 0).unwrap_err().kind(), DexErrorKind::MalformedInput);

        // a truncated three byte sequence is still ill-formed
        let truncated = [0x01, 0xED, 0xA0, 0x00];
        assert!(read_mutf8(&truncated, &mut 0).is_err());
    }

    #[test]
    fn mutf8_rejects_invalid_and_unterminated_data()
    {
        let invalid = [0x01, 0xFF, 0x00];
        assert_eq!(read_mutf8(&invalid, &mut 0).unwrap_err().kind(), DexErrorKind::MalformedInput);

        let unterminated = [0x02, b'h', b'i'];
        assert!(read_mutf8(&unterminated, &mut 0).is_err());

        let wrong_length = [0x05, b'h', b'i', 0x00];
        assert!(read_mutf8(&wrong_length, &mut 0).is_err());
    }
}
