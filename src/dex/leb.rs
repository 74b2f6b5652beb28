use crate::dex::error::DexError;

// DEX LEB128 values are at most 32 bits wide, so valid encodings never exceed 5 bytes.
const MAX_LEB128_LEN: usize = 5;

/// Decode an unsigned LEB128 value, returning the value and the number of bytes consumed.
pub(crate) fn decode_uleb128(encoded: &[u8]) -> Result<(u32, usize), DexError> {
    let mut value: u32 = 0;
    let mut shift: u32 = 0;

    for (count, &byte) in encoded.iter().take(MAX_LEB128_LEN).enumerate() {
        let low = (byte & 0x7F) as u32;
        if count == MAX_LEB128_LEN - 1 && low > 0x0F {
            fail!("uleb128 value overflows 32 bits");
        }
        value |= low << shift;
        if byte & 0x80 == 0 {
            return Ok((value, count + 1));
        }
        shift += 7;
    }

    if encoded.len() < MAX_LEB128_LEN {
        fail!("Unexpected end of stream reading uleb128");
    }
    fail!("uleb128 longer than 5 bytes")
}

/// Decode a signed LEB128 value, returning the value and the number of bytes consumed.
pub(crate) fn decode_sleb128(encoded: &[u8]) -> Result<(i32, usize), DexError> {
    let mut value: i32 = 0;
    let mut shift: u32 = 0;

    for (count, &byte) in encoded.iter().take(MAX_LEB128_LEN).enumerate() {
        let low = (byte & 0x7F) as i32;
        value |= low.wrapping_shl(shift);
        shift += 7;
        if byte & 0x80 == 0 {
            // Sign-extend if needed and we didn't fill all 32 bits
            if (byte & 0x40) != 0 && shift < 32 {
                value |= (-1i32).wrapping_shl(shift);
            }
            return Ok((value, count + 1));
        }
    }

    if encoded.len() < MAX_LEB128_LEN {
        fail!("Unexpected end of stream reading sleb128");
    }
    fail!("sleb128 longer than 5 bytes")
}

/// `uleb128p1`: the encoded value minus one, so that `-1` (NO_INDEX) fits in one byte.
pub(crate) fn decode_uleb128p1(encoded: &[u8]) -> Result<(i32, usize), DexError> {
    let (v, c) = decode_uleb128(encoded)?;
    Ok((v.wrapping_sub(1) as i32, c))
}

#[cfg(test)]
pub(crate) fn encode_uleb128(value: u32) -> Vec<u8> {
    let mut result = Vec::new();
    let mut remaining = value;

    loop {
        let mut byte = (remaining & 0x7F) as u8;
        remaining >>= 7;
        if remaining != 0 {
            byte |= 0x80;
        }
        result.push(byte);
        if remaining == 0 {
            break;
        }
    }

    result
}

#[cfg(test)]
pub(crate) fn encode_sleb128(value: i32) -> Vec<u8> {
    let mut result = Vec::new();
    let mut remaining = value;

    loop {
        let mut byte = (remaining & 0x7F) as u8;
        remaining >>= 7;

        let is_more =
            !((remaining == 0 && (byte & 0x40) == 0) || (remaining == -1 && (byte & 0x40) != 0));
        if is_more {
            byte |= 0x80;
        }

        result.push(byte);

        if !is_more {
            break;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::error::DexErrorKind;

    #[test]
    fn test_encode_uleb128() {
        let cases = vec![
            (0, vec![0x00]),
            (1, vec![0x01]),
            (127, vec![0x7F]),
            (128, vec![0x80, 0x01]),
            (16256, vec![0x80, 0x7F]),
            (624485, vec![0xE5, 0x8E, 0x26]),
        ];

        for (value, expected) in cases {
            assert_eq!(encode_uleb128(value), expected);
        }
    }

    #[test]
    fn test_decode_uleb128() {
        let cases = vec![
            (vec![0x00], 0, 1),
            (vec![0x01], 1, 1),
            (vec![0x7F], 127, 1),
            (vec![0x80, 0x01], 128, 2),
            (vec![0x80, 0x7F], 16256, 2),
            (vec![0xE5, 0x8E, 0x26], 624485, 3),
            (vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F], u32::MAX, 5),
        ];

        for (encoded, expected, len) in cases {
            assert_eq!(decode_uleb128(&encoded).unwrap(), (expected, len));
        }
    }

    #[test]
    fn test_decode_uleb128_stops_at_terminator() {
        let (v, c) = decode_uleb128(&[0x05, 0xFF, 0xFF]).unwrap();
        assert_eq!((v, c), (5, 1));
    }

    #[test]
    fn test_decode_uleb128_truncated() {
        let e = decode_uleb128(&[0x80, 0x80]).unwrap_err();
        assert_eq!(e.kind(), DexErrorKind::MalformedInput);
        assert!(decode_uleb128(&[]).is_err());
    }

    #[test]
    fn test_decode_uleb128_too_long() {
        assert!(decode_uleb128(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01]).is_err());
        assert!(decode_uleb128(&[0xFF, 0xFF, 0xFF, 0xFF, 0x1F]).is_err());
    }

    #[test]
    fn test_encode_sleb128() {
        let cases = vec![
            (0, vec![0x00]),
            (1, vec![0x01]),
            (-1, vec![0x7F]),
            (-123456, vec![0xC0, 0xBB, 0x78]),
            (-128, vec![0x80, 0x7F]),
        ];

        for (value, expected) in cases {
            assert_eq!(encode_sleb128(value), expected);
        }
    }

    #[test]
    fn test_decode_sleb128() {
        let cases = vec![
            (vec![0x00], 0),
            (vec![0x01], 1),
            (vec![0x7F], -1),
            (vec![0xFF, 0x00], 127),
            (vec![0x80, 0x7F], -128),
            (vec![0xC0, 0xBB, 0x78], -123456),
        ];

        for (encoded, expected) in cases {
            let (v, _) = decode_sleb128(&encoded).unwrap();
            assert_eq!(v, expected);
        }
    }

    #[test]
    fn test_decode_uleb128p1() {
        assert_eq!(decode_uleb128p1(&[0x00]).unwrap(), (-1, 1));
        assert_eq!(decode_uleb128p1(&[0x05]).unwrap(), (4, 1));
    }
}
