//! UTF-16 encoding of code points

/// Encode a code point as UTF-16 code units
///
/// Code points above the BMP become a high/low surrogate pair. Values in the
/// BMP, lone surrogates included, are passed through as a single unit.
pub fn encode_code_point(code_point: u32) -> Vec<u16> {
    if code_point <= 0xFFFF {
        vec![code_point as u16]
    } else {
        let offset = code_point - 0x10000;
        vec![(offset / 0x400 + 0xD800) as u16, (offset % 0x400 + 0xDC00) as u16]
    }
}

/// Encode a sequence of code points as UTF-16 code units
pub fn encode_code_points<I>(code_points: I) -> Vec<u16>
where
    I: IntoIterator<Item = u32>,
{
    code_points.into_iter().flat_map(encode_code_point).collect()
}
