use std::fmt;
use num_enum::TryFromPrimitive;

/// CRC-32 (IEEE polynomial, the zlib one) over a byte range.
#[inline]
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Compare a carried checksum with a freshly computed one.
/// Returns the pair back on mismatch so the caller can build its own error.
#[inline]
pub fn verify_checksum(expected: u32, actual: u32) -> Result<(), (u32, u32)> {
    if expected == actual {
        Ok(())
    } else {
        Err((expected, actual))
    }
}

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc32_matches_zlib_check_value() {
        // Standard CRC-32 check value for "123456789".
        assert_eq!(compute_checksum(b"123456789"), 0xCBF4_3926);
        assert_eq!(compute_checksum(b""), 0);
    }

    #[test]
    fn verify_checksum_reports_both_values() {
        assert!(verify_checksum(7, 7).is_ok());
        assert_eq!(verify_checksum(7, 9), Err((7, 9)));
    }
}
