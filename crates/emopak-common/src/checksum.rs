//! 16-bit additive checksum.
//!
//! The device firmware validates an asset image by summing every payload
//! byte and keeping the low 16 bits. The value is stored widened in a 32-bit
//! header field.

/// Compute the checksum of a byte slice.
#[inline]
pub fn sum16(data: &[u8]) -> u16 {
    sum16_with_seed(data, 0)
}

/// Continue a previous checksum computation over more bytes.
///
/// `sum16_with_seed(b, sum16(a)) == sum16(a ++ b)`.
#[inline]
pub fn sum16_with_seed(data: &[u8], seed: u16) -> u16 {
    data.iter()
        .fold(seed, |acc, &byte| acc.wrapping_add(u16::from(byte)))
}

/// Running checksum over data that arrives in pieces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sum16(u16);

impl Sum16 {
    /// Start a new checksum.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add bytes to the checksum.
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.0 = sum16_with_seed(data, self.0);
    }

    /// Current checksum value.
    #[inline]
    pub const fn value(&self) -> u16 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sum() {
        assert_eq!(sum16(&[]), 0);
    }

    #[test]
    fn test_known_sum() {
        assert_eq!(sum16(&[0x01, 0x02, 0xFF, 0xFF]), 513);
    }

    #[test]
    fn test_sum_wraps_at_16_bits() {
        // 300 * 255 = 76500, 76500 mod 65536 = 10964
        let data = vec![0xFFu8; 300];
        assert_eq!(sum16(&data), 10964);
    }

    #[test]
    fn test_running_sum_matches_one_shot() {
        let mut running = Sum16::new();
        running.update(b"hello ");
        running.update(b"world");
        assert_eq!(running.value(), sum16(b"hello world"));
        assert_eq!(sum16_with_seed(b"world", sum16(b"hello ")), sum16(b"hello world"));
    }
}
