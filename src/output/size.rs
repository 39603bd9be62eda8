//! Human-readable byte counts

const SIZE_SUFFIXES: [&str; 9] = ["bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Format a byte count with a 1024-based unit suffix.
///
/// The unit is picked so the number shown stays below 1000 once rounded to
/// `decimals` places, e.g. 1000 bytes is `0.98 KB` rather than `1000.00 bytes`.
pub fn format_size(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return format!("{:.*} {}", decimals, 0.0, SIZE_SUFFIXES[0]);
    }

    // floor(log1024(bytes))
    let mut magnitude = ((63 - bytes.leading_zeros()) / 10) as usize;
    let mut adjusted = bytes as f64 / (1u64 << (magnitude * 10)) as f64;

    if round_to(adjusted, decimals) >= 1000.0 {
        magnitude += 1;
        adjusted /= 1024.0;
    }

    format!("{:.*} {}", decimals, adjusted, SIZE_SUFFIXES[magnitude])
}

fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals.min(15) as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(format_size(0, 2), "0.00 bytes");
        assert_eq!(format_size(0, 0), "0 bytes");
    }

    #[test]
    fn test_bytes_keep_decimals() {
        assert_eq!(format_size(1, 2), "1.00 bytes");
        assert_eq!(format_size(999, 2), "999.00 bytes");
        assert_eq!(format_size(999, 0), "999 bytes");
    }

    #[test]
    fn test_never_shows_four_digits() {
        assert_eq!(format_size(1000, 2), "0.98 KB");
        assert_eq!(format_size(1023, 2), "1.00 KB");
        assert_eq!(format_size(1_048_575, 2), "1.00 MB");
    }

    #[test]
    fn test_unit_boundaries() {
        assert_eq!(format_size(1024, 2), "1.00 KB");
        assert_eq!(format_size(1536, 1), "1.5 KB");
        assert_eq!(format_size(1024 * 1024, 2), "1.00 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024, 2), "5.00 GB");
        assert_eq!(format_size(1u64 << 40, 0), "1 TB");
    }

    #[test]
    fn test_largest_value() {
        assert_eq!(format_size(u64::MAX, 2), "16.00 EB");
    }
}
