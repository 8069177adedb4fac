//! Human-readable byte counts

/// Unit thresholds, largest first. The first threshold strictly exceeded wins.
const UNITS: [(i64, &str); 3] = [(1 << 30, "G"), (1 << 20, "M"), (1 << 10, "K")];

/// Formats a byte count for display
///
/// Sizes below 1024 are printed as the plain integer followed by a space.
/// Larger sizes are divided by the first unit they strictly exceed and printed
/// with two decimals and the unit suffix. A size equal to exactly 1024 exceeds
/// no unit and prints as `"0.00 "`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn human_bytes(size: i64) -> String {
    if size < 1024 {
        return format!("{size} ");
    }

    let (value, suffix) = UNITS
        .iter()
        .find(|(threshold, _)| size > *threshold)
        .map_or((0.0_f32, ""), |(threshold, suffix)| {
            (size as f32 / *threshold as f32, *suffix)
        });

    format!("{value:.2} {suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_sizes_have_no_unit() {
        assert_eq!(human_bytes(0), "0 ");
        assert_eq!(human_bytes(512), "512 ");
        assert_eq!(human_bytes(1023), "1023 ");
    }

    #[test]
    fn test_negative_sizes_print_as_plain_integers() {
        assert_eq!(human_bytes(-1), "-1 ");
    }

    #[test]
    fn test_kibibytes() {
        assert_eq!(human_bytes(1025), "1.00 K");
        assert_eq!(human_bytes(1536), "1.50 K");
        assert_eq!(human_bytes(10 * 1024 + 256), "10.25 K");
    }

    #[test]
    fn test_larger_units() {
        assert_eq!(human_bytes(3 * (1 << 20) + (1 << 19)), "3.50 M");
        assert_eq!(human_bytes(5 * (1 << 30)), "5.00 G");
    }

    #[test]
    fn test_exact_kibibyte_exceeds_no_unit() {
        assert_eq!(human_bytes(1 << 10), "0.00 ");
    }

    #[test]
    fn test_exact_unit_boundaries_fall_to_smaller_unit() {
        assert_eq!(human_bytes(1 << 20), "1024.00 K");
        assert_eq!(human_bytes(1 << 30), "1024.00 M");
    }
}
