pub const SINGLE_SEGMENT_CHARS: usize = 160;
pub const DOUBLE_SEGMENT_CHARS: usize = 306;
pub const CONCATENATED_SEGMENT_CHARS: usize = 153;

pub const DEFAULT_COST_PER_SEGMENT: f64 = 0.05;

/// Message length in UTF-16 code units.
pub fn message_length(message: &str) -> usize {
    message.encode_utf16().count()
}

pub fn page_count(message: &str) -> u32 {
    pages_for_length(message_length(message))
}

fn pages_for_length(length: usize) -> u32 {
    if length <= SINGLE_SEGMENT_CHARS {
        return 1;
    }
    if length <= DOUBLE_SEGMENT_CHARS {
        return 2;
    }
    length.div_ceil(CONCATENATED_SEGMENT_CHARS) as u32
}

pub fn estimate_cost(pages: u32, recipients: usize, cost_per_segment: f64) -> f64 {
    f64::from(pages) * recipients as f64 * cost_per_segment
}

#[cfg(test)]
mod tests {
    use super::{estimate_cost, message_length, page_count};

    fn message_of(len: usize) -> String {
        "a".repeat(len)
    }

    #[test]
    fn page_count_thresholds() {
        assert_eq!(page_count(""), 1);
        assert_eq!(page_count(&message_of(160)), 1);
        assert_eq!(page_count(&message_of(161)), 2);
        assert_eq!(page_count(&message_of(306)), 2);
        assert_eq!(page_count(&message_of(307)), 3);
        assert_eq!(page_count(&message_of(459)), 3);
        assert_eq!(page_count(&message_of(460)), 4);
    }

    #[test]
    fn length_counts_utf16_units() {
        assert_eq!(message_length("héllo"), 5);
        assert_eq!(message_length("👋"), 2);
    }

    #[test]
    fn cost_scales_with_pages_and_recipients() {
        let cost = estimate_cost(2, 10, 0.05);
        assert!((cost - 1.0).abs() < f64::EPSILON);
        assert_eq!(estimate_cost(3, 0, 0.05), 0.0);
    }
}
