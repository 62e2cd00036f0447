//! Text status output, one line per counter value.

/// Destination for status lines; the firmware forwards them to the RTT log.
pub trait StatusSink {
    fn emit(&mut self, line: &str);
}

/// Longest line `format_status` produces: three digits, a space and `\r`.
pub const STATUS_LINE_LEN: usize = 5;

/// Renders `value` right-aligned in three columns followed by `" \r"`.
pub fn format_status(value: u8, buf: &mut [u8; STATUS_LINE_LEN]) -> &str {
    // Five bytes always hold a u8 in three columns plus the suffix.
    format_no_std::show(buf, format_args!("{:>3} \r", value)).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_three_columns() {
        let mut buf = [0; STATUS_LINE_LEN];
        assert_eq!(format_status(5, &mut buf), "  5 \r");
        assert_eq!(format_status(42, &mut buf), " 42 \r");
        assert_eq!(format_status(255, &mut buf), "255 \r");
    }
}
