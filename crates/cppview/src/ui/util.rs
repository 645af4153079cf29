use ratatui::layout::Rect;
use time::{OffsetDateTime, UtcOffset};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Truncates `text` to `max_width` display columns, ending with `…` when
/// anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut truncated = String::new();
    let mut width = 0;
    for character in text.chars() {
        let character_width = character.width().unwrap_or(0);
        if width + character_width > max_width - 1 {
            break;
        }
        truncated.push(character);
        width += character_width;
    }
    truncated.push(ELLIPSIS);

    truncated
}

/// Formats epoch milliseconds as local `YYYY-MM-DD HH:MM`.
pub fn format_timestamp(epoch_millis: u64) -> String {
    let seconds = i64::try_from(epoch_millis / 1000).unwrap_or(i64::MAX);
    let Ok(utc_datetime) = OffsetDateTime::from_unix_timestamp(seconds) else {
        return "Unknown".to_string();
    };
    let local_offset = UtcOffset::local_offset_at(utc_datetime).unwrap_or(UtcOffset::UTC);
    let datetime = utc_datetime.to_offset(local_offset);

    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}",
        datetime.year(),
        u8::from(datetime.month()),
        datetime.day(),
        datetime.hour(),
        datetime.minute()
    )
}

/// Formats a byte count with a binary unit.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut unit_index = 0;
    let mut scaled = bytes;
    while scaled >= 1024 && unit_index < UNITS.len() - 1 {
        scaled /= 1024;
        unit_index += 1;
    }

    format!("{scaled} {}", UNITS[unit_index])
}

/// Returns a rectangle of `width` x `height` centered in `area`, clamped to
/// its bounds.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_with_ellipsis_keeps_short_text() {
        // Arrange
        let text = "foo.h";

        // Act
        let truncated = truncate_with_ellipsis(text, 10);

        // Assert
        assert_eq!(truncated, "foo.h");
    }

    #[test]
    fn test_truncate_with_ellipsis_cuts_long_text() {
        // Arrange
        let text = "include/network/socket.h";

        // Act
        let truncated = truncate_with_ellipsis(text, 8);

        // Assert
        assert_eq!(truncated, "include…");
        assert_eq!(truncated.width(), 8);
    }

    #[test]
    fn test_format_size_picks_unit() {
        // Arrange
        let sizes = [512, 2048, 5 * 1024 * 1024];

        // Act
        let formatted: Vec<String> = sizes.into_iter().map(format_size).collect();

        // Assert
        assert_eq!(formatted, vec!["512 B", "2 KiB", "5 MiB"]);
    }

    #[test]
    fn test_format_timestamp_has_date_and_time() {
        // Arrange
        let epoch_millis = 1_700_000_000_000;

        // Act
        let formatted = format_timestamp(epoch_millis);

        // Assert
        assert_eq!(formatted.len(), "2023-11-14 22:13".len());
        assert!(formatted.starts_with("2023-11-1"));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        // Arrange
        let area = Rect::new(0, 0, 20, 10);

        // Act
        let centered = centered_rect(area, 40, 4);

        // Assert
        assert_eq!(centered, Rect::new(0, 3, 20, 4));
    }
}
