use chrono::{DateTime, Utc};

/// Format a duration in milliseconds for humans: `850ms`, `2.5s`, `1.2m`, `3.0h`.
pub fn format_duration(ms: u64) -> String {
  match ms {
    0..1_000 => format!("{ms}ms"),
    1_000..60_000 => format!("{:.1}s", ms as f64 / 1_000.0),
    60_000..3_600_000 => format!("{:.1}m", ms as f64 / 60_000.0),
    _ => format!("{:.1}h", ms as f64 / 3_600_000.0),
  }
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS`, or `N/A` when absent.
pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
  timestamp
    .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
    .unwrap_or_else(|| "N/A".to_string())
}

/// Shorten text longer than `width` characters, ending it with `...`.
pub fn truncate(text: &str, width: usize) -> String {
  if text.chars().count() <= width {
    return text.to_string();
  }
  let kept: String = text.chars().take(width.saturating_sub(3)).collect();
  format!("{kept}...")
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn test_format_duration() {
    assert_eq!(format_duration(0), "0ms");
    assert_eq!(format_duration(999), "999ms");
    assert_eq!(format_duration(1_000), "1.0s");
    assert_eq!(format_duration(2_500), "2.5s");
    assert_eq!(format_duration(59_000), "59.0s");
    assert_eq!(format_duration(90_000), "1.5m");
    assert_eq!(format_duration(3_600_000), "1.0h");
    assert_eq!(format_duration(9_000_000), "2.5h");
  }

  #[test]
  fn test_format_timestamp() {
    let ts = Utc.with_ymd_and_hms(2025, 3, 1, 9, 5, 7).unwrap()
      + chrono::Duration::milliseconds(431);
    assert_eq!(format_timestamp(Some(ts)), "2025-03-01 09:05:07");
    assert_eq!(format_timestamp(None), "N/A");
  }

  #[test]
  fn test_truncate() {
    assert_eq!(truncate("short", 12), "short");
    assert_eq!(truncate("exactly12chr", 12), "exactly12chr");
    assert_eq!(truncate("0123456789abcdef", 12), "012345678...");
    assert_eq!(truncate("äöüäöüäöüäöüäöü", 6), "äöü...");
  }
}
