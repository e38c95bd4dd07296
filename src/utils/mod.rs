use anyhow::Result;
use std::path::Path;

/// Format duration in human-readable format
pub fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Format seconds as a `HH:MM:SS` or `MM:SS` clock, the same shapes the timestamp parser accepts
pub fn format_clock(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Sanitize filename for safe filesystem usage
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            match c {
                // Keep alphanumeric characters, spaces, hyphens, underscores, and dots
                c if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' || c == '.' => c,
                // Replace everything else with underscore
                _ => '_',
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Check if a file exists and is readable
pub fn check_file_accessible(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }

    if !path.is_file() {
        anyhow::bail!("Path is not a file: {}", path.display());
    }

    fs_err::metadata(path)
        .map_err(|e| anyhow::anyhow!("Cannot access file {}: {}", path.display(), e))?;

    Ok(())
}

/// Generate a unique filename with timestamp
pub fn generate_unique_filename(base_name: &str, extension: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let random_suffix = uuid::Uuid::new_v4().to_string()[..8].to_string();

    format!(
        "{}_{}_{}.{}",
        sanitize_filename(base_name),
        timestamp,
        random_suffix,
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30.0), "30s");
        assert_eq!(format_duration(90.0), "1m 30s");
        assert_eq!(format_duration(3661.0), "1h 1m 1s");
        assert_eq!(format_duration(-5.0), "0s");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(90.0), "1:30");
        assert_eq!(format_clock(3723.0), "1:02:03");
        assert_eq!(format_clock(5.9), "0:05");
    }

    #[test]
    fn test_format_clock_parses_back() {
        for seconds in [0.0, 59.0, 90.0, 3599.0, 3723.0] {
            let clock = format_clock(seconds);
            assert_eq!(crate::extract::parse_timestamp(&clock), Ok(seconds));
        }
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Hello World!"), "Hello World_");
        assert_eq!(sanitize_filename("test/file?name"), "test_file_name");
        assert_eq!(sanitize_filename("  spaced  "), "spaced");
    }

    #[test]
    fn test_check_file_accessible() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(check_file_accessible(file.path()).is_ok());

        let dir = tempfile::tempdir().unwrap();
        assert!(check_file_accessible(dir.path()).is_err());
        assert!(check_file_accessible(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_generate_unique_filename() {
        let first = generate_unique_filename("transcript_extract", "txt");
        let second = generate_unique_filename("transcript_extract", "txt");

        assert!(first.starts_with("transcript_extract_"));
        assert!(first.ends_with(".txt"));
        assert_ne!(first, second);
    }
}
