use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::extract::Extraction;

pub mod report;

pub use report::{render, RenderOptions};

/// Format an extraction in the requested output format
pub fn format_extraction(
    extraction: &Extraction<'_>,
    format: &OutputFormat,
    options: &RenderOptions,
) -> Result<String> {
    let content = match format {
        OutputFormat::Text => render(extraction, options),
        OutputFormat::Json => {
            serde_json::to_string_pretty(extraction).context("Failed to serialize extraction")?
        }
    };

    Ok(content)
}

/// Save formatted content to file
pub async fn save_to_file(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }

    fs_err::write(path, content)?;
    tracing::info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Save formatted content under a generated, timestamped filename in `dir`
pub async fn save_with_generated_name(content: &str, dir: &Path, format: &OutputFormat) -> Result<PathBuf> {
    let filename = crate::utils::generate_unique_filename("transcript_extract", format.extension());
    let path = dir.join(filename);
    save_to_file(content, &path).await?;
    Ok(path)
}

/// Print formatted content to console
pub fn print_to_console(content: &str) {
    println!("{}", content);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract;
    use crate::transcript::{Segment, Transcript};

    fn transcript() -> Transcript {
        Transcript::from_segments(vec![
            Segment::new(0.0, 4.0, "First line "),
            Segment::new(4.0, 8.0, "second line"),
        ])
    }

    #[test]
    fn test_format_text_matches_render() {
        let transcript = transcript();
        let extraction = extract::by_timestamp(&transcript, 0.0, 4.0, 0).unwrap();
        let options = RenderOptions::default();

        let content = format_extraction(&extraction, &OutputFormat::Text, &options).unwrap();
        assert_eq!(content, render(&extraction, &options));
    }

    #[test]
    fn test_format_json() {
        let transcript = transcript();
        let extraction = extract::by_context(&transcript, "second", 0).unwrap();

        let content = format_extraction(&extraction, &OutputFormat::Json, &RenderOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["mode"], "context");
        assert_eq!(value["query"], "second");
        assert_eq!(value["rows"][1]["highlighted"], true);
    }

    #[tokio::test]
    async fn test_save_to_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("extract.txt");

        save_to_file("hello", &path).await.unwrap();
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_save_with_generated_name() {
        let dir = tempfile::tempdir().unwrap();

        let path = save_with_generated_name("report", dir.path(), &OutputFormat::Text).await.unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("transcript_extract_"));
        assert!(name.ends_with(".txt"));
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "report");
    }
}
