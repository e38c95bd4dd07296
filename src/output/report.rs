use crate::extract::{locator, ExtractMode, Extraction, ExtractRow};

/// Layout settings for the text report
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Width of the `=` and `-` rules
    pub width: usize,

    /// Marker for rows inside the target window (timestamp mode)
    pub target_marker: String,

    /// Inserted before each query match (context mode)
    pub highlight_open: String,

    /// Inserted after each query match (context mode)
    pub highlight_close: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 80,
            target_marker: ">>>".to_string(),
            highlight_open: ">>> ".to_string(),
            highlight_close: " <<<".to_string(),
        }
    }
}

/// Render an extraction as a fixed-width text report
///
/// The output has no trailing newline and depends only on its inputs.
pub fn render(extraction: &Extraction<'_>, options: &RenderOptions) -> String {
    let heavy = "=".repeat(options.width);
    let light = "-".repeat(options.width);

    let mut output = vec![
        heavy.clone(),
        "TRANSCRIPT EXTRACT".to_string(),
        heavy,
        String::new(),
    ];

    let window = extraction.window;
    match &extraction.mode {
        ExtractMode::Timestamp { target } => {
            output.push(format!("Target window: {:.1}s - {:.1}s", target.start, target.end));
            output.push(format!(
                "With {}s padding: {:.1}s - {:.1}s",
                extraction.padding, window.start, window.end
            ));
        }
        ExtractMode::Context { query } => {
            output.push(format!("Searching for: \"{}\"", query));
            output.push(format!("With {}s padding", extraction.padding));
            output.push(format!("Resolved window: {:.1}s - {:.1}s", window.start, window.end));
        }
    }

    output.push(String::new());
    output.push(light.clone());

    for row in &extraction.rows {
        output.push(render_row(row, &extraction.mode, options));
    }

    output.push(light);
    output.join("\n")
}

fn render_row(row: &ExtractRow<'_>, mode: &ExtractMode, options: &RenderOptions) -> String {
    let segment = row.segment;
    let span = format!("[{:>6.1}s - {:>6.1}s]", segment.start, segment.end);
    let text = segment.text.trim();

    match mode {
        ExtractMode::Timestamp { .. } => {
            let marker = if row.highlighted {
                options.target_marker.clone()
            } else {
                " ".repeat(options.target_marker.chars().count())
            };
            format!("{} {} {}", marker, span, text)
        }
        ExtractMode::Context { query } => {
            format!("{} {}", span, highlight(text, query, options))
        }
    }
}

/// Wrap every case-insensitive occurrence of `query` in `text` with the highlight delimiters
///
/// The matched text keeps its original casing.
pub fn highlight(text: &str, query: &str, options: &RenderOptions) -> String {
    let matches = locator::find_all(text, query);
    if matches.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut output = String::with_capacity(text.len() + matches.len() * 8);
    let mut cursor = 0;

    for range in matches {
        output.extend(&chars[cursor..range.start]);
        output.push_str(&options.highlight_open);
        output.extend(&chars[range.clone()]);
        output.push_str(&options.highlight_close);
        cursor = range.end;
    }
    output.extend(&chars[cursor..]);

    output
}
