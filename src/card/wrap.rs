//! Greedy line-fill for the message body.

/// Appended to the last drawn line when the message runs past the card.
pub const TRUNCATION_MARKER: &str = "...";

/// Where message lines may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapBounds {
    /// Widest a line may measure before it wraps.
    pub max_width: u32,
    pub first_baseline: i32,
    pub line_height: i32,
    /// Once the cursor moves past this baseline the message is truncated.
    pub last_baseline: i32,
}

/// One committed line of the message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutLine {
    pub text: String,
    pub baseline: i32,
}

/// Result of wrapping a message into [`WrapBounds`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLayout {
    pub lines: Vec<LayoutLine>,
    pub truncated: bool,
}

impl MessageLayout {
    /// Baseline of the lowest line, if any line was produced.
    pub fn last_baseline(&self) -> Option<i32> {
        self.lines.last().map(|line| line.baseline)
    }
}

/// Fill lines greedily, measuring each candidate with `measure`.
///
/// Every word is tried against the current line followed by a space. A word
/// that does not fit starts the next line, unless the line is still empty, in
/// which case the word is kept even if it overflows horizontally. When moving
/// to a new line would pass `last_baseline`, the pending line is drawn with
/// [`TRUNCATION_MARKER`] and the rest of the message is dropped.
pub fn wrap_message<F>(message: &str, bounds: &WrapBounds, measure: F) -> MessageLayout
where
    F: Fn(&str) -> u32,
{
    let mut layout = MessageLayout::default();
    let mut line = String::new();
    let mut y = bounds.first_baseline;

    for word in message.split_whitespace() {
        let candidate = format!("{line}{word} ");
        if measure(&candidate) > bounds.max_width && !line.is_empty() {
            layout.lines.push(LayoutLine {
                text: line.trim().to_string(),
                baseline: y,
            });
            line = format!("{word} ");
            y += bounds.line_height;

            if y > bounds.last_baseline {
                layout.lines.push(LayoutLine {
                    text: format!("{}{}", line.trim(), TRUNCATION_MARKER),
                    baseline: y,
                });
                layout.truncated = true;
                return layout;
            }
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() {
        layout.lines.push(LayoutLine {
            text: line.trim().to_string(),
            baseline: y,
        });
    }
    layout
}
