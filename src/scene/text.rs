//! Caption word-wrapping and placement.

use crate::foundation::core::Canvas;

/// Measures the rendered advance width of a single line of text, in pixels.
pub trait TextMeasure {
    fn measure(&mut self, text: &str) -> f32;
}

/// Greedy word wrap.
///
/// Words are appended to the current line while the measured width of the candidate line stays
/// strictly below `max_width`; otherwise the current line is closed and the word starts a new
/// one. A word that is wider than `max_width` on its own still gets its own line.
pub fn wrap_words(text: &str, max_width: f32, measure: &mut dyn TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push(word);
            continue;
        }
        let mut candidate = current.join(" ");
        candidate.push(' ');
        candidate.push_str(word);
        if measure.measure(&candidate) < max_width {
            current.push(word);
        } else {
            lines.push(current.join(" "));
            current.clear();
            current.push(word);
        }
    }
    if !current.is_empty() {
        lines.push(current.join(" "));
    }
    lines
}

/// One wrapped caption line and its top-left drawing origin.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedLine {
    pub text: String,
    pub x: f32,
    /// Top of the line box.
    pub y: f32,
    pub width: f32,
}

/// Wrapped caption block, vertically centred as a whole on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionLayout {
    pub lines: Vec<PositionedLine>,
    pub line_height: f32,
}

impl CaptionLayout {
    pub fn block_height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }
}

/// Geometry inputs for [`layout_caption`].
#[derive(Clone, Copy, Debug)]
pub struct CaptionMetrics {
    pub canvas: Canvas,
    pub line_height: f32,
    pub max_width: f32,
}

/// Wrap `text` and position every line.
///
/// The block starts at `floor((height - lines * line_height) / 2)`; each line is centred
/// horizontally at `floor((width - line_width) / 2)` and the next line starts `line_height`
/// below.
pub fn layout_caption(
    text: &str,
    metrics: CaptionMetrics,
    measure: &mut dyn TextMeasure,
) -> CaptionLayout {
    let wrapped = wrap_words(text, metrics.max_width, measure);
    let canvas_w = metrics.canvas.width as f32;
    let canvas_h = metrics.canvas.height as f32;

    let block_h = wrapped.len() as f32 * metrics.line_height;
    let mut y = ((canvas_h - block_h) / 2.0).floor();

    let mut lines = Vec::with_capacity(wrapped.len());
    for text in wrapped {
        let width = measure.measure(&text);
        let x = ((canvas_w - width) / 2.0).floor();
        lines.push(PositionedLine { text, x, y, width });
        y += metrics.line_height;
    }

    CaptionLayout {
        lines,
        line_height: metrics.line_height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/text.rs"]
mod tests;
