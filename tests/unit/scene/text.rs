use super::*;

/// Every character is `px` wide.
struct FixedWidth(f32);

impl TextMeasure for FixedWidth {
    fn measure(&mut self, text: &str) -> f32 {
        text.chars().count() as f32 * self.0
    }
}

fn metrics(width: u32, height: u32, font_size: f32, margin: u32) -> CaptionMetrics {
    CaptionMetrics {
        canvas: Canvas { width, height },
        line_height: font_size * 1.5,
        max_width: (width - 2 * margin) as f32,
    }
}

#[test]
fn forty_short_words_wrap_into_seven_lines() {
    let text = vec!["word"; 40].join(" ");
    let m = metrics(400, 800, 20.0, 50);
    let layout = layout_caption(&text, m, &mut FixedWidth(10.0));

    // "word" * 6 joined is 29 chars (290 px < 300); a seventh word would make 34.
    assert_eq!(layout.lines.len(), 7);
    assert!(layout.lines.iter().all(|l| l.width < 300.0));

    let expected_y0 = ((800.0 - 7.0 * 20.0 * 1.5) / 2.0_f32).floor();
    assert_eq!(layout.lines[0].y, expected_y0);
    assert_eq!(layout.lines[1].y, expected_y0 + 30.0);
    assert_eq!(layout.block_height(), 7.0 * 30.0);
}

#[test]
fn lines_are_centred_horizontally() {
    let m = metrics(400, 800, 20.0, 50);
    let layout = layout_caption("abc", m, &mut FixedWidth(10.0));
    assert_eq!(layout.lines.len(), 1);
    assert_eq!(layout.lines[0].x, ((400.0 - 30.0) / 2.0_f32).floor());
}

#[test]
fn wrapping_is_strictly_below_the_limit() {
    // "aa bb" measures exactly 50: equal to the limit, so it must break.
    let lines = wrap_words("aa bb", 50.0, &mut FixedWidth(10.0));
    assert_eq!(lines, vec!["aa", "bb"]);
}

#[test]
fn overlong_word_gets_its_own_line() {
    let lines = wrap_words(
        "hi incomprehensibilities ok",
        100.0,
        &mut FixedWidth(10.0),
    );
    assert_eq!(lines, vec!["hi", "incomprehensibilities", "ok"]);
}

#[test]
fn layout_is_idempotent() {
    let m = metrics(1080, 1920, 50.0, 50);
    let text = "Gravity is the quiet force that keeps your feet on the ground and the moon in orbit.";
    let a = layout_caption(text, m, &mut FixedWidth(23.0));
    let b = layout_caption(text, m, &mut FixedWidth(23.0));
    assert_eq!(a, b);
}

#[test]
fn rewrapping_wrapped_lines_keeps_the_breaks() {
    let text = "Gravity is the quiet force that keeps your feet on the ground and the moon in \
                orbit while incomprehensibilities drift past";
    let max = 300.0;
    let lines = wrap_words(text, max, &mut FixedWidth(10.0));
    assert!(lines.len() > 3);

    for line in &lines {
        assert_eq!(wrap_words(line, max, &mut FixedWidth(10.0)), vec![line.clone()]);
    }
    assert_eq!(wrap_words(&lines.join(" "), max, &mut FixedWidth(10.0)), lines);
}

#[test]
fn empty_text_has_no_lines() {
    let m = metrics(400, 800, 20.0, 50);
    assert!(layout_caption("  ", m, &mut FixedWidth(10.0)).lines.is_empty());
}
