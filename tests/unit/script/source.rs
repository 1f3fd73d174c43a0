use std::cell::RefCell;

use super::*;

struct Canned(ReelResult<String>);

impl TextGenerator for Canned {
    fn generate(&self, _prompt: &str) -> ReelResult<String> {
        match &self.0 {
            Ok(s) => Ok(s.clone()),
            Err(e) => Err(ReelError::service(e.to_string())),
        }
    }
}

#[derive(Default)]
struct Recording(RefCell<Vec<String>>);

impl TextGenerator for Recording {
    fn generate(&self, prompt: &str) -> ReelResult<String> {
        self.0.borrow_mut().push(prompt.to_owned());
        Ok("One.\nTwo.".to_owned())
    }
}

#[test]
fn script_line_rejects_blank_and_trims() {
    assert!(ScriptLine::new("   ").is_err());
    assert_eq!(ScriptLine::new("  hi there \n").unwrap().text(), "hi there");
    assert!(Script::new(Vec::new()).is_err());
}

#[test]
fn response_lines_are_trimmed_and_blank_lines_dropped() {
    let script = parse_script_response("A.\n\n  B.  \n\nC.\n").unwrap();
    let texts: Vec<_> = script.lines().iter().map(ScriptLine::text).collect();
    assert_eq!(texts, vec!["A.", "B.", "C."]);
}

#[test]
fn generated_script_preserves_order() {
    let g = Canned(Ok("First line.\nSecond line.\nThird line.".to_owned()));
    let out = ScriptSource::new(&g).generate("tides", 60.0);
    assert!(!out.is_fallback());
    assert_eq!(out.value().len(), 3);
    assert_eq!(out.value().lines()[1].text(), "Second line.");
}

#[test]
fn generator_failure_uses_four_line_template() {
    let g = Canned(Err(ReelError::service("quota exceeded")));
    let out = ScriptSource::new(&g).generate("gravity", 60.0);
    assert!(out.is_fallback());
    assert!(out.reason().unwrap().contains("quota exceeded"));

    let script = out.into_value();
    assert_eq!(script.len(), 4);
    assert_eq!(
        script.lines()[0].text(),
        "Here's an interesting quote about gravity."
    );
    assert_eq!(
        script.lines()[3].text(),
        "What can we learn from their insights?"
    );
}

#[test]
fn whitespace_only_response_is_a_failure() {
    let g = Canned(Ok(" \n\n \t\n".to_owned()));
    let out = ScriptSource::new(&g).generate("x", 30.0);
    assert!(out.is_fallback());
    assert_eq!(out.value().len(), 4);
}

#[test]
fn prompt_mentions_topic_and_target_length() {
    let g = Recording::default();
    ScriptSource::new(&g).generate("the US Open", 45.0);
    let prompts = g.0.borrow();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("45-second"));
    assert!(prompts[0].contains("about the US Open"));
    assert!(prompts[0].contains("Don't use any labels"));
}

#[test]
fn numbered_text_separates_entries_with_blank_lines() {
    let script = Script::from_texts(["Alpha.", "", "Beta."]).unwrap();
    assert_eq!(script.full_text(), "Alpha. Beta.");
    assert_eq!(script.to_numbered_text(), "1. Alpha.\n\n2. Beta.");

    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("out/script.txt");
    script.write_numbered(&p).unwrap();
    assert_eq!(std::fs::read_to_string(&p).unwrap(), "1. Alpha.\n\n2. Beta.");
}
