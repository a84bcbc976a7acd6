use impact_diff::{diff_lines, modified_text, original_text, split_lines, LineKind};
use pretty_assertions::assert_eq;

const SAMPLES: &[&str] = &[
    "",
    "a",
    "a\n",
    "a\nb\nc",
    "a\nb\nX\nc",
    "1\n2\n3",
    "1\n3",
    "x\nx\nx",
    "x\ny\nx\ny",
    "package a.b;\n\npublic class C {\n    void run() {}\n}\n",
    "package a.b;\n\npublic class C {\n    int run() { return 1; }\n    void stop() {}\n}\n",
    "\n\n\n",
];

#[test]
fn identical_texts_are_all_unchanged() {
    for text in SAMPLES {
        let lines = diff_lines(Some(text), Some(text));
        assert!(lines.iter().all(|l| l.kind == LineKind::Unchanged));
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, split_lines(Some(text)));
    }
}

#[test]
fn both_texts_can_be_reconstructed() {
    for original in SAMPLES {
        for modified in SAMPLES {
            let lines = diff_lines(Some(original), Some(modified));
            assert_eq!(&original_text(&lines), original);
            assert_eq!(&modified_text(&lines), modified);
        }
    }
}

#[test]
fn repeated_invocations_are_identical() {
    let first = diff_lines(Some(SAMPLES[9]), Some(SAMPLES[10]));
    let second = diff_lines(Some(SAMPLES[9]), Some(SAMPLES[10]));
    assert_eq!(first, second);
}
