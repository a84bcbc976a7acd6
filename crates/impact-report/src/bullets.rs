//! Splitting free-form reasoning text into displayable bullets

use regex::Regex;
use std::sync::OnceLock;

fn numbered_regex() -> &'static Regex {
    static NUMBERED: OnceLock<Regex> = OnceLock::new();
    // "1. step" or "2) step"
    NUMBERED.get_or_init(|| Regex::new(r"^\s*\d+[.)]").unwrap())
}

fn bullet_regex() -> &'static Regex {
    static BULLET: OnceLock<Regex> = OnceLock::new();
    BULLET.get_or_init(|| Regex::new(r"^[-*·]\s+").unwrap())
}

fn sentence_end_regex() -> &'static Regex {
    static SENTENCE_END: OnceLock<Regex> = OnceLock::new();
    SENTENCE_END.get_or_init(|| Regex::new(r"[.!?]\s+").unwrap())
}

/// Split reasoning text into bullets.
///
/// Tried in order:
/// 1. numbered sections (`1.` / `2)`), numbering kept, one bullet per section
/// 2. `-`, `*` or `·` bullets, with continuation lines appended to the previous bullet
/// 3. sentences
///
/// Blank text yields no bullets.
pub fn reasoning_bullets(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let numbered = numbered_sections(&normalized);
    if !numbered.is_empty() {
        return numbered;
    }

    let bullets = dash_bullets(&normalized);
    if !bullets.is_empty() {
        return bullets;
    }

    let sentences = split_sentences(&normalized);
    if sentences.is_empty() {
        vec![text.trim().to_string()]
    } else {
        sentences
    }
}

/// The first `n` sentences of `text`, joined by a single space.
///
/// Empty when the text has no sentences.
pub fn first_sentences(text: &str, n: usize) -> String {
    split_sentences(text)
        .into_iter()
        .take(n)
        .collect::<Vec<_>>()
        .join(" ")
}

fn numbered_sections(text: &str) -> Vec<String> {
    let re = numbered_regex();
    if !text.lines().any(|line| re.is_match(line)) {
        return Vec::new();
    }

    let mut sections: Vec<String> = vec![String::new()];
    for line in text.lines() {
        if re.is_match(line) {
            sections.push(line.to_string());
        } else if let Some(current) = sections.last_mut() {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }

    sections
        .into_iter()
        .map(|section| section.trim().to_string())
        .filter(|section| !section.is_empty())
        .collect()
}

fn dash_bullets(text: &str) -> Vec<String> {
    let re = bullet_regex();
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if !lines.iter().any(|line| re.is_match(line)) {
        return Vec::new();
    }

    let mut bullets: Vec<String> = Vec::new();
    // Lines seen before the first bullet
    let mut preamble: Vec<&str> = Vec::new();

    for line in lines {
        if let Some(marker) = re.find(line) {
            if !preamble.is_empty() {
                bullets.push(preamble.join(" "));
                preamble.clear();
            }
            bullets.push(line[marker.end()..].trim().to_string());
        } else if let Some(last) = bullets.last_mut() {
            last.push(' ');
            last.push_str(line);
        } else {
            preamble.push(line);
        }
    }

    bullets
}

fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for end in sentence_end_regex().find_iter(text) {
        // keep the punctuation, drop the whitespace
        let cut = end.start() + 1;
        sentences.push(&text[start..cut]);
        start = end.end();
    }
    sentences.push(&text[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
