//! Cleanup of model responses before parsing.
//!
//! LLM output regularly arrives wrapped in Markdown fences, with UTF-8 text that was decoded
//! as Windows-1252 somewhere upstream (`Ã—` instead of `×`), non-breaking and zero-width
//! spaces, and stray control characters.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// UTF-8 sequences that were mis-decoded as Windows-1252, with their intended text.
const MOJIBAKE_FIXES: &[(&str, &str)] = &[
    ("Ã—", "×"),
    ("â€™", "'"),
    ("â€˜", "'"),
    ("â€œ", "\""),
    ("â€\u{9d}", "\""),
    ("â€“", "\u{2013}"),
    ("â€”", "\u{2014}"),
    ("â„¢", "\u{2122}"),
    ("Â©", "\u{a9}"),
    ("Â®", "\u{ae}"),
    ("Â\u{a0}", " "),
];

static INVISIBLE_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{200b}\u{200c}\u{200d}\u{feff}\x00-\x08\x0b\x0c\x0e-\x1f\x7f]")
        .expect("Invisible character regex pattern is valid and should compile")
});
static NBSP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\u{a0}").expect("NBSP regex pattern is valid and should compile"));
static REPEATED_SPACES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" {2,}").expect("Repeated spaces regex pattern is valid and should compile"));
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json|JSON)?").expect("Code fence regex pattern is valid and should compile"));

fn fix_mojibake(text: &str) -> Cow<'_, str> {
    let mut result = Cow::Borrowed(text);
    for (broken, fixed) in MOJIBAKE_FIXES {
        if result.contains(broken) {
            result = Cow::Owned(result.replace(broken, fixed));
        }
    }
    result
}

fn replace_if_matches<'a>(text: Cow<'a, str>, pattern: &Regex, replacement: &str) -> Cow<'a, str> {
    if pattern.is_match(&text) {
        Cow::Owned(pattern.replace_all(&text, replacement).into_owned())
    } else {
        text
    }
}

/// Clean a single extracted string: repair mojibake, turn non-breaking spaces into spaces,
/// drop zero-width and control characters (newlines and tabs survive), collapse runs of
/// spaces and trim.
pub fn sanitize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut working = fix_mojibake(text);
    working = replace_if_matches(working, &NBSP, " ");
    working = replace_if_matches(working, &INVISIBLE_CHARS, "");
    working = replace_if_matches(working, &REPEATED_SPACES, " ");

    working.trim().to_string()
}

/// Strip Markdown code fences and invisible characters from a model response.
///
/// Mojibake repair is left to [`sanitize_text`] on the parsed string values: fixing `â€œ` to
/// `"` in raw JSON would terminate string literals early.
pub fn sanitize_json_response(text: &str) -> String {
    let mut working = replace_if_matches(Cow::Borrowed(text), &CODE_FENCE, "");
    working = replace_if_matches(working, &NBSP, " ");
    working = replace_if_matches(working, &INVISIBLE_CHARS, "");

    working.trim().to_string()
}
