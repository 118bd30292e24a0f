//! Markup stripping and word counting for comment bodies.
//!
//! The word rule is fixed here so counts are reproducible: a word is a maximal
//! run of Unicode word characters (letters, digits, marks and connector
//! punctuation such as `_`). Anything else separates words, so `don't` counts
//! as two and `snake_case` as one.

use std::{borrow::Cow, sync::LazyLock};

use quick_xml::escape::{resolve_html5_entity, unescape_with};
use regex::{Captures, Regex};

static HIDDEN_ELEMENTS: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?is)<!--.*?-->|<script\b.*?</script\s*>|<style\b.*?</style\s*>")
    .expect("hidden element pattern")
});

static TAG: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern"));

static WORD: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\w+").expect("word pattern"));

/// A single named or numeric character reference, terminated by `;`.
static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);")
    .expect("reference pattern")
});

/// Remove markup from `body`, leaving only its text.
///
/// Comments and `<script>`/`<style>` elements are dropped with their contents.
/// Every other tag is replaced by a single space so adjacent block elements
/// do not fuse their words. Character references are then decoded one at a
/// time against the HTML5 entity table. A reference that does not decode,
/// and any bare `&`, is kept as written.
pub fn strip_markup(body: &str) -> String {
  let visible = HIDDEN_ELEMENTS.replace_all(body, " ");
  let text = TAG.replace_all(&visible, " ");
  decode_references(&text).into_owned()
}

fn decode_references(text: &str) -> Cow<'_, str> {
  REFERENCE.replace_all(text, |caps: &Captures<'_>| {
    let reference = &caps[0];
    match unescape_with(reference, resolve_html5_entity) {
      Ok(decoded) => decoded.into_owned(),
      Err(_) => reference.to_owned(),
    }
  })
}

/// Count words in plain text.
pub fn word_count(text: &str) -> usize { WORD.find_iter(text).count() }

/// Count words in a comment body after stripping its markup.
pub fn body_word_count(body: &str) -> usize { word_count(&strip_markup(body)) }
