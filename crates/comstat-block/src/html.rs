//! HTML generation for the comment statistics block.
//!
//! Uses `quick-xml`'s writer so every text node and attribute value is
//! escaped on the way out; comment bodies and content titles are untrusted.

use std::io::Cursor;

use comstat_core::{
  preview::Link,
  render::DisplayLine,
};
use quick_xml::{
  Writer,
  events::{BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::Error;

pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

type HtmlWriter = Writer<Cursor<Vec<u8>>>;

/// Render the block markup for `lines`.
pub fn render_block(title: &str, lines: &[DisplayLine]) -> Result<String, Error> {
  let mut w = Writer::new(Cursor::new(Vec::new()));
  write_block(&mut w, title, lines)?;
  finish(w)
}

/// Render a minimal standalone page hosting the block.
pub fn render_page(title: &str, lines: &[DisplayLine]) -> Result<String, Error> {
  let mut w = Writer::new(Cursor::new(Vec::new()));
  w.write_event(Event::DocType(BytesText::from_escaped("html")))
    .map_err(render_err)?;
  write_start(&mut w, "html", &[("lang", "en")])?;
  write_start(&mut w, "head", &[])?;
  write_empty(&mut w, "meta", &[("charset", "utf-8")])?;
  write_text_elem(&mut w, "title", &[], title)?;
  write_end(&mut w, "head")?;
  write_start(&mut w, "body", &[])?;
  write_block(&mut w, title, lines)?;
  write_end(&mut w, "body")?;
  write_end(&mut w, "html")?;
  finish(w)
}

fn write_block(w: &mut HtmlWriter, title: &str, lines: &[DisplayLine]) -> Result<(), Error> {
  write_start(w, "div", &[("class", "block-comment-statistics")])?;
  write_text_elem(w, "h2", &[], title)?;
  write_start(w, "ul", &[])?;
  for line in lines {
    write_line(w, line)?;
  }
  write_end(w, "ul")?;
  write_end(w, "div")
}

fn write_line(w: &mut HtmlWriter, line: &DisplayLine) -> Result<(), Error> {
  match line {
    DisplayLine::LoginPrompt { before, link, after } => {
      write_start(w, "li", &[("class", "login-prompt")])?;
      write_text(w, before)?;
      write_link(w, link)?;
      write_text(w, after)?;
      write_end(w, "li")
    }
    DisplayLine::NoComments { text } => {
      write_text_elem(w, "li", &[("class", "no-comments")], text)
    }
    DisplayLine::Subject { text } => {
      write_text_elem(w, "li", &[("class", "subject")], text)
    }
    DisplayLine::TotalCount { text } => {
      write_text_elem(w, "li", &[("class", "total-count")], text)
    }
    DisplayLine::WordCount { text } => {
      write_text_elem(w, "li", &[("class", "word-count")], text)
    }
    DisplayLine::RecentHeader { text } => {
      write_text_elem(w, "li", &[("class", "recent-header")], text)
    }
    DisplayLine::Preview { preview } => {
      write_start(w, "li", &[("class", "comment-preview")])?;
      write_text_elem(w, "span", &[("class", "comment-text")], &preview.text)?;
      write_text(w, " ")?;
      write_link(w, &preview.link)?;
      write_end(w, "li")
    }
  }
}

// ─── Writer helpers ──────────────────────────────────────────────────────────

fn render_err(e: impl std::fmt::Display) -> Error { Error::Render(e.to_string()) }

fn finish(w: HtmlWriter) -> Result<String, Error> {
  String::from_utf8(w.into_inner().into_inner())
    .map_err(|e| Error::Render(e.to_string()))
}

fn write_start(w: &mut HtmlWriter, tag: &str, attrs: &[(&str, &str)]) -> Result<(), Error> {
  let mut el = BytesStart::new(tag);
  for (k, v) in attrs {
    el.push_attribute((*k, *v));
  }
  w.write_event(Event::Start(el)).map_err(render_err)
}

fn write_empty(w: &mut HtmlWriter, tag: &str, attrs: &[(&str, &str)]) -> Result<(), Error> {
  let mut el = BytesStart::new(tag);
  for (k, v) in attrs {
    el.push_attribute((*k, *v));
  }
  w.write_event(Event::Empty(el)).map_err(render_err)
}

fn write_end(w: &mut HtmlWriter, tag: &str) -> Result<(), Error> {
  w.write_event(Event::End(BytesEnd::new(tag))).map_err(render_err)
}

fn write_text(w: &mut HtmlWriter, text: &str) -> Result<(), Error> {
  if text.is_empty() {
    return Ok(());
  }
  w.write_event(Event::Text(BytesText::new(text))).map_err(render_err)
}

fn write_text_elem(
  w: &mut HtmlWriter,
  tag: &str,
  attrs: &[(&str, &str)],
  text: &str,
) -> Result<(), Error> {
  write_start(w, tag, attrs)?;
  write_text(w, text)?;
  write_end(w, tag)
}

fn write_link(w: &mut HtmlWriter, link: &Link) -> Result<(), Error> {
  write_text_elem(w, "a", &[("href", link.url.as_str())], &link.label)
}

#[cfg(test)]
mod tests {
  use comstat_core::{comment::CommentId, preview::Preview};

  use super::*;

  #[test]
  fn escapes_untrusted_text_and_urls() {
    let lines = vec![DisplayLine::Preview {
      preview: Preview {
        comment_id: CommentId(1),
        text:       "<script>alert(1)</script>".into(),
        link:       Link {
          url:   "/node/1?a=1&b=\"2\"".into(),
          label: "Tom & Jerry".into(),
        },
      },
    }];
    let html = render_block("Stats", &lines).unwrap();

    assert!(!html.contains("<script>"), "{html}");
    assert!(html.contains("&lt;script&gt;"), "{html}");
    assert!(html.contains("Tom &amp; Jerry"), "{html}");
    assert!(html.contains("href=\"/node/1?a=1&amp;b=&quot;2&quot;\""), "{html}");
  }

  #[test]
  fn login_prompt_embeds_link() {
    let lines = vec![DisplayLine::LoginPrompt {
      before: "Please ".into(),
      link:   Link { url: "/user/login".into(), label: "log in".into() },
      after:  " first.".into(),
    }];
    let html = render_block("Stats", &lines).unwrap();
    assert!(
      html.contains(
        r#"<li class="login-prompt">Please <a href="/user/login">log in</a> first.</li>"#
      ),
      "{html}"
    );
  }

  #[test]
  fn block_structure() {
    let lines = vec![
      DisplayLine::Subject { text: "User ID: 4".into() },
      DisplayLine::TotalCount { text: "Total comments: 1".into() },
    ];
    let html = render_block("Comment statistics", &lines).unwrap();
    assert!(html.starts_with(r#"<div class="block-comment-statistics"><h2>Comment statistics</h2><ul>"#));
    assert!(html.ends_with("</ul></div>"));
    assert_eq!(html.matches("<li").count(), 2);
  }

  #[test]
  fn page_wraps_block() {
    let html = render_page("Stats", &[]).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"), "{html}");
    assert!(html.contains("<title>Stats</title>"));
    assert!(html.contains(r#"<div class="block-comment-statistics">"#));
  }
}
