//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::Post;
use crate::config::HighlightConfig;
use crate::error::{Error, Result};
use crate::helpers::html_escape;

/// Turns a post's markdown body into HTML
///
/// Implementations must be shareable across the render workers.
pub trait MarkdownCompiler: Send + Sync {
    fn compile(&self, post: &Post) -> Result<String>;
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(&HighlightConfig::default())
    }

    /// Create with custom settings
    pub fn with_options(highlight: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: highlight.theme.clone(),
            line_numbers: highlight.line_number,
        }
    }

    /// Render markdown to HTML
    ///
    /// Relative image URLs are resolved against `asset_dir`, the post's
    /// directory inside the content dir (assets are published at the same
    /// relative path).
    pub fn render(&self, markdown: &str, asset_dir: &str) -> std::result::Result<String, String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) => lang
                            .split_whitespace()
                            .next()
                            .map(|l| l.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref())?;
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => {
                    events.push(Event::Start(Tag::Image {
                        link_type,
                        dest_url: CowStr::from(resolve_asset_url(&dest_url, asset_dir)),
                        title,
                        id,
                    }));
                }
                _ => {
                    if !in_code_block {
                        events.push(event);
                    }
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> std::result::Result<String, String> {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .ok_or_else(|| format!("unknown highlight theme `{}`", self.theme_name))?;

        let highlighted = highlighted_html_for_string(code, &self.syntax_set, syntax, theme)
            .map_err(|e| format!("highlighting `{lang}` block failed: {e}"))?;

        let lang = html_escape(lang);
        if self.line_numbers {
            Ok(add_line_numbers(&highlighted, &lang))
        } else {
            Ok(format!(
                r#"<div class="highlight" data-language="{}">{}</div>"#,
                lang, highlighted
            ))
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownCompiler for MarkdownRenderer {
    fn compile(&self, post: &Post) -> Result<String> {
        self.render(&post.body, &post.asset_dir)
            .map_err(|message| Error::Compile {
                path: post.source.clone(),
                message,
            })
    }
}

/// Add a line-number gutter to highlighted code
fn add_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();

    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        lang,
        gutter,
        lines.join("\n")
    )
}

/// Map an image URL written relative to the post file onto its published path
fn resolve_asset_url(url: &str, asset_dir: &str) -> String {
    let is_external = url.starts_with('/')
        || url.starts_with('#')
        || url.starts_with("data:")
        || url.contains("://");
    if is_external || url.is_empty() {
        return url.to_string();
    }

    let url = url.trim_start_matches("./");
    let asset_dir = asset_dir.trim_matches('/');
    if asset_dir.is_empty() {
        format!("/{}", url)
    } else {
        format!("/{}/{}", asset_dir, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("# Hello World\n\nThis is a test.", "")
            .unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```go\nfunc main() {}\n```", "").unwrap();
        assert!(html.contains(r#"data-language="go""#));
        assert!(html.contains("main"));
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_fence_language_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("```x\"><script>\ncode\n```", "")
            .unwrap();
        assert!(html.contains(r#"data-language="x&quot;&gt;&lt;script&gt;""#));
        assert!(!html.contains("<script>"));

        let renderer = MarkdownRenderer::with_options(&HighlightConfig {
            line_number: true,
            ..Default::default()
        });
        let html = renderer.render("```a\"b\ncode\n```", "").unwrap();
        assert!(html.contains(r#"class="highlight a&quot;b""#));
    }

    #[test]
    fn test_line_numbers() {
        let renderer = MarkdownRenderer::with_options(&HighlightConfig {
            line_number: true,
            ..Default::default()
        });
        let html = renderer.render("```rust\nfn a() {}\nfn b() {}\n```", "").unwrap();
        assert!(html.contains(r#"<span class="line-number">2</span>"#));
    }

    #[test]
    fn test_relative_images_resolve_to_asset_dir() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("![a](./images/a.png) ![b](https://x.org/b.png)", "golang")
            .unwrap();
        assert!(html.contains(r#"src="/golang/images/a.png""#));
        assert!(html.contains(r#"src="https://x.org/b.png""#));
    }

    #[test]
    fn test_unknown_theme_is_compile_error() {
        let renderer = MarkdownRenderer::with_options(&HighlightConfig {
            theme: "no-such-theme".to_string(),
            line_number: false,
        });
        let post = Post {
            slug: "/a".to_string(),
            title: "A".to_string(),
            date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            description: None,
            body: "```\ncode\n```".to_string(),
            source: PathBuf::from("articles/a.md"),
            asset_dir: String::new(),
        };
        match renderer.compile(&post) {
            Err(Error::Compile { path, message }) => {
                assert_eq!(path, PathBuf::from("articles/a.md"));
                assert!(message.contains("no-such-theme"));
            }
            other => panic!("expected compile error, got {other:?}"),
        }
    }
}
