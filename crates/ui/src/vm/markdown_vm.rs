use std::collections::{HashMap, HashSet};

use learn_core::slugify;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// One entry of a lesson's table of contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocItem {
    pub id: String,
    pub title: String,
    pub level: u8,
}

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Plain text of the inline events between a heading start and its end.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

/// Render lesson markdown to sanitized HTML.
///
/// Headings carry `id = slugify(text)` so the table of contents can link to
/// them; fenced code keeps its `language-*` class.
#[must_use]
pub fn render_lesson_markdown(input: &str) -> String {
    let mut events: Vec<Event<'_>> = Parser::new_ext(input, parser_options()).collect();

    for idx in 0..events.len() {
        let slug = match &events[idx] {
            Event::Start(Tag::Heading { .. }) => slugify(&heading_text(&events[idx + 1..])),
            _ => continue,
        };
        if slug.is_empty() {
            continue;
        }
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[idx] {
            *id = Some(slug.into());
        }
    }

    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, events.into_iter());
    sanitize_html(&html)
}

/// Headings of the lesson in document order.
///
/// Uses the same parser as `render_lesson_markdown`, so `#` lines inside code
/// blocks are not headings and every id matches a rendered anchor.
#[must_use]
pub fn table_of_contents(input: &str) -> Vec<TocItem> {
    let events: Vec<Event<'_>> = Parser::new_ext(input, parser_options()).collect();
    events
        .iter()
        .enumerate()
        .filter_map(|(idx, event)| match event {
            Event::Start(Tag::Heading { level, .. }) => {
                let title = heading_text(&events[idx + 1..]).trim().to_owned();
                let id = slugify(&title);
                (!id.is_empty()).then(|| TocItem {
                    id,
                    title,
                    level: heading_level(*level),
                })
            }
            _ => None,
        })
        .collect()
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    for heading in ["h1", "h2", "h3", "h4", "h5", "h6"] {
        attributes.insert(heading, ["id"].into_iter().collect());
    }
    attributes.insert("code", ["class"].into_iter().collect());
    attributes.insert("a", ["href", "title"].into_iter().collect());
    attributes.insert("img", ["src", "alt", "title"].into_iter().collect());
    attributes.insert("input", ["type", "checked", "disabled"].into_iter().collect());
    attributes.insert("ol", ["start"].into_iter().collect());

    let tags: HashSet<&str> = [
        "h1", "h2", "h3", "h4", "h5", "h6", "p", "br", "hr", "em", "strong", "del", "code", "pre",
        "blockquote", "ul", "ol", "li", "a", "img", "input", "table", "thead", "tbody", "tr", "th",
        "td",
    ]
    .into_iter()
    .collect();

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{render_lesson_markdown, sanitize_html, table_of_contents};

    #[test]
    fn headings_get_slug_ids() {
        let html = render_lesson_markdown("# Introduction to MongoDB\n\n## What is a Document?\n");
        assert!(html.contains(r#"<h1 id="introduction-to-mongodb">"#), "{html}");
        assert!(html.contains(r#"<h2 id="what-is-a-document">"#), "{html}");
    }

    #[test]
    fn fenced_code_keeps_language_class() {
        let html = render_lesson_markdown("```javascript\ndb.users.find()\n```\n");
        assert!(html.contains(r#"<code class="language-javascript">"#), "{html}");
        assert!(html.contains("<pre>"), "{html}");
    }

    #[test]
    fn tables_and_strikethrough_render() {
        let html = render_lesson_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~\n");
        assert!(html.contains("<table>"), "{html}");
        assert!(html.contains("<td>1</td>"), "{html}");
        assert!(html.contains("<del>old</del>"), "{html}");
    }

    #[test]
    fn scripts_and_javascript_links_are_stripped() {
        let html = render_lesson_markdown("<script>alert(1)</script>\n\n[x](javascript:alert(1))\n");
        assert!(!html.contains("<script"), "{html}");
        assert!(!html.contains("javascript:"), "{html}");
        assert_eq!(sanitize_html("<p onclick=\"x()\">hi</p>"), "<p>hi</p>");
    }

    #[test]
    fn toc_lists_headings_with_levels() {
        let toc = table_of_contents("# Basic CRUD Operations\n\ntext\n\n## Create (Insert)\n\n### `find()` usage\n");
        let entries: Vec<(&str, &str, u8)> = toc
            .iter()
            .map(|t| (t.id.as_str(), t.title.as_str(), t.level))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("basic-crud-operations", "Basic CRUD Operations", 1),
                ("create-insert", "Create (Insert)", 2),
                ("find-usage", "find() usage", 3),
            ]
        );
    }

    #[test]
    fn toc_ignores_hash_lines_in_code() {
        let toc = table_of_contents("# Real\n\n```bash\n# not a heading\n```\n");
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].id, "real");
    }

    #[test]
    fn toc_ids_match_rendered_anchors() {
        let source = "# One\n\n## Two & Three\n";
        let html = render_lesson_markdown(source);
        for item in table_of_contents(source) {
            assert!(html.contains(&format!(r#"id="{}""#, item.id)), "{html}");
        }
    }
}
