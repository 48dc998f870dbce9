//! Reader for chart markup.
//!
//! Parses snippets like
//! `<pfj-chart-donut title="Pets" data='[{"x":"Cats","y":35}]'></pfj-chart-donut>`
//! into a tree of [`MarkupNode`]s. Text content and comments are skipped;
//! charts are configured through attributes only. A `<` that cannot start a
//! tag is text, and HTML void elements such as `<br>` need no close tag.

use std::sync::LazyLock;

use regex::Regex;

/// One parsed element.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupNode {
    /// Tag name, lowercase
    pub tag: String,

    /// Attributes in source order. Bare attributes have an empty value.
    pub attributes: Vec<(String, String)>,

    /// Child elements in source order
    pub children: Vec<MarkupNode>,

    /// Whether written as `<tag />`
    pub self_closing: bool,
}

impl MarkupNode {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Errors reading markup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    #[error("<{tag}> opened at byte {offset} is never closed")]
    Unclosed { tag: String, offset: usize },

    #[error("Unexpected </{tag}> at byte {offset}")]
    UnexpectedClose { tag: String, offset: usize },

    #[error("Unterminated {what} starting at byte {offset}")]
    Unterminated { what: &'static str, offset: usize },

    #[error("Invalid tag at byte {0}")]
    InvalidTag(usize),

    #[error("Markup contains no elements")]
    Empty,
}

/// Elements that never have content or a close tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

static OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<([a-zA-Z][a-zA-Z0-9-]*)(\s[\s\S]*?)?\s*(/?)>$").expect("Invalid open tag regex")
});

static CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^</\s*([a-zA-Z][a-zA-Z0-9-]*)\s*>$").expect("Invalid close tag regex")
});

// name="value" | name='value' | name=value | name
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("Invalid attribute regex")
});

/// Parse markup into its top-level elements.
pub fn parse_markup(source: &str) -> Result<Vec<MarkupNode>, MarkupError> {
    let mut roots = Vec::new();
    // Open elements with the byte offset of their start tag.
    let mut stack: Vec<(MarkupNode, usize)> = Vec::new();
    let mut pos = 0;

    while let Some(found) = source[pos..].find('<') {
        let start = pos + found;
        let rest = &source[start..];

        if rest.starts_with("<!--") {
            let end = rest.find("-->").ok_or(MarkupError::Unterminated {
                what: "comment",
                offset: start,
            })?;
            pos = start + end + 3;
            continue;
        }

        if !rest[1..].starts_with(|c: char| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?')) {
            pos = start + 1;
            continue;
        }

        let end = find_tag_end(rest).ok_or(MarkupError::Unterminated {
            what: "tag",
            offset: start,
        })?;
        let tag_src = &rest[..=end];
        pos = start + end + 1;

        // Doctype and processing instructions carry nothing for charts.
        if rest.starts_with("<!") || rest.starts_with("<?") {
            continue;
        }

        if let Some(caps) = CLOSE_RE.captures(tag_src) {
            let tag = caps[1].to_lowercase();
            if is_void(&tag) {
                continue;
            }
            match stack.pop() {
                Some((node, _)) if node.tag == tag => attach(&mut stack, &mut roots, node),
                _ => return Err(MarkupError::UnexpectedClose { tag, offset: start }),
            }
            continue;
        }

        let caps = OPEN_RE
            .captures(tag_src)
            .ok_or(MarkupError::InvalidTag(start))?;
        let self_closing = !caps[3].is_empty();
        let tag = caps[1].to_lowercase();
        let node = MarkupNode {
            attributes: caps
                .get(2)
                .map(|m| parse_attributes(m.as_str()))
                .unwrap_or_default(),
            children: Vec::new(),
            self_closing,
            tag,
        };

        if self_closing || is_void(&node.tag) {
            attach(&mut stack, &mut roots, node);
        } else {
            stack.push((node, start));
        }
    }

    if let Some((node, offset)) = stack.pop() {
        return Err(MarkupError::Unclosed {
            tag: node.tag,
            offset,
        });
    }

    if roots.is_empty() {
        return Err(MarkupError::Empty);
    }

    Ok(roots)
}

fn attach(stack: &mut [(MarkupNode, usize)], roots: &mut Vec<MarkupNode>, node: MarkupNode) {
    match stack.last_mut() {
        Some((parent, _)) => parent.children.push(node),
        None => roots.push(node),
    }
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Index of the `>` closing the tag at the start of `s`, skipping quoted values.
fn find_tag_end(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            (None, '<') => return None,
            _ => {}
        }
    }
    None
}

fn parse_attributes(s: &str) -> Vec<(String, String)> {
    let mut attributes: Vec<(String, String)> = Vec::new();

    for caps in ATTR_RE.captures_iter(s) {
        let name = caps[1].to_lowercase();
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| unescape(m.as_str()))
            .unwrap_or_default();

        // First occurrence wins, as in HTML.
        if attributes.iter().all(|(n, _)| *n != name) {
            attributes.push((name, value));
        }
    }

    attributes
}

fn unescape(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
