//! Rule document parser: a `---` delimited frontmatter block followed by a markdown body.

use crate::error::ParseError;
use crate::markdown;
use crate::model::Rule;

const MARKER: &str = "---";

/// Parses one rule document. `prefix` is the document's storage identifier (file stem).
pub fn parse_rule(prefix: &str, text: &str) -> Result<Rule, ParseError> {
    let (frontmatter, body) = split_frontmatter(text)?;
    let fields = Frontmatter::parse(frontmatter);

    let title = fields
        .scalar("title")
        .map(unquote)
        .filter(|title| !title.is_empty())
        .ok_or(ParseError::MissingField("title"))?;
    let impact = fields
        .scalar("impact")
        .map(|value| leading_word(unquote(value)))
        .filter(|impact| !impact.is_empty())
        .ok_or(ParseError::MissingField("impact"))?;
    let impact_description = fields
        .scalar("impactDescription")
        .map(unquote)
        .unwrap_or_default();
    let tags = fields.list("tags");

    Ok(Rule {
        prefix: prefix.to_string(),
        title: title.to_string(),
        impact: impact.to_string(),
        impact_description: impact_description.to_string(),
        tags,
        summary: extract_summary(body),
        content: body.to_string(),
        section_number: None,
    })
}

/// Splits `text` into (frontmatter, body).
fn split_frontmatter(text: &str) -> Result<(&str, &str), ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut offset = 0;
    let mut lines = text.split_inclusive('\n');

    let first = lines.next().ok_or(ParseError::MissingFrontmatter)?;
    if first.trim_end() != MARKER {
        return Err(ParseError::MissingFrontmatter);
    }
    offset += first.len();
    let fm_start = offset;

    for line in lines {
        if line.trim_end() == MARKER {
            let frontmatter = &text[fm_start..offset];
            let body = &text[offset + line.len()..];
            return Ok((frontmatter, body));
        }
        offset += line.len();
    }

    Err(ParseError::UnterminatedFrontmatter)
}

struct Entry<'a> {
    key: &'a str,
    value: &'a str,
    items: Vec<&'a str>,
}

/// The flat `key: value` subset of YAML used by rule documents.
struct Frontmatter<'a> {
    entries: Vec<Entry<'a>>,
}

impl<'a> Frontmatter<'a> {
    fn parse(text: &'a str) -> Self {
        let mut entries: Vec<Entry<'a>> = Vec::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let indented = line.starts_with(char::is_whitespace);
            if let Some(item) = trimmed.strip_prefix('-') {
                if indented || !trimmed.contains(':') {
                    if let Some(entry) = entries.last_mut() {
                        entry.items.push(item.trim());
                    }
                    continue;
                }
            }
            if let Some((key, value)) = trimmed.split_once(':') {
                entries.push(Entry {
                    key: key.trim(),
                    value: value.trim(),
                    items: Vec::new(),
                });
            }
        }
        Self { entries }
    }

    fn entry(&self, key: &str) -> Option<&Entry<'a>> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    fn scalar(&self, key: &str) -> Option<&'a str> {
        self.entry(key).map(|entry| entry.value)
    }

    /// Inline `a, b`, flow `[a, b]`, or block `- a` list values.
    fn list(&self, key: &str) -> Vec<String> {
        let Some(entry) = self.entry(key) else {
            return Vec::new();
        };
        let raw: Vec<&str> = if entry.value.is_empty() {
            entry.items.clone()
        } else {
            let value = entry
                .value
                .strip_prefix('[')
                .and_then(|v| v.strip_suffix(']'))
                .unwrap_or(entry.value);
            value.split(',').collect()
        };
        raw.into_iter()
            .map(|item| unquote(item.trim()))
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return value[1..value.len() - 1].trim();
        }
    }
    value
}

fn leading_word(value: &str) -> &str {
    let value = value.trim_start_matches(['"', '\'']);
    let end = value
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(value.len());
    &value[..end]
}

/// First non-blank, non-heading line following a heading, outside code fences.
fn extract_summary(body: &str) -> String {
    let lines: Vec<&str> = body.lines().collect();
    let fenced = markdown::fenced_mask(&lines);

    let mut idx = 0;
    while idx < lines.len() {
        if !fenced[idx] && markdown::is_heading(lines[idx]) {
            let Some(next) = markdown::next_non_blank(&lines, idx + 1) else {
                break;
            };
            if fenced[next] || markdown::is_heading(lines[next]) {
                idx = next;
                continue;
            }
            return lines[next].trim().to_string();
        }
        idx += 1;
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const POOLING: &str = "---\ntitle: Use Connection Pooling\nimpact: HIGH\nimpactDescription: Avoids TCP handshakes per command\ntags: connection, pool , performance\n---\n\n## Use Connection Pooling\n\nReuse connections instead of opening one per request.\n\n```python\npool = redis.ConnectionPool()\n```\n";

    #[test]
    fn parses_all_frontmatter_fields() {
        let rule = parse_rule("conn-pooling", POOLING).unwrap();

        assert_eq!(rule.prefix, "conn-pooling");
        assert_eq!(rule.title, "Use Connection Pooling");
        assert_eq!(rule.impact, "HIGH");
        assert_eq!(rule.impact_description, "Avoids TCP handshakes per command");
        assert_eq!(rule.tags, vec!["connection", "pool", "performance"]);
        assert_eq!(
            rule.summary,
            "Reuse connections instead of opening one per request."
        );
        assert_eq!(rule.section_number, None);
    }

    #[test]
    fn body_is_kept_verbatim() {
        let rule = parse_rule("conn-pooling", POOLING).unwrap();
        assert_eq!(
            rule.content,
            "\n## Use Connection Pooling\n\nReuse connections instead of opening one per request.\n\n```python\npool = redis.ConnectionPool()\n```\n"
        );
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let rule = parse_rule("x", "---\ntitle: Bare\nimpact: LOW\n---\nno headings here\n").unwrap();
        assert_eq!(rule.impact_description, "");
        assert!(rule.tags.is_empty());
        assert_eq!(rule.summary, "");
    }

    #[test]
    fn missing_title_or_impact_is_rejected() {
        assert_eq!(
            parse_rule("x", "---\nimpact: HIGH\n---\nbody"),
            Err(ParseError::MissingField("title"))
        );
        assert_eq!(
            parse_rule("x", "---\ntitle: T\n---\nbody"),
            Err(ParseError::MissingField("impact"))
        );
        assert_eq!(
            parse_rule("x", "---\ntitle:   \nimpact: HIGH\n---\nbody"),
            Err(ParseError::MissingField("title"))
        );
    }

    #[test]
    fn malformed_frontmatter_is_rejected() {
        assert_eq!(
            parse_rule("x", "# Just markdown\n"),
            Err(ParseError::MissingFrontmatter)
        );
        assert_eq!(
            parse_rule("x", "---\ntitle: T\nimpact: HIGH\n"),
            Err(ParseError::UnterminatedFrontmatter)
        );
        assert_eq!(parse_rule("x", ""), Err(ParseError::MissingFrontmatter));
    }

    #[test]
    fn impact_keeps_leading_word_only() {
        let rule = parse_rule("x", "---\ntitle: T\nimpact: \"MEDIUM\" (latency)\n---\n").unwrap();
        assert_eq!(rule.impact, "MEDIUM");
        let rule = parse_rule("x", "---\ntitle: T\nimpact: HIGH\n---\n").unwrap();
        assert_eq!(rule.impact, "HIGH");
    }

    #[test]
    fn impact_description_key_does_not_shadow_impact() {
        let text = "---\nimpactDescription: first\ntitle: T\nimpact: LOW\n---\n";
        let rule = parse_rule("x", text).unwrap();
        assert_eq!(rule.impact, "LOW");
        assert_eq!(rule.impact_description, "first");
    }

    #[test]
    fn accepts_flow_and_block_tag_lists() {
        let flow = parse_rule("x", "---\ntitle: T\nimpact: LOW\ntags: [a, \"b\", ]\n---\n").unwrap();
        assert_eq!(flow.tags, vec!["a", "b"]);

        let block =
            parse_rule("x", "---\ntitle: T\nimpact: LOW\ntags:\n  - testing\n  - sample\n---\n")
                .unwrap();
        assert_eq!(block.tags, vec!["testing", "sample"]);
    }

    #[test]
    fn quoted_title_is_unquoted() {
        let rule = parse_rule("x", "---\ntitle: \"Avoid KEYS: use SCAN\"\nimpact: HIGH\n---\n").unwrap();
        assert_eq!(rule.title, "Avoid KEYS: use SCAN");
    }

    #[test]
    fn summary_skips_nested_headings_and_code() {
        let body = "---\ntitle: T\nimpact: LOW\n---\n## Top\n\n### Nested\n```python\n# not a heading\n```\nAfter code.\n\n## Next\nReal summary.\n";
        let rule = parse_rule("x", body).unwrap();
        assert_eq!(rule.summary, "Real summary.");
    }

    #[test]
    fn closing_marker_at_end_of_input() {
        let rule = parse_rule("x", "---\ntitle: T\nimpact: LOW\n---").unwrap();
        assert_eq!(rule.content, "");
    }

    proptest! {
        #[test]
        fn well_formed_documents_keep_title_impact_and_body(
            title in "[A-Za-z][A-Za-z0-9 ]{0,30}[A-Za-z0-9]",
            impact in "(HIGH|MEDIUM|LOW)",
            body in "[a-z #\n]{0,200}",
        ) {
            let text = format!("---\ntitle: {title}\nimpact: {impact}\n---\n{body}");
            let rule = parse_rule("p", &text).unwrap();
            prop_assert_eq!(rule.title, title);
            prop_assert_eq!(rule.impact, impact);
            prop_assert_eq!(rule.content, body);
        }

        #[test]
        fn arbitrary_input_never_panics(text in "\\PC{0,300}") {
            let _ = parse_rule("p", &text);
        }
    }
}
