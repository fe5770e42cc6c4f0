//! Line-level helpers for the small markdown grammar rule bodies use:
//! ATX headings and backtick code fences.

const FENCE: &str = "```";

/// A fenced code block located in a body split into lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CodeBlock<'a> {
    /// First word of the fence info string; empty for a bare fence
    pub language: &'a str,
    /// Lines between the fences joined with `\n`, untrimmed
    pub code: String,
    /// Index of the opening fence line
    pub start: usize,
    /// Index of the closing fence line
    pub end: usize,
}

/// Returns the info-string language if `line` opens or closes a fence.
pub(crate) fn fence_language(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix(FENCE)?;
    Some(rest.split_whitespace().next().unwrap_or(""))
}

pub(crate) fn is_fence(line: &str) -> bool {
    fence_language(line).is_some()
}

pub(crate) fn is_heading(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Reads the fenced block opening at `lines[start]`.
///
/// Returns `None` when `lines[start]` is not a fence or the fence is never closed.
pub(crate) fn read_block<'a>(lines: &[&'a str], start: usize) -> Option<CodeBlock<'a>> {
    let language = fence_language(lines.get(start)?)?;
    let end = lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, line)| is_fence(line))
        .map(|(idx, _)| idx)?;

    Some(CodeBlock {
        language,
        code: lines[start + 1..end].join("\n"),
        start,
        end,
    })
}

/// All closed code blocks of `lines`, in source order.
pub(crate) fn code_blocks<'a>(lines: &[&'a str]) -> Vec<CodeBlock<'a>> {
    let mut blocks = Vec::new();
    let mut idx = 0;
    while idx < lines.len() {
        if is_fence(lines[idx]) {
            match read_block(lines, idx) {
                Some(block) => {
                    idx = block.end + 1;
                    blocks.push(block);
                    continue;
                }
                None => break,
            }
        }
        idx += 1;
    }
    blocks
}

/// Marks each line as inside (`true`) or outside a code fence.
///
/// Fence lines themselves count as inside.
pub(crate) fn fenced_mask(lines: &[&str]) -> Vec<bool> {
    let mut inside = false;
    lines
        .iter()
        .map(|line| {
            if is_fence(line) {
                inside = !inside;
                true
            } else {
                inside
            }
        })
        .collect()
}

/// Index of the next non-blank line at or after `from`.
pub(crate) fn next_non_blank(lines: &[&str], from: usize) -> Option<usize> {
    (from..lines.len()).find(|&idx| !lines[idx].trim().is_empty())
}

/// Parses every `[title](url)` link in `text`.
pub(crate) fn links(text: &str) -> Vec<(String, String)> {
    let mut found = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find("](") else {
            break;
        };
        let title = &after_open[..close];
        let after_title = &after_open[close + 2..];
        let Some(end) = after_title.find(')') else {
            break;
        };
        let url = &after_title[..end];
        if !title.is_empty() && !title.contains('[') && !url.is_empty() {
            found.push((title.to_string(), url.to_string()));
        }
        rest = &after_title[end + 1..];
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_language_from_info_string() {
        assert_eq!(fence_language("```python"), Some("python"));
        assert_eq!(fence_language("  ```js title=x"), Some("js"));
        assert_eq!(fence_language("```"), Some(""));
        assert_eq!(fence_language("code"), None);
    }

    #[test]
    fn collects_closed_blocks_only() {
        let body = "intro\n```python\na = 1\n\nb = 2\n```\ntext\n```\nplain\n```\n```bash\nunterminated";
        let lines: Vec<&str> = body.lines().collect();
        let blocks = code_blocks(&lines);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].language, "python");
        assert_eq!(blocks[0].code, "a = 1\n\nb = 2");
        assert_eq!(blocks[1].language, "");
        assert_eq!(blocks[1].code, "plain");
    }

    #[test]
    fn mask_covers_fence_contents() {
        let lines = vec!["# title", "```python", "# comment", "```", "after"];
        assert_eq!(fenced_mask(&lines), vec![false, true, true, true, false]);
    }

    #[test]
    fn parses_multiple_links() {
        let parsed = links("Reference: [Pools](https://a.example/pools), [Docs](https://b.example)");
        assert_eq!(
            parsed,
            vec![
                ("Pools".to_string(), "https://a.example/pools".to_string()),
                ("Docs".to_string(), "https://b.example".to_string()),
            ]
        );
    }
}
