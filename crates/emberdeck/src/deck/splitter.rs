/// Split a deck body (after frontmatter extraction) into raw slide strings.
///
/// Two mechanisms create slide breaks:
/// 1. `---` with blank lines on both sides
/// 2. A `# ` heading when the current slide already has content
pub fn split(body: &str) -> Vec<String> {
    let body = body.replace("\r\n", "\n");
    let lines: Vec<&str> = body.split('\n').collect();

    let mut chunks: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let prev_blank = current.last().is_none_or(|l| l.trim().is_empty());
        let next_blank = lines.get(i + 1).is_none_or(|l| l.trim().is_empty());
        if is_dash_separator(line.trim()) && prev_blank && next_blank {
            chunks.push(current.join("\n"));
            current.clear();
            continue;
        }
        current.push(line);
    }
    chunks.push(current.join("\n"));

    let mut slides: Vec<String> = Vec::new();
    for chunk in chunks {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        split_by_heading_inference(chunk, &mut slides);
    }
    slides
}

/// When `# ` opens a line and the current slide already has content,
/// start a new slide. Directives sitting just above the heading travel
/// with it.
fn split_by_heading_inference(chunk: &str, slides: &mut Vec<String>) {
    let mut current = String::new();
    let mut has_content = false;

    for line in chunk.lines() {
        let trimmed = line.trim();

        if line.starts_with("# ") && has_content {
            let (content_part, trailing_directives) = strip_trailing_directives(current.trim());
            if !content_part.is_empty() {
                slides.push(content_part);
            }
            current = String::new();
            if !trailing_directives.is_empty() {
                current.push_str(&trailing_directives);
                current.push('\n');
            }
            has_content = false;
        }

        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);

        if !trimmed.is_empty() && !is_directive(trimmed) {
            has_content = true;
        }
    }

    let slide_text = current.trim().to_string();
    if !slide_text.is_empty() {
        slides.push(slide_text);
    }
}

/// Returns `(content, directives)` where `directives` holds the trailing
/// `@key: value` lines of `text`.
fn strip_trailing_directives(text: &str) -> (String, String) {
    let lines: Vec<&str> = text.lines().collect();

    let mut split_at = lines.len();
    for i in (0..lines.len()).rev() {
        let trimmed = lines[i].trim();
        if trimmed.is_empty() || is_directive(trimmed) {
            split_at = i;
        } else {
            break;
        }
    }

    if split_at == lines.len() {
        return (text.to_string(), String::new());
    }

    let content = lines[..split_at].join("\n").trim().to_string();
    let directives = lines[split_at..]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .copied()
        .collect::<Vec<&str>>()
        .join("\n");

    (content, directives)
}

fn is_dash_separator(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

/// Parse `@key: value`, returning the key and trimmed value.
pub fn parse_directive(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('@')?;
    let (key, value) = rest.split_once(':')?;
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return None;
    }
    Some((key, value.trim()))
}

fn is_directive(line: &str) -> bool {
    parse_directive(line).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_separator() {
        let slides = split("Slide one\n\n---\n\nSlide two");
        assert_eq!(slides, vec!["Slide one", "Slide two"]);
    }

    #[test]
    fn test_dash_without_blank_lines_is_content() {
        let slides = split("Slide one\n---\nstill one");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_heading_inference() {
        let slides = split("# First\n\nContent\n\n# Second\n\nMore content");
        assert_eq!(slides.len(), 2);
        assert!(slides[0].starts_with("# First"));
        assert!(slides[1].starts_with("# Second"));
    }

    #[test]
    fn test_h2_no_split() {
        let slides = split("# Title\n\n## Subtitle\n\nContent");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_directive_before_heading_moves_to_next_slide() {
        let slides = split("# Title\n\nSubtitle\n\n@scroll-toggle: true\n# Second\n\nContent");
        assert_eq!(slides.len(), 2);
        assert!(!slides[0].contains("@scroll-toggle"));
        assert!(slides[1].starts_with("@scroll-toggle: true"));
    }

    #[test]
    fn test_empty_chunks_dropped() {
        let slides = split("\n\n---\n\n---\n\nOnly slide\n\n---\n\n");
        assert_eq!(slides, vec!["Only slide"]);
    }

    #[test]
    fn test_parse_directive() {
        assert_eq!(
            parse_directive("@background: #102030"),
            Some(("background", "#102030"))
        );
        assert_eq!(parse_directive("@ bad: x"), None);
        assert_eq!(parse_directive("email@example.com: hi"), None);
        assert_eq!(parse_directive("@novalue"), None);
    }
}
