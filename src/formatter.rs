//! Markdown-style formatting for raw forecast text
//!
//! Swellnet forecaster notes come back as flat text: a title, an
//! author/issue line, upper-case section headers, bullet lists, and
//! paragraphs. This module turns that into a readable markdown document.

/// Format raw forecast text as markdown.
///
/// Pure and total: empty input yields empty output, and the same input
/// always yields byte-identical output. Lines are trimmed and classified
/// one at a time; the only carried state is whether we are inside a
/// bullet list.
pub fn format_forecast(content: &str) -> String {
    // split('\n') on "" yields one empty item, which would otherwise
    // become a stray newline.
    if content.is_empty() {
        return String::new();
    }

    let mut formatted = String::new();
    let mut in_list = false;
    let mut seen_content = false;

    for raw_line in content.split('\n') {
        let line = raw_line.trim();

        if line.is_empty() {
            formatted.push('\n');
            continue;
        }

        // The first non-blank line of the whole input is the title.
        if !seen_content {
            seen_content = true;
            formatted.push_str("# ");
            formatted.push_str(line);
            formatted.push('\n');
            continue;
        }

        // Author / issue date attribution, e.g. "by Ben (issued 1 Jan)".
        if line.starts_with("by ") || line.contains("(issued ") {
            formatted.push('*');
            formatted.push_str(line);
            formatted.push_str("*\n\n");
            continue;
        }

        // Upper-case section headers such as "THIS WEEK:".
        if line.ends_with(':') && line == line.to_uppercase() {
            formatted.push_str("\n## ");
            formatted.push_str(line);
            formatted.push('\n');
            continue;
        }

        if line.starts_with('•') || line.starts_with('-') || line.starts_with('*') {
            if !in_list {
                formatted.push('\n');
                in_list = true;
            }
            formatted.push_str(line);
            formatted.push('\n');
            continue;
        } else if in_list {
            in_list = false;
            formatted.push('\n');
        }

        // Regular paragraph line.
        formatted.push_str(line);
        formatted.push_str("\n\n");
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE: &str =
        "Title\nby Author (issued 1 Jan)\nSECTION:\nSome text\n• point one\n• point two\nMore text";

    #[test]
    fn test_empty_input_gives_empty_output() {
        assert_eq!(format_forecast(""), "");
    }

    #[test]
    fn test_sample_forecast_layout() {
        let formatted = format_forecast(SAMPLE);

        assert!(formatted.starts_with("# Title\n"));
        assert!(formatted.contains("*by Author (issued 1 Jan)*\n\n"));
        assert!(formatted.contains("\n## SECTION:\n"));
        // The bullet lines stay contiguous, opened and closed by one blank
        // line each.
        assert!(formatted.contains("\n• point one\n• point two\n\nMore text\n\n"));
    }

    #[test]
    fn test_sample_forecast_exact_output() {
        let expected = "# Title\n\
                        *by Author (issued 1 Jan)*\n\n\
                        \n## SECTION:\n\
                        Some text\n\n\
                        \n• point one\n\
                        • point two\n\
                        \nMore text\n\n";
        assert_eq!(format_forecast(SAMPLE), expected);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let first = format_forecast(SAMPLE);
        let second = format_forecast(SAMPLE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_blank_lines_are_not_duplicated() {
        assert_eq!(format_forecast("One\n\nTwo"), "# One\n\nTwo\n\n");
    }

    #[test]
    fn test_title_is_first_non_blank_line() {
        // Blank lines before the title pass through; the title rule still
        // fires on the first line with content.
        assert_eq!(format_forecast("\n\nTitle"), "\n\n# Title\n");
    }

    #[test]
    fn test_attribution_without_by_prefix() {
        let formatted = format_forecast("Title\nUpdated report (issued 3 Mar)");
        assert!(formatted.contains("*Updated report (issued 3 Mar)*\n\n"));
    }

    #[test]
    fn test_mixed_case_colon_line_is_a_paragraph() {
        let formatted = format_forecast("Title\nNext week:");
        assert!(formatted.ends_with("Next week:\n\n"));
        assert!(!formatted.contains("##"));
    }

    #[rstest]
    #[case("•")]
    #[case("-")]
    #[case("*")]
    fn test_bullet_markers_open_a_list(#[case] marker: &str) {
        let input = format!("Title\n{marker} first point");
        let formatted = format_forecast(&input);
        assert_eq!(formatted, format!("# Title\n\n{marker} first point\n"));
    }

    #[test]
    fn test_consecutive_lists_are_separated_by_paragraphs() {
        let formatted = format_forecast("Title\n• a\n• b\nbreak\n• c");
        assert!(formatted.contains("\n• a\n• b\n\nbreak\n\n\n• c\n"));
    }
}
