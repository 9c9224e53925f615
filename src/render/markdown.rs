use scholar_pulse_common::{char_count_label, Report, ReportSection};
use std::fmt::Write;

/// Markdown
pub fn render_markdown(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}: {}", report.title, report.paper_name);

    for section in &report.sections {
        let _ = writeln!(out, "\n## {}\n", section.heading());
        match section {
            ReportSection::Keywords { items } => {
                let line = items
                    .iter()
                    .map(|k| format!("`{}`", k))
                    .collect::<Vec<_>>()
                    .join(" · ");
                let _ = writeln!(out, "{}", line);
            }
            ReportSection::Explanation { audience, text } => {
                let _ = writeln!(out, "*{}*\n", audience.subtitle());
                let _ = writeln!(out, "{}", text);
            }
            ReportSection::Tweet { text, char_count, limit } => {
                for line in text.lines() {
                    let _ = writeln!(out, "> {}", line);
                }
                let _ = writeln!(out);
                let _ = writeln!(out, "_{}_", char_count_label(*char_count, *limit));
            }
            ReportSection::BulletPoints { items }
            | ReportSection::Strengths { items }
            | ReportSection::Limitations { items } => {
                for item in items {
                    let _ = writeln!(out, "- {}", item);
                }
            }
            ReportSection::CreativeExtensions { items } | ReportSection::Applications { items } => {
                for (i, item) in items.iter().enumerate() {
                    let _ = writeln!(out, "{}. {}", i + 1, item);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_pulse_common::parse_analysis_response;

    #[test]
    fn test_markdown_sections() {
        let result = parse_analysis_response(
            r#"{"keywords": ["graphene", "heat"], "summaries": {"tweet": "short", "bulletPoints": ["one", "two"]}}"#,
        )
        .unwrap();
        let md = render_markdown(&Report::from_result(&result, "paper.pdf"));
        assert!(md.starts_with("# Research Impact Profile: paper.pdf\n"));
        assert!(md.contains("## Key Research Phrases\n\n`graphene` · `heat`\n"));
        assert!(md.contains("> short\n\n_5 / 280 chars_\n"));
        assert!(md.contains("## Core Takeaways\n\n- one\n- two\n"));
    }

    #[test]
    fn test_multiline_tweet_stays_quoted() {
        let result = parse_analysis_response(
            r#"{"summaries": {"tweet": "New result!\nThread below."}}"#,
        )
        .unwrap();
        let md = render_markdown(&Report::from_result(&result, "paper.pdf"));
        assert!(md.contains("> New result!\n> Thread below.\n\n_"));
    }
}
