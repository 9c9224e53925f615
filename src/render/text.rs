use scholar_pulse_common::{char_count_label, Report, ReportSection};
use std::fmt::Write;
use textwrap::Options;

const WRAP_WIDTH: usize = 88;

fn wrapped(out: &mut String, text: &str, indent: &str) {
    let options = Options::new(WRAP_WIDTH)
        .initial_indent(indent)
        .subsequent_indent(indent);
    let _ = writeln!(out, "{}", textwrap::fill(text, options));
}

fn marked(out: &mut String, items: &[String], marker: &str) {
    let indent = " ".repeat(marker.chars().count() + 3);
    for item in items {
        let first = format!("  {} ", marker);
        let options = Options::new(WRAP_WIDTH)
            .initial_indent(&first)
            .subsequent_indent(&indent);
        let _ = writeln!(out, "{}", textwrap::fill(item, options));
    }
}

/// 端末向けテキスト
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.title);
    let _ = writeln!(out, "{}", report.paper_name);
    let _ = writeln!(out, "{}", "═".repeat(report.title.chars().count().max(report.paper_name.chars().count())));

    if report.is_empty() {
        let _ = writeln!(out, "\n(no sections were returned)");
        return out;
    }

    for section in &report.sections {
        let _ = writeln!(out, "\n■ {}", section.heading());
        match section {
            ReportSection::Keywords { items } => {
                let line = items
                    .iter()
                    .map(|k| format!("[{}]", k))
                    .collect::<Vec<_>>()
                    .join(" ");
                wrapped(&mut out, &line, "  ");
            }
            ReportSection::Explanation { audience, text } => {
                let _ = writeln!(out, "  ({})", audience.subtitle());
                wrapped(&mut out, text, "  ");
            }
            ReportSection::Tweet { text, char_count, limit } => {
                wrapped(&mut out, text, "  ");
                let label = char_count_label(*char_count, *limit);
                if char_count > limit {
                    let _ = writeln!(out, "  {} (over the limit)", label);
                } else {
                    let _ = writeln!(out, "  {}", label);
                }
            }
            ReportSection::BulletPoints { items } => marked(&mut out, items, "•"),
            ReportSection::Strengths { items } => marked(&mut out, items, "+"),
            ReportSection::Limitations { items } => marked(&mut out, items, "-"),
            ReportSection::CreativeExtensions { items } | ReportSection::Applications { items } => {
                for (i, item) in items.iter().enumerate() {
                    let first = format!("  {}. ", i + 1);
                    let rest = " ".repeat(first.chars().count());
                    let options = Options::new(WRAP_WIDTH)
                        .initial_indent(&first)
                        .subsequent_indent(&rest);
                    let _ = writeln!(out, "{}", textwrap::fill(item, options));
                }
            }
        }
    }
    out
}
