//! Response interpreter: turns a raw analysis reply into display blocks and
//! metrics.
//!
//! Everything here is a pure function of the reply string. Lines are
//! classified exactly once by [`classify_blocks`]; the display text is rendered
//! from those blocks, never by re-inspecting the raw markers.
//!
//! Metrics are found by a small rule table. Each rule is tested against every
//! line independently and the last line that matches wins. A metric whose rule
//! never matches keeps its default from [`Metrics::default`].

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use lens_core::{AnalysisResult, Block, Metrics, RiskLevel};

/// Classify every line of `raw` into a display block.
///
/// `## ` starts a second-level heading. Any other line starting with `#` is a
/// first-level heading with the leading `#`s and following whitespace removed.
/// `- ` starts a bullet. Everything else, empty lines included, is a
/// paragraph kept verbatim. A trailing `\r` is dropped before classification.
pub fn classify_blocks(raw: &str) -> Vec<Block> {
    raw.split('\n')
        .map(|line| classify_line(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

fn classify_line(line: &str) -> Block {
    if let Some(rest) = line.strip_prefix("## ") {
        Block::Heading2(rest.to_string())
    } else if line.starts_with('#') {
        Block::Heading1(line.trim_start_matches('#').trim_start().to_string())
    } else if let Some(rest) = line.strip_prefix("- ") {
        Block::Bullet(rest.to_string())
    } else {
        Block::Paragraph(line.to_string())
    }
}

/// Render one block as display text.
fn render_block(block: &Block) -> String {
    match block {
        Block::Heading1(text) => format!("\n# {}\n", text),
        Block::Heading2(text) => format!("\n## {}\n", text),
        Block::Bullet(text) => format!("  - {}", text),
        Block::Paragraph(text) => text.clone(),
    }
}

/// Render blocks as display text: headings set off by blank lines with the
/// marker for their level, bullets indented by two spaces, paragraphs
/// unchanged.
pub fn render_blocks(blocks: &[Block]) -> String {
    blocks.iter().map(render_block).collect::<Vec<_>>().join("\n")
}

/// Display text for a raw reply.
pub fn format_for_display(raw: &str) -> String {
    render_blocks(&classify_blocks(raw))
}

// =============================================================================
// METRIC RULES
// =============================================================================

/// One metric rule: a case-insensitive pattern with a single capture group and
/// the assignment applied when it captures a usable value.
struct MetricRule {
    label: &'static str,
    pattern: Regex,
    /// Returns false when the captured text cannot be used (e.g. score overflow).
    assign: fn(&mut Metrics, &str) -> bool,
}

impl MetricRule {
    /// Apply the rule to one line. Only the first match in the line counts.
    fn apply(&self, line: &str, metrics: &mut Metrics) -> bool {
        match self.pattern.captures(line) {
            Some(caps) => (self.assign)(metrics, &caps[1]),
            None => false,
        }
    }
}

fn assign_privacy_score(metrics: &mut Metrics, captured: &str) -> bool {
    match captured.parse::<u32>() {
        Ok(score) => {
            metrics.privacy_score = score;
            true
        }
        Err(_) => false,
    }
}

fn assign_data_usage_risk(metrics: &mut Metrics, captured: &str) -> bool {
    match captured.parse::<RiskLevel>() {
        Ok(level) => {
            metrics.data_usage_risk = level;
            true
        }
        Err(_) => false,
    }
}

fn assign_security_level(metrics: &mut Metrics, captured: &str) -> bool {
    match captured.parse::<RiskLevel>() {
        Ok(level) => {
            metrics.security_level = level;
            true
        }
        Err(_) => false,
    }
}

static METRIC_RULES: Lazy<Vec<MetricRule>> = Lazy::new(|| {
    vec![
        MetricRule {
            label: "privacy_score",
            pattern: Regex::new(r"(?i)Privacy Score:\s*(\d+)/100").unwrap(),
            assign: assign_privacy_score,
        },
        MetricRule {
            label: "data_usage_risk",
            pattern: Regex::new(r"(?i)Data Usage Risk:\s*(Low|Medium|High)").unwrap(),
            assign: assign_data_usage_risk,
        },
        MetricRule {
            label: "security_level",
            pattern: Regex::new(r"(?i)Overall Security Level:\s*(Low|Medium|High)").unwrap(),
            assign: assign_security_level,
        },
    ]
});

/// Extract the three metrics from a raw reply.
///
/// The privacy score is not range-checked; a value too large for `u32` counts
/// as no match.
pub fn extract_metrics(raw: &str) -> Metrics {
    let mut metrics = Metrics::default();

    for (line_no, line) in raw.lines().enumerate() {
        for rule in METRIC_RULES.iter() {
            if rule.apply(line, &mut metrics) {
                trace!(line_no, rule = rule.label, "Metric rule matched");
            }
        }
    }

    metrics
}

/// Interpret a raw analysis reply.
pub fn interpret(raw: &str) -> AnalysisResult {
    let blocks = classify_blocks(raw);
    let metrics = extract_metrics(raw);

    debug!(
        subsystem = "session",
        component = "interpreter",
        block_count = blocks.len(),
        privacy_score = metrics.privacy_score,
        data_usage_risk = %metrics.data_usage_risk,
        security_level = %metrics.security_level,
        "Reply interpreted"
    );

    AnalysisResult {
        raw_reply: raw.to_string(),
        blocks,
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_REPLY: &str = "# Privacy Policy Summary\n\
- The service collects email and location data.\n\
- Data is shared with advertising partners.\n\
\n\
## Detailed Metrics\n\
- Privacy Score: 42/100\n\
- Data Usage Risk: Medium\n\
- Overall Security Level: Medium overall\n\
\n\
## Recommendations\n\
- Disable location sharing.";

    #[test]
    fn test_classify_heading_levels_are_distinct() {
        let blocks = classify_blocks("# Title\n## Section\n### Deep");
        assert_eq!(
            blocks,
            vec![
                Block::Heading1("Title".to_string()),
                Block::Heading2("Section".to_string()),
                Block::Heading1("Deep".to_string()),
            ]
        );
    }

    #[test]
    fn test_classify_bullets_and_paragraphs() {
        let blocks = classify_blocks("- item\n-not a bullet\n\n  indented text");
        assert_eq!(
            blocks,
            vec![
                Block::Bullet("item".to_string()),
                Block::Paragraph("-not a bullet".to_string()),
                Block::Paragraph(String::new()),
                Block::Paragraph("  indented text".to_string()),
            ]
        );
    }

    #[test]
    fn test_classify_heading_without_space() {
        assert_eq!(
            classify_blocks("#Summary"),
            vec![Block::Heading1("Summary".to_string())]
        );
        // "##" without a following space is not a level-2 marker.
        assert_eq!(
            classify_blocks("##Summary"),
            vec![Block::Heading1("Summary".to_string())]
        );
    }

    #[test]
    fn test_classify_strips_carriage_return() {
        assert_eq!(
            classify_blocks("## Metrics\r\n- a\r"),
            vec![
                Block::Heading2("Metrics".to_string()),
                Block::Bullet("a".to_string()),
            ]
        );
    }

    #[test]
    fn test_classify_one_block_per_line() {
        let blocks = classify_blocks(SAMPLE_REPLY);
        assert_eq!(blocks.len(), SAMPLE_REPLY.split('\n').count());
        assert_eq!(blocks.iter().filter(|b| b.is_heading()).count(), 3);
    }

    #[test]
    fn test_format_for_display() {
        let display = format_for_display("# Title\n- point\nplain\n## Section");
        assert_eq!(display, "\n# Title\n\n  - point\nplain\n\n## Section\n");
    }

    #[test]
    fn test_format_normalises_heading_markers() {
        // Display text is rendered from the blocks, so the marker reflects the
        // heading level rather than the raw prefix.
        assert_eq!(format_for_display("### Deep"), "\n# Deep\n");
        assert_eq!(format_for_display("#Summary"), "\n# Summary\n");
        assert_eq!(format_for_display("##Summary"), "\n# Summary\n");
        assert_eq!(format_for_display("## Metrics"), "\n## Metrics\n");
    }

    #[test]
    fn test_format_empty_reply() {
        assert_eq!(format_for_display(""), "");
        assert_eq!(classify_blocks(""), vec![Block::Paragraph(String::new())]);
    }

    #[test]
    fn test_extract_metrics_sample() {
        let metrics = extract_metrics(SAMPLE_REPLY);
        assert_eq!(
            metrics,
            Metrics {
                privacy_score: 42,
                data_usage_risk: RiskLevel::Medium,
                security_level: RiskLevel::Medium,
            }
        );
    }

    #[test]
    fn test_extract_metrics_defaults() {
        let metrics = extract_metrics("No metrics here.\n- Just findings.");
        assert_eq!(metrics.privacy_score, 30);
        assert_eq!(metrics.data_usage_risk, RiskLevel::High);
        assert_eq!(metrics.security_level, RiskLevel::Low);
    }

    #[test]
    fn test_extract_metrics_defaults_apply_per_metric() {
        let metrics = extract_metrics("Privacy Score: 88/100");
        assert_eq!(metrics.privacy_score, 88);
        assert_eq!(metrics.data_usage_risk, RiskLevel::High);
        assert_eq!(metrics.security_level, RiskLevel::Low);
    }

    #[test]
    fn test_extract_metrics_case_insensitive() {
        let metrics = extract_metrics(
            "privacy score: 10/100\nDATA USAGE RISK: low\noverall security level:HIGH",
        );
        assert_eq!(metrics.privacy_score, 10);
        assert_eq!(metrics.data_usage_risk, RiskLevel::Low);
        assert_eq!(metrics.security_level, RiskLevel::High);
    }

    #[test]
    fn test_extract_metrics_last_match_wins() {
        let metrics = extract_metrics(
            "Privacy Score: 10/100\nData Usage Risk: Low\nPrivacy Score: 75/100\nData Usage Risk: High",
        );
        assert_eq!(metrics.privacy_score, 75);
        assert_eq!(metrics.data_usage_risk, RiskLevel::High);
    }

    #[test]
    fn test_extract_metrics_score_not_range_checked() {
        assert_eq!(extract_metrics("Privacy Score: 150/100").privacy_score, 150);
    }

    #[test]
    fn test_extract_metrics_score_overflow_is_ignored() {
        let metrics = extract_metrics("Privacy Score: 55/100\nPrivacy Score: 99999999999/100");
        assert_eq!(metrics.privacy_score, 55);
    }

    #[test]
    fn test_extract_metrics_requires_out_of_100() {
        assert_eq!(extract_metrics("Privacy Score: 8/10").privacy_score, 30);
    }

    #[test]
    fn test_extract_metrics_free_text_security_level() {
        // Free text after the label only counts if it starts with a level.
        let metrics = extract_metrics("- Overall Security Level: Detailed assessment");
        assert_eq!(metrics.security_level, RiskLevel::Low);

        let metrics = extract_metrics("- Overall Security Level: High, with caveats");
        assert_eq!(metrics.security_level, RiskLevel::High);
    }

    #[test]
    fn test_extract_metrics_is_pure() {
        assert_eq!(extract_metrics(SAMPLE_REPLY), extract_metrics(SAMPLE_REPLY));
    }

    #[test]
    fn test_interpret_combines_blocks_and_metrics() {
        let result = interpret(SAMPLE_REPLY);
        assert_eq!(result.raw_reply, SAMPLE_REPLY);
        assert_eq!(result.blocks, classify_blocks(SAMPLE_REPLY));
        assert_eq!(result.metrics.privacy_score, 42);
    }
}
