//! Terminal rendering for scan reports and hosted analysis results.

use netr_core::ScanReport;

/// Render a scan report: interpretation lines in classifier order, the risk
/// banner, and the completion footer.
pub fn render_scan_report(report: &ScanReport) -> String {
    let mut out = String::from("🔍 AI Interpretation\n");
    for (label, score) in report.interpretation.ranked() {
        out.push_str(&format!(
            "  {}: {}\n",
            title_case(label),
            format_percent(score)
        ));
    }
    out.push_str("\n🧪 Risk Score\n");
    out.push_str(&format!("  {}\n", report.risk.banner()));
    out.push_str("\n✅ Analysis complete.\n");
    out
}

/// Render a hosted analysis result: fixed header, then the model's text
/// block verbatim.
pub fn render_analysis(content: &str) -> String {
    format!("🧠 Chaos Analysis Result\n\n{content}\n")
}

/// Format a `[0, 1]` score as a percentage with two decimals (0.7 → "70.00%").
fn format_percent(score: f32) -> String {
    format!("{:.2}%", score * 100.0)
}

/// Uppercase the first letter of each whitespace-separated word.
fn title_case(label: &str) -> String {
    label
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
