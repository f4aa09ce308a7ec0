// src/render.rs
use crate::models::ScoreReport;

fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

pub fn render_report_markdown(query: &str, report: &ScoreReport) -> String {
    let s = &report.summary;
    let mut md = String::new();
    md.push_str(&format!("# Niche Scout: {}\n\n", query.trim()));

    md.push_str("## Metrics\n");
    md.push_str(&format!("- Total Views: {}\n", thousands(s.total_views)));
    md.push_str(&format!("- Total Earnings: ${}\n", thousands(s.total_earnings.round() as u64)));
    md.push_str(&format!("- Avg Virality: {:.0}/100\n", s.avg_virality));
    md.push_str(&format!("- Title Len: {}\n\n", s.avg_title_length));

    if report.rows.is_empty() {
        md.push_str("_No videos found for this query._\n");
        return md;
    }

    if !report.tag_freq.is_empty() {
        md.push_str("## Tag Spy\n");
        md.push_str(&format!("Copy tags: {}\n\n", report.copy_tags_line()));
        md.push_str("| Tag | Count |\n|---|---:|\n");
        for t in &report.tag_freq {
            md.push_str(&format!("| {} | {} |\n", cell(&t.tag), t.count));
        }
        md.push('\n');
    }

    md.push_str("## Top Videos\n");
    md.push_str("| Title | Views | Engagement % | Est. Earnings ($) | Sentiment | Score |\n");
    md.push_str("|---|---:|---:|---:|---|---:|\n");
    for r in report.ranked_by_virality() {
        md.push_str(&format!(
            "| {} | {} | {:.2} | {:.2} | {} | {:.1} |\n",
            cell(&r.title),
            thousands(r.views),
            r.engagement_pct,
            r.estimated_earnings,
            r.sentiment,
            r.virality_score
        ));
    }

    md
}
