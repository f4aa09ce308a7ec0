// src/viz_export.rs
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::models::ScoreReport;
use crate::render::render_report_markdown;

/* -------------------------------------------------------------------------- */
/* Entry point                                                                */
/* -------------------------------------------------------------------------- */

/// Write the bundle for one run into `<out_dir>/<date>/<query-slug>/` and
/// return that directory.
pub fn write_bundle(out_dir: &Path, date: &str, query: &str, report: &ScoreReport) -> Result<PathBuf> {
    let dir = out_dir.join(date).join(query_slug(query));
    fs::create_dir_all(&dir).with_context(|| format!("create {:?}", dir))?;

    write_json(dir.join("report.json"), report)?;
    debug!("Wrote report.json");

    write_json(dir.join("tags.json"), &cloud_feed(report))?;
    debug!("Wrote tags.json");

    fs::write(dir.join("report.md"), render_report_markdown(query, report))
        .with_context(|| format!("write {:?}", dir.join("report.md")))?;
    debug!("Wrote report.md");

    Ok(dir)
}

fn write_json<P: AsRef<Path>, T: ?Sized + Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, serde_json::to_vec_pretty(value)?).with_context(|| format!("write {:?}", path))
}

/* -------------------------------------------------------------------------- */
/* Word-cloud feed                                                            */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Serialize, PartialEq)]
pub struct CloudWord {
    pub text: String,
    pub weight: u32,
}

pub fn cloud_feed(report: &ScoreReport) -> Vec<CloudWord> {
    report
        .tag_freq
        .iter()
        .map(|t| CloudWord { text: t.tag.clone(), weight: t.count })
        .collect()
}

/* ------------------------------- Utilities -------------------------------- */

static NON_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// "Lo-Fi Beats & Chill!" -> "lo-fi-beats-chill"; empty queries map to "untitled".
pub fn query_slug(query: &str) -> String {
    let lower = query.to_lowercase();
    let slug = NON_SLUG.replace_all(&lower, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug.chars().take(64).collect::<String>().trim_end_matches('-').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs() {
        assert_eq!(query_slug("Lo-Fi Beats & Chill!"), "lo-fi-beats-chill");
        assert_eq!(query_slug("   "), "untitled");
        assert_eq!(query_slug("日本"), "untitled");
    }
}
