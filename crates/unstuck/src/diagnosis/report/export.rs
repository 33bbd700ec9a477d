use super::views::{DiagnosisReport, RankingEntry};
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::io;

#[derive(Serialize)]
struct RankingRow<'a> {
    rank: usize,
    category: &'a str,
    name: &'a str,
    score: u32,
}

/// Writes the full ranking as `rank,category,name,score` rows with a header.
pub fn write_ranking_csv<W: io::Write>(ranking: &[RankingEntry], writer: W) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    for entry in ranking {
        csv.serialize(RankingRow {
            rank: entry.rank,
            category: entry.category.tag(),
            name: entry.name,
            score: entry.score,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Plain-text rendering for terminals.
pub fn render_text(report: &DiagnosisReport) -> String {
    let mut out = String::new();
    match write_text(report, &mut out) {
        Ok(()) => out,
        Err(_) => String::new(),
    }
}

fn write_text(report: &DiagnosisReport, out: &mut String) -> fmt::Result {
    writeln!(out, "Diagnosis result")?;
    writeln!(
        out,
        "  Primary: {} | Secondary: {} | Confidence: {}%",
        report.primary.name, report.secondary.name, report.confidence_pct
    )?;
    writeln!(out)?;
    writeln!(out, "{}", report.catch)?;
    writeln!(out, "{}", report.explanation)?;

    writeln!(out, "\nStop doing (2)")?;
    for item in &report.stop {
        writeln!(out, "  - {item}")?;
    }

    writeln!(out, "\nShortest next moves")?;
    for (label, items) in report.plan.blocks() {
        writeln!(out, "  {label}")?;
        for item in items {
            writeln!(out, "    - {item}")?;
        }
    }

    writeln!(out, "\nUsing AI")?;
    for tip in &report.ai_tips {
        writeln!(out, "  - {tip}")?;
    }

    writeln!(out, "\nPrompt to paste into your AI tool")?;
    write!(out, "{}", report.prompt)
}
