//! Plain-text renderings of engine results.

use crate::domain::{ExperienceLevel, JobFeatures, PredictionResult};
use crate::engine::{EngineStats, RecordSummary};
use crate::rates::{CatalogEntry, RateTable, display_name};

pub fn format_prediction(features: &JobFeatures, result: &PredictionResult) -> String {
    let mut out = String::new();

    out.push_str("=== quote - price estimate ===\n");
    out.push_str(&format!(
        "Job: {} | {} | {} | {} | {}h\n",
        features.industry,
        features.location,
        features.experience_level,
        features.complexity,
        features.duration_hours,
    ));
    out.push_str(&format!(
        "Range: R {:.2} - R {:.2}\n",
        result.min_price, result.max_price
    ));
    out.push_str(&format!(
        "Confidence: {:.0}% ({})\n",
        result.confidence * 100.0,
        result.source.display_name()
    ));
    out.push_str(&format!("{}\n", result.rationale));

    out
}

/// Base rates pivoted to one row per industry.
pub fn format_rates(table: &RateTable) -> String {
    let mut out = String::new();

    out.push_str(
        format!(
            "{:<20} {:>10} {:>10} {:>10}  {:<20}\n",
            "industry", "junior", "mid", "senior", "name"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!("{:-<20} {:-<10} {:-<10} {:-<10}  {:-<20}\n", "", "", "", "", "").trim_end(),
    );
    out.push('\n');

    for industry in table.industries() {
        let cell = |level: ExperienceLevel| match table.get(industry, level) {
            Some(rate) => format!("{rate:.2}"),
            None => "-".to_string(),
        };
        out.push_str(
            format!(
                "{:<20} {:>10} {:>10} {:>10}  {:<20}\n",
                truncate(industry, 20),
                cell(ExperienceLevel::Junior),
                cell(ExperienceLevel::Mid),
                cell(ExperienceLevel::Senior),
                display_name(industry).unwrap_or(""),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out.push_str(&format!(
        "(unlisted pairs use {:.2})\n",
        table.default_rate()
    ));

    out
}

pub fn format_catalog(industries: &[CatalogEntry], locations: &[CatalogEntry]) -> String {
    let mut out = String::new();

    out.push_str("Industries:\n");
    for entry in industries {
        out.push_str(&format!("  {:<20} {}\n", entry.id, entry.name));
    }
    out.push_str("\nLocations:\n");
    for entry in locations {
        out.push_str(&format!("  {:<20} {}\n", entry.id, entry.name));
    }

    out
}

pub fn format_stats(stats: &EngineStats) -> String {
    let mut out = String::new();

    out.push_str(&format!("Training examples: {}\n", stats.examples));
    out.push_str(&format!("Rate table entries: {}\n", stats.rate_entries));
    out.push_str(&format!(
        "Regressor: {}\n",
        stats.regressor.display_name()
    ));
    match &stats.model {
        Some(model) => out.push_str(&format!(
            "Learned model: {} on {} examples, trained {}\n",
            model.kind.display_name(),
            model.n_examples,
            model.trained_at.format("%Y-%m-%d %H:%M:%S UTC"),
        )),
        None => out.push_str("Learned model: none (rule table only)\n"),
    }

    out
}

pub fn format_record_summary(summary: &RecordSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Recorded {} example(s); training set now has {}.\n",
        summary.added, summary.total
    ));

    let changed: Vec<_> = summary.updated_buckets.iter().filter(|u| u.changed()).collect();
    if changed.is_empty() {
        out.push_str("No rate buckets changed.\n");
    } else {
        out.push_str("Updated rates:\n");
        for update in changed {
            let previous = update
                .previous
                .map(|p| format!("{p:.2}"))
                .unwrap_or_else(|| "default".to_string());
            out.push_str(&format!(
                "  {:<20} {:<6} {:>10} -> {:.2} (n={})\n",
                truncate(&update.industry, 20),
                update.level,
                previous,
                update.rate,
                update.samples,
            ));
        }
    }
    if summary.retrained {
        out.push_str("Learned model retrained.\n");
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Complexity, PredictionSource};
    use crate::engine::BucketUpdate;
    use crate::rates::{industries, locations};

    #[test]
    fn prediction_shows_range_and_source() {
        let features = JobFeatures::default();
        let result = PredictionResult {
            min_price: 1680.0,
            max_price: 3120.0,
            confidence: 0.7,
            rationale: "Based on mid level graphic_design work in gauteng with standard complexity"
                .to_string(),
            source: PredictionSource::Rules,
        };
        let text = format_prediction(&features, &result);
        assert!(text.contains("Range: R 1680.00 - R 3120.00"));
        assert!(text.contains("Confidence: 70% (rule table)"));
        assert!(text.contains("with standard complexity"));
        assert_eq!(features.complexity, Complexity::Standard);
    }

    #[test]
    fn rates_table_has_one_row_per_industry() {
        let table = RateTable::default();
        let text = format_rates(&table);
        let plumbing = text.lines().find(|l| l.starts_with("plumbing")).unwrap();
        assert!(plumbing.contains("180.00"));
        assert!(plumbing.contains("400.00"));
        assert!(plumbing.ends_with("Plumbing"));
        assert_eq!(text.lines().count(), 2 + table.industries().len() + 1);
    }

    #[test]
    fn sparse_rows_mark_missing_levels() {
        let table = RateTable::empty(200.0)
            .with_rates([(("welding".to_string(), ExperienceLevel::Senior), 450.0)]);
        let text = format_rates(&table);
        let row = text.lines().find(|l| l.starts_with("welding")).unwrap();
        assert_eq!(row.split_whitespace().collect::<Vec<_>>(), vec!["welding", "-", "-", "450.00"]);
    }

    #[test]
    fn catalog_lists_display_names() {
        let text = format_catalog(industries(), locations());
        assert!(text.contains("kwazulu_natal"));
        assert!(text.contains("KwaZulu-Natal"));
    }

    #[test]
    fn record_summary_lists_changed_buckets_only() {
        let summary = RecordSummary {
            added: 3,
            total: 3,
            updated_buckets: vec![
                BucketUpdate {
                    industry: "plumbing".into(),
                    level: ExperienceLevel::Junior,
                    samples: 3,
                    rate: 200.0,
                    previous: Some(180.0),
                },
                BucketUpdate {
                    industry: "consulting".into(),
                    level: ExperienceLevel::Mid,
                    samples: 4,
                    rate: 500.0,
                    previous: Some(500.0),
                },
            ],
            retrained: true,
        };
        let text = format_record_summary(&summary);
        assert!(text.contains("180.00 -> 200.00 (n=3)"));
        assert!(!text.contains("consulting"));
        assert!(text.ends_with("Learned model retrained.\n"));
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("plumbing", 20), "plumbing");
        assert_eq!(truncate("web_development", 5), "web_.");
    }
}
