use crate::analysis::outliers::OutlierResult;
use crate::analysis::ranking::RankingResult;
use crate::model::group::{GROUP_A, GROUP_B, GroupLabel};
use crate::model::results::{AnalysisResult, BiasVerdict, CorrectionResult};
use crate::model::stats::DistributionStats;
use crate::report::{format_f64_2, format_f64_4, format_pct, rule};

pub fn render_analysis_report(result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str(&rule(60));
    out.push_str("\nBIAS ANALYSIS\n");
    out.push_str(&rule(60));
    out.push_str("\n\n");

    push_group_stats(&mut out, GROUP_A, &result.stats_a);
    push_group_stats(&mut out, GROUP_B, &result.stats_b);

    out.push_str("DIFFERENCE ANALYSIS:\n");
    out.push_str(&format!(
        "  Mean difference: {}\n",
        format_f64_2(result.mean_difference)
    ));
    out.push_str(&format!(
        "  Relative difference: {}\n",
        format_pct(result.relative_difference)
    ));
    out.push_str(&format!("  P-value: {}\n\n", format_f64_4(result.p_value)));

    out.push_str("CONCLUSION:\n");
    out.push_str(&format!("  {}\n", conclusion_statement(result.verdict())));
    if let Some(direction) = direction_statement(result.verdict()) {
        out.push_str(&format!("  -> {}\n", direction));
    }
    out.push_str(&rule(60));
    out.push('\n');
    out
}

pub fn render_correction_report(result: &CorrectionResult) -> String {
    let mut out = String::new();
    out.push_str(&rule(60));
    out.push_str("\nREWEIGHTING REPORT\n");
    out.push_str(&rule(60));
    out.push_str("\n\n");

    out.push_str("ADJUSTMENT WEIGHTS:\n");
    out.push_str(&format!(
        "  {}: {}\n",
        GROUP_A.display_name(),
        format_f64_4(result.weight_a)
    ));
    out.push_str(&format!(
        "  {}: {}\n\n",
        GROUP_B.display_name(),
        format_f64_4(result.weight_b)
    ));

    out.push_str("PRE-ADJUSTMENT ANALYSIS:\n");
    out.push_str(&render_analysis_report(&result.pre));
    out.push('\n');

    if let Some(post) = &result.post {
        out.push_str("POST-ADJUSTMENT ANALYSIS:\n");
        out.push_str(&render_analysis_report(post));
        out.push('\n');
        out.push_str("CORRECTION IMPACT:\n");
        out.push_str(&format!(
            "  Bias reduction: {}%\n",
            format_f64_2(result.bias_reduction_pct().unwrap_or(0.0))
        ));
    }
    out
}

pub fn render_outlier_section(criterion: &str, result: &OutlierResult, removed: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&format!("OUTLIERS ({}, |z| > {}):\n", criterion, format_f64_2(result.threshold)));
    out.push_str(&format!("  Mean: {}\n", format_f64_2(result.mean)));
    out.push_str(&format!("  Std dev: {}\n", format_f64_2(result.std_dev)));
    out.push_str(&format!("  Outliers detected: {}\n", result.indices.len()));
    if !removed.is_empty() {
        out.push_str(&format!("  Removed: {}\n", removed.join(", ")));
    }
    out
}

pub fn render_ranking_report(ranking: &RankingResult, top_n: usize) -> String {
    let mut out = String::new();
    out.push_str(&rule(80));
    out.push_str("\nRANKING\n");
    out.push_str(&rule(80));
    out.push_str("\n\n");

    out.push_str("CRITERIA:\n");
    for criterion in &ranking.criteria {
        out.push_str(&format!(
            "  - {} (weight: {})\n",
            criterion.name,
            format_f64_2(criterion.weight)
        ));
    }
    out.push('\n');

    out.push_str(&format!("TOP {}:\n", top_n));
    out.push_str(&"-".repeat(80));
    out.push('\n');
    out.push_str(&format!(
        "{:<5} {:<15} {:<25} {:<12} {:<10}\n",
        "Pos", "ID", "Name", "Group", "Score"
    ));
    for score in ranking.top_n(top_n) {
        let name: String = score
            .name
            .as_deref()
            .unwrap_or("N/A")
            .chars()
            .take(24)
            .collect();
        let group = score.group.unwrap_or(GroupLabel::Unspecified);
        out.push_str(&format!(
            "{:<5} {:<15} {:<25} {:<12} {:<10.2}\n",
            score.position,
            score.id,
            name,
            group.display_name(),
            score.final_score
        ));
    }
    out.push_str(&"-".repeat(80));
    out.push_str("\n\n");

    let meta = &ranking.meta;
    out.push_str("STATISTICS:\n");
    out.push_str(&format!("  total_people: {}\n", meta.total_people));
    out.push_str(&format!("  total_criteria: {}\n", meta.total_criteria));
    out.push_str(&format!("  max_score: {}\n", format_f64_2(meta.max_score)));
    out.push_str(&format!("  min_score: {}\n", format_f64_2(meta.min_score)));
    out.push_str(&format!("  mean_score: {}\n", format_f64_2(meta.mean_score)));

    let shown = ranking.top_n(top_n).len();
    if shown > 0 {
        out.push_str(&format!("\nGROUP DISTRIBUTION (top {}):\n", shown));
        for (group, count) in ranking.group_distribution(top_n) {
            out.push_str(&format!(
                "  {}: {} ({})\n",
                group.display_name(),
                count,
                format_pct(count as f64 / shown as f64)
            ));
        }
    }
    out.push_str(&rule(80));
    out.push('\n');
    out
}

fn push_group_stats(out: &mut String, group: GroupLabel, stats: &DistributionStats) {
    out.push_str(&format!(
        "STATISTICS - {}:\n",
        group.display_name().to_uppercase()
    ));
    out.push_str(&format!("  Mean: {}\n", format_f64_2(stats.mean)));
    out.push_str(&format!("  Median: {}\n", format_f64_2(stats.median)));
    out.push_str(&format!("  Std dev: {}\n", format_f64_2(stats.std_dev)));
    out.push_str(&format!("  Count: {}\n\n", stats.count));
}

fn conclusion_statement(verdict: BiasVerdict) -> &'static str {
    match verdict {
        BiasVerdict::FavorsA | BiasVerdict::FavorsB => {
            "BIAS DETECTED with statistical significance"
        }
        BiasVerdict::NotSignificant => "BIAS DETECTED (without statistical significance)",
        BiasVerdict::None => "No significant bias detected",
    }
}

fn direction_statement(verdict: BiasVerdict) -> Option<String> {
    let (high, low) = match verdict {
        BiasVerdict::FavorsB => (GROUP_B, GROUP_A),
        BiasVerdict::FavorsA => (GROUP_A, GROUP_B),
        _ => return None,
    };
    Some(format!(
        "{} group receives higher evaluations than {} group",
        high.display_name(),
        low.display_name().to_lowercase()
    ))
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
