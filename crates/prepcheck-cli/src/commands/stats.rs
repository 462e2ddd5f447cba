//! The `prepcheck stats` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use prepcheck_core::error::StatsError;
use prepcheck_core::model::Sample;
use prepcheck_core::statistics::{compare_spread, SpreadComparison};

pub fn execute(
    chapter_path: PathBuf,
    dataset_id: String,
    filter: Option<String>,
    compare_with: Option<String>,
) -> Result<()> {
    let chapter = prepcheck_core::parser::parse_chapter(&chapter_path)?;

    let dataset = chapter
        .dataset(&dataset_id)
        .with_context(|| format!("no dataset `{dataset_id}` in chapter `{}`", chapter.id))?;

    let sample = match &filter {
        Some(expr) => {
            let (key, value) = parse_filter(expr)?;
            dataset.sample.with_tag(key, value)
        }
        None => dataset.sample.clone(),
    };

    println!("Dataset: {} ({} observations)", dataset.id, sample.len());

    match sample.median() {
        Ok(median) => {
            println!("  median: {}", fmt_stat(median));
            println!("  mean:   {}", fmt_stat(sample.mean()?));
            println!("  range:  {}", fmt_stat(sample.range()?));
        }
        Err(StatsError::EmptyInput) => {
            println!("  insufficient data: no observations match");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    if let Some(other_id) = compare_with {
        let other = chapter
            .dataset(&other_id)
            .with_context(|| format!("no dataset `{other_id}` in chapter `{}`", chapter.id))?;
        print_spread_verdict(&dataset.id, &sample, &other.id, &other.sample)?;
    }

    Ok(())
}

/// Format a statistic to at most four decimals, without trailing zeros.
/// Keeps worked-example numbers readable: 2.0999999999999996 prints as 2.1.
fn fmt_stat(value: f64) -> String {
    let s = format!("{value:.4}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn parse_filter(expr: &str) -> Result<(&str, &str)> {
    expr.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .with_context(|| format!("invalid --where filter `{expr}`, expected tag=value"))
}

fn print_spread_verdict(a_id: &str, a: &Sample, b_id: &str, b: &Sample) -> Result<()> {
    match compare_spread(a, b)? {
        SpreadComparison::FirstWider => {
            println!("Spread: `{a_id}` shows more spread than `{b_id}`");
        }
        SpreadComparison::SecondWider => {
            println!("Spread: `{b_id}` shows more spread than `{a_id}`");
        }
        SpreadComparison::Inconclusive => {
            println!("Spread: comparison of `{a_id}` and `{b_id}` is inconclusive");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_formatting() {
        assert_eq!(fmt_stat(2.6), "2.6");
        assert_eq!(fmt_stat(2.0999999999999996), "2.1");
        assert_eq!(fmt_stat(28.0), "28");
        assert_eq!(fmt_stat(2.5454545454), "2.5455");
    }

    #[test]
    fn filter_parsing() {
        assert_eq!(parse_filter("market=Down").unwrap(), ("market", "Down"));
        assert_eq!(parse_filter(" market = Down ").unwrap(), ("market", "Down"));
        assert!(parse_filter("market").is_err());
        assert!(parse_filter("=Down").is_err());
        assert!(parse_filter("market=").is_err());
    }
}
