//! # Gestation CLI Application
//!
//! Terminal front-end for the gestational dating engine. Prompts for a
//! dating method and its inputs, then prints the timeline, trimester and
//! milestones followed by the JSON output record.
//!
//! Set `GESTATION_SETTINGS` to a settings JSON file to override the default
//! clinical bounds, and `RUST_LOG=debug` to trace the pipeline.

use std::io::{self, BufRead, Write};
use std::path::Path;

use chrono::{Local, NaiveDate};
use gestation_core::settings::load_settings;
use gestation_core::{
    AssistedTransferInput, ConceptionInput, DatingError, DatingMethod, DatingResult, EngineSettings,
    GestationEngine, GestationalReport, ImagingEstimateInput, MenstrualPeriodInput, MethodKind, DEFAULT_MILESTONES,
};

/// Read one trimmed line; `None` on blank input or I/O failure.
fn prompt(label: &str) -> Option<String> {
    print!("{}", label);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Blank input is `Ok(None)`; text that is not a calendar date is an error against `field`.
fn parse_date(raw: Option<String>, field: &str) -> DatingResult<Option<NaiveDate>> {
    raw.map(|raw| {
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| DatingError::invalid_input(field, raw.as_str(), "Not a valid date (YYYY-MM-DD)"))
    })
    .transpose()
}

fn parse_i64(raw: Option<String>, field: &str) -> DatingResult<Option<i64>> {
    raw.map(|raw| {
        raw.parse()
            .map_err(|_| DatingError::invalid_input(field, raw.as_str(), "Not a valid integer"))
    })
    .transpose()
}

fn prompt_date(label: &str, field: &str) -> DatingResult<Option<NaiveDate>> {
    parse_date(prompt(label), field)
}

fn prompt_i64(label: &str, field: &str) -> DatingResult<Option<i64>> {
    parse_i64(prompt(label), field)
}

fn prompt_method() -> DatingResult<DatingMethod> {
    println!("Dating method:");
    for (i, kind) in MethodKind::ALL.iter().enumerate() {
        println!("  {}) {}", i + 1, kind);
    }
    let choice = prompt_i64("Select [1]: ", "method")?.unwrap_or(1);
    println!();

    let method = match choice {
        1 => DatingMethod::MenstrualPeriod(MenstrualPeriodInput {
            last_period_start: prompt_date("First day of last period (YYYY-MM-DD): ", "last_period_start")?,
            cycle_length_days: prompt_i64("Cycle length, days [28]: ", "cycle_length_days")?,
        }),
        2 => DatingMethod::Conception(ConceptionInput {
            conception_date: prompt_date("Conception date (YYYY-MM-DD): ", "conception_date")?,
        }),
        3 => DatingMethod::ImagingEstimate(ImagingEstimateInput {
            imaging_date: prompt_date("Ultrasound date (YYYY-MM-DD): ", "imaging_date")?,
            estimated_age_weeks: prompt_i64("Estimated age, weeks: ", "estimated_age_weeks")?,
            estimated_age_days: prompt_i64("Estimated age, days [0]: ", "estimated_age_days")?.unwrap_or(0),
        }),
        4 => DatingMethod::AssistedTransfer(AssistedTransferInput {
            transfer_date: prompt_date("Transfer date (YYYY-MM-DD): ", "transfer_date")?,
            embryo_age_days: prompt_i64("Embryo age, days (3 or 5) [5]: ", "embryo_age_days")?.or(Some(5)),
        }),
        other => {
            return Err(DatingError::out_of_range(
                "method",
                other.to_string(),
                format!("Choose 1-{}", MethodKind::ALL.len()),
            ))
        }
    };
    Ok(method)
}

/// Prompt for the method, its inputs and the reference date, then run the engine.
fn run(engine: &GestationEngine<'static>) -> DatingResult<GestationalReport<'static>> {
    let method = prompt_method()?;

    let today = Local::now().date_naive();
    let as_of = prompt_date(&format!("Calculate as of (YYYY-MM-DD) [{}]: ", today), "as_of")?.unwrap_or(today);
    println!();

    engine.compute(&method, as_of)
}

fn report_error(e: &DatingError) -> ! {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
    std::process::exit(1);
}

fn engine_settings() -> EngineSettings {
    match std::env::var("GESTATION_SETTINGS") {
        Ok(path) => match load_settings(Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                EngineSettings::default()
            }
        },
        Err(_) => EngineSettings::default(),
    }
}

fn main() {
    env_logger::init();

    println!("Gestation CLI - Due Date Calculator");
    println!("===================================");
    println!();

    let engine = match GestationEngine::new(engine_settings(), &DEFAULT_MILESTONES) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match run(&engine) {
        Ok(report) => {
            let timeline = &report.timeline;
            println!("═══════════════════════════════════════");
            println!("  PREGNANCY TIMELINE");
            println!("═══════════════════════════════════════");
            println!();
            println!("Method:        {}", report.anchor.method);
            println!("Day 0:         {}", report.anchor.anchor_date);
            println!("Conception:    {} (estimated)", report.anchor.conception_date);
            println!();
            println!("As of {}:", timeline.as_of);
            println!("  Gestational age: {}", timeline.gestational_age());
            println!("  Trimester:       {}", report.trimester);
            println!("  Progress:        {:.1}%", timeline.percent_complete_display());
            println!();
            println!("Due date:      {}", timeline.projected_completion_date);
            if timeline.is_past_due() {
                println!("  {} days past due", -timeline.days_until_completion);
            } else {
                println!("  {} days to go", timeline.days_until_completion);
            }
            println!(
                "Term window:   {} to {}",
                timeline.term_window.early_term_start, timeline.term_window.late_term_end
            );
            println!();
            println!("Milestones:");
            for status in &report.milestones {
                println!(
                    "  {} week {:>2}  {}",
                    status_icon(status.reached),
                    status.milestone.trigger_week,
                    status.milestone.label
                );
            }
            if let Some(next) = report.next_milestone() {
                println!();
                println!("Next: {} (week {}) - {}", next.label, next.trigger_week, next.description);
            }

            println!();
            println!("JSON Output:");
            if let Ok(json) = serde_json::to_string_pretty(&report) {
                println!("{}", json);
            }
        }
        Err(e) => report_error(&e),
    }
}

fn status_icon(reached: bool) -> &'static str {
    if reached { "[x]" } else { "[ ]" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_none() {
        assert_eq!(parse_date(None, "transfer_date").unwrap(), None);
        assert_eq!(parse_i64(None, "embryo_age_days").unwrap(), None);
    }

    #[test]
    fn test_valid_input_parses() {
        assert_eq!(
            parse_date(Some("2024-03-01".to_string()), "transfer_date").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(parse_i64(Some("3".to_string()), "embryo_age_days").unwrap(), Some(3));
    }

    #[test]
    fn test_unparseable_integer_is_reported_not_defaulted() {
        let err = parse_i64(Some("five".to_string()), "embryo_age_days").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(err.field(), Some("embryo_age_days"));
        match err {
            DatingError::InvalidInput { value, .. } => assert_eq!(value, "five"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_impossible_date_is_not_reported_missing() {
        let err = parse_date(Some("2024-02-30".to_string()), "last_period_start").unwrap_err();
        match err {
            DatingError::InvalidInput { field, value, reason } => {
                assert_eq!(field, "last_period_start");
                assert_eq!(value, "2024-02-30");
                assert_ne!(reason, "Required field is missing");
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }
}
