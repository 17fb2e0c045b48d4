use gym_scheduler_core::io::documents::RawPreferencesDoc;
use gym_scheduler_core::model::config::Configuration;
use gym_scheduler_core::model::event::RawEventEntry;
use gym_scheduler_core::platform::RunContext;
use gym_scheduler_core::run_allocation;
use gym_scheduler_core::scheduler::materializer::{DayStatus, UNASSIGNED_LABEL};

fn ctx() -> RunContext {
    RunContext::new("data".into(), "out".into())
}

fn prefs(pairs: &[(&str, &[&str])]) -> RawPreferencesDoc {
    let mut map = RawPreferencesDoc::new();
    for (team, dates) in pairs {
        map.insert(team.to_string(), dates.iter().map(|d| d.to_string()).collect());
    }
    map
}

/// S1 - single team, single day: the team should claim the whole window.
#[test]
fn s1_single_team_single_day() {
    let config = Configuration::from_yaml_str(
        "year: 2026\nmonth: 1\nmin_slots: 3\nmax_solve_seconds: 1\navailability:\n  \"10\": [\"18:00\", \"22:00\", null, null]\n",
    )
    .unwrap();
    let preferences = prefs(&[("A", &["2026-01-10"])]);
    let mut context = ctx();

    let result = run_allocation(&config, &preferences, &[], &mut context).unwrap();

    let row = &result.schedule[9];
    assert_eq!(row.status, DayStatus::Normal);
    assert_eq!(row.blocks.len(), 1);
    assert_eq!(row.blocks[0].label, "A");
    assert_eq!(row.blocks[0].start, 18 * 60);
    assert_eq!(row.blocks[0].end, 22 * 60);

    let total_a: i64 = result.by_team.iter().filter(|r| r.team == "A").map(|r| (r.end - r.start) as i64 / 30).sum();
    assert_eq!(total_a, 8);
}

/// S2 - two teams sharing one day should split it within one slot of each other.
#[test]
fn s2_two_teams_daily_equity() {
    let config = Configuration::from_yaml_str(
        "year: 2026\nmonth: 1\nmin_slots: 3\nmax_solve_seconds: 1\navailability:\n  \"5\": [\"09:00\", \"15:00\", null, null]\n",
    )
    .unwrap();
    let preferences = prefs(&[("A", &["2026-01-05"]), ("B", &["2026-01-05"])]);
    let mut context = ctx();

    let result = run_allocation(&config, &preferences, &[], &mut context).unwrap();

    let row = &result.schedule[4];
    assert_eq!(row.status, DayStatus::Normal);
    let team_blocks: Vec<_> = row.blocks.iter().filter(|b| b.label != UNASSIGNED_LABEL).collect();
    assert_eq!(team_blocks.len(), 2);
    let usages: Vec<i64> = team_blocks.iter().map(|b| (b.end - b.start) as i64 / 30).collect();
    assert!((usages[0] - usages[1]).abs() <= 1);

    // Earlier starter must not use more than the later starter.
    let mut ordered = team_blocks.clone();
    ordered.sort_by_key(|b| b.start);
    let earlier_usage = (ordered[0].end - ordered[0].start) / 30;
    let later_usage = (ordered[1].end - ordered[1].start) / 30;
    assert!(earlier_usage <= later_usage);
}

/// S3 - an event pins its team to exactly its window; other teams may use the rest of the day.
#[test]
fn s3_event_pinning() {
    let config = Configuration::from_yaml_str(
        "year: 2026\nmonth: 1\nmin_slots: 3\nmax_solve_seconds: 1\navailability:\n  \"15\": [\"09:00\", \"22:00\", null, null]\n",
    )
    .unwrap();
    let preferences = prefs(&[("B", &["2026-01-15"])]);
    let events = vec![RawEventEntry { team: "A".to_string(), date: "2026-01-15".to_string(), start: "18:00".to_string(), duration_hours: 4.0, note: None }];
    let mut context = ctx();

    let result = run_allocation(&config, &preferences, &events, &mut context).unwrap();

    let row = &result.schedule[14];
    let a_blocks: Vec<_> = row.blocks.iter().filter(|b| b.label == "A").collect();
    assert_eq!(a_blocks.len(), 1);
    assert_eq!(a_blocks[0].start, 18 * 60);
    assert_eq!(a_blocks[0].end, 22 * 60);

    // No other team occupies A's window.
    for b in &row.blocks {
        if b.label != "A" {
            assert!(b.end <= 18 * 60 || b.start >= 22 * 60);
        }
    }
}

/// S4 - an event covering the whole window saturates the day: full_event_days.
#[test]
fn s4_full_event_day_excludes_other_teams() {
    let config = Configuration::from_yaml_str(
        "year: 2026\nmonth: 1\nmin_slots: 3\nmax_solve_seconds: 1\navailability:\n  \"15\": [\"18:00\", \"20:00\", null, null]\n",
    )
    .unwrap();
    let preferences = prefs(&[("B", &["2026-01-15"])]);
    let events = vec![RawEventEntry { team: "A".to_string(), date: "2026-01-15".to_string(), start: "18:00".to_string(), duration_hours: 2.0, note: None }];
    let mut context = ctx();

    let result = run_allocation(&config, &preferences, &events, &mut context).unwrap();

    assert!(result.model.event_index.is_full_event_day(result.model.days[14].date));
    let row = &result.schedule[14];
    assert!(row.blocks.iter().all(|b| b.label == "A"));
}

/// S5 - a misaligned event is dropped with a warning, the run still succeeds.
#[test]
fn s5_invalid_event_dropped() {
    let config = Configuration::from_yaml_str(
        "year: 2026\nmonth: 1\nmin_slots: 3\nmax_solve_seconds: 1\navailability:\n  \"15\": [\"09:00\", \"22:00\", null, null]\n",
    )
    .unwrap();
    let preferences = prefs(&[("A", &["2026-01-15"])]);
    let events = vec![RawEventEntry { team: "A".to_string(), date: "2026-01-15".to_string(), start: "18:15".to_string(), duration_hours: 4.0, note: None }];
    let mut context = ctx();

    let result = run_allocation(&config, &preferences, &events, &mut context).unwrap();

    assert!(result.model.events.is_empty());
    let row = &result.schedule[14];
    assert_eq!(row.status, DayStatus::Normal);
}

/// S6 - proportional fairness: a team with twice the preference count should
/// tend to roughly double the monthly usage of a team it never conflicts with.
#[test]
fn s6_monthly_proportional_fairness() {
    let mut a_dates = Vec::new();
    let mut b_dates = Vec::new();
    let mut availability = String::new();
    for d in 1..=10 {
        a_dates.push(format!("2026-01-{d:02}"));
        availability.push_str(&format!("  \"{d}\": [\"18:00\", \"20:00\", null, null]\n"));
    }
    for d in 11..=15 {
        b_dates.push(format!("2026-01-{d:02}"));
        availability.push_str(&format!("  \"{d}\": [\"18:00\", \"20:00\", null, null]\n"));
    }
    let yaml = format!("year: 2026\nmonth: 1\nmin_slots: 3\nmax_solve_seconds: 1\navailability:\n{availability}");
    let config = Configuration::from_yaml_str(&yaml).unwrap();
    let a_refs: Vec<&str> = a_dates.iter().map(String::as_str).collect();
    let b_refs: Vec<&str> = b_dates.iter().map(String::as_str).collect();
    let preferences = prefs(&[("A", &a_refs), ("B", &b_refs)]);
    let mut context = ctx();

    let result = run_allocation(&config, &preferences, &[], &mut context).unwrap();

    let total_a: i64 = result.by_team.iter().filter(|r| r.team == "A").map(|r| (r.end - r.start) as i64 / 30).sum();
    let total_b: i64 = result.by_team.iter().filter(|r| r.team == "B").map(|r| (r.end - r.start) as i64 / 30).sum();
    assert_eq!(total_a, 40);
    assert_eq!(total_b, 20);
}

/// S7 - an event splitting a day into two free runs of different sizes must
/// still leave every non-event team within one slot of every other, not just
/// within its own run.
#[test]
fn s7_cross_run_equity_on_split_event_day() {
    let config = Configuration::from_yaml_str(
        "year: 2026\nmonth: 1\nmin_slots: 2\nmax_solve_seconds: 1\navailability:\n  \"10\": [\"09:00\", \"15:00\", null, null]\n",
    )
    .unwrap();
    let preferences = prefs(&[("A", &["2026-01-10"]), ("B", &["2026-01-10"]), ("C", &["2026-01-10"]), ("D", &["2026-01-10"])]);
    let events = vec![RawEventEntry { team: "E".to_string(), date: "2026-01-10".to_string(), start: "12:00".to_string(), duration_hours: 0.5, note: None }];
    let mut context = ctx();

    let result = run_allocation(&config, &preferences, &events, &mut context).unwrap();

    let usages: Vec<i64> = ["A", "B", "C", "D"]
        .iter()
        .map(|team| result.by_team.iter().filter(|r| r.team == *team).map(|r| (r.end - r.start) as i64 / 30).sum())
        .collect();
    let max = *usages.iter().max().unwrap();
    let min = *usages.iter().min().unwrap();
    assert!(max - min <= 1, "usages {usages:?} span more than one slot across the day's two free runs");
}

/// S8 - two different teams pinned to overlapping windows on the same day is
/// an infeasible hard-pin conflict; the run must fail fast with NoSolution.
#[test]
fn s8_conflicting_events_abort_with_no_solution() {
    let config = Configuration::from_yaml_str(
        "year: 2026\nmonth: 1\nmin_slots: 2\nmax_solve_seconds: 1\navailability:\n  \"10\": [\"09:00\", \"15:00\", null, null]\n",
    )
    .unwrap();
    let events = vec![
        RawEventEntry { team: "A".to_string(), date: "2026-01-10".to_string(), start: "10:00".to_string(), duration_hours: 2.0, note: None },
        RawEventEntry { team: "B".to_string(), date: "2026-01-10".to_string(), start: "11:00".to_string(), duration_hours: 2.0, note: None },
    ];
    let mut context = ctx();

    let err = run_allocation(&config, &prefs(&[]), &events, &mut context).unwrap_err();
    assert!(matches!(err, gym_scheduler_core::error::Error::NoSolution));
}
