use mathpath::accuracy::{overall_accuracy, per_concept_breakdown, practice_priorities, windowed_accuracy};
use mathpath::ledger::{AnswerEvent, AnswerLedger};

fn ledger_from(answers: &[(&str, bool)]) -> AnswerLedger {
    let mut ledger = AnswerLedger::new();
    for (i, (concept, correct)) in answers.iter().enumerate() {
        ledger.record_at(concept, *correct, i as i64).unwrap();
    }
    ledger
}

#[test]
fn test_empty_sequence_is_perfect() {
    let events: Vec<AnswerEvent> = Vec::new();
    assert_eq!(overall_accuracy(&events), 100.0);
    assert_eq!(windowed_accuracy(&events, 5), 100.0);
}

#[test]
fn test_overall_and_windowed_for_concept() {
    // 10 answers, 3 correct overall, 2 correct among the last 5
    let pattern = [true, false, false, false, false, true, false, true, false, false];
    let answers: Vec<(&str, bool)> = pattern.iter().map(|c| ("fractions-basic", *c)).collect();
    let ledger = ledger_from(&answers);

    let events = ledger.events_for("fractions-basic");
    assert_eq!(overall_accuracy(events.clone()), 30.0);
    assert_eq!(windowed_accuracy(events, 5), 40.0);
}

#[test]
fn test_window_larger_than_history_uses_everything() {
    let ledger = ledger_from(&[("a", true), ("a", false)]);
    assert_eq!(windowed_accuracy(ledger.events(), 5), 50.0);
}

#[test]
fn test_accuracy_stays_in_bounds() {
    let patterns: [&[bool]; 4] = [&[true; 7], &[false; 7], &[true, false, true], &[false]];
    for pattern in patterns {
        let answers: Vec<(&str, bool)> = pattern.iter().map(|c| ("x", *c)).collect();
        let ledger = ledger_from(&answers);
        let pct = overall_accuracy(ledger.events());
        assert!((0.0..=100.0).contains(&pct), "accuracy {} out of range", pct);
        let pct = windowed_accuracy(ledger.events(), 3);
        assert!((0.0..=100.0).contains(&pct));
    }
}

#[test]
fn test_per_concept_breakdown() {
    let ledger = ledger_from(&[
        ("fractions", true),
        ("decimals", false),
        ("fractions", false),
        ("fractions", true),
    ]);
    let breakdown = per_concept_breakdown(ledger.events());
    let fractions = &breakdown["fractions"];
    assert_eq!((fractions.correct, fractions.total), (2, 3));
    assert!((fractions.accuracy_pct() - 66.666).abs() < 0.01);
    assert_eq!(breakdown["decimals"].accuracy_pct(), 0.0);
    for entry in breakdown.values() {
        assert!(entry.correct <= entry.total);
    }
}

#[test]
fn test_practice_priorities_rank_by_mistakes() {
    let ledger = ledger_from(&[
        ("percentages", false),
        ("decimals", false),
        ("decimals", false),
        ("fractions", true),
        ("fractions", false),
        ("number-sense", true),
    ]);
    let ranked: Vec<String> = practice_priorities(ledger.events())
        .into_iter()
        .map(|c| c.concept)
        .collect();
    // decimals: 2 mistakes; percentages: 1 mistake and never right; fractions: 1 mistake
    assert_eq!(ranked, vec!["decimals", "percentages", "fractions"]);
}
