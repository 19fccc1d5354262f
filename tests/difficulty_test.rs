use mathpath::config::engine::DifficultyRules;
use mathpath::difficulty::{adjust, adjust_for_accuracy, placement_tier, DifficultyTier};
use mathpath::ledger::AnswerLedger;

fn ledger_with(pattern: &[bool]) -> AnswerLedger {
    let mut ledger = AnswerLedger::new();
    for (i, correct) in pattern.iter().enumerate() {
        ledger.record_at("fractions", *correct, i as i64).unwrap();
    }
    ledger
}

#[test]
fn test_medium_to_hard_at_92() {
    let rules = DifficultyRules::default();
    let adj = adjust_for_accuracy(DifficultyTier::Medium, 92.0, 5, &rules);
    assert!(adj.should_change);
    assert_eq!(adj.new_level, DifficultyTier::Hard);
    assert!(adj.message.is_some());
}

#[test]
fn test_promotion_fires_exactly_at_threshold() {
    let rules = DifficultyRules::default();
    let ledger = ledger_with(&[true, true, true, true, false]);
    let adj = adjust(DifficultyTier::Easy, ledger.events(), &rules);
    assert_eq!(adj.accuracy, 80.0);
    assert!(adj.should_change);
    assert_eq!(adj.new_level, DifficultyTier::Medium);
}

#[test]
fn test_no_change_below_min_samples() {
    let rules = DifficultyRules::default();
    let ledger = ledger_with(&[false, false, false, false]);
    let adj = adjust(DifficultyTier::Hard, ledger.events(), &rules);
    assert!(!adj.should_change);
    assert_eq!(adj.new_level, DifficultyTier::Hard);
}

#[test]
fn test_demotions_use_strict_less_than() {
    let rules = DifficultyRules::default();
    assert!(!adjust_for_accuracy(DifficultyTier::Medium, 50.0, 5, &rules).should_change);
    let adj = adjust_for_accuracy(DifficultyTier::Medium, 40.0, 5, &rules);
    assert_eq!(adj.new_level, DifficultyTier::Easy);

    assert!(!adjust_for_accuracy(DifficultyTier::Hard, 60.0, 5, &rules).should_change);
    let adj = adjust_for_accuracy(DifficultyTier::Hard, 59.9, 5, &rules);
    assert_eq!(adj.new_level, DifficultyTier::Medium);
}

#[test]
fn test_hysteresis_band_holds_medium() {
    let rules = DifficultyRules::default();
    for accuracy in [50.0, 60.0, 80.0, 89.9] {
        let adj = adjust_for_accuracy(DifficultyTier::Medium, accuracy, 10, &rules);
        assert!(!adj.should_change, "medium moved at {}", accuracy);
    }
}

#[test]
fn test_hard_and_easy_edges_stay_put() {
    let rules = DifficultyRules::default();
    assert!(!adjust_for_accuracy(DifficultyTier::Hard, 100.0, 5, &rules).should_change);
    assert!(!adjust_for_accuracy(DifficultyTier::Easy, 0.0, 5, &rules).should_change);
}

#[test]
fn test_window_only_counts_recent_answers() {
    let rules = DifficultyRules::default();
    // Early misses fall outside the five-answer window
    let ledger = ledger_with(&[false, false, false, true, true, true, true, true]);
    let adj = adjust(DifficultyTier::Medium, ledger.events(), &rules);
    assert_eq!(adj.accuracy, 100.0);
    assert_eq!(adj.new_level, DifficultyTier::Hard);
}

#[test]
fn test_placement_tiers() {
    assert_eq!(placement_tier(80.0), DifficultyTier::Hard);
    assert_eq!(placement_tier(79.0), DifficultyTier::Medium);
    assert_eq!(placement_tier(40.0), DifficultyTier::Medium);
    assert_eq!(placement_tier(39.9), DifficultyTier::Easy);
}

#[test]
fn test_learning_level_aliases_deserialize() {
    let tier: DifficultyTier = serde_json::from_str("\"advanced\"").unwrap();
    assert_eq!(tier, DifficultyTier::Hard);
    let tier: DifficultyTier = serde_json::from_str("\"beginner\"").unwrap();
    assert_eq!(tier, DifficultyTier::Easy);
    assert_eq!(serde_json::to_string(&DifficultyTier::Medium).unwrap(), "\"medium\"");
    assert_eq!(DifficultyTier::Medium.learning_level(), "intermediate");
}
