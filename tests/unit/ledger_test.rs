#[cfg(test)]
mod tests {
    use crate::ledger::AnswerLedger;
    use crate::ledger::grading::answers_match;

    #[test]
    fn test_record_rejects_blank_concept() {
        let mut ledger = AnswerLedger::new();
        assert!(ledger.record("", true).is_err());
        assert!(ledger.record("   ", false).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_events_for_preserves_insertion_order() {
        let mut ledger = AnswerLedger::new();
        ledger.record_at("fractions-basic", true, 10).unwrap();
        ledger.record_at("decimals", false, 20).unwrap();
        ledger.record_at("fractions-basic", false, 30).unwrap();

        let stamps: Vec<i64> = ledger.events_for("fractions-basic").map(|e| e.timestamp).collect();
        assert_eq!(stamps, vec![10, 30]);
        assert_eq!(ledger.events_for("unseen").count(), 0);
    }

    #[test]
    fn test_events_for_is_restartable() {
        let mut ledger = AnswerLedger::new();
        for i in 0..4 {
            ledger.record_at("fractions-basic", i % 2 == 0, i).unwrap();
        }
        let seq = ledger.events_for("fractions-basic");
        let first: Vec<_> = seq.clone().collect();
        let second: Vec<_> = seq.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_timestamps_never_go_backwards() {
        let mut ledger = AnswerLedger::new();
        ledger.record_at("a", true, 500).unwrap();
        let event = ledger.record_at("a", true, 100).unwrap();
        assert_eq!(event.timestamp, 500);
    }

    #[test]
    fn test_recent_returns_tail() {
        let mut ledger = AnswerLedger::new();
        for i in 0..6 {
            ledger.record_at("a", true, i).unwrap();
        }
        let recent = ledger.recent(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].timestamp, 3);
        assert_eq!(ledger.recent(50).len(), 6);
    }

    #[test]
    fn test_answers_match_trims_and_ignores_case() {
        assert!(answers_match("  YES ", "yes"));
        assert!(answers_match("3/8", " 3/8"));
        assert!(!answers_match("6 / 8", "6/8"));
        assert!(!answers_match("", "1/2"));
    }

    #[test]
    fn test_ledgers_compare_by_events() {
        let mut a = AnswerLedger::new();
        let mut b = AnswerLedger::new();
        a.record_at("fractions", true, 10).unwrap();
        b.record_at("fractions", true, 10).unwrap();
        assert_eq!(a, b);

        b.record_at("decimals", false, 11).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
