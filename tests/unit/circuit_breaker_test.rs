#[cfg(test)]
mod tests {
    use crate::circuit_breaker::{BreakerState, CircuitBreaker};

    #[test]
    fn test_circuit_breaker_initial_state() {
        let cb = CircuitBreaker::new(60, 3);
        assert_eq!(cb.state(), BreakerState::Closed);
        assert_eq!(cb.failure_count(), 0);
    }

    #[test]
    fn test_circuit_breaker_opens_after_threshold() {
        let cb = CircuitBreaker::new(60, 3);

        cb.record_failure();
        assert!(!cb.is_open());

        cb.record_failure();
        assert!(!cb.is_open());

        cb.record_failure();
        assert!(cb.is_open());
        assert_eq!(cb.state(), BreakerState::Open);
    }

    #[test]
    fn test_circuit_breaker_resets_on_success() {
        let cb = CircuitBreaker::new(60, 3);

        cb.record_failure();
        cb.record_failure();
        cb.record_success();

        assert!(!cb.is_open());
        assert_eq!(cb.failure_count(), 0);
    }

    #[test]
    fn test_circuit_breaker_half_opens_after_cooldown() {
        let cb = CircuitBreaker::new(0, 2);
        cb.record_failure();
        cb.record_failure();
        // Zero cooldown: the next check lets a trial write through
        assert_eq!(cb.state(), BreakerState::HalfOpen);
        assert!(!cb.is_open());

        cb.record_success();
        assert_eq!(cb.state(), BreakerState::Closed);
        assert_eq!(cb.failure_count(), 0);
    }

    #[test]
    fn test_failed_trial_reopens_immediately() {
        let cb = CircuitBreaker::new(60, 3);
        for _ in 0..3 {
            cb.record_failure();
        }
        assert!(cb.is_open());
        cb.record_failure();
        assert_eq!(cb.failure_count(), 4);
        assert!(cb.is_open());
    }
}
