mod circuit_breaker_test;
mod config_test;
mod error_handling_test;
mod ledger_test;
mod rewards_test;
