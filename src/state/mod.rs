pub mod app;
pub mod learner;
