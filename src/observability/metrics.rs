//! Engine counters.
//!
//! Recorded through the `metrics` facade. Nothing is exported unless the
//! embedding application installs a recorder; without one every call is a
//! no-op.

use metrics::{counter, describe_counter};

use crate::engine::SimulationMode;

/// Registers metric descriptions with the global recorder.
pub fn describe_metrics() {
    describe_counter!("plexus_traces_total", "Nerve pathway traces computed");
    describe_counter!(
        "plexus_simulations_total",
        "Lesion simulations computed, by simulation mode"
    );
    describe_counter!("plexus_cases_generated_total", "Quiz cases generated");
    describe_counter!(
        "plexus_case_generation_failures_total",
        "Case generation attempts that found no matching lesion"
    );
    describe_counter!(
        "plexus_answers_submitted_total",
        "Quiz answers submitted, by outcome"
    );
}

/// Records a pathway trace.
pub fn record_trace() {
    counter!("plexus_traces_total").increment(1);
}

/// Records a lesion simulation.
pub fn record_simulation(mode: SimulationMode) {
    counter!("plexus_simulations_total", "mode" => mode.as_str()).increment(1);
}

/// Records a generated case.
pub fn record_case_generated() {
    counter!("plexus_cases_generated_total").increment(1);
}

/// Records a case generation failure.
pub fn record_case_generation_failure() {
    counter!("plexus_case_generation_failures_total").increment(1);
}

/// Records a submitted answer.
pub fn record_answer(correct: bool) {
    let outcome = if correct { "correct" } else { "incorrect" };
    counter!("plexus_answers_submitted_total", "outcome" => outcome).increment(1);
}
