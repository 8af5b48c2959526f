use rand::Rng;

use crate::models::SleepPhase;

/// One stage of the sleep-architecture table. While session time is below
/// `upto_hours`, a uniform draw picks `candidate` with `candidate_probability`
/// and `fallback` otherwise.
struct PhaseStage {
    upto_hours: f64,
    candidate: SleepPhase,
    fallback: SleepPhase,
    candidate_probability: f64,
}

/// Memoryless staged model: the phase depends only on elapsed session hours,
/// not on the previous phase. Deep sleep concentrates early, REM late.
const STAGES: [PhaseStage; 6] = [
    PhaseStage {
        upto_hours: 0.5,
        candidate: SleepPhase::Awake,
        fallback: SleepPhase::Awake,
        candidate_probability: 1.0,
    },
    PhaseStage {
        upto_hours: 1.0,
        candidate: SleepPhase::Light,
        fallback: SleepPhase::Awake,
        candidate_probability: 0.7,
    },
    PhaseStage {
        upto_hours: 3.0,
        candidate: SleepPhase::Deep,
        fallback: SleepPhase::Light,
        candidate_probability: 0.8,
    },
    PhaseStage {
        upto_hours: 5.0,
        candidate: SleepPhase::Light,
        fallback: SleepPhase::Deep,
        candidate_probability: 0.7,
    },
    PhaseStage {
        upto_hours: 7.0,
        candidate: SleepPhase::Rem,
        fallback: SleepPhase::Light,
        candidate_probability: 0.8,
    },
    PhaseStage {
        upto_hours: f64::INFINITY,
        candidate: SleepPhase::Light,
        fallback: SleepPhase::Rem,
        candidate_probability: 0.6,
    },
];

pub(crate) fn phase_for_session_hours<R: Rng + ?Sized>(hours: f64, rng: &mut R) -> SleepPhase {
    let stage = STAGES
        .iter()
        .find(|stage| hours < stage.upto_hours)
        .unwrap_or(&STAGES[STAGES.len() - 1]);

    if rng.gen::<f64>() < stage.candidate_probability {
        stage.candidate
    } else {
        stage.fallback
    }
}
