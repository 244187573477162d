use {
    serde::{Deserialize, Serialize},
    strum::{AsRefStr, EnumString},
};

/// The wizard cursor.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    #[default]
    Value,
    Data,
    Payment,
    Success,
}

/// The step sequence for a donor. Authenticated donors skip the personal
/// data step; their data is already on file.
pub fn flow(logged_in: bool) -> &'static [Step] {
    if logged_in {
        &[Step::Value, Step::Payment, Step::Success]
    } else {
        &[Step::Value, Step::Data, Step::Payment, Step::Success]
    }
}

/// Folds a rehydrated step into the active flow. The only way a persisted
/// step can fall outside it is `Data` after the donor logged in; that
/// resumes at `Payment`.
pub fn normalize(step: Step, logged_in: bool) -> Step {
    if flow(logged_in).contains(&step) {
        step
    } else {
        Step::Payment
    }
}

/// The step after `step` in the active flow, or `None` at the end.
pub fn next(step: Step, logged_in: bool) -> Option<Step> {
    let flow = flow(logged_in);
    let index = flow.iter().position(|candidate| *candidate == step)?;
    flow.get(index + 1).copied()
}

/// The step before `step` in the active flow, or `None` at the start.
pub fn previous(step: Step, logged_in: bool) -> Option<Step> {
    let flow = flow(logged_in);
    let index = flow.iter().position(|candidate| *candidate == step)?;
    flow.get(index.checked_sub(1)?).copied()
}

/// 1-based position of `step` within the active flow plus the flow length,
/// for the progress indicator.
pub fn progress(step: Step, logged_in: bool) -> (usize, usize) {
    let step = normalize(step, logged_in);
    let flow = flow(logged_in);
    let position = flow
        .iter()
        .position(|candidate| *candidate == step)
        .expect("normalized step is in its flow");
    (position + 1, flow.len())
}
