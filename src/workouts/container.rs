//! Step container algorithm shared by [`Workout`](super::Workout) and
//! [`CompositeStep`](super::CompositeStep).
//!
//! Both owners keep their steps in a plain `Vec` and call into these
//! functions, so the ordering and numbering rules live in one place.

use super::types::WorkoutError;

/// Something carrying a container-local step id.
pub trait Identified {
    fn step_id(&self) -> u32;
    fn set_step_id(&mut self, step_id: u32);
}

/// How to pick the step to remove from a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepSelector {
    /// The step with this id
    Id(u32),
    /// The last step in the container
    Last,
}

/// Sort steps by their current id and renumber them `1..=N`.
///
/// The sort is stable, so steps sharing an id keep their relative order.
pub fn reindex<T: Identified>(steps: &mut [T]) {
    steps.sort_by_key(|s| s.step_id());
    for (idx, step) in steps.iter_mut().enumerate() {
        step.set_step_id(idx as u32 + 1);
    }
}

/// Append a step after the existing ones and renumber.
pub fn push_step<T: Identified>(steps: &mut Vec<T>, mut step: T) {
    reindex(steps);
    step.set_step_id(steps.len() as u32 + 1);
    steps.push(step);
}

/// Remove a step and renumber the remaining ones.
pub fn remove_step<T: Identified>(
    steps: &mut Vec<T>,
    selector: StepSelector,
) -> Result<T, WorkoutError> {
    if steps.is_empty() {
        return Err(WorkoutError::EmptyContainer);
    }

    let removed = match selector {
        StepSelector::Id(step_id) => {
            let position = steps
                .iter()
                .position(|s| s.step_id() == step_id)
                .ok_or(WorkoutError::StepNotFound(step_id))?;
            steps.remove(position)
        }
        StepSelector::Last => steps.pop().ok_or(WorkoutError::EmptyContainer)?,
    };

    reindex(steps);
    Ok(removed)
}

/// First step carrying `step_id`, if any.
pub fn find_step<T: Identified>(steps: &[T], step_id: u32) -> Option<&T> {
    steps.iter().find(|s| s.step_id() == step_id)
}
