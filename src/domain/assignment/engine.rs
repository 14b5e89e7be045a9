//! Randomised gift assignment

use rand::Rng;
use thiserror::Error;

use super::strategy::AssignmentStrategy;

/// Fewest members a team needs before gifts can be assigned
pub const MIN_ASSIGNABLE_MEMBERS: usize = 2;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssignmentError {
    #[error("At least {required} participants are needed to assign gifts, found {found}")]
    NotEnoughParticipants { required: usize, found: usize },
}

/// In-place Fisher-Yates shuffle: walks from the last index down to 1 and swaps
/// each element with a uniformly chosen element at an index <= the current one.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Draw recipients for `count` members.
///
/// Returns `recipients` where `recipients[i]` is the index of the member that
/// member `i` gives to. The mapping is always a permutation of `0..count`.
pub fn draw_recipients<R: Rng + ?Sized>(
    count: usize,
    strategy: AssignmentStrategy,
    rng: &mut R,
) -> Result<Vec<usize>, AssignmentError> {
    if count < MIN_ASSIGNABLE_MEMBERS {
        return Err(AssignmentError::NotEnoughParticipants {
            required: MIN_ASSIGNABLE_MEMBERS,
            found: count,
        });
    }

    let mut order: Vec<usize> = (0..count).collect();
    fisher_yates(&mut order, rng);

    Ok(strategy.pair(&order))
}

/// Pair every member with the member they give to, in the members' order
pub fn assign_gifts<'a, T, R: Rng + ?Sized>(
    members: &'a [T],
    strategy: AssignmentStrategy,
    rng: &mut R,
) -> Result<Vec<(&'a T, &'a T)>, AssignmentError> {
    let recipients = draw_recipients(members.len(), strategy, rng)?;

    Ok(members
        .iter()
        .zip(recipients)
        .map(|(giver, to)| (giver, &members[to]))
        .collect())
}
