//! Pairing strategies applied on top of a shuffled order

use serde::{Deserialize, Serialize};

/// How givers are matched to recipients once the order has been shuffled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStrategy {
    /// Giver `i` (registration order) gives to `shuffled[(i + 1) % k]`.
    /// Always a permutation, but a giver may draw themselves.
    ShuffledOffset,
    /// `shuffled[i]` gives to `shuffled[(i + 1) % k]`: one k-cycle, so no
    /// giver ever draws themselves.
    #[default]
    SingleCycle,
}

impl AssignmentStrategy {
    /// Map a shuffled order of member indices to recipients.
    ///
    /// The result is indexed by giver (registration order): `result[i]` is the
    /// index of the member that member `i` gives to.
    pub fn pair(&self, shuffled: &[usize]) -> Vec<usize> {
        let k = shuffled.len();

        match self {
            Self::ShuffledOffset => (0..k).map(|i| shuffled[(i + 1) % k]).collect(),
            Self::SingleCycle => {
                let mut recipients = vec![0; k];

                for (position, &giver) in shuffled.iter().enumerate() {
                    recipients[giver] = shuffled[(position + 1) % k];
                }

                recipients
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShuffledOffset => "shuffled_offset",
            Self::SingleCycle => "single_cycle",
        }
    }
}

impl std::fmt::Display for AssignmentStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
