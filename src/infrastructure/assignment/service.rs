//! Assignment service: runs the draw for a team and persists `gift_to`

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::assignment::{assign_gifts, AssignmentStrategy};
use crate::domain::participant::{GiftAssignment, Participant, ParticipantRepository};
use crate::domain::team::{Team, TeamId, TeamRepository};
use crate::domain::DomainError;
use crate::infrastructure::exchange_lock::ExchangeLock;
use crate::infrastructure::observability::record_assignment;

/// One giver/recipient pair of a team's draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftPair {
    pub giver_id: String,
    pub giver_name: String,
    pub recipient_id: String,
    pub recipient_name: String,
}

#[derive(Debug)]
pub struct AssignmentService<T: TeamRepository, P: ParticipantRepository> {
    teams: Arc<T>,
    participants: Arc<P>,
    lock: ExchangeLock,
    strategy: AssignmentStrategy,
}

impl<T: TeamRepository, P: ParticipantRepository> AssignmentService<T, P> {
    pub fn new(
        teams: Arc<T>,
        participants: Arc<P>,
        lock: ExchangeLock,
        strategy: AssignmentStrategy,
    ) -> Self {
        Self {
            teams,
            participants,
            lock,
            strategy,
        }
    }

    /// Shuffle the team and overwrite every member's `gift_to`
    ///
    /// Teams with fewer than two registered members are rejected before any
    /// participant is touched.
    pub async fn assign(&self, team_id: &str) -> Result<Vec<GiftPair>, DomainError> {
        let team_id = TeamId::new(team_id)?;

        let mut rng = self.lock.acquire().await;

        let team = self.require_team(&team_id).await?;
        let mut members = self.members_of(&team).await?;

        let assignments: Vec<GiftAssignment> =
            match assign_gifts(&members, self.strategy, &mut *rng) {
                Ok(pairs) => pairs
                    .into_iter()
                    .map(|(_, recipient)| GiftAssignment {
                        recipient_id: recipient.id().clone(),
                        recipient_name: recipient.name().to_string(),
                    })
                    .collect(),
                Err(e) => {
                    warn!(
                        team_id = %team_id,
                        participant_count = members.len(),
                        "Cannot assign gifts"
                    );
                    return Err(e.into());
                }
            };

        let previous = members.clone();
        for (member, assignment) in members.iter_mut().zip(assignments) {
            member.assign_gift(assignment);
        }

        let mut updated = Vec::with_capacity(members.len());
        for member in members {
            match self.participants.update(member).await {
                Ok(member) => updated.push(member),
                Err(e) => {
                    warn!(team_id = %team_id, error = %e, "Restoring previous draw");
                    for member in previous.into_iter().take(updated.len()) {
                        self.participants.update(member).await?;
                    }
                    return Err(e);
                }
            }
        }

        info!(
            team_id = %team_id,
            participant_count = updated.len(),
            strategy = %self.strategy,
            "Assigned gifts"
        );
        record_assignment(self.strategy, updated.len());

        Ok(pairs_of(&updated))
    }

    /// The pairs from the last draw, without reshuffling
    pub async fn current(&self, team_id: &str) -> Result<Vec<GiftPair>, DomainError> {
        let team_id = TeamId::new(team_id)?;
        debug!(team_id = %team_id, "Reading current assignments");

        let team = self.require_team(&team_id).await?;
        let members = self.members_of(&team).await?;

        Ok(pairs_of(&members))
    }

    async fn require_team(&self, team_id: &TeamId) -> Result<Team, DomainError> {
        self.teams
            .get(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", team_id)))
    }

    /// Team members in registration order
    async fn members_of(&self, team: &Team) -> Result<Vec<Participant>, DomainError> {
        let mut members = Vec::with_capacity(team.registrations().len());

        for registration in team.registrations() {
            let participant = self
                .participants
                .get(&registration.participant_id)
                .await?
                .ok_or_else(|| {
                    DomainError::internal(format!(
                        "Team '{}' lists missing participant '{}'",
                        team.id(),
                        registration.participant_id
                    ))
                })?;
            members.push(participant);
        }

        Ok(members)
    }
}

fn pairs_of(members: &[Participant]) -> Vec<GiftPair> {
    members
        .iter()
        .filter_map(|giver| {
            giver.gift_to().map(|gift| GiftPair {
                giver_id: giver.id().to_string(),
                giver_name: giver.name().to_string(),
                recipient_id: gift.recipient_id.to_string(),
                recipient_name: gift.recipient_name.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::participant::ParticipantId;
    use crate::infrastructure::participant::StorageParticipantRepository;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::team::StorageTeamRepository;

    struct Fixture {
        teams: Arc<StorageTeamRepository>,
        participants: Arc<StorageParticipantRepository>,
        lock: ExchangeLock,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                teams: Arc::new(StorageTeamRepository::new(Arc::new(
                    InMemoryStorage::<Team>::new(),
                ))),
                participants: Arc::new(StorageParticipantRepository::new(Arc::new(
                    InMemoryStorage::<Participant>::new(),
                ))),
                lock: ExchangeLock::new(Some(2024)),
            }
        }

        fn service(
            &self,
            strategy: AssignmentStrategy,
        ) -> AssignmentService<StorageTeamRepository, StorageParticipantRepository> {
            AssignmentService::new(
                self.teams.clone(),
                self.participants.clone(),
                self.lock.clone(),
                strategy,
            )
        }

        /// Create a team and register `names` against its codes, in order
        async fn team_with(&self, id: &str, names: &[&str]) -> TeamId {
            let team_id = TeamId::new(id).unwrap();
            let codes: Vec<String> = (0..names.len().max(2))
                .map(|i| format!("{}-{}", id.to_uppercase(), i))
                .collect();
            let mut team = Team::new(team_id.clone(), id, "", codes.clone()).unwrap();

            for (name, code) in names.iter().zip(&codes) {
                let participant =
                    Participant::new(ParticipantId::generate(), *name, code, team_id.clone())
                        .unwrap();
                team.redeem(code, participant.id().clone(), participant.name())
                    .unwrap();
                self.participants.create(participant).await.unwrap();
            }

            self.teams.create(team).await.unwrap();
            team_id
        }

        async fn gifts(&self, team_id: &TeamId) -> Vec<Option<String>> {
            self.participants
                .list_by_team(team_id)
                .await
                .unwrap()
                .iter()
                .map(|p| p.gift_to_name().map(String::from))
                .collect()
        }
    }

    fn sorted(mut v: Vec<String>) -> Vec<String> {
        v.sort();
        v
    }

    #[tokio::test]
    async fn test_assign_covers_every_member_once() {
        let fixture = Fixture::new();
        let names = ["Alice", "Bob", "Carol", "Dave", "Erin"];
        let team_id = fixture.team_with("elves", &names).await;

        for strategy in [AssignmentStrategy::ShuffledOffset, AssignmentStrategy::SingleCycle] {
            let pairs = fixture.service(strategy).assign(team_id.as_str()).await.unwrap();

            assert_eq!(pairs.len(), names.len());
            let givers: Vec<String> = pairs.iter().map(|p| p.giver_name.clone()).collect();
            let recipients: Vec<String> =
                pairs.iter().map(|p| p.recipient_name.clone()).collect();
            assert_eq!(givers, names.to_vec());
            assert_eq!(
                sorted(recipients),
                sorted(names.iter().map(|n| n.to_string()).collect())
            );

            let stored: Vec<String> = fixture
                .gifts(&team_id)
                .await
                .into_iter()
                .map(Option::unwrap)
                .collect();
            assert_eq!(
                sorted(stored),
                sorted(names.iter().map(|n| n.to_string()).collect())
            );
        }
    }

    #[tokio::test]
    async fn test_single_cycle_never_self_assigns() {
        let fixture = Fixture::new();
        let team_id = fixture.team_with("pair", &["Alice", "Bob"]).await;
        let service = fixture.service(AssignmentStrategy::SingleCycle);

        for _ in 0..50 {
            let pairs = service.assign(team_id.as_str()).await.unwrap();
            assert!(pairs.iter().all(|p| p.giver_id != p.recipient_id));
        }
    }

    #[tokio::test]
    async fn test_assign_with_too_few_members_changes_nothing() {
        let fixture = Fixture::new();
        let service = fixture.service(AssignmentStrategy::SingleCycle);

        let empty = fixture.team_with("empty", &[]).await;
        let result = service.assign(empty.as_str()).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let solo = fixture.team_with("solo", &["Alice"]).await;
        let result = service.assign(solo.as_str()).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert_eq!(fixture.gifts(&solo).await, vec![None]);
    }

    #[tokio::test]
    async fn test_assign_leaves_other_teams_alone() {
        let fixture = Fixture::new();
        let elves = fixture.team_with("elves", &["Alice", "Bob", "Carol"]).await;
        let reindeer = fixture.team_with("reindeer", &["Dasher", "Dancer"]).await;

        fixture
            .service(AssignmentStrategy::SingleCycle)
            .assign(elves.as_str())
            .await
            .unwrap();

        assert_eq!(fixture.gifts(&reindeer).await, vec![None, None]);
        assert!(fixture.gifts(&elves).await.iter().all(Option::is_some));
    }

    #[tokio::test]
    async fn test_rerun_overwrites_previous_draw() {
        let fixture = Fixture::new();
        let names = ["A", "B", "C", "D", "E", "F", "G", "H"];
        let team_id = fixture.team_with("big", &names).await;
        let service = fixture.service(AssignmentStrategy::SingleCycle);

        let first = service.assign(team_id.as_str()).await.unwrap();
        let mut changed = false;
        for _ in 0..20 {
            let next = service.assign(team_id.as_str()).await.unwrap();
            assert_eq!(service.current(team_id.as_str()).await.unwrap(), next);
            if next != first {
                changed = true;
                break;
            }
        }

        assert!(changed);
    }

    #[tokio::test]
    async fn test_current_before_any_draw_is_empty() {
        let fixture = Fixture::new();
        let team_id = fixture.team_with("fresh", &["Alice", "Bob"]).await;
        let service = fixture.service(AssignmentStrategy::SingleCycle);

        assert!(service.current(team_id.as_str()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_assign_unknown_team() {
        let fixture = Fixture::new();
        let service = fixture.service(AssignmentStrategy::SingleCycle);

        assert!(matches!(
            service.assign("missing").await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.current("missing").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    /// Stores participants but fails the `fail_on`-th update (1-based)
    #[derive(Debug)]
    struct FlakyParticipants {
        inner: Arc<StorageParticipantRepository>,
        updates: AtomicUsize,
        fail_on: usize,
    }

    #[async_trait::async_trait]
    impl ParticipantRepository for FlakyParticipants {
        async fn get(&self, id: &ParticipantId) -> Result<Option<Participant>, DomainError> {
            self.inner.get(id).await
        }

        async fn create(&self, participant: Participant) -> Result<Participant, DomainError> {
            self.inner.create(participant).await
        }

        async fn update(&self, participant: Participant) -> Result<Participant, DomainError> {
            if self.updates.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_on {
                return Err(DomainError::storage("participant store unavailable"));
            }
            self.inner.update(participant).await
        }

        async fn list(&self) -> Result<Vec<Participant>, DomainError> {
            self.inner.list().await
        }

        async fn list_by_team(&self, team_id: &TeamId) -> Result<Vec<Participant>, DomainError> {
            self.inner.list_by_team(team_id).await
        }

        async fn find_by_telegram_id(
            &self,
            telegram_id: i64,
        ) -> Result<Option<Participant>, DomainError> {
            self.inner.find_by_telegram_id(telegram_id).await
        }

        async fn count(&self) -> Result<usize, DomainError> {
            self.inner.count().await
        }
    }

    #[tokio::test]
    async fn test_failed_write_restores_previous_draw() {
        let fixture = Fixture::new();
        let team_id = fixture
            .team_with("elves", &["Alice", "Bob", "Carol", "Dave"])
            .await;
        let first = fixture
            .service(AssignmentStrategy::SingleCycle)
            .assign(team_id.as_str())
            .await
            .unwrap();

        // Third member write fails after two members were already overwritten
        let flaky = Arc::new(FlakyParticipants {
            inner: fixture.participants.clone(),
            updates: AtomicUsize::new(0),
            fail_on: 3,
        });
        let service = AssignmentService::new(
            fixture.teams.clone(),
            flaky,
            fixture.lock.clone(),
            AssignmentStrategy::SingleCycle,
        );

        let result = service.assign(team_id.as_str()).await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
        assert_eq!(
            fixture
                .service(AssignmentStrategy::SingleCycle)
                .current(team_id.as_str())
                .await
                .unwrap(),
            first
        );
    }
}
