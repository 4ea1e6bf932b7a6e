//! Session use cases.
//!
//! Tracks one creator per player, serialises the input each creator sees and
//! expires sessions that have gone quiet.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use doorwright_domain::PlayerId;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::infrastructure::ports::{ClockPort, CreatorMessage, NotifierPort};
use crate::use_cases::creator::Creator;
use crate::use_cases::procedure::{InputKind, StepInput};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("No creator session for player {0}")]
    NotFound(PlayerId),
}

struct Session {
    creator: Creator,
    last_activity: DateTime<Utc>,
}

type SharedSession = Arc<Mutex<Session>>;

/// Active creator sessions, at most one per player.
pub struct CreatorSessions {
    sessions: DashMap<PlayerId, SharedSession>,
    notifier: Arc<dyn NotifierPort>,
    clock: Arc<dyn ClockPort>,
    timeout: Duration,
    persistence: std::sync::Mutex<Vec<JoinHandle<()>>>,
}

impl CreatorSessions {
    pub fn new(
        notifier: Arc<dyn NotifierPort>,
        clock: Arc<dyn ClockPort>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            sessions: DashMap::new(),
            notifier,
            clock,
            timeout: Duration::seconds(i64::try_from(timeout_secs).unwrap_or(i64::MAX)),
            persistence: std::sync::Mutex::new(Vec::new()),
        }
    }

    fn get(&self, player: PlayerId) -> Result<SharedSession, SessionError> {
        self.sessions
            .get(&player)
            .map(|entry| entry.value().clone())
            .ok_or(SessionError::NotFound(player))
    }

    /// Registers `creator`, aborting any earlier session of the same player.
    pub async fn start(&self, creator: Creator) {
        let player = creator.player().id;
        let session = Arc::new(Mutex::new(Session {
            creator,
            last_activity: self.clock.now(),
        }));
        let replaced = self.sessions.insert(player, session);
        if let Some(previous) = replaced {
            previous.lock().await.creator.abort();
            tracing::info!(player = %player, "Replaced existing creator session");
        }
        tracing::debug!(player = %player, active = self.sessions.len(), "Creator session registered");
    }

    /// Delivers input to the player's session.
    ///
    /// The session is dropped from the registry once it has completed or
    /// been aborted.
    pub async fn handle_input(
        &self,
        player: PlayerId,
        input: StepInput,
    ) -> Result<bool, SessionError> {
        let session = self.get(player)?;
        let mut guard = session.lock().await;
        guard.last_activity = self.clock.now();
        let accepted = guard.creator.handle_input(input).await;
        if guard.creator.is_done() {
            if let Some(handle) = guard.creator.take_persistence() {
                self.track_persistence(handle);
            }
            drop(guard);
            self.sessions
                .remove_if(&player, |_, current| Arc::ptr_eq(current, &session));
            tracing::debug!(player = %player, "Finished creator session removed");
        }
        Ok(accepted)
    }

    /// Aborts and removes the player's session.
    pub async fn abort(&self, player: PlayerId) -> Result<(), SessionError> {
        let (_, session) = self
            .sessions
            .remove(&player)
            .ok_or(SessionError::NotFound(player))?;
        session.lock().await.creator.abort();
        self.notifier.send_info(player, CreatorMessage::Cancelled);
        Ok(())
    }

    /// Aborts every session idle for longer than the configured timeout.
    ///
    /// Sessions busy handling input are left alone. Returns how many
    /// sessions were expired.
    pub async fn expire_idle(&self, now: DateTime<Utc>) -> usize {
        let candidates: Vec<(PlayerId, SharedSession)> = self
            .sessions
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        let mut expired = 0;
        for (player, session) in candidates {
            let Ok(mut guard) = session.try_lock() else {
                continue;
            };
            if now - guard.last_activity <= self.timeout {
                continue;
            }
            guard.creator.abort();
            drop(guard);
            self.sessions
                .remove_if(&player, |_, current| Arc::ptr_eq(current, &session));
            self.notifier.send_error(player, CreatorMessage::TimedOut);
            tracing::info!(player = %player, "Creator session timed out");
            expired += 1;
        }
        expired
    }

    fn track_persistence(&self, handle: JoinHandle<()>) {
        match self.persistence.lock() {
            Ok(mut pending) => pending.push(handle),
            Err(_) => tracing::warn!("Persistence tracking lock poisoned; request left untracked"),
        }
    }

    /// Waits for every persistence request issued by finished sessions.
    ///
    /// Returns how many requests were awaited.
    pub async fn flush_persistence(&self) -> usize {
        let pending = match self.persistence.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => return 0,
        };
        let count = pending.len();
        for handle in pending {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Persistence task failed");
            }
        }
        count
    }

    pub async fn prompt(&self, player: PlayerId) -> Result<Option<String>, SessionError> {
        let session = self.get(player)?;
        let guard = session.lock().await;
        Ok(guard.creator.current_step_prompt())
    }

    pub async fn expected_input(&self, player: PlayerId) -> Result<Option<InputKind>, SessionError> {
        let session = self.get(player)?;
        let guard = session.lock().await;
        Ok(guard.creator.expected_input())
    }

    pub fn is_active(&self, player: PlayerId) -> bool {
        self.sessions.contains_key(&player)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use doorwright_domain::{MovementDirection, Player, StructureKind, StructureName};

    use super::*;
    use crate::test_fixtures::CreatorFixture;

    fn sessions(fixture: &CreatorFixture) -> CreatorSessions {
        CreatorSessions::new(
            fixture.notifier.clone(),
            fixture.clock(),
            fixture.settings.session_timeout_secs,
        )
    }

    #[tokio::test]
    async fn unknown_player_is_an_error() {
        let fixture = CreatorFixture::new();
        let registry = sessions(&fixture);

        let result = registry
            .handle_input(PlayerId::new(), StepInput::Boolean(true))
            .await;
        assert!(matches!(result, Err(SessionError::NotFound(_))));
        assert!(registry.abort(PlayerId::new()).await.is_err());
    }

    #[tokio::test]
    async fn completed_session_is_removed() {
        let fixture = CreatorFixture::new();
        let registry = sessions(&fixture);
        let player = fixture.player.id;
        registry
            .start(fixture.creator(StructureKind::Portcullis, Some("Gate1")))
            .await;
        assert!(registry.is_active(player));
        assert_eq!(
            registry.expected_input(player).await.unwrap(),
            Some(InputKind::Location)
        );

        let inputs = vec![
            fixture.at(0, 0, 0),
            fixture.at(2, 3, 0),
            fixture.at(1, 0, 2),
            StepInput::Boolean(false),
            StepInput::Direction(MovementDirection::Down),
        ];
        for input in inputs {
            assert!(registry.handle_input(player, input).await.unwrap());
        }

        assert!(!registry.is_active(player));
        assert!(registry.is_empty());
        assert_eq!(registry.flush_persistence().await, 1);
        assert_eq!(fixture.notifier.successes().len(), 1);
        assert_eq!(registry.flush_persistence().await, 0);
    }

    #[tokio::test]
    async fn starting_again_replaces_the_old_session() {
        let fixture = CreatorFixture::new();
        let registry = sessions(&fixture);
        let player = fixture.player.id;

        registry
            .start(fixture.creator(StructureKind::Drawbridge, Some("Gate1")))
            .await;
        registry
            .start(fixture.creator(StructureKind::Drawbridge, None))
            .await;

        assert_eq!(registry.len(), 1);
        assert!(fixture.names.is_empty());
        let prompt = registry.prompt(player).await.unwrap().unwrap();
        assert!(prompt.contains("name"));
    }

    #[tokio::test]
    async fn replacing_with_same_name_keeps_the_claim() {
        let fixture = CreatorFixture::new();
        let registry = sessions(&fixture);
        let player = fixture.player.id;
        let gate = StructureName::new("Gate1").unwrap();

        registry
            .start(fixture.creator(StructureKind::Drawbridge, Some("Gate1")))
            .await;
        registry
            .start(fixture.creator(StructureKind::Drawbridge, Some("Gate1")))
            .await;

        assert!(registry.is_active(player));
        assert!(fixture.names.is_claimed(&gate));
        let rival = Creator::new(
            Player::new(PlayerId::new(), "sam"),
            StructureKind::Drawbridge,
            Some("Gate1".to_string()),
            fixture.ports(),
            Arc::new(fixture.settings.clone()),
            fixture.names.clone(),
        );
        assert_eq!(rival.current_step_name(), Some("set_name"));
    }

    #[tokio::test]
    async fn abort_notifies_and_removes() {
        let mut fixture = CreatorFixture::new();
        fixture.revokes = Some(1);
        let registry = sessions(&fixture);
        let player = fixture.player.id;
        registry
            .start(fixture.creator(StructureKind::BigDoor, Some("Door1")))
            .await;

        registry.abort(player).await.unwrap();

        assert!(!registry.is_active(player));
        assert!(fixture.notifier.infos().contains(&CreatorMessage::Cancelled));
        assert!(matches!(
            registry.prompt(player).await,
            Err(SessionError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let fixture = CreatorFixture::new();
        let registry = sessions(&fixture);
        let player = fixture.player.id;
        registry
            .start(fixture.creator(StructureKind::BigDoor, None))
            .await;

        assert_eq!(registry.expire_idle(fixture.now() + Duration::seconds(60)).await, 0);
        assert!(registry.is_active(player));

        assert_eq!(registry.expire_idle(fixture.now() + Duration::seconds(121)).await, 1);
        assert!(!registry.is_active(player));
        assert_eq!(fixture.notifier.errors(), vec![CreatorMessage::TimedOut]);
    }

    #[tokio::test]
    async fn rejected_input_keeps_session() {
        let fixture = CreatorFixture::new();
        let registry = sessions(&fixture);
        let player = fixture.player.id;
        registry
            .start(fixture.creator(StructureKind::BigDoor, None))
            .await;

        let accepted = registry
            .handle_input(player, StepInput::Text("12".to_string()))
            .await
            .unwrap();
        assert!(!accepted);
        assert!(registry.is_active(player));
    }

    #[tokio::test]
    async fn aborted_by_refusal_is_removed() {
        let mut fixture = CreatorFixture::new();
        fixture.economy_enabled = true;
        fixture.price = Some(5.0);
        let registry = sessions(&fixture);
        let player = fixture.player.id;
        registry
            .start(fixture.creator(StructureKind::Portcullis, Some("Gate1")))
            .await;
        let inputs = vec![
            fixture.at(0, 0, 0),
            fixture.at(2, 3, 0),
            fixture.at(1, 0, 2),
            StepInput::Boolean(false),
            StepInput::Direction(MovementDirection::Down),
            StepInput::Boolean(false),
        ];
        for input in inputs {
            assert!(registry.handle_input(player, input).await.unwrap());
        }
        assert!(!registry.is_active(player));
    }
}
