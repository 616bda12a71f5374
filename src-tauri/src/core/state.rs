//! Application state management for Tauri.

use std::path::Path;
use std::sync::Arc;
use parking_lot::Mutex;
use tracing::{debug, error};
use crate::core::{Resolution, Session, SessionSnapshot, Slot};
use crate::generation::ImageGenerator;
use crate::intake::encode_file;
use crate::utils::SessionError;

/// Application state managed by Tauri.
///
/// Owns the one [`Session`] and the generator it calls. The session lock is
/// never held across an await.
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<Session>>,
    generator: Arc<dyn ImageGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            generator,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().snapshot()
    }

    /// Read and encode `path` into `slot`.
    ///
    /// An unreadable file empties the slot; the failure is only logged. If
    /// the slot was changed or reset while the file was being read, the
    /// result is dropped.
    pub async fn load_image(&self, slot: Slot, path: impl AsRef<Path>) -> SessionSnapshot {
        let path = path.as_ref();
        let token = self.session.lock().begin_intake(slot);
        let image = match encode_file(path).await {
            Ok(image) => Some(image),
            Err(e) => {
                error!("Error encoding {} for {} slot: {}", path.display(), slot, e);
                None
            }
        };

        let mut session = self.session.lock();
        session.finish_intake(slot, token, image);
        session.snapshot()
    }

    pub fn remove_image(&self, slot: Slot) -> SessionSnapshot {
        let mut session = self.session.lock();
        session.remove_image(slot);
        session.snapshot()
    }

    pub fn reset(&self) -> SessionSnapshot {
        let mut session = self.session.lock();
        session.reset();
        session.snapshot()
    }

    /// Run one generation from start to finish.
    ///
    /// `on_started` sees the loading snapshot before the remote call is
    /// made. Missing images are not an error here: the message lands in the
    /// snapshot. Only a concurrent call is rejected.
    pub async fn generate<F>(&self, on_started: F) -> Result<SessionSnapshot, SessionError>
    where
        F: FnOnce(&SessionSnapshot) + Send,
    {
        let (ticket, loading) = {
            let mut session = self.session.lock();
            match session.begin_generation() {
                Ok(ticket) => (ticket, session.snapshot()),
                Err(SessionError::MissingImages) => return Ok(session.snapshot()),
                Err(e) => return Err(e),
            }
        };
        on_started(&loading);

        let result = self
            .generator
            .generate(&ticket.destination, &ticket.source)
            .await;

        let mut session = self.session.lock();
        if session.finish_generation(ticket.token, result) == Resolution::Stale {
            debug!("Generation {} finished after the session moved on", ticket.token);
        }
        Ok(session.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;
    use tokio::sync::Notify;
    use crate::core::{GENERATION_FAILED_MESSAGE, MISSING_IMAGES_MESSAGE};
    use crate::utils::{GenerationError, GenerationResult};

    /// Records calls and answers with a fixed outcome.
    struct MockGenerator {
        calls: AtomicUsize,
        outcome: Option<String>,
        gate: Option<Arc<Notify>>,
    }

    impl MockGenerator {
        fn resolving(value: &str) -> Arc<Self> {
            Arc::new(Self { calls: AtomicUsize::new(0), outcome: Some(value.to_string()), gate: None })
        }

        fn rejecting() -> Arc<Self> {
            Arc::new(Self { calls: AtomicUsize::new(0), outcome: None, gate: None })
        }

        fn gated(value: &str, gate: Arc<Notify>) -> Arc<Self> {
            Arc::new(Self { calls: AtomicUsize::new(0), outcome: Some(value.to_string()), gate: Some(gate) })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ImageGenerator for MockGenerator {
        async fn generate(&self, _destination: &str, _source: &str) -> GenerationResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.outcome
                .clone()
                .ok_or_else(|| GenerationError::Http("connection refused".to_string()))
        }
    }

    async fn state_with_images(generator: Arc<MockGenerator>) -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let hand = dir.path().join("hand.jpg");
        let design = dir.path().join("design.png");
        std::fs::write(&hand, [0xFF, 0xD8, 0xFF]).unwrap();
        std::fs::write(&design, [0x89, b'P', b'N', b'G']).unwrap();

        let state = AppState::new(generator);
        state.load_image(Slot::Destination, &hand).await;
        state.load_image(Slot::Source, &design).await;
        (state, dir)
    }

    #[tokio::test]
    async fn successful_generation_shows_exact_result() {
        let generator = MockGenerator::resolving("data:image/png;base64,AAAA");
        let (state, _dir) = state_with_images(generator.clone()).await;

        let mut started = None;
        let snap = state.generate(|s| started = Some(s.clone())).await.unwrap();

        let started = started.unwrap();
        assert!(started.is_loading);
        assert_eq!(started.generated_image, None);

        assert_eq!(generator.calls(), 1);
        assert_eq!(snap.generated_image.as_deref(), Some("data:image/png;base64,AAAA"));
        assert!(!snap.is_loading);
        assert_eq!(snap.error, None);
    }

    #[tokio::test]
    async fn only_destination_selected_makes_no_call() {
        let generator = MockGenerator::resolving("data:image/png;base64,AAAA");
        let dir = tempfile::tempdir().unwrap();
        let hand = dir.path().join("hand.jpg");
        std::fs::write(&hand, [0xFF, 0xD8, 0xFF]).unwrap();

        let state = AppState::new(generator.clone());
        state.load_image(Slot::Destination, &hand).await;

        let snap = state.generate(|_| panic!("must not start")).await.unwrap();
        assert_eq!(generator.calls(), 0);
        assert_eq!(snap.error.as_deref(), Some(MISSING_IMAGES_MESSAGE));
        assert!(snap.destination_image.is_some());
    }

    #[tokio::test]
    async fn rejected_generation_shows_generic_error() {
        let generator = MockGenerator::rejecting();
        let (state, _dir) = state_with_images(generator.clone()).await;

        let snap = state.generate(|_| {}).await.unwrap();
        assert_eq!(generator.calls(), 1);
        assert_eq!(snap.generated_image, None);
        assert_eq!(snap.error.as_deref(), Some(GENERATION_FAILED_MESSAGE));
        assert!(!snap.is_loading);
    }

    #[tokio::test]
    async fn reset_after_success_returns_to_initial() {
        let generator = MockGenerator::resolving("data:image/png;base64,AAAA");
        let (state, _dir) = state_with_images(generator).await;
        state.generate(|_| {}).await.unwrap();

        let snap = state.reset();
        assert_eq!(snap, Session::new().snapshot());
    }

    #[tokio::test]
    async fn unreadable_file_empties_the_slot() {
        let generator = MockGenerator::rejecting();
        let (state, dir) = state_with_images(generator).await;

        let snap = state.load_image(Slot::Source, dir.path().join("missing.png")).await;
        assert_eq!(snap.source_image, None);
        assert!(snap.destination_image.is_some());
        assert_eq!(snap.error, None);
    }

    #[tokio::test]
    async fn concurrent_generate_is_busy_and_late_result_is_dropped() {
        let gate = Arc::new(Notify::new());
        let generator = MockGenerator::gated("data:image/png;base64,LATE", gate.clone());
        let (state, _dir) = state_with_images(generator.clone()).await;

        let (started_tx, started_rx) = tokio::sync::oneshot::channel();
        let in_flight = {
            let state = state.clone();
            tokio::spawn(async move {
                state
                    .generate(move |_| {
                        let _ = started_tx.send(());
                    })
                    .await
            })
        };
        started_rx.await.unwrap();

        assert_eq!(state.generate(|_| {}).await, Err(SessionError::Busy));

        let reset = state.reset();
        gate.notify_one();
        let finished = in_flight.await.unwrap().unwrap();

        assert_eq!(generator.calls(), 1);
        assert_eq!(finished, reset);
        assert_eq!(finished.generated_image, None);
    }

    fn write_files(dir: &tempfile::TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
        let big = dir.path().join("big.png");
        let small = dir.path().join("small.png");
        let mut bytes = vec![0x89, b'P', b'N', b'G'];
        bytes.resize(8 * 1024 * 1024, 0);
        std::fs::write(&big, bytes).unwrap();
        std::fs::write(&small, [0x89, b'P', b'N', b'G']).unwrap();
        (big, small)
    }

    #[tokio::test]
    async fn overlapping_loads_keep_the_latest_selection() {
        let dir = tempfile::tempdir().unwrap();
        let (big, small) = write_files(&dir);
        let state = AppState::new(MockGenerator::rejecting());

        let (_, snap) = tokio::join!(
            state.load_image(Slot::Source, &big),
            state.load_image(Slot::Source, &small),
        );

        assert_eq!(snap.source_image.as_ref().map(|i| i.file_name.as_str()), Some("small.png"));
        let current = state.snapshot();
        assert_eq!(current.source_image.map(|i| i.file_name), Some("small.png".to_string()));
    }

    #[tokio::test]
    async fn reset_during_pending_load_stays_initial() {
        let dir = tempfile::tempdir().unwrap();
        let (big, _) = write_files(&dir);
        let state = AppState::new(MockGenerator::rejecting());

        tokio::join!(state.load_image(Slot::Destination, &big), async { state.reset() });

        assert_eq!(state.snapshot(), Session::new().snapshot());
    }

    #[tokio::test]
    async fn on_started_runs_without_the_session_lock() {
        let generator = MockGenerator::resolving("data:image/png;base64,AAAA");
        let (state, _dir) = state_with_images(generator).await;

        let observer = state.clone();
        let mut seen = None;
        state
            .generate(|_| seen = Some(observer.snapshot()))
            .await
            .unwrap();

        assert!(seen.unwrap().is_loading);
    }
}
