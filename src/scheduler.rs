use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::board::{BoardContent, BoardRenderer, RenderError};

/// Called with the game id and error when a deferred transmission fails
pub type FailureHook = Arc<dyn Fn(Uuid, &RenderError) + Send + Sync>;

/// A game whose end content is waiting on its timer.
/// Owned entirely by the spawned task and dropped when it finishes.
#[derive(Debug)]
struct ScheduledGame {
    id: Uuid,
    end: BoardContent,
    delay: Duration,
    created_at: DateTime<Utc>,
}

/// Decrements the in-flight count however the task ends
struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Sends a start layout right away and an end layout after a delay,
/// without holding up the caller for the second one.
///
/// Every scheduled game gets its own detached task. There is no cap on how
/// many can be pending at once and no way to cancel one; anything still
/// waiting when the process exits is lost.
#[derive(Clone)]
pub struct TransmissionScheduler {
    renderer: BoardRenderer,
    pending: Arc<AtomicUsize>,
    on_failure: Option<FailureHook>,
}

impl TransmissionScheduler {
    pub fn new(renderer: BoardRenderer) -> Self {
        Self {
            renderer,
            pending: Arc::new(AtomicUsize::new(0)),
            on_failure: None,
        }
    }

    /// Observe deferred failures in addition to the error log
    pub fn with_failure_hook(mut self, hook: FailureHook) -> Self {
        self.on_failure = Some(hook);
        self
    }

    /// Number of end transmissions still waiting or in progress
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Render `start` now, then render `end` once `delay` has elapsed.
    ///
    /// An error rendering `start` is returned and nothing is queued. Errors
    /// rendering `end` are only logged (and passed to the failure hook).
    pub async fn schedule(
        &self,
        start: BoardContent,
        end: BoardContent,
        delay: Duration,
    ) -> Result<(), RenderError> {
        self.renderer.render(&start).await?;

        let game = ScheduledGame {
            id: Uuid::new_v4(),
            end,
            delay,
            created_at: Utc::now(),
        };

        self.pending.fetch_add(1, Ordering::SeqCst);
        let guard = PendingGuard(self.pending.clone());
        let renderer = self.renderer.clone();
        let on_failure = self.on_failure.clone();

        tracing::info!(
            "Game {} start sent; end {} due in {}s ({} pending)",
            game.id,
            game.end.describe(),
            game.delay.as_secs(),
            self.pending()
        );

        tokio::spawn(async move {
            let _guard = guard;
            run_deferred(game, renderer, on_failure).await;
        });

        Ok(())
    }
}

async fn run_deferred(game: ScheduledGame, renderer: BoardRenderer, on_failure: Option<FailureHook>) {
    tokio::time::sleep(game.delay).await;

    tracing::info!(
        "Game {} timer finished (scheduled at {}), sending end content",
        game.id,
        game.created_at.to_rfc3339()
    );

    match renderer.render(&game.end).await {
        Ok(()) => tracing::info!("Game {} end content sent", game.id),
        Err(e) => {
            tracing::error!("Error sending end content for game {}: {}", game.id, e);
            if let Some(hook) = on_failure {
                hook(game.id, &e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tokio::time::Instant;

    use super::*;
    use crate::{
        board::{
            renderer::testing::{RecordingDisplay, Sent},
            VendorError,
        },
        models::{BoggleSize, Grid},
    };

    fn text(s: &str) -> BoardContent {
        BoardContent::Text(s.to_string())
    }

    fn grid_content(letter: char) -> BoardContent {
        BoardContent::Grid {
            grid: Grid::from_letters(BoggleSize::Four, vec![letter; 16]).unwrap(),
            phase: crate::board::Phase::End,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_is_sent_before_schedule_returns() {
        let display = RecordingDisplay::new();
        let scheduler = TransmissionScheduler::new(BoardRenderer::new(display.clone()));

        scheduler
            .schedule(text("START"), text("END"), Duration::from_secs(200))
            .await
            .unwrap();

        assert_eq!(display.sent(), vec![Sent::Text("START".into())]);
        assert_eq!(scheduler.pending(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_waits_for_the_delay() {
        let (display, mut events) = RecordingDisplay::with_events();
        let scheduler = TransmissionScheduler::new(BoardRenderer::new(display.clone()));
        let delay = Duration::from_secs(200);

        scheduler.schedule(text("START"), text("END"), delay).await.unwrap();
        assert_eq!(events.recv().await, Some(Sent::Text("START".into())));

        // Just short of the delay nothing else has gone out
        tokio::time::sleep(delay - Duration::from_secs(1)).await;
        assert_eq!(display.sent().len(), 1);

        assert_eq!(events.recv().await, Some(Sent::Text("END".into())));
        let timeline = display.timeline();
        assert_eq!(timeline.len(), 2);
        assert!(timeline[1].0.duration_since(timeline[0].0) >= delay);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_still_sends_end_after_start() {
        let (display, mut events) = RecordingDisplay::with_events();
        let scheduler = TransmissionScheduler::new(BoardRenderer::new(display.clone()));

        scheduler.schedule(text("A"), text("B"), Duration::ZERO).await.unwrap();

        assert_eq!(events.recv().await, Some(Sent::Text("A".into())));
        assert_eq!(events.recv().await, Some(Sent::Text("B".into())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_failure_queues_nothing() {
        let display = RecordingDisplay::new();
        display.fail_if(|_| Some(VendorError::Transport("offline".to_string())));
        let scheduler = TransmissionScheduler::new(BoardRenderer::new(display.clone()));

        let result = scheduler
            .schedule(text("START"), text("END"), Duration::from_secs(5))
            .await;
        assert!(matches!(result, Err(RenderError::Vendor(_))));
        assert_eq!(scheduler.pending(), 0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(display.sent().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_start_text_queues_nothing() {
        let display = RecordingDisplay::new();
        let scheduler = TransmissionScheduler::new(BoardRenderer::new(display.clone()));

        let result = scheduler
            .schedule(text("bad ~"), text("END"), Duration::from_secs(1))
            .await;
        assert!(matches!(result, Err(RenderError::InvalidCharacter('~'))));
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_end_does_not_affect_other_games() {
        let (display, mut events) = RecordingDisplay::with_events();
        // Game A's end grid is all 'A'; fail only that one
        let a_end = grid_content('A');
        let a_end_for_rule = a_end.clone();
        display.fail_if(move |sent| match (sent, &a_end_for_rule) {
            (Sent::Characters(board), BoardContent::Grid { grid, phase }) => {
                (*board == crate::board::layout::compose_grid(grid, *phase))
                    .then(|| VendorError::Status {
                        status: 500,
                        body: "boom".to_string(),
                    })
            }
            _ => None,
        });

        let failures: Arc<Mutex<Vec<Uuid>>> = Arc::new(Mutex::new(Vec::new()));
        let recorded = failures.clone();
        let scheduler = TransmissionScheduler::new(BoardRenderer::new(display.clone()))
            .with_failure_hook(Arc::new(move |id: Uuid, _err: &RenderError| {
                recorded.lock().unwrap().push(id)
            }));

        let started = Instant::now();
        scheduler
            .schedule(text("GAME A"), a_end, Duration::from_secs(100))
            .await
            .unwrap();
        scheduler
            .schedule(text("GAME B"), grid_content('B'), Duration::from_secs(150))
            .await
            .unwrap();
        assert_eq!(scheduler.pending(), 2);

        // Two starts, then A's failed attempt, then B's end
        for _ in 0..4 {
            events.recv().await.unwrap();
        }
        // Let the failed task unwind
        tokio::task::yield_now().await;

        let sent = display.sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0], Sent::Text("GAME A".into()));
        assert_eq!(sent[1], Sent::Text("GAME B".into()));
        match (&sent[2], grid_content('B')) {
            (Sent::Characters(board), BoardContent::Grid { grid, phase }) => {
                assert_eq!(*board, crate::board::layout::compose_grid(&grid, phase));
            }
            other => panic!("unexpected transmission: {:?}", other.0),
        }

        assert!(started.elapsed() >= Duration::from_secs(150));
        assert_eq!(failures.lock().unwrap().len(), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_many_games_each_deliver_once() {
        let (display, mut events) = RecordingDisplay::with_events();
        let scheduler = TransmissionScheduler::new(BoardRenderer::new(display.clone()));

        for i in 0..10u64 {
            scheduler
                .schedule(
                    text(&format!("START {}", i)),
                    text(&format!("END {}", i)),
                    Duration::from_secs(10 + i),
                )
                .await
                .unwrap();
        }

        for _ in 0..20 {
            events.recv().await.unwrap();
        }
        tokio::task::yield_now().await;

        let sent = display.sent();
        for i in 0..10 {
            let start = sent.iter().position(|s| *s == Sent::Text(format!("START {}", i)));
            let end = sent.iter().position(|s| *s == Sent::Text(format!("END {}", i)));
            assert!(start.unwrap() < end.unwrap());
            let ends = sent.iter().filter(|s| **s == Sent::Text(format!("END {}", i))).count();
            assert_eq!(ends, 1);
        }
        assert_eq!(scheduler.pending(), 0);
    }
}
