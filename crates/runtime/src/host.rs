//! Game task and its handle.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::core::GameSnapshot;
use crate::engine::store::KeyValueStore;
use crate::engine::{Navigator, RaindropGame};
use crate::error::RuntimeError;
use crate::types::GameAction;

/// Command delivered to the game task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCommand {
    Action(GameAction),
    /// Submit text as the answer (e.g. from a form field rather than keys).
    Submit(String),
    /// Cancel both repeating tasks and stop the game task.
    Teardown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Frame clock period; the schedule is advanced on every frame.
    pub frame_ms: u64,
    pub max_pending_commands: usize,
}

impl RuntimeConfig {
    /// A frame clock matching the coarsest period that divides both tasks.
    pub fn for_periods(spawn_ms: u64, physics_ms: u64) -> Self {
        Self {
            frame_ms: gcd(spawn_ms, physics_ms).max(1),
            max_pending_commands: 64,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::for_periods(
            crate::types::SPAWN_INTERVAL_MS as u64,
            crate::types::PHYSICS_INTERVAL_MS as u64,
        )
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Handle to a running game task.
///
/// Dropping the handle closes the command channel, which also ends the task.
pub struct RuntimeHandle<S, N> {
    cmd_tx: mpsc::Sender<RuntimeCommand>,
    snapshots: watch::Receiver<GameSnapshot>,
    join: JoinHandle<RaindropGame<S, N>>,
}

impl<S, N> RuntimeHandle<S, N> {
    pub async fn send(&self, command: RuntimeCommand) -> Result<(), RuntimeError> {
        self.cmd_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::Closed)
    }

    pub async fn action(&self, action: GameAction) -> Result<(), RuntimeError> {
        self.send(RuntimeCommand::Action(action)).await
    }

    pub async fn submit(&self, text: impl Into<String>) -> Result<(), RuntimeError> {
        self.send(RuntimeCommand::Submit(text.into())).await
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    /// New receiver that is notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Stop the game task and take the game back.
    ///
    /// Once this returns, no spawn or physics tick can fire again.
    pub async fn teardown(self) -> Result<RaindropGame<S, N>, RuntimeError> {
        // The task may already have ended on its own; the join below still
        // returns the game.
        let _ = self.cmd_tx.send(RuntimeCommand::Teardown).await;
        Ok(self.join.await?)
    }
}

/// Start `game` on a new tokio task with the default frame clock.
pub fn spawn_game<S, N>(game: RaindropGame<S, N>) -> RuntimeHandle<S, N>
where
    S: KeyValueStore + Send + 'static,
    N: Navigator + Send + 'static,
{
    let config = game.session().config();
    let runtime = RuntimeConfig::for_periods(
        config.spawn_interval_ms as u64,
        config.physics_interval_ms as u64,
    );
    spawn_game_with(game, runtime)
}

pub fn spawn_game_with<S, N>(mut game: RaindropGame<S, N>, config: RuntimeConfig) -> RuntimeHandle<S, N>
where
    S: KeyValueStore + Send + 'static,
    N: Navigator + Send + 'static,
{
    game.start();
    let (cmd_tx, cmd_rx) = mpsc::channel(config.max_pending_commands.max(1));
    let (snap_tx, snapshots) = watch::channel(game.snapshot());
    let join = tokio::spawn(run_game(game, cmd_rx, snap_tx, config));
    RuntimeHandle {
        cmd_tx,
        snapshots,
        join,
    }
}

async fn run_game<S, N>(
    mut game: RaindropGame<S, N>,
    mut cmd_rx: mpsc::Receiver<RuntimeCommand>,
    snap_tx: watch::Sender<GameSnapshot>,
    config: RuntimeConfig,
) -> RaindropGame<S, N>
where
    S: KeyValueStore,
    N: Navigator,
{
    let origin = Instant::now();
    let base_ms = game.now_ms();
    let period = Duration::from_millis(config.frame_ms);
    let mut frame = time::interval_at(origin + period, period);
    frame.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut snap = game.snapshot();
    info!(frame_ms = config.frame_ms, "game task started");

    loop {
        tokio::select! {
            // Commands first: a teardown wins over a frame that is also ready.
            biased;

            cmd = cmd_rx.recv() => match cmd {
                None | Some(RuntimeCommand::Teardown) => break,
                Some(RuntimeCommand::Action(action)) => {
                    catch_up(&mut game, origin, base_ms);
                    game.apply_action(action);
                }
                Some(RuntimeCommand::Submit(text)) => {
                    catch_up(&mut game, origin, base_ms);
                    game.submit_text(&text);
                }
            },

            _ = frame.tick(), if game.is_running() => {
                let report = catch_up(&mut game, origin, base_ms);
                if report.ended {
                    debug!("session ended on frame");
                }
            }
        }

        game.snapshot_into(&mut snap);
        snap_tx.send_if_modified(|current| {
            if *current == snap {
                false
            } else {
                current.clone_from(&snap);
                true
            }
        });

        if game.is_torn_down() {
            break;
        }
    }

    game.teardown();
    game.snapshot_into(&mut snap);
    snap_tx.send_replace(snap);
    info!("game task stopped");
    game
}

/// Advance the game clock to the wall clock (measured from `origin`).
fn catch_up<S, N>(
    game: &mut RaindropGame<S, N>,
    origin: Instant,
    base_ms: u64,
) -> crate::engine::AdvanceReport
where
    S: KeyValueStore,
    N: Navigator,
{
    game.advance_to(base_ms + origin.elapsed().as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::engine::store::{KeyValueStore, MemoryStore};
    use crate::engine::NoNavigation;
    use crate::types::{SCORE_KEY, TIME_KEY};

    fn new_game() -> RaindropGame<MemoryStore, NoNavigation> {
        RaindropGame::new(GameConfig::default(), 9, MemoryStore::new(), NoNavigation)
    }

    #[test]
    fn frame_clock_is_gcd_of_periods() {
        assert_eq!(RuntimeConfig::for_periods(2000, 500).frame_ms, 500);
        assert_eq!(RuntimeConfig::for_periods(1500, 1000).frame_ms, 500);
        assert_eq!(RuntimeConfig::for_periods(0, 0).frame_ms, 1);
        assert_eq!(RuntimeConfig::default().frame_ms, 500);
    }

    #[tokio::test(start_paused = true)]
    async fn spawns_on_schedule() {
        let handle = spawn_game(new_game());
        time::sleep(Duration::from_millis(2_100)).await;
        assert_eq!(handle.snapshot().problems.len(), 1);

        time::sleep(Duration::from_millis(4_000)).await;
        assert_eq!(handle.snapshot().problems.len(), 3);

        let game = handle.teardown().await.unwrap();
        assert!(game.is_torn_down());
    }

    #[tokio::test(start_paused = true)]
    async fn runs_to_game_over_and_persists() {
        let handle = spawn_game(new_game());
        let mut rx = handle.subscribe();
        while !rx.borrow_and_update().game_over {
            rx.changed().await.unwrap();
        }

        let game = handle.teardown().await.unwrap();
        assert!(game.session().is_over());
        assert_eq!(game.session().missed_count(), 2);
        assert_eq!(game.store().get(TIME_KEY).unwrap().as_deref(), Some("0.42"));
        assert_eq!(game.store().get(SCORE_KEY).unwrap().as_deref(), Some("0"));
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_fires_after_teardown() {
        let handle = spawn_game(new_game());
        let mut rx = handle.subscribe();
        time::sleep(Duration::from_millis(2_100)).await;

        let game = handle.teardown().await.unwrap();
        let last = rx.borrow_and_update().clone();
        assert_eq!(last, game.snapshot());
        assert_eq!(last.problems.len(), 1);

        // A frame or tick would publish; instead the sender is gone and the
        // last snapshot stays put.
        time::sleep(Duration::from_secs(60)).await;
        assert!(rx.has_changed().is_err());
        assert_eq!(*rx.borrow(), last);
        assert_eq!(game.snapshot(), last);
        assert!(!game.schedule().is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn submitting_the_answer_scores() {
        let handle = spawn_game(new_game());
        time::sleep(Duration::from_millis(2_100)).await;

        // Snapshots carry no answers; recover it from the question text.
        let question = handle.snapshot().problems[0].question.clone();
        let answer = solve(&question);
        handle.submit(answer.to_string()).await.unwrap();
        time::sleep(Duration::from_millis(10)).await;

        let snap = handle.snapshot();
        assert_eq!(snap.score, 500);
        assert!(snap.problems.is_empty());
        let game = handle.teardown().await.unwrap();
        assert_eq!(game.store().get(SCORE_KEY).unwrap().as_deref(), Some("500"));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_the_task() {
        let handle = spawn_game(new_game());
        let mut rx = handle.subscribe();
        drop(handle);
        // The task publishes one final snapshot and drops the sender.
        while rx.changed().await.is_ok() {}
        assert!(rx.borrow().started);
    }

    fn solve(question: &str) -> u32 {
        let parts: Vec<&str> = question.split(' ').collect();
        let (a, b): (u32, u32) = (parts[0].parse().unwrap(), parts[2].parse().unwrap());
        crate::types::Operator::from_str(parts[1])
            .and_then(|op| op.apply(a, b))
            .unwrap()
    }
}
