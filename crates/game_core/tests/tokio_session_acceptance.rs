use std::time::Duration;

use game_core::{
    CounterDisplay, GameController, GameSettings, GridBoard, TimerHandle, TokioScheduler,
};
use shared::{domain::Phase, protocol::InputEvent};
use tokio::{
    sync::mpsc::UnboundedReceiver,
    time::{self, Instant},
};

type TokioGame = GameController<GridBoard, CounterDisplay, TokioScheduler>;

fn tokio_game(seed: u64) -> (TokioGame, UnboundedReceiver<TimerHandle>) {
    let settings = GameSettings {
        seed: Some(seed),
        ..GameSettings::default()
    };
    let (scheduler, ticks) = TokioScheduler::new();
    let game = GameController::new(&settings, GridBoard::new(), CounterDisplay::default(), scheduler)
        .expect("controller");
    (game, ticks)
}

/// Waits for the next tick that actually moves the token.
async fn next_move(game: &mut TokioGame, ticks: &mut UnboundedReceiver<TimerHandle>) {
    loop {
        let handle = ticks.recv().await.expect("tick channel open");
        if game.on_tick(handle).is_some() {
            return;
        }
    }
}

fn assert_elapsed_near(started: Instant, expected: Duration) {
    let elapsed = started.elapsed();
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(10),
        "expected ~{expected:?}, got {elapsed:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn moves_follow_the_interval_until_paused() {
    let (mut game, mut ticks) = tokio_game(42);
    let started = Instant::now();
    game.handle(InputEvent::Start);
    let p0 = game.state().position().expect("placed");

    next_move(&mut game, &mut ticks).await;
    assert_elapsed_near(started, Duration::from_millis(2000));
    assert_eq!(game.state().move_count(), 1);
    assert_ne!(game.state().position(), Some(p0));

    next_move(&mut game, &mut ticks).await;
    assert_elapsed_near(started, Duration::from_millis(4000));

    game.handle(InputEvent::Pause);
    assert_eq!(game.state().phase(), Phase::Paused);
    assert_eq!(game.scheduler().active_timers(), 0);

    let waited = time::timeout(Duration::from_secs(30), ticks.recv()).await;
    assert!(waited.is_err(), "paused game kept ticking");
    assert_eq!(game.state().move_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn speed_up_takes_effect_from_the_change() {
    let (mut game, mut ticks) = tokio_game(5);
    game.start();

    time::sleep(Duration::from_millis(1000)).await;
    let changed_at = Instant::now();
    game.set_speed(0.7);
    assert_eq!(game.state().move_interval().as_millis(), 1400);

    next_move(&mut game, &mut ticks).await;
    assert_elapsed_near(changed_at, Duration::from_millis(1400));
    next_move(&mut game, &mut ticks).await;
    assert_elapsed_near(changed_at, Duration::from_millis(2800));
    assert_eq!(game.state().move_count(), 2);
    assert_eq!(game.scheduler().active_timers(), 1);
}

#[tokio::test(start_paused = true)]
async fn reset_discards_the_running_timer() {
    let (mut game, mut ticks) = tokio_game(8);
    game.start();
    next_move(&mut game, &mut ticks).await;

    let generation = game.renderer().generation();
    game.reset();
    assert_eq!(game.state().move_count(), 0);
    assert_eq!(game.renderer().generation(), generation + 1);
    assert!(game.state().position().is_some());
    assert_eq!(game.scheduler().active_timers(), 0);

    let waited = time::timeout(Duration::from_secs(30), ticks.recv()).await;
    assert!(waited.is_err(), "reset game kept ticking");
}
