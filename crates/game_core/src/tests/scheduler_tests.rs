use super::*;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn manual_timer_fires_once_per_period() {
    let mut scheduler = ManualScheduler::new();
    let handle = scheduler.schedule_repeating(ms(2000));

    assert!(scheduler.advance(ms(1999)).is_empty());
    assert_eq!(scheduler.advance(ms(1)), vec![handle]);
    assert_eq!(scheduler.advance(ms(4000)), vec![handle, handle]);
    assert_eq!(scheduler.now(), ms(6000));
}

#[test]
fn delayed_timer_skips_missed_periods() {
    let mut scheduler = ManualScheduler::with_missed_ticks(MissedTicks::Delay);
    let handle = scheduler.schedule_repeating(ms(500));

    assert_eq!(scheduler.advance(ms(60_000)), vec![handle]);
    assert_eq!(scheduler.until_next_tick(), Some(ms(500)));
    assert_eq!(scheduler.advance(ms(500)), vec![handle]);
}

#[test]
fn delayed_timer_keeps_its_cadence_when_on_time() {
    let mut scheduler = ManualScheduler::with_missed_ticks(MissedTicks::Delay);
    let handle = scheduler.schedule_repeating(ms(2000));

    assert_eq!(scheduler.advance(ms(2010)), vec![handle]);
    assert_eq!(scheduler.until_next_tick(), Some(ms(1990)));
}

#[test]
fn manual_cancel_is_idempotent_and_final() {
    let mut scheduler = ManualScheduler::new();
    let handle = scheduler.schedule_repeating(ms(500));
    scheduler.cancel(handle);
    scheduler.cancel(handle);

    assert!(!scheduler.is_active(handle));
    assert_eq!(scheduler.active_timers(), 0);
    assert!(scheduler.advance(ms(10_000)).is_empty());
    assert_eq!(scheduler.until_next_tick(), None);
}

#[test]
fn manual_ticks_interleave_chronologically() {
    let mut scheduler = ManualScheduler::new();
    let slow = scheduler.schedule_repeating(ms(1000));
    let fast = scheduler.schedule_repeating(ms(400));

    let fired = scheduler.advance(ms(1200));
    assert_eq!(fired, vec![fast, fast, slow, fast]);
}

#[test]
fn rescheduled_timer_counts_from_the_reschedule() {
    let mut scheduler = ManualScheduler::new();
    let old = scheduler.schedule_repeating(ms(2000));
    scheduler.advance(ms(1500));

    scheduler.cancel(old);
    let new = scheduler.schedule_repeating(ms(1400));
    assert_ne!(old, new);
    assert_eq!(scheduler.until_next_tick(), Some(ms(1400)));

    assert!(scheduler.advance(ms(1399)).is_empty());
    assert_eq!(scheduler.advance(ms(1)), vec![new]);
}

#[test]
fn zero_period_is_bumped_to_a_millisecond() {
    let mut scheduler = ManualScheduler::new();
    let handle = scheduler.schedule_repeating(Duration::ZERO);
    assert_eq!(scheduler.advance(ms(3)), vec![handle, handle, handle]);
}

#[tokio::test(start_paused = true)]
async fn tokio_timer_delivers_handle_each_period() {
    let (mut scheduler, mut ticks) = TokioScheduler::new();
    let started = Instant::now();
    let handle = scheduler.schedule_repeating(ms(2000));

    assert_eq!(ticks.recv().await, Some(handle));
    assert!(started.elapsed() >= ms(2000));
    assert!(started.elapsed() < ms(2010));

    assert_eq!(ticks.recv().await, Some(handle));
    assert!(started.elapsed() >= ms(4000));
    assert!(started.elapsed() < ms(4010));
}

#[tokio::test(start_paused = true)]
async fn tokio_cancel_stops_delivery() {
    let (mut scheduler, mut ticks) = TokioScheduler::new();
    let handle = scheduler.schedule_repeating(ms(500));
    assert_eq!(ticks.recv().await, Some(handle));

    scheduler.cancel(handle);
    scheduler.cancel(handle);
    assert_eq!(scheduler.active_timers(), 0);

    let waited = time::timeout(ms(5000), ticks.recv()).await;
    assert!(waited.is_err(), "cancelled timer kept firing");
}
