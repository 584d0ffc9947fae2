use std::time::Duration;

use checknote_session::timer::{Timer, TimerKind};
use tokio::sync::mpsc;

#[tokio::test(start_paused = true)]
async fn fires_once_after_delay() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut timer = Timer::new(TimerKind::Advance, tx);

    timer.schedule(Duration::from_millis(100));
    assert!(timer.is_pending());

    let fired = rx.recv().await.unwrap();
    assert_eq!(fired.kind, TimerKind::Advance);
    assert!(timer.accept(&fired));
    assert!(!timer.is_pending());
    assert!(!timer.accept(&fired));
}

#[tokio::test(start_paused = true)]
async fn cancelled_timer_never_fires() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut timer = Timer::new(TimerKind::Toast, tx);

    timer.schedule(Duration::from_millis(100));
    timer.cancel();
    assert!(!timer.is_pending());

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn queued_firing_is_stale_after_cancel() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut timer = Timer::new(TimerKind::Advance, tx);

    timer.schedule(Duration::from_millis(100));
    tokio::time::sleep(Duration::from_millis(200)).await;
    timer.cancel();

    let fired = rx.try_recv().unwrap();
    assert!(!timer.accept(&fired));
}

#[tokio::test(start_paused = true)]
async fn rescheduling_replaces_pending_firing() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut timer = Timer::new(TimerKind::Advance, tx);

    timer.schedule(Duration::from_millis(100));
    tokio::time::sleep(Duration::from_millis(60)).await;
    timer.schedule(Duration::from_millis(100));

    let fired = rx.recv().await.unwrap();
    assert!(timer.accept(&fired));
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn other_kind_is_not_accepted() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut advance = Timer::new(TimerKind::Advance, tx.clone());
    let mut toast = Timer::new(TimerKind::Toast, tx);

    toast.schedule(Duration::from_millis(10));
    advance.schedule(Duration::from_millis(10));
    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    for fired in [first, second] {
        match fired.kind {
            TimerKind::Toast => assert!(!advance.accept(&fired) && toast.accept(&fired)),
            TimerKind::Advance => assert!(!toast.accept(&fired) && advance.accept(&fired)),
        }
    }
}
