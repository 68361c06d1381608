use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use dining_sim::{Corrected, DiningStrategy, Fork, Pause, Philosopher, StopSignal, Waiter};
use tokio::time::{sleep, timeout};

fn quick_pause() -> Pause {
    Pause::new(Duration::from_millis(1), Duration::from_millis(3))
}

/// Builds a hand-wired ring of `n` philosophers sharing one stop signal.
fn ring(n: usize, stop: &StopSignal) -> (Vec<Arc<Fork>>, Vec<Philosopher>) {
    let forks: Vec<Arc<Fork>> = (0..n).map(|i| Arc::new(Fork::new(i))).collect();
    let seats = (0..n)
        .map(|i| {
            Philosopher::new(
                i,
                forks[i].clone(),
                forks[(i + 1) % n].clone(),
                stop.clone(),
                quick_pause(),
                quick_pause(),
            )
        })
        .collect();
    (forks, seats)
}

#[tokio::test]
async fn fork_is_never_held_twice() {
    let fork = Arc::new(Fork::new(0));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let fork = fork.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..50 {
                let _guard = fork.acquire().await;
                tokio::task::yield_now().await;
            }
        }));
    }
    for handle in handles {
        handle.await.expect("acquirer should finish");
    }

    assert_eq!(fork.peak_holders(), 1, "mutual exclusion violated");
    assert_eq!(fork.holders(), 0, "all guards should be released");
}

#[tokio::test]
async fn corrected_run_respects_admission_limit() {
    let n = 5;
    let stop = StopSignal::new();
    let (_forks, seats) = ring(n, &stop);

    let waiter = Arc::new(Waiter::new(n - 1));
    let strategy: Arc<dyn DiningStrategy> = Arc::new(Corrected::new(waiter.clone()));

    let counters: Vec<_> = seats.iter().map(|p| p.meal_counter()).collect();
    let handles: Vec<_> = seats
        .into_iter()
        .map(|p| tokio::spawn(p.run(strategy.clone())))
        .collect();

    sleep(Duration::from_millis(300)).await;
    stop.request();
    for handle in handles {
        timeout(Duration::from_secs(2), handle)
            .await
            .expect("corrected philosophers must observe stop")
            .expect("philosopher task should not panic");
    }

    assert!(
        waiter.peak_inside() <= n - 1,
        "admission limit exceeded: peak {} with capacity {}",
        waiter.peak_inside(),
        n - 1
    );
    for (seat, counter) in counters.iter().enumerate() {
        assert!(
            counter.load(Ordering::SeqCst) > 0,
            "seat {} starved under the corrected protocol",
            seat
        );
    }
}

#[tokio::test]
async fn meal_counters_only_grow() {
    let stop = StopSignal::new();
    let (_forks, seats) = ring(2, &stop);

    let waiter = Arc::new(Waiter::new(1));
    let strategy: Arc<dyn DiningStrategy> = Arc::new(Corrected::new(waiter));

    let counters: Vec<_> = seats.iter().map(|p| p.meal_counter()).collect();
    let handles: Vec<_> = seats
        .into_iter()
        .map(|p| tokio::spawn(p.run(strategy.clone())))
        .collect();

    // Snapshot repeatedly while the ring is live; every read must be at
    // least the previous one.
    let mut last = vec![0u64; counters.len()];
    for _ in 0..20 {
        sleep(Duration::from_millis(10)).await;
        for (seat, counter) in counters.iter().enumerate() {
            let now = counter.load(Ordering::SeqCst);
            assert!(
                now >= last[seat],
                "seat {} counter went backwards: {} -> {}",
                seat,
                last[seat],
                now
            );
            last[seat] = now;
        }
    }

    stop.request();
    for handle in handles {
        timeout(Duration::from_secs(2), handle)
            .await
            .expect("philosophers must observe stop")
            .expect("philosopher task should not panic");
    }
}
