use std::sync::{Arc, Mutex};
use std::time::Duration;

use vle_app_core::{NavigationScheduler, Navigator};

#[derive(Default)]
struct Visits(Mutex<Vec<String>>);

impl Visits {
    fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Navigator for Visits {
    fn navigate(&self, path: &str) {
        self.0.lock().unwrap().push(path.to_string());
    }
}

fn scheduler() -> (NavigationScheduler<Visits>, Arc<Visits>) {
    let visits = Arc::new(Visits::default());
    (NavigationScheduler::new(visits.clone()), visits)
}

#[tokio::test(start_paused = true)]
async fn fires_once_after_the_delay() {
    let (nav, visits) = scheduler();
    nav.arm_redirect("/Courses", Duration::from_millis(1500));

    tokio::time::sleep(Duration::from_millis(1499)).await;
    assert!(visits.all().is_empty());
    assert_eq!(nav.pending().as_deref(), Some("/Courses"));

    tokio::time::sleep(Duration::from_millis(2)).await;
    tokio::task::yield_now().await;
    assert_eq!(visits.all(), vec!["/Courses".to_string()]);
    assert!(!nav.is_armed());
}

#[tokio::test(start_paused = true)]
async fn cancel_prevents_the_transition() {
    let (nav, visits) = scheduler();
    nav.arm_redirect("/login", Duration::from_millis(2000));
    assert!(nav.cancel());
    assert!(!nav.cancel());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(visits.all().is_empty());
}

#[tokio::test(start_paused = true)]
async fn rearming_replaces_the_pending_redirect() {
    let (nav, visits) = scheduler();
    nav.arm_redirect("/login", Duration::from_millis(2000));
    nav.arm_redirect("/Courses", Duration::from_millis(500));
    assert_eq!(nav.pending().as_deref(), Some("/Courses"));

    nav.settle().await;
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(visits.all(), vec!["/Courses".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_scheduler_cancels() {
    let (nav, visits) = scheduler();
    nav.arm_redirect("/login", Duration::from_millis(2000));
    drop(nav);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(visits.all().is_empty());
}

#[tokio::test(start_paused = true)]
async fn settle_without_a_redirect_returns_immediately() {
    let (nav, visits) = scheduler();
    nav.settle().await;
    assert!(visits.all().is_empty());
}
