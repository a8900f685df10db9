mod common;

use std::time::Duration;

use tokio::time::Instant;
use tokio_test::assert_ok;

use common::{dyn_api, dyn_notifier, ride, user, FakeBackend, RecordingNotifier};
use ridex::driver::{DriverDashboard, RefreshCause};
use ridex::entities::DriverStats;

const PERIOD: Duration = Duration::from_secs(30);

fn fetches(backend: &FakeBackend) -> (usize, usize, usize) {
    (
        backend.calls.get("available_rides"),
        backend.calls.get("current_ride"),
        backend.calls.get("driver_stats"),
    )
}

fn mount(backend: &std::sync::Arc<FakeBackend>, is_active: bool) -> DriverDashboard {
    DriverDashboard::mount(
        dyn_api(backend),
        dyn_notifier(&RecordingNotifier::new()),
        user("driver", is_active),
        PERIOD,
    )
}

#[tokio::test(start_paused = true)]
async fn mount_fetches_once_immediately() {
    let backend = FakeBackend::new();
    let dashboard = mount(&backend, true);

    let event = dashboard.events().recv().await.unwrap();

    assert_eq!(event.cause, RefreshCause::Mount);
    assert_eq!(event.failures, 0);
    assert_eq!(fetches(&backend), (1, 1, 1));
    assert!(dashboard.snapshot().refreshed_at.is_some());
}

#[tokio::test(start_paused = true)]
async fn refetches_once_per_interval() {
    let backend = FakeBackend::new();
    let dashboard = mount(&backend, true);
    let events = dashboard.events();

    assert_eq!(events.recv().await.unwrap().cause, RefreshCause::Mount);
    let mounted_at = Instant::now();

    tokio::time::sleep(PERIOD - Duration::from_secs(1)).await;
    assert_eq!(fetches(&backend), (1, 1, 1));

    let event = events.recv().await.unwrap();
    assert_eq!(event.cause, RefreshCause::Tick);
    assert_eq!(mounted_at.elapsed(), PERIOD);
    assert_eq!(fetches(&backend), (2, 2, 2));

    events.recv().await.unwrap();
    events.recv().await.unwrap();
    assert_eq!(mounted_at.elapsed(), PERIOD * 3);
    assert_eq!(fetches(&backend), (4, 4, 4));
}

#[tokio::test(start_paused = true)]
async fn unmount_stops_polling() {
    let backend = FakeBackend::new();
    let dashboard = mount(&backend, true);
    let events = dashboard.events();
    events.recv().await.unwrap();

    dashboard.unmount();
    tokio::time::sleep(PERIOD * 10).await;

    assert_eq!(fetches(&backend), (1, 1, 1));
    assert!(events.recv().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_dashboard_stops_polling() {
    let backend = FakeBackend::new();
    {
        let dashboard = mount(&backend, true);
        dashboard.events().recv().await.unwrap();
    }

    tokio::time::sleep(PERIOD * 4).await;
    assert_eq!(fetches(&backend), (1, 1, 1));
}

#[tokio::test(start_paused = true)]
async fn response_pending_at_unmount_is_never_applied() {
    let backend = FakeBackend::new();
    backend.available.lock().push(ride("r-1", "requested"));
    *backend.available_delay.lock() = Some(Duration::from_secs(5));
    let dashboard = mount(&backend, true);
    let events = dashboard.events();

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(backend.calls.get("available_rides"), 1);
    assert_eq!(backend.calls.get("available_rides_answered"), 0);
    assert_eq!(dashboard.snapshot().refreshed_at, None);

    drop(dashboard);
    tokio::time::sleep(PERIOD * 2).await;

    assert_eq!(backend.calls.get("available_rides_answered"), 0);
    assert_eq!(fetches(&backend), (1, 1, 1));
    assert!(events.recv().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn actions_refetch_immediately() {
    let backend = FakeBackend::new();
    backend.available.lock().push(ride("r-1", "requested"));
    let notifier = RecordingNotifier::new();
    let dashboard = DriverDashboard::mount(
        dyn_api(&backend),
        dyn_notifier(&notifier),
        user("driver", true),
        PERIOD,
    );
    let events = dashboard.events();
    events.recv().await.unwrap();

    let offered = dashboard.available_rides();
    assert_eq!(offered.len(), 1);

    assert_ok!(dashboard.accept(&offered[0]).await);

    let event = events.recv().await.unwrap();
    assert_eq!(event.cause, RefreshCause::Action);
    assert_eq!(fetches(&backend), (2, 2, 2));
    assert_eq!(notifier.last_success().as_deref(), Some("Ride accepted successfully!"));
    assert!(dashboard.available_rides().is_empty());
    assert_eq!(dashboard.current_ride().unwrap().id, "r-1");

    assert_ok!(dashboard.start().await);
    assert_ok!(dashboard.complete().await);
    assert_eq!(fetches(&backend), (4, 4, 4));
    assert_eq!(dashboard.current_ride(), None);
}

#[tokio::test(start_paused = true)]
async fn disallowed_actions_make_no_request() {
    let backend = FakeBackend::new();
    let dashboard = mount(&backend, true);
    dashboard.events().recv().await.unwrap();

    assert_eq!(dashboard.start().await.unwrap_err().code, 100);
    assert_eq!(dashboard.complete().await.unwrap_err().code, 100);
    assert_eq!(dashboard.cancel().await.unwrap_err().code, 100);

    *backend.current.lock() = Some(ride("r-2", "accepted"));
    dashboard.refresh().await;
    assert_eq!(dashboard.complete().await.unwrap_err().code, 100);

    assert_eq!(backend.calls.get("start_ride"), 0);
    assert_eq!(backend.calls.get("complete_ride"), 0);
    assert_eq!(backend.calls.get("cancel_ride"), 0);
}

#[tokio::test(start_paused = true)]
async fn failed_action_notifies_and_skips_refetch() {
    let backend = FakeBackend::new();
    *backend.current.lock() = Some(ride("r-3", "in_progress"));
    backend.fail("cancel_ride");
    let notifier = RecordingNotifier::new();
    let dashboard = DriverDashboard::mount(
        dyn_api(&backend),
        dyn_notifier(&notifier),
        user("driver", true),
        PERIOD,
    );
    dashboard.events().recv().await.unwrap();

    assert!(dashboard.cancel().await.is_err());

    assert_eq!(notifier.last_error().as_deref(), Some("Failed to cancel ride"));
    assert_eq!(fetches(&backend), (1, 1, 1));
    assert_eq!(dashboard.current_ride().unwrap().id, "r-3");
}

#[tokio::test(start_paused = true)]
async fn inactive_driver_sees_no_rides() {
    let backend = FakeBackend::new();
    backend.available.lock().push(ride("r-1", "requested"));
    backend.available.lock().push(ride("r-2", "requested"));
    let dashboard = mount(&backend, false);
    dashboard.events().recv().await.unwrap();

    assert!(dashboard.available_rides().is_empty());
    assert_eq!(dashboard.snapshot().available_rides.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn one_failing_fetch_does_not_block_the_others() {
    let backend = FakeBackend::new();
    backend.fail("available_rides");
    *backend.current.lock() = Some(ride("r-5", "accepted"));
    *backend.stats.lock() = DriverStats {
        today_earnings: 480.0,
        completed_rides: 3,
        rating: 4.9,
    };
    let dashboard = mount(&backend, true);
    let events = dashboard.events();

    let event = events.recv().await.unwrap();
    assert_eq!(event.failures, 1);
    assert!(dashboard.available_rides().is_empty());
    assert_eq!(dashboard.current_ride().unwrap().id, "r-5");
    assert_eq!(dashboard.stats().completed_rides, 3);

    backend.recover("available_rides");
    backend.available.lock().push(ride("r-6", "requested"));
    backend.fail("driver_stats");

    let event = events.recv().await.unwrap();
    assert_eq!(event.failures, 1);
    assert_eq!(dashboard.available_rides().len(), 1);
    assert_eq!(dashboard.stats().today_earnings, 480.0);
}

#[tokio::test(start_paused = true)]
async fn stats_default_before_the_first_fetch() {
    let backend = FakeBackend::new();
    let dashboard = mount(&backend, true);

    let stats = dashboard.stats();
    assert_eq!(stats.rating, 4.8);
    assert_eq!(stats.completed_rides, 0);
}
