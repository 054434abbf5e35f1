//! Async dispatch loop tests.

mod common;

use std::time::Duration;

use common::{MapCall, RecordingMap, polygon};
use tokio_util::sync::CancellationToken;
use zskarte_config::ShortcutConfig;
use zskarte_shortcuts::{KeyEvent, KeyEventSource, ListenOptions, ShortcutService};

#[tokio::test]
async fn run_dispatches_until_source_stops() {
    let mut source = KeyEventSource::started(16);
    let mut service =
        ShortcutService::new(RecordingMap::editable(), &source, &ShortcutConfig::default())
            .unwrap();

    source.emit(KeyEvent::new("KeyZ").with_ctrl());
    source.emit(KeyEvent::new("Escape"));
    source.stop();

    service.run(CancellationToken::new()).await;

    assert!(service.is_shut_down());
    assert_eq!(
        service.map().calls,
        vec![MapCall::Undo, MapCall::CancelDrawing]
    );
}

#[tokio::test]
async fn run_stops_on_cancellation() {
    let source = KeyEventSource::started(16);
    let mut service =
        ShortcutService::new(RecordingMap::editable(), &source, &ShortcutConfig::default())
            .unwrap();
    let shutdown = CancellationToken::new();
    shutdown.cancel();

    tokio::time::timeout(Duration::from_secs(1), service.run(shutdown))
        .await
        .unwrap();

    assert!(service.is_shut_down());
    assert!(!service.shutdown());
}

#[tokio::test]
async fn run_picks_up_selection_changes() {
    let mut source = KeyEventSource::started(16);
    let mut service =
        ShortcutService::new(RecordingMap::editable(), &source, &ShortcutConfig::default())
            .unwrap();

    service.map().select(Some(polygon("feature-3", "Zone")));
    source.emit(KeyEvent::new("Backspace").with_meta());
    source.stop();

    service.run(CancellationToken::new()).await;

    assert_eq!(
        service.map().calls,
        vec![MapCall::Remove("feature-3".to_string())]
    );
}

#[tokio::test]
async fn stream_next_waits_for_match() {
    let mut source = KeyEventSource::started(16);
    let mut service =
        ShortcutService::new(RecordingMap::editable(), &source, &ShortcutConfig::default())
            .unwrap();
    let mut stream = service
        .listen(Some("shift+alt+f1"), ListenOptions::default())
        .unwrap();

    source.emit(KeyEvent::new("F1"));
    source.emit(KeyEvent::new("F1").with_shift().with_alt());
    source.stop();

    let event = stream.next().await.unwrap();
    assert!(event.shift && event.alt);
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn shutdown_releases_waiting_stream() {
    let source = KeyEventSource::started(16);
    let mut service =
        ShortcutService::new(RecordingMap::editable(), &source, &ShortcutConfig::default())
            .unwrap();
    let mut stream = service.listen(None, ListenOptions::default()).unwrap();

    let waiting = tokio::spawn(async move {
        let event = stream.next().await;
        (event, stream.is_attached())
    });
    tokio::task::yield_now().await;
    service.shutdown();

    let (event, attached) = tokio::time::timeout(Duration::from_secs(1), waiting)
        .await
        .unwrap()
        .unwrap();
    assert!(event.is_none());
    assert!(!attached);
    assert_eq!(source.emit(KeyEvent::new("KeyA")), 0);
}
