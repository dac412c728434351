use std::time::Duration;

use assert_matches::assert_matches;
use codetype::app::{App, Control};
use codetype::classify::CharClass;
use codetype::clock::ManualClock;
use codetype::config::{Config, MemoryConfigStore};
use codetype::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use codetype::session::SessionState;
use codetype::snippets::SnippetLibrary;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn app_for(text: &str, clock: ManualClock) -> App<ManualClock> {
    let library = SnippetLibrary::from_json(&format!(
        r#"{{"snippets":[{{"id":"t","title":"Test","text":{}}}]}}"#,
        serde_json::to_string(text).unwrap()
    ))
    .unwrap();
    let config = Config {
        snippet: "t".into(),
        ..Config::default()
    };
    App::new(library, config, Box::new(MemoryConfigStore::default()), clock).unwrap()
}

// Headless run of the event loop without a TTY: keys and frame requests
// share one queue, so a burst of keys is projected once.
#[test]
fn headless_burst_renders_once() {
    let (es, tx) = TestEventSource::new();
    let runner = Runner::new(es, FixedTicker::new(Duration::from_millis(5)));
    let mut app = app_for("hi there", ManualClock::new());
    app.set_frame_requester(Box::new(runner.frame_requester()));

    tx.send(key('h')).unwrap();
    tx.send(key('i')).unwrap();
    tx.send(key('!')).unwrap();

    let mut frames = 0;
    for _ in 0..20u32 {
        match runner.step() {
            AppEvent::Key(k) => {
                assert_eq!(app.on_key(k), Control::Continue);
            }
            AppEvent::Frame => {
                if app.on_frame() {
                    frames += 1;
                }
            }
            AppEvent::Tick => break,
            AppEvent::Resize => {}
        }
    }

    assert_eq!(frames, 1);
    assert_eq!(app.session().typed(), "hi!");
    let classes: Vec<CharClass> = app.session().frame().tokens().map(|t| t.class).collect();
    assert_eq!(
        classes,
        vec![CharClass::Correct, CharClass::Wrong, CharClass::Pending]
    );
    assert_eq!(app.session().metrics().mistakes, 1);
    assert_eq!(app.session().metrics().pattern, "!");
}

#[test]
fn headless_session_completes_with_metrics() {
    let clock = ManualClock::new();
    let (es, tx) = TestEventSource::new();
    let runner = Runner::new(es, FixedTicker::new(Duration::from_millis(5)));
    let mut app = app_for("fn x", clock.clone());
    app.set_frame_requester(Box::new(runner.frame_requester()));

    for c in "fn x".chars() {
        tx.send(key(c)).unwrap();
    }

    for _ in 0..20u32 {
        match runner.step() {
            AppEvent::Key(k) => {
                clock.advance(Duration::from_millis(300));
                app.on_key(k);
            }
            AppEvent::Frame => {
                app.on_frame();
            }
            AppEvent::Tick => break,
            AppEvent::Resize => {}
        }
    }

    let m = app.session().metrics();
    assert_eq!(app.session().state(), SessionState::Active);
    assert_eq!(m.accuracy_percent, 100);
    assert_eq!(m.mistakes, 0);
    assert!((m.progress_percent - 100.0).abs() < 1e-9);
    // 4 chars in 0.9s since the first key
    assert!((m.cpm - 4.0 / (0.9 / 60.0)).abs() < 1e-6);
    assert!(m.live_wpm > 0.0);
    assert!(app
        .session()
        .frame()
        .tokens()
        .all(|t| t.class == CharClass::Correct));
}

#[test]
fn headless_reset_supersedes_pending_frame() {
    let (es, tx) = TestEventSource::new();
    let runner = Runner::new(es, FixedTicker::new(Duration::from_millis(5)));
    let mut app = app_for("abc", ManualClock::new());
    app.set_frame_requester(Box::new(runner.frame_requester()));

    tx.send(key('a')).unwrap();
    tx.send(AppEvent::Key(KeyEvent::new(
        KeyCode::Char('r'),
        KeyModifiers::CONTROL,
    )))
    .unwrap();

    assert_matches!(runner.step(), AppEvent::Key(k) => { app.on_key(k); });
    assert_matches!(runner.step(), AppEvent::Key(k) => { app.on_key(k); });
    // the frame requested by 'a' arrives after the reset and finds nothing to do
    assert_matches!(runner.step(), AppEvent::Frame);
    assert!(!app.on_frame());

    assert_eq!(app.session().state(), SessionState::Idle);
    assert!(app
        .session()
        .frame()
        .tokens()
        .all(|t| t.class == CharClass::Pending));
}
