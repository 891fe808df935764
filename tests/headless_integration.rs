use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::layout::Rect;

use wordbomb::audio::{Cue, CueLog};
use wordbomb::corpus::{Corpora, PromptSource, WordCorpus};
use wordbomb::runtime::{FixedTicker, GameEvent, Runner, TestEventSource};
use wordbomb::session::{GameState, Rules, Session};
use wordbomb::App;

// Headless integration: the real runner and app, fed from a channel instead
// of a terminal. Ticks advance the game by a fixed step so runs are
// deterministic regardless of scheduling.
const STEP: Duration = Duration::from_millis(100);

fn corpora(prompts: &str) -> Corpora {
    Corpora {
        prompts: PromptSource::parse(prompts, Path::new("prompts")).unwrap(),
        words: WordCorpus::parse(
            "banana\nplanet\ninside\nwinter\nwater\nriver\nand\ntiger",
            Path::new("words"),
        )
        .unwrap(),
    }
}

fn app_with(rules: Rules, seed: u64) -> (App, CueLog) {
    app_with_prompts("AN\nIN [suffix]\nER", rules, seed)
}

fn app_with_prompts(prompts: &str, rules: Rules, seed: u64) -> (App, CueLog) {
    let log = CueLog::new();
    let session = Session::new(rules, corpora(prompts), Box::new(log.clone())).with_seed(seed);
    let mut app = App::new(session);
    app.layout(Rect::new(0, 0, 80, 24));
    (app, log)
}

fn runner() -> (Sender<GameEvent>, Runner<TestEventSource, FixedTicker>) {
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(2)),
    );
    (tx, runner)
}

fn key(code: KeyCode) -> GameEvent {
    GameEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn send_word(tx: &Sender<GameEvent>, word: &str) {
    for c in word.chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
    tx.send(key(KeyCode::Enter)).unwrap();
}

/// One loop iteration the way the binary runs it.
fn step(app: &mut App, runner: &Runner<TestEventSource, FixedTicker>) {
    let events = runner.next_tick();
    app.handle_events(&events);
    if !app.should_quit() {
        app.tick(STEP).unwrap();
    }
}

/// Types a word that fits whatever prompt is showing.
fn answer_for(prompt: &str) -> &'static str {
    match prompt {
        "AN" => "banana",
        "IN" => "winter",
        "ER" => "river",
        other => panic!("unexpected prompt {other}"),
    }
}

#[test]
fn headless_word_then_timeout_game() {
    let rules = Rules {
        initial_time_ms: 1_000,
        max_lives: 1,
        ..Rules::default()
    };
    let (mut app, log) = app_with(rules, 7);
    let (tx, runner) = runner();

    tx.send(key(KeyCode::Enter)).unwrap();
    step(&mut app, &runner);
    assert_eq!(app.session().state(), GameState::Playing);
    assert_eq!(app.regions().visible().count(), 0);

    send_word(&tx, answer_for(app.session().prompt()));
    step(&mut app, &runner);
    assert_eq!(app.session().used_words().len(), 1);
    assert_eq!(log.cues(), vec![Cue::AmbientStart, Cue::Success]);

    // the fuse burns down with nothing typed
    for _ in 0..20 {
        step(&mut app, &runner);
        if app.session().state() == GameState::Ended {
            break;
        }
    }
    assert_eq!(app.session().state(), GameState::Ended);
    assert_eq!(log.last(), Some(Cue::AmbientStop));

    let stats = app.session().statistics().unwrap();
    assert_eq!(stats.word_count(), 1);
    assert_eq!(stats.elapsed_ms(), 1_100);
    let labels: Vec<&str> = app.regions().visible().map(|r| r.label).collect();
    assert_eq!(labels, vec!["MENU"]);

    // a late Enter leaves the results up; Space goes back to the menu, Esc
    // quits and later events are dropped
    tx.send(key(KeyCode::Enter)).unwrap();
    step(&mut app, &runner);
    assert_eq!(app.session().state(), GameState::Ended);

    tx.send(key(KeyCode::Char(' '))).unwrap();
    tx.send(key(KeyCode::Esc)).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();
    step(&mut app, &runner);
    assert!(app.should_quit());
    assert_eq!(app.session().state(), GameState::Menu);
}

#[test]
fn headless_repeated_word_is_locked() {
    let (mut app, log) = app_with_prompts("AN", Rules::default(), 3);
    let (tx, runner) = runner();

    tx.send(key(KeyCode::Enter)).unwrap();
    step(&mut app, &runner);
    send_word(&tx, "planet");
    step(&mut app, &runner);
    send_word(&tx, "PLANET");
    step(&mut app, &runner);

    assert_eq!(app.session().used_words(), &["PLANET".to_string()]);
    assert_eq!(
        log.cues(),
        vec![Cue::AmbientStart, Cue::Success, Cue::Locked]
    );
    assert_eq!(app.session().lives(), 5);
    assert_eq!(app.session().input(), "");
}

#[test]
fn headless_random_input_keeps_invariants() {
    let rules = Rules {
        initial_time_ms: 700,
        max_lives: 3,
        ..Rules::default()
    };

    for seed in 0..8u64 {
        let (mut app, _) = app_with(rules, seed);
        let (tx, runner) = runner();
        let mut rng = StdRng::seed_from_u64(seed);
        let pool = [
            "banana", "planet", "inside", "winter", "river", "tiger", "zzz", "an",
        ];

        tx.send(key(KeyCode::Enter)).unwrap();
        step(&mut app, &runner);

        let mut lives = app.session().lives();
        for _ in 0..60 {
            if app.session().state() == GameState::Ended {
                break;
            }
            match rng.gen_range(0..4) {
                0 => send_word(&tx, pool[rng.gen_range(0..pool.len())]),
                1 => tx.send(key(KeyCode::Backspace)).unwrap(),
                _ => {}
            }
            step(&mut app, &runner);

            let session = app.session();
            assert!(session.lives() <= lives, "lives never increase (seed {seed})");
            lives = session.lives();

            let used = session.used_words();
            for (i, word) in used.iter().enumerate() {
                assert!(!used[i + 1..].contains(word), "duplicate {word} (seed {seed})");
            }
            match session.state() {
                GameState::Playing => assert!(session.lives() >= 1),
                GameState::Ended => assert_eq!(session.lives(), 0),
                GameState::Menu => unreachable!("a game in progress never returns to the menu"),
            }
        }
    }
}
