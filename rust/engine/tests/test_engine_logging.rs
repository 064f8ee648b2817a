use std::io;
use std::sync::{Arc, Mutex};

use holdem_engine::deck::Deck;
use holdem_engine::engine::Engine;
use holdem_engine::player::ActionKind;
use holdem_engine::settings::Settings;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured(level: &str, run: impl FnOnce()) -> String {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, run);
    let bytes = capture.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

fn play_a_fold() {
    let mut engine = Engine::new(Settings::default(), vec!["ann", "bob"], vec![0, 1], Deck::new_with_seed(3)).unwrap();
    engine.new_round();
    engine.action(ActionKind::Check, 0);
    engine.action(ActionKind::Fold, 0);
}

#[test]
fn debug_level_traces_actions_and_rejections() {
    let output = captured("holdem_engine=debug", play_a_fold);
    assert!(output.contains("round started"), "{output}");
    assert!(output.contains("blind posted"), "{output}");
    assert!(output.contains("operation rejected"), "{output}");
    assert!(output.contains("action accepted"), "{output}");
    assert!(output.contains("round settled"), "{output}");
}

#[test]
fn info_level_keeps_round_milestones_only() {
    let output = captured("holdem_engine=info", play_a_fold);
    assert!(output.contains("round started"), "{output}");
    assert!(output.contains("round settled"), "{output}");
    assert!(!output.contains("action accepted"), "{output}");
}
