use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use interview_shell::app::ShellApp;
use interview_shell::runners;
use mock_interview::{logging, EnvConfig, QuestionBank, RandomGestureSource, SessionStore};

const STORE_PATH_ENV_VAR: &str = "INTERVIEW_SHELL_STORE_PATH";

const TICK: Duration = Duration::from_millis(50);
const DRAIN_TIMEOUT: Duration = Duration::from_secs(60);

fn main() -> io::Result<()> {
    let config = EnvConfig::from_env();
    logging::init(&config);

    let bank = match &config.question_bank_path {
        Some(path) => QuestionBank::load(path).map_err(io::Error::other)?,
        None => QuestionBank::default(),
    };
    let store = match std::env::var(STORE_PATH_ENV_VAR) {
        Ok(path) if !path.trim().is_empty() => {
            SessionStore::open_file(Path::new(path.trim())).map_err(io::Error::other)?
        }
        _ => SessionStore::in_memory(),
    };
    let runner = runners::runner_from_env().map_err(io::Error::other)?;
    let gestures = RandomGestureSource::from_seed(config.gesture_seed);

    let mut app = ShellApp::new(store, bank, runner, gestures);
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Mock interview shell. Type /help for commands.")?;

    let lines = spawn_stdin_reader()?;
    let mut input_closed = false;
    while !app.should_exit() && !input_closed {
        match lines.recv_timeout(TICK) {
            Ok(line) => app.on_line(&line),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => input_closed = true,
        }
        app.tick(Instant::now());
        print_lines(&mut stdout, app.take_output())?;
    }

    let deadline = Instant::now() + DRAIN_TIMEOUT;
    while !app.is_idle() && Instant::now() < deadline {
        thread::sleep(TICK);
        app.tick(Instant::now());
    }
    print_lines(&mut stdout, app.take_output())?;
    stdout.flush()
}

fn spawn_stdin_reader() -> io::Result<mpsc::Receiver<String>> {
    let (sender, receiver) = mpsc::channel();
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if sender.send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(receiver)
}

fn print_lines(out: &mut impl Write, lines: Vec<String>) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
