mod alerts;
mod buttons;
mod config;
mod ui;

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use num_traits::FromPrimitive;
use timer_core::{format_mmss, Direction, SelectOutcome, TimerFace};

use crate::alerts::{fire_alert, AlertConfig, Haptics, TerminalHaptics};
use crate::buttons::{Button, RepeatRecognizer};
use crate::config::Config;

/// Longest hold a single `u*N` / `d*N` command may simulate.
const MAX_HELD_REPEATS: u32 = 64;

#[derive(Debug, num_derive::FromPrimitive)]
enum AppOp {
    Redraw = 0,
    Button,
    Pump,
    Help,
    Quit,
}

/// A scalar message on the main loop: opcode plus one argument.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Envelope {
    id: usize,
    arg: usize,
}

impl Envelope {
    fn scalar(op: AppOp, arg: usize) -> Self {
        Self { id: op as usize, arg }
    }

    fn button(button: Button) -> Self {
        Self::scalar(AppOp::Button, button.code())
    }
}

#[derive(Debug, PartialEq)]
enum PumpCtl {
    Start(u64),
    Stop,
    Quit,
}

struct TimerApp<H: Haptics, W: Write> {
    face: TimerFace,
    recognizer: RepeatRecognizer,
    alert_config: AlertConfig,
    haptics: H,
    out: W,

    pump: Sender<PumpCtl>,
    pump_running: bool,
    tick_ms: u64,
}

impl<H: Haptics, W: Write> TimerApp<H, W> {
    fn new(config: &Config, haptics: H, out: W, pump: Sender<PumpCtl>) -> Self {
        Self {
            face: TimerFace::new(config.initial),
            recognizer: RepeatRecognizer::new(config.repeat_ms),
            alert_config: config.alert_config(),
            haptics,
            out,
            pump,
            pump_running: false,
            tick_ms: config.tick_ms,
        }
    }

    fn redraw(&mut self) -> io::Result<()> {
        ui::draw_face(&mut self.out, &self.face)
    }

    fn start_pump(&mut self) {
        if !self.pump_running {
            self.pump_running = true;
            self.pump.send(PumpCtl::Start(self.tick_ms)).ok();
        }
    }

    fn stop_pump(&mut self) {
        if self.pump_running {
            self.pump_running = false;
            self.pump.send(PumpCtl::Stop).ok();
        }
    }

    fn handle_button(&mut self, button: Button, now_ms: u64) -> io::Result<()> {
        let repeats = self.recognizer.press(button, now_ms);
        let direction = match button {
            Button::Up => Direction::Up,
            Button::Down => Direction::Down,
            Button::Select => {
                self.handle_select();
                return self.redraw();
            }
        };

        match self.face.on_adjust(repeats, direction) {
            Some(value) => log::debug!(
                "{:?} x{} (step {}) -> {}",
                direction,
                repeats,
                self.face.editor().step(),
                format_mmss(value)
            ),
            None => log::debug!("ignoring {:?} while running", button),
        }
        self.redraw()
    }

    fn handle_select(&mut self) {
        match self.face.on_select() {
            SelectOutcome::Started(secs) => {
                log::info!("countdown started from {}", format_mmss(secs));
                self.start_pump();
            }
            SelectOutcome::Cancelled => {
                log::info!("countdown cancelled");
                self.stop_pump();
            }
            SelectOutcome::Ignored => log::debug!("nothing to start at 00:00"),
        }
    }

    fn handle_pump(&mut self) -> io::Result<()> {
        if !self.face.is_running() {
            // Tick already in flight when the countdown stopped
            log::debug!("dropping stray tick");
            return Ok(());
        }
        if let Some(effect) = self.face.on_tick() {
            log::info!("countdown expired");
            self.stop_pump();
            fire_alert(&self.alert_config, &mut self.haptics, effect);
        }
        self.redraw()
    }
}

/// Parse one terminal token into the messages it stands for.
fn parse_command(token: &str) -> Option<Vec<Envelope>> {
    let (key, repeats) = match token.split_once('*') {
        Some((key, n)) => (key, n.parse::<u32>().ok()?.clamp(1, MAX_HELD_REPEATS)),
        None => (token, 1),
    };
    let msg = match key {
        "u" | "k" | "+" => Envelope::button(Button::Up),
        "d" | "j" | "-" => Envelope::button(Button::Down),
        "s" => Envelope::button(Button::Select),
        "r" => Envelope::scalar(AppOp::Redraw, 0),
        "h" | "?" => Envelope::scalar(AppOp::Help, 0),
        "q" => Envelope::scalar(AppOp::Quit, 0),
        _ => return None,
    };
    Some(vec![msg; repeats as usize])
}

fn input_thread(main: Sender<Envelope>) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        for token in line.split_whitespace() {
            match parse_command(token) {
                Some(msgs) => {
                    for msg in msgs {
                        if main.send(msg).is_err() {
                            return;
                        }
                    }
                }
                None => log::warn!("unrecognised input: {}", token),
            }
        }
    }
    // EOF on the terminal ends the app
    main.send(Envelope::scalar(AppOp::Quit, 0)).ok();
}

fn pump_thread(ctl: Receiver<PumpCtl>, main: Sender<Envelope>) {
    let mut interval_ms = 1000u64;
    let mut running = false;

    loop {
        if running {
            thread::sleep(Duration::from_millis(interval_ms));
            if main.send(Envelope::scalar(AppOp::Pump, 0)).is_err() {
                break;
            }
        }

        // Non-blocking while ticking, block-wait when stopped
        let pending: Vec<PumpCtl> = if running {
            let mut pending = Vec::new();
            loop {
                match ctl.try_recv() {
                    Ok(msg) => pending.push(msg),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return,
                }
            }
            pending
        } else {
            match ctl.recv() {
                Ok(msg) => vec![msg],
                Err(_) => return,
            }
        };

        for msg in pending {
            match msg {
                PumpCtl::Start(ms) => {
                    interval_ms = if ms == 0 { 100 } else { ms };
                    running = true;
                }
                PumpCtl::Stop => running = false,
                PumpCtl::Quit => return,
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    env_logger::Builder::new()
        .filter_level(config.log_level())
        .init();
    log::info!("countdown face PID is {}", std::process::id());

    let (main_tx, main_rx) = mpsc::channel::<Envelope>();
    let (pump_tx, pump_rx) = mpsc::channel::<PumpCtl>();

    let pump_main = main_tx.clone();
    let pump_handle = thread::spawn(move || pump_thread(pump_rx, pump_main));
    thread::spawn(move || input_thread(main_tx));

    let mut app = TimerApp::new(&config, TerminalHaptics, io::stdout().lock(), pump_tx);
    ui::draw_help(&mut app.out).context("can't draw help")?;
    app.redraw().context("can't draw face")?;

    let epoch = Instant::now();
    while let Ok(msg) = main_rx.recv() {
        match FromPrimitive::from_usize(msg.id) {
            Some(AppOp::Redraw) => app.redraw()?,
            Some(AppOp::Button) => match Button::from_code(msg.arg) {
                Some(button) => app.handle_button(button, epoch.elapsed().as_millis() as u64)?,
                None => log::warn!("unknown button code {}", msg.arg),
            },
            Some(AppOp::Pump) => app.handle_pump()?,
            Some(AppOp::Help) => {
                writeln!(app.out)?;
                ui::draw_help(&mut app.out)?;
                app.redraw()?;
            }
            Some(AppOp::Quit) => break,
            None => log::error!("unknown opcode: {:?}", msg),
        }
    }

    // Clean up
    app.stop_pump();
    app.pump.send(PumpCtl::Quit).ok();
    pump_handle.join().ok();
    writeln!(app.out).context("can't write to terminal")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<Vec<u32>>);

    impl Haptics for Recorder {
        fn vibe(&mut self, pattern_ms: &[u32]) {
            self.0.push(pattern_ms.to_vec());
        }
    }

    fn app(args: &[&str]) -> (TimerApp<Recorder, Vec<u8>>, Receiver<PumpCtl>) {
        let mut argv = vec!["countdown-face"];
        argv.extend_from_slice(args);
        let config = Config::parse_from(argv);
        let (tx, rx) = mpsc::channel();
        (TimerApp::new(&config, Recorder::default(), Vec::new(), tx), rx)
    }

    fn pump_msgs(rx: &Receiver<PumpCtl>) -> Vec<PumpCtl> {
        rx.try_iter().collect()
    }

    #[test]
    fn test_press_start_and_expire() {
        let (mut app, rx) = app(&[]);
        for i in 0..5 {
            // Far apart, so each is its own single-click gesture
            app.handle_button(Button::Up, i * 1000).unwrap();
        }
        assert_eq!(app.face.display_text(), "00:05");

        app.handle_button(Button::Select, 10_000).unwrap();
        assert_eq!(pump_msgs(&rx), vec![PumpCtl::Start(1000)]);

        for _ in 0..4 {
            app.handle_pump().unwrap();
        }
        assert!(app.face.is_running());
        assert!(app.haptics.0.is_empty());

        app.handle_pump().unwrap();
        assert!(!app.face.is_running());
        assert_eq!(app.haptics.0, vec![vec![500, 300, 500, 300, 300]]);
        assert_eq!(pump_msgs(&rx), vec![PumpCtl::Stop]);

        // Late tick after expiry changes nothing
        app.handle_pump().unwrap();
        assert_eq!(app.haptics.0.len(), 1);
        assert_eq!(app.face.display_text(), "00:05");
    }

    #[test]
    fn test_cancel_does_not_vibrate() {
        let (mut app, rx) = app(&["--initial", "00:10", "--tick-ms", "250"]);
        app.handle_button(Button::Select, 0).unwrap();
        app.handle_pump().unwrap();
        app.handle_pump().unwrap();
        app.handle_button(Button::Select, 5000).unwrap();

        assert!(!app.face.is_running());
        assert!(app.haptics.0.is_empty());
        assert_eq!(pump_msgs(&rx), vec![PumpCtl::Start(250), PumpCtl::Stop]);
    }

    #[test]
    fn test_holding_up_accelerates() {
        let (mut app, _rx) = app(&[]);
        for i in 0..20 {
            app.handle_button(Button::Up, i * 50).unwrap();
        }
        assert_eq!(app.face.editor().value(), 150);
        assert_eq!(app.face.editor().step(), 15);
    }

    #[test]
    fn test_adjust_ignored_while_running() {
        let (mut app, _rx) = app(&["--initial", "01:00"]);
        app.handle_button(Button::Select, 0).unwrap();
        app.handle_button(Button::Down, 1000).unwrap();
        assert_eq!(app.face.editor().value(), 60);
        assert_eq!(app.face.display_seconds(), 60);
    }

    #[test]
    fn test_select_at_zero_keeps_pump_off() {
        let (mut app, rx) = app(&[]);
        app.handle_button(Button::Select, 0).unwrap();
        assert!(!app.face.is_running());
        assert!(pump_msgs(&rx).is_empty());
    }

    #[test]
    fn test_no_vibe_flag() {
        let (mut app, _rx) = app(&["--initial", "1", "--no-vibe"]);
        app.handle_button(Button::Select, 0).unwrap();
        app.handle_pump().unwrap();
        assert!(!app.face.is_running());
        assert!(app.haptics.0.is_empty());
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("u"), Some(vec![Envelope::button(Button::Up)]));
        assert_eq!(parse_command("d*3").map(|m| m.len()), Some(3));
        assert_eq!(parse_command("u*1000").map(|m| m.len()), Some(MAX_HELD_REPEATS as usize));
        assert_eq!(parse_command("s"), Some(vec![Envelope::button(Button::Select)]));
        assert_eq!(parse_command("q"), Some(vec![Envelope::scalar(AppOp::Quit, 0)]));
        assert_eq!(parse_command("x"), None);
        assert_eq!(parse_command("u*z"), None);
    }

    #[test]
    fn test_pump_thread_ticks_once_started() {
        let (ctl_tx, ctl_rx) = mpsc::channel();
        let (main_tx, main_rx) = mpsc::channel();
        let handle = thread::spawn(move || pump_thread(ctl_rx, main_tx));

        ctl_tx.send(PumpCtl::Start(5)).unwrap();
        let first = main_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(first, Envelope::scalar(AppOp::Pump, 0));

        ctl_tx.send(PumpCtl::Quit).unwrap();
        handle.join().unwrap();
    }
}
