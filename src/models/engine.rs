//! Engine model - manages the UCI engine process that plays Black.
//!
//! Architecture:
//! - Engine I/O runs on OS threads (blocking reader/writer)
//! - A GPUI background task polls the event channel and pushes updates to
//!   the UI, so the chosen move re-enters the single-threaded mutation path
//!   before it is applied to the game

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use gpui::{AsyncApp, Context, Task, WeakEntity};

use crate::config::Config;
use crate::domain::uci::{UciCommand, UciOutputKind, parse_bestmove};

/// How long the engine gets to acknowledge the UCI handshake before the
/// session is declared dead.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Messages sent from the engine reader thread to the model
#[derive(Debug)]
pub enum EngineEvent {
    /// A line of output from the engine
    Output(String),
    /// Engine process exited
    Exited,
    /// Error occurred
    Error(String),
}

/// The engine model - owns the process and the best-move handshake
pub struct EngineModel {
    engine_path: String,
    engine_elo: Option<u32>,
    /// Whether the engine process is running
    running: bool,
    /// Whether a `go` is outstanding
    thinking: bool,
    /// Best move reported by the engine, waiting to be applied
    best_move: Option<String>,
    /// Set when `stop` interrupts a search; the `bestmove` the engine
    /// emits in response answers the abandoned game and must not be kept
    discard_next_answer: bool,
    /// Handshake acknowledged (`uciok`/`readyok` seen)
    handshake_ok: bool,
    /// When the process was spawned, for the handshake deadline
    started_at: Option<Instant>,
    /// First fatal failure; the session does not recover from these
    fatal: Option<String>,
    /// Channel receiver for engine events (polled by background task)
    event_receiver: Option<Receiver<EngineEvent>>,
    /// Channel sender for commands to engine writer thread
    command_sender: Option<Sender<String>>,
    /// Handle to the engine process
    process: Option<Child>,
    /// Background polling task (kept alive while engine is running)
    _poll_task: Option<Task<()>>,
}

impl EngineModel {
    pub fn new(config: &Config) -> Self {
        Self {
            engine_path: config.engine_path.clone(),
            engine_elo: config.engine_elo,
            running: false,
            thinking: false,
            best_move: None,
            discard_next_answer: false,
            handshake_ok: false,
            started_at: None,
            fatal: None,
            event_receiver: None,
            command_sender: None,
            process: None,
            _poll_task: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    /// The first fatal failure, if any. Engine failure ends the session.
    pub fn fatal_error(&self) -> Option<&str> {
        self.fatal.as_deref()
    }

    /// Take the pending best move, if the engine has answered.
    pub fn take_best_move(&mut self) -> Option<String> {
        self.best_move.take()
    }

    /// Start the engine process.
    ///
    /// Must be called from a Context<EngineModel> to spawn the background
    /// polling task.
    pub fn start(&mut self, cx: &mut Context<Self>) -> Result<(), String> {
        if self.running {
            return Ok(());
        }

        let mut child = Command::new(&self.engine_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                let msg = format!("failed to start engine '{}': {}", self.engine_path, e);
                self.fatal = Some(msg.clone());
                msg
            })?;

        let stdin = match child.stdin.take() {
            Some(stdin) => stdin,
            None => {
                let msg = "failed to open engine stdin".to_string();
                self.fatal = Some(msg.clone());
                return Err(msg);
            }
        };
        let stdout = match child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                let msg = "failed to open engine stdout".to_string();
                self.fatal = Some(msg.clone());
                return Err(msg);
            }
        };

        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();
        let (cmd_tx, cmd_rx) = mpsc::channel::<String>();

        // Reader thread (OS thread for blocking I/O)
        let event_tx_clone = event_tx.clone();
        thread::spawn(move || {
            let reader = BufReader::new(stdout);
            for line in reader.lines() {
                match line {
                    Ok(text) => {
                        if event_tx_clone.send(EngineEvent::Output(text)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        let _ = event_tx_clone.send(EngineEvent::Error(e.to_string()));
                        break;
                    }
                }
            }
            let _ = event_tx_clone.send(EngineEvent::Exited);
        });

        // Writer thread (OS thread for blocking I/O)
        thread::spawn(move || {
            let mut writer = stdin;
            while let Ok(cmd) = cmd_rx.recv() {
                if writeln!(writer, "{}", cmd).is_err() {
                    break;
                }
                if writer.flush().is_err() {
                    break;
                }
            }
        });

        self.process = Some(child);
        self.event_receiver = Some(event_rx);
        self.command_sender = Some(cmd_tx);
        self.running = true;
        self.handshake_ok = false;
        self.started_at = Some(Instant::now());

        // Background polling task that pushes events to the UI
        let poll_task = cx.spawn(async move |weak_entity: WeakEntity<EngineModel>, cx: &mut AsyncApp| {
            Self::run_event_loop(weak_entity, cx).await;
        });
        self._poll_task = Some(poll_task);

        // UCI handshake, plus an optional strength cap
        self.send_command(UciCommand::Uci);
        self.send_command(UciCommand::IsReady);
        if let Some(elo) = self.engine_elo {
            self.send_command(UciCommand::SetOption {
                name: "UCI_LimitStrength".to_string(),
                value: "true".to_string(),
            });
            self.send_command(UciCommand::SetOption {
                name: "UCI_Elo".to_string(),
                value: elo.to_string(),
            });
        }
        self.send_command(UciCommand::UciNewGame);

        log::info!("engine started: {}", self.engine_path);
        Ok(())
    }

    /// Ask for the best move from `fen` within the movetime budget.
    /// The answer arrives through the polling task as a `bestmove` line.
    pub fn request_move(&mut self, fen: &str, move_time_ms: u64) {
        if !self.running || self.thinking {
            return;
        }
        self.best_move = None;
        self.send_command(UciCommand::Position {
            fen: Some(fen.to_string()),
            moves: vec![],
        });
        self.send_command(UciCommand::GoMoveTime(move_time_ms));
        self.thinking = true;
    }

    /// Tell the engine a fresh game started; drops any stale answer.
    /// An interrupted search still produces a `bestmove` line for the
    /// abandoned game, so that answer is marked to be discarded on arrival.
    pub fn new_game(&mut self) {
        if self.thinking {
            self.send_command(UciCommand::Stop);
            self.thinking = false;
            self.discard_next_answer = true;
        }
        self.best_move = None;
        if self.running {
            self.send_command(UciCommand::UciNewGame);
        }
    }

    /// Background event loop that polls the channel and updates the model
    async fn run_event_loop(weak_entity: WeakEntity<EngineModel>, cx: &mut AsyncApp) {
        const POLL_INTERVAL: Duration = Duration::from_millis(16); // ~60fps

        loop {
            cx.background_executor().timer(POLL_INTERVAL).await;

            let should_continue = weak_entity.update(cx, |engine, cx| {
                if !engine.running {
                    return false;
                }

                let had_events = engine.process_pending_events();
                if had_events {
                    cx.notify();
                }

                if engine.check_handshake_timeout() {
                    cx.notify();
                    return false;
                }

                true
            });

            match should_continue {
                Ok(true) => continue,
                _ => break, // Engine stopped or entity dropped
            }
        }
    }

    /// Process all pending events from the channel.
    /// Returns true if any events were processed.
    fn process_pending_events(&mut self) -> bool {
        let events: Vec<EngineEvent> = match &self.event_receiver {
            Some(rx) => {
                let mut collected = Vec::new();
                while let Ok(event) = rx.try_recv() {
                    collected.push(event);
                }
                collected
            }
            None => return false,
        };

        if events.is_empty() {
            return false;
        }

        for event in events {
            match event {
                EngineEvent::Output(line) => self.handle_output(&line),
                EngineEvent::Exited => {
                    if self.running {
                        let msg = "engine process exited unexpectedly".to_string();
                        log::error!("{}", msg);
                        self.fatal.get_or_insert(msg);
                    }
                    self.running = false;
                    self.thinking = false;
                }
                EngineEvent::Error(e) => {
                    log::error!("engine I/O error: {}", e);
                    self.fatal.get_or_insert(format!("engine I/O error: {}", e));
                }
            }
        }

        true
    }

    fn handle_output(&mut self, line: &str) {
        match UciOutputKind::parse(line) {
            UciOutputKind::BestMove(rest) => {
                self.thinking = false;
                if self.discard_next_answer {
                    self.discard_next_answer = false;
                    log::debug!("discarding answer to an interrupted search");
                    return;
                }
                match parse_bestmove(&rest) {
                    Some(mv) => self.best_move = Some(mv.to_string()),
                    None => {
                        // "bestmove (none)" - the game should already be over
                        log::warn!("engine reported no move");
                    }
                }
            }
            UciOutputKind::Id(id) => log::debug!("engine id: {}", id),
            UciOutputKind::UciOk | UciOutputKind::ReadyOk => self.handshake_ok = true,
            UciOutputKind::Info(_) | UciOutputKind::Option(_) | UciOutputKind::Other(_) => {}
        }
    }

    /// True if the handshake deadline passed with no acknowledgement.
    /// A silent engine is as fatal as a missing one; without this the
    /// session would sit at "thinking" forever.
    fn check_handshake_timeout(&mut self) -> bool {
        if self.handshake_ok || !self.running {
            return false;
        }
        let expired = self
            .started_at
            .is_some_and(|t| t.elapsed() >= HANDSHAKE_TIMEOUT);
        if expired {
            let msg = format!(
                "engine '{}' did not answer the UCI handshake",
                self.engine_path
            );
            log::error!("{}", msg);
            self.fatal.get_or_insert(msg);
            self.running = false;
            self.thinking = false;
        }
        expired
    }

    /// Stop the engine process
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }

        if self.thinking {
            self.send_command(UciCommand::Stop);
            self.thinking = false;
        }
        self.send_command(UciCommand::Quit);

        // Dropping the channels lets the threads and poll loop exit
        self.command_sender = None;
        self.event_receiver = None;
        self._poll_task = None;

        if let Some(mut child) = self.process.take() {
            let _ = child.kill();
            let _ = child.wait();
        }

        self.running = false;
        log::info!("engine stopped");
    }

    /// Send a UCI command to the engine
    fn send_command(&self, cmd: UciCommand) {
        let cmd_str = cmd.to_uci_string();
        if let Some(tx) = &self.command_sender {
            let _ = tx.send(cmd_str);
        }
    }
}

impl Drop for EngineModel {
    fn drop(&mut self) {
        self.stop();
    }
}
