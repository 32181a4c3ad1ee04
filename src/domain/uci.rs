//! UCI (Universal Chess Interface) protocol types and utilities.
//!
//! This module handles the wire format for talking to a chess engine.
//! Process spawning and I/O live in the models layer.

/// UCI commands that can be sent to an engine
#[derive(Debug, Clone)]
pub enum UciCommand {
    /// Initialize UCI mode
    Uci,
    /// Check if engine is ready
    IsReady,
    /// Start a new game
    UciNewGame,
    /// Set an engine option
    SetOption { name: String, value: String },
    /// Set position (startpos or FEN, with optional moves)
    Position {
        fen: Option<String>,
        moves: Vec<String>,
    },
    /// Search for a fixed wall-clock budget
    GoMoveTime(u64),
    /// Stop searching
    Stop,
    /// Quit the engine
    Quit,
}

impl UciCommand {
    /// Convert command to UCI protocol string
    pub fn to_uci_string(&self) -> String {
        match self {
            UciCommand::Uci => "uci".to_string(),
            UciCommand::IsReady => "isready".to_string(),
            UciCommand::UciNewGame => "ucinewgame".to_string(),
            UciCommand::SetOption { name, value } => {
                format!("setoption name {} value {}", name, value)
            }
            UciCommand::Position { fen, moves } => {
                let mut cmd = String::from("position ");
                match fen {
                    Some(f) => {
                        cmd.push_str("fen ");
                        cmd.push_str(f);
                    }
                    None => cmd.push_str("startpos"),
                }
                if !moves.is_empty() {
                    cmd.push_str(" moves ");
                    cmd.push_str(&moves.join(" "));
                }
                cmd
            }
            UciCommand::GoMoveTime(ms) => format!("go movetime {}", ms),
            UciCommand::Stop => "stop".to_string(),
            UciCommand::Quit => "quit".to_string(),
        }
    }
}

/// Categorized engine output lines
#[derive(Debug, Clone)]
pub enum UciOutputKind {
    /// "uciok" - engine is ready for UCI
    UciOk,
    /// "readyok" - engine is ready
    ReadyOk,
    /// "info ..." - search information
    Info(String),
    /// "bestmove ..." - best move found
    BestMove(String),
    /// Engine identification
    Id(String),
    /// Option definition
    Option(String),
    /// Unknown/other output
    Other(String),
}

impl UciOutputKind {
    /// Parse a raw UCI output line into a categorized type
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        if line == "uciok" {
            UciOutputKind::UciOk
        } else if line == "readyok" {
            UciOutputKind::ReadyOk
        } else if let Some(rest) = line.strip_prefix("info ") {
            UciOutputKind::Info(rest.to_string())
        } else if let Some(rest) = line.strip_prefix("bestmove ") {
            UciOutputKind::BestMove(rest.to_string())
        } else if let Some(rest) = line.strip_prefix("id ") {
            UciOutputKind::Id(rest.to_string())
        } else if let Some(rest) = line.strip_prefix("option ") {
            UciOutputKind::Option(rest.to_string())
        } else {
            UciOutputKind::Other(line.to_string())
        }
    }
}

/// Extract the move from the payload of a `bestmove` line
/// ("e2e4 ponder e7e5" -> "e2e4"). "(none)" means the engine had no move.
pub fn parse_bestmove(rest: &str) -> Option<&str> {
    let mv = rest.split_whitespace().next()?;
    if mv == "(none)" { None } else { Some(mv) }
}
