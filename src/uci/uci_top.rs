//! UCI protocol front-end and command loop.
//!
//! Parses UCI commands, maintains the current position and the game's
//! repetition history, routes `go` requests to the selected engine and emits
//! protocol-compliant output. Search runs synchronously on this thread.

use std::io::{self, BufRead, Write};

use crate::engines::engine_iterative::{IterativeEngine, MAX_OPTION_DEPTH};
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::chess_types::Position;
use crate::game_state::repetition::RepetitionTable;
use crate::move_generation::legal_move_apply::apply_move;
use crate::search::search_engine::SearchConfig;
use crate::utils::long_algebraic::long_algebraic_to_legal_move;

const UCI_ENGINE_NAME: &str = "Quince Chess";
const UCI_ENGINE_AUTHOR: &str = "quince_chess developers";

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut uci = UciState::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = uci.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

struct UciState {
    position: Position,
    repetitions: RepetitionTable,
    engine: Box<dyn Engine>,
    skill_level: u8,
    debug_mode: bool,
}

impl UciState {
    fn new() -> Self {
        let skill_level = 2;
        let position = Position::new_game();
        let mut repetitions = RepetitionTable::new();
        repetitions.record(&position);
        Self {
            position,
            repetitions,
            engine: build_engine(skill_level),
            skill_level,
            debug_mode: false,
        }
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();

        match cmd {
            "uci" => {
                writeln!(out, "id name {}", UCI_ENGINE_NAME)?;
                writeln!(out, "id author {}", UCI_ENGINE_AUTHOR)?;
                writeln!(out, "option name Skill Level type spin default 2 min 1 max 2")?;
                writeln!(
                    out,
                    "option name Depth type spin default {} min 1 max {}",
                    SearchConfig::default().max_depth,
                    MAX_OPTION_DEPTH
                )?;
                writeln!(
                    out,
                    "option name Evaluator type combo default piece_square var material var piece_square var mobility"
                )?;
                writeln!(out, "option name UseCache type check default true")?;
                writeln!(out, "uciok")?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
            }
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    log::warn!("setoption failed: {err}");
                    writeln!(out, "info string setoption error: {}", err)?;
                }
            }
            "ucinewgame" => {
                self.reset_to(Position::new_game());
                self.engine.new_game();
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    log::warn!("position failed: {err}");
                    writeln!(out, "info string position error: {}", err)?;
                }
            }
            "go" => {
                self.handle_go(trimmed, out)?;
            }
            "stop" | "ponderhit" => {
                // Search is synchronous; nothing is running by the time this is read.
            }
            "debug" => {
                let mode = parts.next().unwrap_or_default();
                self.debug_mode = mode.eq_ignore_ascii_case("on");
            }
            "quit" => {
                return Ok(true);
            }
            other => {
                log::warn!("ignoring unknown UCI command '{other}'");
            }
        }

        Ok(false)
    }

    fn reset_to(&mut self, position: Position) {
        self.repetitions.clear();
        self.repetitions.record(&position);
        self.position = position;
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), String> {
        let mut name_tokens = Vec::<&str>::new();
        let mut value_tokens = Vec::<&str>::new();
        let mut mode = "";

        for tok in line.split_whitespace().skip(1) {
            match tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok),
                _ if mode == "value" => value_tokens.push(tok),
                _ => {}
            }
        }

        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");

        if name.eq_ignore_ascii_case("Skill Level") {
            let parsed = value
                .parse::<u8>()
                .map_err(|_| format!("invalid Skill Level value '{}'", value))?;
            self.skill_level = parsed;
            self.engine = build_engine(self.skill_level);
            self.engine.new_game();
            return Ok(());
        }

        self.engine.set_option(&name, &value).map_err(|e| e.to_string())
    }

    fn handle_position(&mut self, line: &str) -> Result<(), String> {
        let mut tokens = line.split_whitespace().skip(1).peekable();

        let mut position = match tokens.next() {
            Some("startpos") => Position::new_game(),
            Some("fen") => {
                let mut fen_parts = Vec::<&str>::new();
                while let Some(next) = tokens.next_if(|tok| *tok != "moves") {
                    fen_parts.push(next);
                }
                if fen_parts.is_empty() {
                    return Err("missing FEN after 'position fen'".to_owned());
                }
                Position::from_fen(&fen_parts.join(" ")).map_err(|e| e.to_string())?
            }
            Some(other) => return Err(format!("unsupported position token '{}'", other)),
            None => return Err("incomplete position command".to_owned()),
        };

        let mut repetitions = RepetitionTable::new();
        repetitions.record(&position);

        if tokens.next_if_eq(&"moves").is_some() {
            for lan in tokens {
                let mv = long_algebraic_to_legal_move(lan, &mut position).map_err(|e| e.to_string())?;
                // Played moves are never undone.
                let _ = apply_move(&mut position, mv);
                repetitions.record(&position);
            }
        }

        self.position = position;
        self.repetitions = repetitions;
        Ok(())
    }

    fn handle_go(&mut self, line: &str, out: &mut impl Write) -> io::Result<()> {
        let params = parse_go_params(line);
        let result = self
            .engine
            .choose_move(&mut self.position, &self.repetitions, &params);

        for info in &result.info_lines {
            writeln!(out, "{}", info)?;
        }
        if self.debug_mode {
            writeln!(out, "info string repetition_entries {}", self.repetitions.len())?;
        }

        match result.best_move {
            Some(best_move) => writeln!(out, "bestmove {}", best_move)?,
            None => writeln!(out, "bestmove 0000")?,
        }
        Ok(())
    }
}

fn parse_go_params(line: &str) -> GoParams {
    let mut params = GoParams::default();
    let mut tokens = line.split_whitespace().skip(1);
    while let Some(tok) = tokens.next() {
        match tok {
            "depth" => params.depth = tokens.next().and_then(|x| x.parse::<u8>().ok()),
            "movetime" => params.movetime_ms = tokens.next().and_then(|x| x.parse::<u64>().ok()),
            "wtime" => params.wtime_ms = tokens.next().and_then(|x| x.parse::<u64>().ok()),
            "btime" => params.btime_ms = tokens.next().and_then(|x| x.parse::<u64>().ok()),
            "winc" => params.winc_ms = tokens.next().and_then(|x| x.parse::<u64>().ok()),
            "binc" => params.binc_ms = tokens.next().and_then(|x| x.parse::<u64>().ok()),
            "movestogo" => params.movestogo = tokens.next().and_then(|x| x.parse::<u16>().ok()),
            _ => {}
        }
    }
    params
}

fn build_engine(skill_level: u8) -> Box<dyn Engine> {
    match skill_level {
        1 => Box::new(RandomEngine::new()),
        _ => Box::new(IterativeEngine::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_go_params, UciState};
    use crate::game_state::chess_types::Color;

    fn run(state: &mut UciState, command: &str) -> String {
        let mut out = Vec::new();
        state
            .handle_command(command, &mut out)
            .expect("writing to a Vec cannot fail");
        String::from_utf8(out).expect("UCI output is ASCII")
    }

    #[test]
    fn handshake_lists_options() {
        let mut state = UciState::new();
        let out = run(&mut state, "uci");
        assert!(out.starts_with("id name Quince Chess"));
        assert!(out.contains("option name Evaluator"));
        assert!(out.trim_end().ends_with("uciok"));
        assert_eq!(run(&mut state, "isready"), "readyok\n");
    }

    #[test]
    fn position_startpos_with_moves_updates_state() {
        let mut state = UciState::new();
        state
            .handle_position("position startpos moves e2e4 e7e5 g1f3")
            .expect("position command should parse");

        assert_eq!(state.position.side_to_move, Color::Dark);
        assert_eq!(state.repetitions.len(), 4);
    }

    #[test]
    fn position_counts_repeated_positions() {
        let mut state = UciState::new();
        state
            .handle_position("position startpos moves g1f3 g8f6 f3g1 f6g8")
            .expect("position command should parse");
        let start = crate::game_state::chess_types::Position::new_game().signature();
        assert_eq!(state.repetitions.count(&start), 2);
    }

    #[test]
    fn position_rejects_illegal_moves_and_keeps_old_state() {
        let mut state = UciState::new();
        let err = state
            .handle_position("position startpos moves e2e5")
            .expect_err("illegal move should be rejected");
        assert!(err.contains("e2e5"));
        assert_eq!(state.position, crate::game_state::chess_types::Position::new_game());
    }

    #[test]
    fn position_fen_without_moves_updates_state() {
        let mut state = UciState::new();
        state
            .handle_position("position fen 4k3/8/8/8/8/8/4P3/4K3 b - - 0 1")
            .expect("position fen should parse");
        assert_eq!(state.position.side_to_move, Color::Dark);
        assert!(state.handle_position("position fen 8/8/8 w - - 0 1").is_err());
    }

    #[test]
    fn go_emits_bestmove() {
        let mut state = UciState::new();
        run(&mut state, "position fen 6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        let out = run(&mut state, "go depth 2");
        assert!(out.contains("score mate 1"));
        assert!(out.trim_end().ends_with("bestmove a1a8"), "{out}");
    }

    #[test]
    fn go_without_moves_reports_null_move() {
        let mut state = UciState::new();
        run(&mut state, "position fen R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        let out = run(&mut state, "go depth 2");
        assert!(out.trim_end().ends_with("bestmove 0000"), "{out}");
    }

    #[test]
    fn setoption_routes_to_engine() {
        let mut state = UciState::new();
        assert!(state.handle_setoption("setoption name Depth value 3").is_ok());
        assert!(state.handle_setoption("setoption name Evaluator value mobility").is_ok());
        assert!(state.handle_setoption("setoption name Depth value 99").is_err());
        assert!(state.handle_setoption("setoption name Hash value 16").is_err());

        state
            .handle_setoption("setoption name Skill Level value 1")
            .expect("skill level should parse");
        assert_eq!(state.skill_level, 1);
    }

    #[test]
    fn parse_go_params_keeps_clock_fields_without_forcing_movetime() {
        let params = parse_go_params("go wtime 120000 btime 60000 winc 1000 binc 1000 movestogo 24");
        assert_eq!(params.movetime_ms, None);
        assert_eq!(params.wtime_ms, Some(120_000));
        assert_eq!(params.btime_ms, Some(60_000));
        assert_eq!(params.winc_ms, Some(1_000));
        assert_eq!(params.binc_ms, Some(1_000));
        assert_eq!(params.movestogo, Some(24));
        assert_eq!(parse_go_params("go depth 6").depth, Some(6));
    }
}
