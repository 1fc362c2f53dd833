//! Scripted, display-free driver.
//!
//! Each input line is one tick. Tokens on the line are fed to the session in
//! order before it steps, and the resulting snapshot is written as one JSON
//! object per line. Blank lines advance a tick with no input; `#` starts a
//! comment.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::info;

use crate::game::{Control, Session};
use crate::input::{Direction, GameInput};

/// Failure while running a headless script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{token}`")]
    UnknownCommand { line: usize, token: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses one script line into the inputs it names.
pub fn parse_line(line_number: usize, line: &str) -> Result<Vec<GameInput>, ScriptError> {
    let content = line.split('#').next().unwrap_or_default();

    content
        .split_whitespace()
        .map(|token| {
            parse_token(token).ok_or_else(|| ScriptError::UnknownCommand {
                line: line_number,
                token: token.to_owned(),
            })
        })
        .collect()
}

fn parse_token(token: &str) -> Option<GameInput> {
    let input = match token.to_ascii_lowercase().as_str() {
        "up" => GameInput::Direction(Direction::Up),
        "down" => GameInput::Direction(Direction::Down),
        "left" => GameInput::Direction(Direction::Left),
        "right" => GameInput::Direction(Direction::Right),
        "restart" => GameInput::Restart,
        "quit" => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Plays `script` against `session`, writing one snapshot per tick to `out`.
///
/// Stops at the end of the script or at the first `quit`; the tick that
/// quits produces no snapshot. Returns the number of snapshots written.
pub fn run<R, W>(session: &mut Session, script: R, mut out: W) -> Result<u64, ScriptError>
where
    R: BufRead,
    W: Write,
{
    let mut frames = 0;

    for (index, line) in script.lines().enumerate() {
        let inputs = parse_line(index + 1, &line?)?;
        if session.tick(inputs) == Control::Quit {
            info!(frames, "headless run quit");
            break;
        }

        serde_json::to_writer(&mut out, &session.snapshot())?;
        out.write_all(b"\n")?;
        frames += 1;
    }

    out.flush()?;
    Ok(frames)
}
