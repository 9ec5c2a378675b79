//! Turn loop for interactive and scripted games.
//!
//! The driver reads one command per line, applies it to the board and
//! redraws. Input can be a terminal or a script with one command per line;
//! successful moves can be recorded to a move log in the same notation, so
//! a log replays through the same parser.
//!
//! ## Example
//!
//! ```
//! use std::io::Cursor;
//! use draughts_rust::driver::{Driver, DriverOptions};
//!
//! let script = Cursor::new("B3 to A4\n");
//! let mut driver = Driver::new(script, Vec::new(), DriverOptions::scripted());
//! // The script ends before anyone wins.
//! assert!(driver.run().is_err());
//! ```

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use colored::{Color, Colorize};
use tracing::{debug, warn};

use crate::board::{Board, Move, Piece, Player};
use crate::command::{parse_command, to_move};
use crate::constants::{REPLAY_DELAY_MS, SIZE};
use crate::error::MoveError;
use crate::position::Position;

const CLEAR_SCREEN: &str = "\x1b[H\x1b[J";

const SADDLE_BROWN: Color = Color::TrueColor { r: 139, g: 69, b: 19 };
const DARK_GRAY: Color = Color::TrueColor { r: 169, g: 169, b: 169 };
const RED: Color = Color::TrueColor { r: 255, g: 0, b: 0 };
const BLACK: Color = Color::TrueColor { r: 0, g: 0, b: 0 };

/// How the driver talks to its user.
#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// Print a prompt before reading each command.
    pub interactive: bool,
    /// Pause after each applied move when not interactive.
    pub delay: Duration,
    /// Clear the terminal before each redraw.
    pub clear_screen: bool,
    /// Draw the board with ANSI colours.
    pub color: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            interactive: true,
            delay: Duration::from_millis(REPLAY_DELAY_MS),
            clear_screen: true,
            color: true,
        }
    }
}

impl DriverOptions {
    /// Plain, unpaced output for feeding a script.
    pub fn scripted() -> Self {
        Self {
            interactive: false,
            delay: Duration::ZERO,
            clear_screen: false,
            color: false,
        }
    }
}

/// Append-only record of played moves, one `B3A4` line per move.
pub struct MoveLog<W> {
    out: W,
}

impl MoveLog<File> {
    /// Create (or truncate) a log file.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create move log {}", path.display()))?;
        Ok(Self::new(file))
    }
}

impl<W: Write> MoveLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn record(&mut self, mv: &Move) -> io::Result<()> {
        writeln!(self.out, "{mv}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Reads commands from `R`, draws to `W`, records moves to `L`.
pub struct Driver<R, W, L = io::Sink> {
    board: Board,
    input: R,
    output: W,
    log: Option<MoveLog<L>>,
    options: DriverOptions,
    status: String,
}

impl<R: BufRead, W: Write> Driver<R, W> {
    /// A driver for a fresh game without a move log.
    pub fn new(input: R, output: W, options: DriverOptions) -> Self {
        Self {
            board: Board::new(),
            input,
            output,
            log: None,
            options,
            status: String::new(),
        }
    }
}

impl<R: BufRead, W: Write, L: Write> Driver<R, W, L> {
    pub fn with_log<M: Write>(self, log: MoveLog<M>) -> Driver<R, W, M> {
        Driver {
            board: self.board,
            input: self.input,
            output: self.output,
            log: Some(log),
            options: self.options,
            status: self.status,
        }
    }

    /// Start from a given position instead of the opening.
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_parts(self) -> (Board, W, Option<L>) {
        (self.board, self.output, self.log.map(MoveLog::into_inner))
    }

    /// Run until someone wins.
    ///
    /// Rejected commands are reported on the status line and the loop
    /// continues. Running out of input before a winner exists is an error.
    pub fn run(&mut self) -> Result<Player> {
        loop {
            if self.options.clear_screen {
                write!(self.output, "{CLEAR_SCREEN}")?;
            }
            writeln!(self.output, "{}\n", self.status)?;
            self.status.clear();
            self.render()?;

            if let Some(victor) = self.board.victor() {
                let name = match victor {
                    Player::Black => "Black",
                    Player::White => "Red",
                };
                writeln!(self.output, "\n{name} wins!")?;
                self.output.flush()?;
                return Ok(victor);
            }

            if self.options.interactive {
                write!(
                    self.output,
                    "\nSelect for {} (ex. B3 to C4): ",
                    self.board.turn()
                )?;
            }
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read command")?;
            if read == 0 {
                bail!("input stream is exhausted before a winner was decided");
            }
            self.step(&line)?;
        }
    }

    /// Handle one command line. Only I/O failures are returned as errors.
    fn step(&mut self, line: &str) -> Result<()> {
        match self.apply(line) {
            Ok(mv) => {
                debug!(%mv, "applied command");
                if let Some(log) = self.log.as_mut() {
                    log.record(&mv).context("failed to write move log")?;
                }
                if !self.options.interactive && !self.options.delay.is_zero() {
                    thread::sleep(self.options.delay);
                }
            }
            Err(err) => {
                warn!(command = line.trim(), %err, "rejected command");
                self.status = format!("Invalid command: {err}");
            }
        }
        Ok(())
    }

    fn apply(&mut self, line: &str) -> Result<Move, MoveError> {
        let (origin, destination) = parse_command(line)?;
        self.status = format!("({origin} to {destination}) ");
        let mv = to_move(origin, destination)?;
        self.board.play(mv)?;
        Ok(mv)
    }

    fn render(&mut self) -> io::Result<()> {
        if self.options.color {
            render_colored(&self.board, &mut self.output)
        } else {
            write!(self.output, "{}", self.board)
        }
    }
}

/// Draw the board with terminal colours: red and black `O` for men, `K` for
/// kings, brown and grey squares.
///
/// Whether escape codes are emitted follows `colored`'s terminal detection
/// and `colored::control` overrides.
pub fn render_colored<W: Write>(board: &Board, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{}: {}",
        " O ".color(RED).on_color(DARK_GRAY),
        board.captured(Player::White)
    )?;
    writeln!(
        out,
        "{}: {}\n",
        " O ".color(BLACK).on_color(SADDLE_BROWN),
        board.captured(Player::Black)
    )?;

    write!(out, "   ")?;
    for x in 0..SIZE {
        write!(out, "{}  ", (b'A' + x as u8) as char)?;
    }
    writeln!(out)?;

    for y in 0..SIZE {
        write!(out, "{} ", SIZE - y)?;
        for x in 0..SIZE {
            let square = if (x + y) % 2 == 1 {
                SADDLE_BROWN
            } else {
                DARK_GRAY
            };
            let (color, glyph) = match board.get(Position::new(x, y)).unwrap_or_default() {
                Piece::WhiteMan => (RED, " O "),
                Piece::BlackMan => (BLACK, " O "),
                Piece::WhiteKing => (RED, " K "),
                Piece::BlackKing => (BLACK, " K "),
                Piece::Empty => (BLACK, "   "),
            };
            write!(out, "{}", glyph.color(color).on_color(square).bold())?;
        }
        writeln!(out)?;
    }
    Ok(())
}
