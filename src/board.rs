//! English draughts board engine.
//!
//! The [`Board`] owns the 8x8 grid and all turn state: whose move it is,
//! the captured-piece counters, the pending multi-jump obligation and the
//! winner once the game is decided. It is only mutated through
//! [`Board::play`], which validates every move first, so a rejected move
//! never leaves a trace.
//!
//! White (shown as red) starts on rows 0..2 and moves toward row 7; black
//! starts on rows 5..7, moves toward row 0 and plays first.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, info, trace};

use crate::constants::*;
use crate::error::MoveError;
use crate::position::{Direction, Position};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Directions a man of this player may move in.
    pub fn forward_directions(self) -> [Direction; 2] {
        match self {
            Player::White => [Direction::DownLeft, Direction::DownRight],
            Player::Black => [Direction::UpLeft, Direction::UpRight],
        }
    }

    /// Row on which this player's men are crowned.
    pub fn crowning_row(self) -> i32 {
        match self {
            Player::White => SIZE - 1,
            Player::Black => 0,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("black"),
            Player::White => f.write_str("red"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Piece {
    #[default]
    Empty,
    WhiteMan,
    BlackMan,
    WhiteKing,
    BlackKing,
}

impl Piece {
    pub fn man(player: Player) -> Piece {
        match player {
            Player::White => Piece::WhiteMan,
            Player::Black => Piece::BlackMan,
        }
    }

    pub fn king(player: Player) -> Piece {
        match player {
            Player::White => Piece::WhiteKing,
            Player::Black => Piece::BlackKing,
        }
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Piece::WhiteMan | Piece::WhiteKing => Some(Player::White),
            Piece::BlackMan | Piece::BlackKing => Some(Player::Black),
            Piece::Empty => None,
        }
    }

    pub fn is_king(self) -> bool {
        matches!(self, Piece::WhiteKing | Piece::BlackKing)
    }

    pub fn symbol(self) -> u8 {
        match self {
            Piece::Empty => EMPTY,
            Piece::WhiteMan => WHITE_MAN,
            Piece::BlackMan => BLACK_MAN,
            Piece::WhiteKing => WHITE_KING,
            Piece::BlackKing => BLACK_KING,
        }
    }
}

/// A move request: origin, diagonal direction and number of steps
/// (1 for a simple move, 2 for a jump).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub origin: Position,
    pub direction: Direction,
    pub steps: u32,
}

impl Move {
    pub fn new(origin: Position, direction: Direction, steps: u32) -> Self {
        Self {
            origin,
            direction,
            steps,
        }
    }

    pub fn destination(&self) -> Position {
        self.origin + self.direction.delta() * self.steps as i32
    }

    /// Square of the piece this move jumps over, if it is a jump.
    pub fn captured(&self) -> Option<Position> {
        (self.steps == JUMP).then(|| self.origin + self.direction.delta())
    }
}

/// Log notation: origin and destination concatenated, e.g. `B3A4`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination())
    }
}

/// What happened after a move was applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece landed where it can jump again; the same player moves.
    MustContinue,
    /// The turn passed to the opponent.
    TurnPassed,
    /// The opponent has no legal move left.
    Won(Player),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Piece; CELLS],
    /// Pieces lost by each player, indexed by `Player::index`.
    captured: [u32; 2],
    turn: Player,
    victor: Option<Player>,
    /// Squares the player to move must jump over next, set while a
    /// multi-jump is under way.
    forced_jumps: BTreeSet<Position>,
    /// Square of the piece that has to make the next jump of a multi-jump.
    jumping: Option<Position>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard starting layout with black to move.
    pub fn new() -> Self {
        let mut board = Self::empty(Player::Black);
        for y in 0..START_ROWS {
            for x in (y % 2..SIZE).step_by(2) {
                board.cells[Position::new(x, y).index()] = Piece::man(Player::White);
            }
        }
        for y in SIZE - START_ROWS..SIZE {
            for x in (y % 2..SIZE).step_by(2) {
                board.cells[Position::new(x, y).index()] = Piece::man(Player::Black);
            }
        }
        board
    }

    /// A board with no pieces, for setting up positions.
    pub fn empty(turn: Player) -> Self {
        Self {
            cells: [Piece::Empty; CELLS],
            captured: [0; 2],
            turn,
            victor: None,
            forced_jumps: BTreeSet::new(),
            jumping: None,
        }
    }

    /// Put a piece on a tile while setting up a position.
    pub fn place(&mut self, pos: Position, piece: Piece) -> Result<(), MoveError> {
        if !pos.in_bounds() {
            return Err(MoveError::OutOfBounds { position: pos });
        }
        self.cells[pos.index()] = piece;
        Ok(())
    }

    pub fn get(&self, pos: Position) -> Option<Piece> {
        pos.in_bounds().then(|| self.cells[pos.index()])
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn victor(&self) -> Option<Player> {
        self.victor
    }

    /// Number of `player`'s pieces that have been captured.
    pub fn captured(&self, player: Player) -> u32 {
        self.captured[player.index()]
    }

    pub fn forced_jumps(&self) -> &BTreeSet<Position> {
        &self.forced_jumps
    }

    /// The piece in the middle of a multi-jump, if any.
    pub fn jumping(&self) -> Option<Position> {
        self.jumping
    }

    /// All positions in row-major order (row 0 first).
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..SIZE).flat_map(|y| (0..SIZE).map(move |x| Position::new(x, y)))
    }

    /// Positions holding a piece of `player`, in row-major order.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = Position> + '_ {
        Self::positions().filter(move |&p| self.owner_at(p) == Some(player))
    }

    fn owner_at(&self, pos: Position) -> Option<Player> {
        self.get(pos).and_then(Piece::owner)
    }

    /// Check whether `player` may move the piece at `origin`.
    ///
    /// Checks run in a fixed order and the first failure is reported:
    /// bounds, ownership, step count, destination, jump target, mandatory
    /// capture (only when `enforce_jumps` is set), then direction for men.
    pub fn validate_move(
        &self,
        origin: Position,
        direction: Direction,
        steps: u32,
        enforce_jumps: bool,
        player: Player,
    ) -> Result<(), MoveError> {
        if enforce_jumps {
            let jumps = self.available_jumps(player);
            self.check_move(origin, direction, steps, player, Some(&jumps))
        } else {
            self.check_move(origin, direction, steps, player, None)
        }
    }

    fn check_move(
        &self,
        origin: Position,
        direction: Direction,
        steps: u32,
        player: Player,
        jumps: Option<&BTreeSet<Position>>,
    ) -> Result<(), MoveError> {
        if !origin.in_bounds() {
            return Err(MoveError::OutOfBounds { position: origin });
        }
        if self.owner_at(origin) != Some(player) {
            return Err(MoveError::WrongOwner { position: origin });
        }
        if !(STEP..=JUMP).contains(&steps) {
            return Err(MoveError::MalformedMove);
        }

        let dest = origin + direction.delta() * steps as i32;
        if !dest.in_bounds() {
            return Err(MoveError::OutOfBounds { position: dest });
        }
        if self.cells[dest.index()] != Piece::Empty {
            return Err(MoveError::BlockedDestination { position: dest });
        }

        let over = origin + direction.delta();
        if steps == JUMP && self.owner_at(over) != Some(player.opponent()) {
            return Err(MoveError::IllegalJumpTarget { over });
        }

        if let Some(jumps) = jumps {
            let other_piece = player == self.turn && self.jumping.is_some_and(|p| p != origin);
            if !jumps.is_empty() && (other_piece || steps != JUMP || !jumps.contains(&over)) {
                return Err(MoveError::MandatoryJump {
                    jumps: jumps.iter().copied().collect(),
                });
            }
        }

        if !self.cells[origin.index()].is_king() && !player.forward_directions().contains(&direction)
        {
            return Err(MoveError::DirectionNotAllowed { player, direction });
        }
        Ok(())
    }

    /// Squares the piece at `pos` could capture right now, ignoring the
    /// mandatory-capture rule.
    pub fn jumps_from(&self, pos: Position, player: Player) -> BTreeSet<Position> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.check_move(pos, d, JUMP, player, None).is_ok())
            .map(|d| pos + d.delta())
            .collect()
    }

    /// Squares `player` is obliged to jump over, empty if no capture exists.
    ///
    /// During a multi-jump this is the continuation set of the jumping
    /// piece, and only that piece may move; otherwise every capture available anywhere on the board.
    pub fn available_jumps(&self, player: Player) -> BTreeSet<Position> {
        if player == self.turn && !self.forced_jumps.is_empty() {
            return self.forced_jumps.clone();
        }
        self.pieces(player)
            .flat_map(|p| self.jumps_from(p, player))
            .collect()
    }

    /// Every legal move for `player`, ordered by origin (row-major), then
    /// direction index, then step count.
    pub fn valid_moves(&self, player: Player) -> Vec<Move> {
        let jumps = self.available_jumps(player);
        let mut moves = Vec::new();
        for origin in self.pieces(player) {
            for direction in Direction::ALL {
                for steps in STEP..=JUMP {
                    if self
                        .check_move(origin, direction, steps, player, Some(&jumps))
                        .is_ok()
                    {
                        moves.push(Move::new(origin, direction, steps));
                    }
                }
            }
        }
        moves
    }

    pub fn has_valid_moves(&self, player: Player) -> bool {
        !self.valid_moves(player).is_empty()
    }

    /// Apply a move for the player to move.
    ///
    /// The move is validated with the mandatory-capture rule enforced. On
    /// success the piece is relocated, a jumped piece is removed, a man
    /// reaching its crowning row becomes a king, and the turn passes unless
    /// the jumping piece can capture again.
    pub fn play(&mut self, mv: Move) -> Result<MoveOutcome, MoveError> {
        if let Some(victor) = self.victor {
            return Err(MoveError::GameOver { victor });
        }

        let mover = self.turn;
        if let Err(err) = self.validate_move(mv.origin, mv.direction, mv.steps, true, mover) {
            trace!(%mv, %err, "rejected move");
            return Err(err);
        }

        let dest = mv.destination();
        let piece = self.cells[mv.origin.index()];
        self.cells[dest.index()] = piece;
        self.cells[mv.origin.index()] = Piece::Empty;
        debug!(%mover, %mv, "moved");

        if let Some(over) = mv.captured() {
            self.cells[over.index()] = Piece::Empty;
            self.captured[mover.opponent().index()] += 1;
            debug!(%mover, %over, "captured");
        }

        if dest.y == mover.crowning_row() && !piece.is_king() {
            self.cells[dest.index()] = Piece::king(mover);
            debug!(%mover, %dest, "crowned");
        }

        if mv.steps == JUMP {
            let jumps = self.jumps_from(dest, mover);
            if !jumps.is_empty() {
                self.forced_jumps = jumps;
                self.jumping = Some(dest);
                return Ok(MoveOutcome::MustContinue);
            }
        }

        self.forced_jumps.clear();
        self.jumping = None;
        self.turn = mover.opponent();
        if !self.has_valid_moves(self.turn) {
            self.victor = Some(mover);
            info!(victor = %mover, "game over");
            return Ok(MoveOutcome::Won(mover));
        }
        Ok(MoveOutcome::TurnPassed)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} captured: {}", Player::White, self.captured(Player::White))?;
        writeln!(f, "{} captured: {}", Player::Black, self.captured(Player::Black))?;
        writeln!(f)?;

        write!(f, "   ")?;
        for x in 0..SIZE {
            write!(f, "{}  ", (b'A' + x as u8) as char)?;
        }
        writeln!(f)?;

        for y in 0..SIZE {
            write!(f, "{} ", SIZE - y)?;
            for x in 0..SIZE {
                let ch = self.cells[Position::new(x, y).index()].symbol() as char;
                write!(f, " {ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Position {
        Position::from_notation(s).unwrap()
    }

    #[test]
    fn test_initial_layout() {
        let board = Board::new();
        assert_eq!(board.pieces(Player::White).count(), PIECES_PER_SIDE);
        assert_eq!(board.pieces(Player::Black).count(), PIECES_PER_SIDE);
        assert_eq!(board.turn(), Player::Black);
        assert_eq!(board.victor(), None);

        for pos in Board::positions() {
            let piece = board.get(pos).unwrap();
            let dark = (pos.x + pos.y) % 2 == 0;
            match pos.y {
                0..=2 if dark => assert_eq!(piece, Piece::WhiteMan, "at {pos}"),
                5..=7 if dark => assert_eq!(piece, Piece::BlackMan, "at {pos}"),
                _ => assert_eq!(piece, Piece::Empty, "at {pos}"),
            }
        }
    }

    #[test]
    fn test_opening_moves() {
        let board = Board::new();
        let black = board.valid_moves(Player::Black);
        assert_eq!(black.len(), 7);
        assert_eq!(black[0], Move::new(sq("B3"), Direction::UpLeft, 1));
        assert_eq!(black[1], Move::new(sq("B3"), Direction::UpRight, 1));
        assert_eq!(board.valid_moves(Player::White).len(), 7);
    }

    #[test]
    fn test_validation_order() {
        let board = Board::new();
        let b = Player::Black;
        assert_eq!(
            board.validate_move(Position::new(-1, 0), Direction::UpLeft, 1, true, b),
            Err(MoveError::OutOfBounds {
                position: Position::new(-1, 0)
            })
        );
        assert_eq!(
            board.validate_move(sq("A6"), Direction::DownRight, 1, true, b),
            Err(MoveError::WrongOwner { position: sq("A6") })
        );
        assert_eq!(
            board.validate_move(sq("B3"), Direction::UpLeft, 3, true, b),
            Err(MoveError::MalformedMove)
        );
        assert_eq!(
            board.validate_move(sq("A2"), Direction::UpRight, 1, true, b),
            Err(MoveError::BlockedDestination { position: sq("B3") })
        );
        assert_eq!(
            board.validate_move(sq("H3"), Direction::UpRight, 1, true, b),
            Err(MoveError::OutOfBounds {
                position: Position::new(8, 4)
            })
        );
        assert_eq!(
            board.validate_move(sq("B3"), Direction::UpRight, 2, true, b),
            Err(MoveError::IllegalJumpTarget { over: sq("C4") })
        );
    }

    #[test]
    fn test_men_only_move_forward() {
        let mut board = Board::empty(Player::White);
        board.place(sq("D4"), Piece::WhiteMan).unwrap();
        board.place(sq("F4"), Piece::BlackMan).unwrap();

        assert!(board.validate_move(sq("D4"), Direction::DownLeft, 1, true, Player::White).is_ok());
        assert_eq!(
            board.validate_move(sq("D4"), Direction::UpLeft, 1, true, Player::White),
            Err(MoveError::DirectionNotAllowed {
                player: Player::White,
                direction: Direction::UpLeft
            })
        );
        assert!(board.validate_move(sq("F4"), Direction::UpRight, 1, true, Player::Black).is_ok());
        assert!(board.validate_move(sq("F4"), Direction::DownRight, 1, true, Player::Black).is_err());
    }

    #[test]
    fn test_kings_move_any_direction() {
        let mut board = Board::empty(Player::Black);
        board.place(sq("D4"), Piece::BlackKing).unwrap();
        board.place(sq("H8"), Piece::WhiteMan).unwrap();
        for d in Direction::ALL {
            assert!(board.validate_move(sq("D4"), d, 1, true, Player::Black).is_ok(), "{d}");
        }
    }

    #[test]
    fn test_crowning_rows_match_directions() {
        // White advances down toward row 7 and is crowned there.
        for d in Player::White.forward_directions() {
            assert_eq!(d.delta().y, 1);
        }
        assert_eq!(Player::White.crowning_row(), SIZE - 1);
        for d in Player::Black.forward_directions() {
            assert_eq!(d.delta().y, -1);
        }
        assert_eq!(Player::Black.crowning_row(), 0);
    }

    #[test]
    fn test_jumps_from_ignores_rule_but_checks_direction() {
        let mut board = Board::empty(Player::Black);
        board.place(sq("C3"), Piece::BlackMan).unwrap();
        board.place(sq("D4"), Piece::WhiteMan).unwrap();
        board.place(sq("D2"), Piece::WhiteMan).unwrap();
        // D2 is behind the man, so only D4 can be taken.
        let jumps = board.jumps_from(sq("C3"), Player::Black);
        assert_eq!(jumps.into_iter().collect::<Vec<_>>(), vec![sq("D4")]);
    }

    #[test]
    fn test_display_layout() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "red captured: 0");
        assert_eq!(lines[1], "black captured: 0");
        assert_eq!(lines[3].trim_end(), "   A  B  C  D  E  F  G  H");
        assert_eq!(lines[4].trim_end(), "8  W  .  W  .  W  .  W  .");
        assert_eq!(lines[11].trim_end(), "1  .  B  .  B  .  B  .  B");
    }

    #[test]
    fn test_move_notation() {
        let mv = Move::new(sq("B3"), Direction::UpLeft, 1);
        assert_eq!(mv.to_string(), "B3A4");
        assert_eq!(mv.captured(), None);
        let jump = Move::new(sq("C3"), Direction::UpRight, 2);
        assert_eq!(jump.destination(), sq("E5"));
        assert_eq!(jump.captured(), Some(sq("D4")));
    }
}
