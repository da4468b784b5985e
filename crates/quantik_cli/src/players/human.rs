//! Human contestant reading moves from a line-based terminal.

use super::Contestant;
use anyhow::{Result, bail};
use quantik::{Coordinate, Game, PieceShape};
use std::io::{BufRead, Write};
use tracing::debug;

/// Human contestant typing moves such as `plus 1,2` or `T 3 0`.
pub struct HumanPlayer<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    /// Creates a human contestant on the given streams.
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }
}

/// Reads a shape from its name or its board letter.
fn parse_shape(token: &str) -> Option<PieceShape> {
    if let Ok(shape) = token.parse() {
        return Some(shape);
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => PieceShape::ALL
            .into_iter()
            .find(|shape| shape.symbol() == letter.to_ascii_uppercase()),
        _ => None,
    }
}

/// Splits `shape column,row` (or `shape column row`) into its parts.
fn parse_move(line: &str) -> Result<(PieceShape, Coordinate), String> {
    let line = line.trim();
    let (shape, rest) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| "Expected a shape and a cell, e.g. `plus 1,2`".to_string())?;
    let shape = parse_shape(shape).ok_or_else(|| format!("Unknown shape {:?}", shape))?;
    let rest = if rest.contains(',') {
        rest.to_string()
    } else {
        rest.split_whitespace().collect::<Vec<_>>().join(",")
    };
    let cell = rest.parse::<Coordinate>().map_err(|e| e.to_string())?;
    Ok((shape, cell))
}

impl<R: BufRead, W: Write> Contestant for HumanPlayer<R, W> {
    fn choose_move(&mut self, game: &Game) -> Result<(PieceShape, Coordinate)> {
        let player = game.active_player();
        loop {
            let pieces: Vec<String> = player
                .available_pieces()
                .map(|piece| piece.shape().to_string())
                .collect();
            write!(
                self.output,
                "{} [{}] move (shape column,row or quit): ",
                player.name(),
                pieces.join(", ")
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                bail!("Input closed");
            }
            if line.trim().eq_ignore_ascii_case("quit") {
                bail!("{} quit the game", self.name);
            }

            let (shape, cell) = match parse_move(&line) {
                Ok(parsed) => parsed,
                Err(message) => {
                    writeln!(self.output, "{}", message)?;
                    continue;
                }
            };

            let allowed = game.allowed_shapes_at(cell, player.id());
            if allowed.is_some_and(|shapes| shapes.contains(shape)) {
                debug!(human = %self.name, %shape, %cell, "Move entered");
                return Ok((shape, cell));
            }
            writeln!(self.output, "{} cannot go on {}", shape, cell)?;
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn at(column: u8, row: u8) -> Coordinate {
        Coordinate::new(column, row).expect("on board")
    }

    #[test]
    fn test_parse_move_forms() {
        assert_eq!(parse_move("plus 1,2"), Ok((PieceShape::Plus, at(1, 2))));
        assert_eq!(parse_move("T 3 0\n"), Ok((PieceShape::Triangle, at(3, 0))));
        assert_eq!(
            parse_move("Square (0, 3)"),
            Ok((PieceShape::Square, at(0, 3)))
        );
        assert!(parse_move("plus").is_err());
        assert!(parse_move("orb 1,1").is_err());
        assert!(parse_move("plus 4,1").is_err());
    }

    #[test]
    fn test_reprompts_until_legal() {
        let mut game = Game::new();
        game.place(PieceShape::Plus, at(1, 1)).expect("legal");

        let input = Cursor::new("nonsense\nplus 1,3\ncylinder 1,3\n");
        let mut output = Vec::new();
        let mut human = HumanPlayer::new("Tester", input, &mut output);

        let chosen = human.choose_move(&game).expect("third line is legal");
        assert_eq!(chosen, (PieceShape::Cylinder, at(1, 3)));

        let text = String::from_utf8(output).expect("utf-8");
        assert!(text.contains("Expected a shape and a cell"));
        assert!(text.contains("Plus cannot go on (1, 3)"));
    }

    #[test]
    fn test_quit_and_eof_are_errors() {
        let game = Game::new();
        let mut human = HumanPlayer::new("Tester", Cursor::new("quit\n"), Vec::new());
        assert!(human.choose_move(&game).is_err());

        let mut human = HumanPlayer::new("Tester", Cursor::new(""), Vec::new());
        assert!(human.choose_move(&game).is_err());
    }
}
