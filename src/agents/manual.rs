//! Human player reading coordinates from a line-oriented input

use std::io::{BufRead, Write};

use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{Board, Cell, Player, Position},
};

/// Parse `"row, col"` into a raw coordinate pair.
///
/// Surrounding whitespace around either number is allowed. Range checks are
/// left to the caller.
pub fn parse_coordinates(input: &str) -> Result<(usize, usize)> {
    let format_error = || Error::InputFormat {
        input: input.trim().to_string(),
    };

    let (row, col) = input.split_once(',').ok_or_else(format_error)?;
    let row = row.trim().parse::<usize>().map_err(|_| format_error())?;
    let col = col.trim().parse::<usize>().map_err(|_| format_error())?;
    Ok((row, col))
}

/// Agent driven by a person typing `row, col` coordinates
pub struct ManualAgent<R, W> {
    name: String,
    player: Player,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ManualAgent<R, W> {
    pub fn new(player: Player, input: R, output: W) -> Self {
        Self {
            name: format!("Human-{player}"),
            player,
            input,
            output,
        }
    }

    fn io_error(operation: &str, source: std::io::Error) -> Error {
        Error::Io {
            operation: operation.to_string(),
            source,
        }
    }

    fn prompt(&mut self) -> Result<Option<String>> {
        write!(self.output, "place a {} at \"row, col\": ", self.player)
            .and_then(|()| self.output.flush())
            .map_err(|e| Self::io_error("write prompt", e))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| Self::io_error("read move", e))?;
        Ok((read > 0).then_some(line))
    }

    fn report(&mut self, message: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{message}").map_err(|e| Self::io_error("write message", e))
    }
}

impl<R, W> Agent for ManualAgent<R, W>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    fn player(&self) -> Player {
        self.player
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn next_move(&mut self, board: &Board) -> Result<Position> {
        if board.is_full() {
            return Err(Error::NoValidMoves);
        }

        loop {
            let line = self.prompt()?.ok_or(Error::InputClosed)?;

            let position = match parse_coordinates(&line)
                .and_then(|(row, col)| Position::new(row, col))
            {
                Ok(position) => position,
                Err(err) => {
                    self.report(err)?;
                    continue;
                }
            };

            if board.get(position) != Cell::Empty {
                self.report(Error::IllegalMove { position })?;
                continue;
            }
            return Ok(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn agent(input: &str) -> ManualAgent<Cursor<Vec<u8>>, Vec<u8>> {
        ManualAgent::new(Player::X, Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(parse_coordinates("1, 2").unwrap(), (1, 2));
        assert_eq!(parse_coordinates("  0 ,0 \n").unwrap(), (0, 0));
        assert!(matches!(
            parse_coordinates("1 2"),
            Err(Error::InputFormat { .. })
        ));
        assert!(parse_coordinates("a, 1").is_err());
        assert!(parse_coordinates("1, -1").is_err());
    }

    #[test]
    fn test_reads_valid_move() {
        let mut agent = agent("2, 1\n");
        let position = agent.next_move(&Board::new()).unwrap();
        assert_eq!(position, Position::new(2, 1).unwrap());

        let shown = String::from_utf8(agent.output.clone()).unwrap();
        assert_eq!(shown, "place a X at \"row, col\": ");
    }

    #[test]
    fn test_reprompts_until_valid() {
        let board = Board::parse("X../.../...").unwrap();
        let mut agent = agent("nonsense\n3, 0\n0, 0\n1,1\n");

        let position = agent.next_move(&board).unwrap();
        assert_eq!(position, Position::new(1, 1).unwrap());

        let shown = String::from_utf8(agent.output.clone()).unwrap();
        assert_eq!(shown.matches("place a X").count(), 4);
        assert!(shown.contains("occupied"));
    }

    #[test]
    fn test_end_of_input() {
        let mut agent = agent("");
        assert!(matches!(
            agent.next_move(&Board::new()),
            Err(Error::InputClosed)
        ));
    }
}
