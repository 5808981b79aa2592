//! Subcommand implementations

pub mod evaluate;
pub mod play;
pub mod train;

use anyhow::{Result, anyhow};

use crate::tictactoe::Player;

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" | "player1" | "p1" | "1" => Ok(Player::X),
        "o" | "second" | "player2" | "p2" | "2" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

/// Seconds since the Unix epoch, for save metadata
pub(crate) fn timestamp() -> Option<String> {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .ok()
        .map(|elapsed| elapsed.as_secs().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player_token() {
        assert_eq!(parse_player_token("X", "--p").unwrap(), Player::X);
        assert_eq!(parse_player_token(" second ", "--p").unwrap(), Player::O);
        assert_eq!(parse_player_token("2", "--p").unwrap(), Player::O);
        let err = parse_player_token("z", "--agent-player").unwrap_err();
        assert!(err.to_string().contains("--agent-player"));
    }
}
