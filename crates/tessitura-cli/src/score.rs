//! Score parsing for the `perform` command.
//!
//! A score is a whitespace-separated token stream:
//!
//! ```text
//! +j ~500 +l ~500 -j -l ~200 +q +x +b ~1000 !
//! ```
//!
//! - `+<key>` presses a performance key
//! - `-<key>` releases it
//! - `~<ms>` waits
//! - `!` releases everything
//!
//! Lines starting with `#` are comments.

use anyhow::bail;

/// One event in a parsed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEvent {
    /// Press the voice mapped to a performance key.
    Press(char),
    /// Release every voice under a performance key.
    Release(char),
    /// Hold the current state for some milliseconds.
    Wait(u64),
    /// Release everything.
    ReleaseAll,
}

/// Parse a score into its event sequence.
pub fn parse(input: &str) -> anyhow::Result<Vec<ScoreEvent>> {
    let mut events = Vec::new();

    for line in input.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }

        for token in line.split_whitespace() {
            let event = if let Some(key) = token.strip_prefix('+') {
                ScoreEvent::Press(single_key(token, key)?)
            } else if let Some(key) = token.strip_prefix('-') {
                ScoreEvent::Release(single_key(token, key)?)
            } else if let Some(ms) = token.strip_prefix('~') {
                match ms.parse::<u64>() {
                    Ok(ms) => ScoreEvent::Wait(ms),
                    Err(_) => bail!("invalid wait duration in token '{token}'"),
                }
            } else if token == "!" {
                ScoreEvent::ReleaseAll
            } else {
                bail!("unrecognized score token '{token}'");
            };
            events.push(event);
        }
    }

    Ok(events)
}

fn single_key(token: &str, key: &str) -> anyhow::Result<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => bail!("expected a single key character in token '{token}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_score() {
        let events = parse("+j ~500 -j !").unwrap();
        assert_eq!(
            events,
            vec![
                ScoreEvent::Press('j'),
                ScoreEvent::Wait(500),
                ScoreEvent::Release('j'),
                ScoreEvent::ReleaseAll,
            ]
        );
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let score = "# a chord\n+q +x\n\n~100\n-q -x\n";
        let events = parse(score).unwrap();
        assert_eq!(events.len(), 5);
    }

    #[test]
    fn test_bad_tokens_are_rejected() {
        assert!(parse("press-j").is_err());
        assert!(parse("+jk").is_err());
        assert!(parse("~abc").is_err());
        assert!(parse("+").is_err());
    }
}
