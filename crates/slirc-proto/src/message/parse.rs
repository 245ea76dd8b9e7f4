//! Lenient line parser.
//!
//! Tokens are split on single spaces with empty tokens dropped, so runs of
//! spaces inside trailing content collapse to one space.

use tracing::warn;

use super::types::ParsedMessage;

impl ParsedMessage {
    /// Parse one raw protocol line.
    ///
    /// A trailing CR/LF is ignored. A line with no tokens at all produces an
    /// empty message and a warning.
    pub fn parse(raw: &str) -> Self {
        let line = raw.trim_end_matches(&['\r', '\n'][..]);
        let mut tokens = line.split(' ').filter(|t| !t.is_empty());

        let Some(first) = tokens.next() else {
            warn!(raw = ?raw, "Unparseable line: no tokens");
            return Self::default();
        };

        let (source, command) = match first.strip_prefix(':') {
            Some(source) => (source.to_string(), tokens.next().unwrap_or("")),
            None => (String::new(), first),
        };

        let mut parameters = Vec::new();
        let mut trailing: Option<Vec<&str>> = None;
        for token in tokens {
            match trailing.as_mut() {
                Some(words) => words.push(token),
                None => match token.strip_prefix(':') {
                    Some(rest) => trailing = Some(vec![rest]),
                    None => parameters.push(token.to_string()),
                },
            }
        }

        Self {
            source,
            command: command.to_ascii_lowercase(),
            parameters,
            content: trailing.map(|words| words.join(" ")).unwrap_or_default(),
        }
    }
}

impl From<&str> for ParsedMessage {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_privmsg() {
        let msg = ParsedMessage::parse(":nick!user@host PRIVMSG #chan :hello world");
        assert_eq!(msg.source, "nick!user@host");
        assert_eq!(msg.command, "privmsg");
        assert_eq!(msg.parameters, vec!["#chan"]);
        assert_eq!(msg.content, "hello world");
    }

    #[test]
    fn test_no_source() {
        let msg = ParsedMessage::parse("PING :tungsten.libera.chat");
        assert_eq!(msg.source, "");
        assert_eq!(msg.command, "ping");
        assert!(msg.parameters.is_empty());
        assert_eq!(msg.content, "tungsten.libera.chat");
    }

    #[test]
    fn test_params_without_content() {
        let msg = ParsedMessage::parse("MODE #chan +o nick");
        assert_eq!(msg.command, "mode");
        assert_eq!(msg.parameters, vec!["#chan", "+o", "nick"]);
        assert_eq!(msg.content, "");
    }

    #[test]
    fn test_numeric_reply() {
        let msg = ParsedMessage::parse(":srv 352 me #chan alice host srv alice H :0 Alice");
        assert_eq!(msg.command, "352");
        assert_eq!(msg.numeric(), Some(352));
        assert_eq!(msg.arg(1), Some("#chan"));
        assert_eq!(msg.content, "0 Alice");
    }

    #[test]
    fn test_repeated_spaces_dropped() {
        let msg = ParsedMessage::parse(":srv   NOTICE  *   :a   b");
        assert_eq!(msg.source, "srv");
        assert_eq!(msg.command, "notice");
        assert_eq!(msg.parameters, vec!["*"]);
        assert_eq!(msg.content, "a b");
    }

    #[test]
    fn test_only_first_colon_stripped() {
        let msg = ParsedMessage::parse("PRIVMSG #c :one :two");
        assert_eq!(msg.content, "one :two");
    }

    #[test]
    fn test_empty_trailing() {
        let msg = ParsedMessage::parse("PRIVMSG #c :");
        assert_eq!(msg.parameters, vec!["#c"]);
        assert_eq!(msg.content, "");
    }

    #[test]
    fn test_crlf_trimmed() {
        let msg = ParsedMessage::parse("PING :abc\r\n");
        assert_eq!(msg.content, "abc");
    }

    #[test]
    fn test_empty_line() {
        assert!(ParsedMessage::parse("").is_empty());
        assert!(ParsedMessage::parse("    ").is_empty());
    }

    #[test]
    fn test_source_without_command() {
        let msg = ParsedMessage::parse(":lonely.source");
        assert_eq!(msg.source, "lonely.source");
        assert_eq!(msg.command, "");
        assert!(msg.parameters.is_empty());
    }

    #[test]
    fn test_from_str() {
        let msg: ParsedMessage = "CAP * LS :multi-prefix".into();
        assert_eq!(msg.command, "cap");
        assert_eq!(msg.parameters, vec!["*", "LS"]);
        assert_eq!(msg.content, "multi-prefix");
    }
}
