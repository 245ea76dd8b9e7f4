use std::fmt;

/// One raw protocol line broken into its parts.
///
/// Produced by [`ParsedMessage::parse`], which never fails: malformed input
/// degrades to empty fields rather than an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedMessage {
    /// Message origin with the leading `:` removed (`nick!user@host` or a
    /// server name). Empty when the line carried no source.
    pub source: String,
    /// Lowercased command name, or the numeric reply code as a string.
    pub command: String,
    /// Middle parameters, in order, before the trailing content.
    pub parameters: Vec<String>,
    /// Trailing free text with its introducing `:` removed.
    pub content: String,
}

impl ParsedMessage {
    /// Whether the command is an integer, i.e. a numeric reply of any size.
    pub fn is_numeric(&self) -> bool {
        self.command.parse::<i64>().is_ok()
    }

    /// Numeric reply code, if the command is an integer in the reply range.
    pub fn numeric(&self) -> Option<u16> {
        self.command.parse().ok()
    }

    /// Middle parameter at `index`.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.parameters.get(index).map(String::as_str)
    }

    /// Nickname portion of the source (everything before `!`).
    ///
    /// For server-originated messages this is the whole server name.
    pub fn source_nick(&self) -> &str {
        match self.source.split_once('!') {
            Some((nick, _)) => nick,
            None => &self.source,
        }
    }

    /// True when every field is empty, i.e. the line did not parse.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
            && self.command.is_empty()
            && self.parameters.is_empty()
            && self.content.is_empty()
    }
}

impl fmt::Display for ParsedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ParsedMessage<source: {}, command: {}, parameters: {:?}, content: {}>",
            self.source, self.command, self.parameters, self.content
        )
    }
}
