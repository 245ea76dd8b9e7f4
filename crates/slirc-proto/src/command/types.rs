/// A command the client sends to the server.
///
/// Only the handful of commands the client synthesizes get their own
/// variant; anything else goes through [`Command::Raw`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `CAP <subcommand> [<arg>]`
    CAP(String, Option<String>),
    /// `PASS <password>`
    PASS(String),
    /// `NICK <nickname>`
    NICK(String),
    /// `USER <username> <mode> * :<realname>`
    USER(String, String, String),
    /// `JOIN <channel>`
    JOIN(String),
    /// `PRIVMSG [<target>] :<text>`
    PRIVMSG(Option<String>, String),
    /// `PONG [:<token>]`
    PONG(Option<String>),
    /// Free-form `COMMAND arg1 arg2 ... [:content]`.
    Raw {
        /// Command verb, sent as given.
        command: String,
        /// Middle parameters.
        args: Vec<String>,
        /// Trailing content; omitted from the line when empty.
        content: String,
    },
}

impl Command {
    /// `CAP LS 302`, the opening capability negotiation request.
    pub fn cap_ls() -> Self {
        Command::CAP("LS".to_string(), Some("302".to_string()))
    }

    /// `USER` registration where the realname repeats the username.
    pub fn user(username: &str) -> Self {
        Command::USER(username.to_string(), "0".to_string(), username.to_string())
    }

    /// `JOIN <channel>`
    pub fn join(channel: &str) -> Self {
        Command::JOIN(channel.to_string())
    }

    /// `PRIVMSG`, with the target omitted when `None`.
    pub fn privmsg(target: Option<&str>, text: &str) -> Self {
        Command::PRIVMSG(target.map(str::to_string), text.to_string())
    }

    /// `PONG`, echoing the server token when one is given.
    pub fn pong(token: Option<&str>) -> Self {
        Command::PONG(token.filter(|t| !t.is_empty()).map(str::to_string))
    }

    /// Arbitrary command with middle parameters and trailing content.
    pub fn raw<S: AsRef<str>>(command: &str, args: &[S], content: &str) -> Self {
        Command::Raw {
            command: command.to_string(),
            args: args.iter().map(|a| a.as_ref().to_string()).collect(),
            content: content.to_string(),
        }
    }

    /// The command verb as it appears on the wire.
    pub fn name(&self) -> &str {
        match self {
            Command::CAP(..) => "CAP",
            Command::PASS(_) => "PASS",
            Command::NICK(_) => "NICK",
            Command::USER(..) => "USER",
            Command::JOIN(_) => "JOIN",
            Command::PRIVMSG(..) => "PRIVMSG",
            Command::PONG(_) => "PONG",
            Command::Raw { command, .. } => command,
        }
    }
}
