use std::fmt::{self, Write};

use super::types::Command;

/// Write `COMMAND arg1 arg2 ... :content`.
///
/// The leading space before the arguments is omitted when there are none,
/// and the `:content` segment is omitted when content is empty.
fn write_cmd(f: &mut impl Write, cmd: &str, args: &[&str], content: &str) -> fmt::Result {
    f.write_str(cmd)?;
    for arg in args {
        f.write_char(' ')?;
        f.write_str(arg)?;
    }
    if !content.is_empty() {
        f.write_str(" :")?;
        f.write_str(content)?;
    }
    Ok(())
}

/// Encode a free-form command into a single line without terminator.
pub fn encode<S: AsRef<str>>(command: &str, args: &[S], content: &str) -> String {
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    let mut line = String::with_capacity(command.len() + content.len() + 16);
    // Writing into a String cannot fail.
    let _ = write_cmd(&mut line, command, &args, content);
    line
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::CAP(sub, Some(arg)) => write_cmd(f, "CAP", &[sub.as_str(), arg.as_str()], ""),
            Command::CAP(sub, None) => write_cmd(f, "CAP", &[sub.as_str()], ""),
            Command::PASS(p) => write_cmd(f, "PASS", &[p.as_str()], ""),
            Command::NICK(n) => write_cmd(f, "NICK", &[n.as_str()], ""),
            Command::USER(u, m, r) => write_cmd(f, "USER", &[u.as_str(), m.as_str(), "*"], r),
            Command::JOIN(c) => write_cmd(f, "JOIN", &[c.as_str()], ""),
            Command::PRIVMSG(Some(t), m) => write_cmd(f, "PRIVMSG", &[t.as_str()], m),
            Command::PRIVMSG(None, m) => write_cmd(f, "PRIVMSG", &[], m),
            Command::PONG(Some(t)) => write_cmd(f, "PONG", &[], t),
            Command::PONG(None) => write_cmd(f, "PONG", &[], ""),
            Command::Raw {
                command,
                args,
                content,
            } => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                write_cmd(f, command, &args, content)
            }
        }
    }
}
