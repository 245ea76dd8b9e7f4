//! Numeric reply codes the client recognizes.
//!
//! Servers send these three-digit codes in place of a command name.
//! Reference: <https://modern.ircdocs.horse/#numerics>

#![allow(non_camel_case_types)]

/// Known numeric replies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Response {
    /// 001 - Welcome to the network
    RPL_WELCOME = 1,
    /// 002 - Your host is running version
    RPL_YOURHOST = 2,
    /// 003 - Server creation date
    RPL_CREATED = 3,
    /// 004 - Server name, version and modes
    RPL_MYINFO = 4,
    /// 005 - Supported features
    RPL_ISUPPORT = 5,
    /// 352 - WHO reply line
    RPL_WHOREPLY = 352,
    /// 372 - MOTD body line
    RPL_MOTD = 372,
    /// 375 - MOTD start
    RPL_MOTDSTART = 375,
    /// 376 - MOTD end
    RPL_ENDOFMOTD = 376,
    /// 432 - Erroneous nickname
    ERR_ERRONEUSNICKNAME = 432,
    /// 433 - Nickname is already in use
    ERR_NICKNAMEINUSE = 433,
}

impl Response {
    /// Look up a known reply by code.
    pub fn from_code(code: u16) -> Option<Self> {
        use Response::*;
        Some(match code {
            1 => RPL_WELCOME,
            2 => RPL_YOURHOST,
            3 => RPL_CREATED,
            4 => RPL_MYINFO,
            5 => RPL_ISUPPORT,
            352 => RPL_WHOREPLY,
            372 => RPL_MOTD,
            375 => RPL_MOTDSTART,
            376 => RPL_ENDOFMOTD,
            432 => ERR_ERRONEUSNICKNAME,
            433 => ERR_NICKNAMEINUSE,
            _ => return None,
        })
    }
}
