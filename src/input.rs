//! Foreground input loop and the terminal it reads from.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing::{debug, warn};

use crate::network::Connection;

/// Line typed by the user to leave [`stream_input`].
pub const EXIT_COMMAND: &str = "exit";

/// Prompted line input plus line output.
#[async_trait]
pub trait Terminal: Send {
    /// Show `prompt` and read one line. `None` at end of input.
    async fn input(&mut self, prompt: &str) -> Option<String>;

    fn println(&self, line: &str);
}

/// `[HH:MM:SS] text` in local time.
pub fn timestamped(text: &str) -> String {
    format!("[{}] {}", chrono::Local::now().format("%H:%M:%S"), text)
}

/// Terminal over the process's stdin and stdout.
pub struct StdioTerminal {
    lines: Lines<BufReader<Stdin>>,
}

impl StdioTerminal {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdioTerminal {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Terminal for StdioTerminal {
    async fn input(&mut self, prompt: &str) -> Option<String> {
        let mut stdout = tokio::io::stdout();
        if stdout.write_all(prompt.as_bytes()).await.is_err() || stdout.flush().await.is_err() {
            return None;
        }
        match self.lines.next_line().await {
            Ok(line) => line,
            Err(e) => {
                debug!(error = %e, "stdin read failed");
                None
            }
        }
    }

    fn println(&self, line: &str) {
        println!("{line}");
    }
}

/// Send each typed line to the current channel until `exit` or end of input.
///
/// Empty lines are skipped. A line that cannot be sent is reported through
/// the info hook and the loop carries on.
pub async fn stream_input(conn: &Connection, terminal: &mut dyn Terminal) {
    conn.info(&format!("type \"{EXIT_COMMAND}\" to exit streaming"));

    loop {
        let prompt = format!("{} > ", conn.current_channel());
        let Some(line) = terminal.input(&prompt).await else {
            debug!("End of input");
            break;
        };

        if line.trim_end() == EXIT_COMMAND {
            conn.info("exiting . . .");
            break;
        }
        if line.is_empty() {
            continue;
        }

        if let Err(e) = conn.send_message(&line).await {
            warn!(error = %e, code = e.error_code(), "Send failed");
            conn.info(&format!("send failed: {e}"));
        }
    }
}
