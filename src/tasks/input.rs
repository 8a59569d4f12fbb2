use std::io::BufRead;
use std::thread;

use tokio::sync::mpsc::Sender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::events::UserInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Input(UserInput),
    Quit,
}

pub fn parse_command(line: &str) -> Option<InputCommand> {
    let cmd = match line.trim().to_ascii_lowercase().as_str() {
        "click" | "image" => InputCommand::Input(UserInput::ImageClicked),
        "backdrop" => InputCommand::Input(UserInput::BackdropClicked),
        "overlay" => InputCommand::Input(UserInput::OverlayImageClicked),
        "dismiss" | "close" => InputCommand::Input(UserInput::DismissClicked),
        "quit" | "exit" | "q" => InputCommand::Quit,
        _ => return None,
    };
    Some(cmd)
}

/// Forward commands read from `reader` until EOF, `quit`, or cancellation.
///
/// Runs on a plain thread because blocking reads cannot be interrupted; the
/// thread is left behind at shutdown. `quit` always cancels `cancel`; EOF
/// only does when `cancel_on_eof` is set, so a detached stdin (pipe,
/// `/dev/null`, service) leaves shutdown to ctrl-c.
pub fn spawn_reader<R>(
    reader: R,
    tx: Sender<UserInput>,
    cancel: CancellationToken,
    cancel_on_eof: bool,
) where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in reader.lines() {
            if cancel.is_cancelled() {
                return;
            }
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!("input reader failed: {err}");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Some(InputCommand::Input(input)) => {
                    if tx.blocking_send(input).is_err() {
                        debug!("gallery input channel closed");
                        return;
                    }
                }
                Some(InputCommand::Quit) => {
                    info!("quit requested; initiating shutdown");
                    cancel.cancel();
                    return;
                }
                None => warn!(line = line.trim(), "unrecognised command"),
            }
        }
        if cancel_on_eof {
            info!("input closed; initiating shutdown");
            cancel.cancel();
        } else {
            debug!("input closed; gallery keeps running");
        }
    });
}
