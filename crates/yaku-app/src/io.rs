use kanal::AsyncSender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use yaku_types::AppEvent;

/// Stdin command reader, the stand-in for the panel UI.
///
/// Commands: `source <code>`, `target <code>`, `capture`, `dismiss`,
/// `quit`.
pub async fn input_loop(
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = cancel.cancelled() => break,
        };
        let Some(line) = line else { break };

        match parse_command(&line) {
            Some(event) => ui_to_app_tx.send(event).await?,
            None => tracing::warn!("unrecognized command: '{}'", line.trim()),
        }
    }

    Ok(())
}

fn parse_command(line: &str) -> Option<AppEvent> {
    let mut parts = line.split_whitespace();
    match (parts.next()?, parts.next()) {
        ("source", Some(code)) => Some(AppEvent::SetSourceLanguage(code.to_string())),
        ("target", Some(code)) => Some(AppEvent::SetTargetLanguage(code.to_string())),
        ("capture", None) => Some(AppEvent::TriggerCapture),
        ("dismiss", None) => Some(AppEvent::DismissOverlay),
        ("quit", None) => Some(AppEvent::Close),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_to_events() {
        assert!(matches!(
            parse_command("source ja"),
            Some(AppEvent::SetSourceLanguage(code)) if code == "ja"
        ));
        assert!(matches!(
            parse_command("target de"),
            Some(AppEvent::SetTargetLanguage(code)) if code == "de"
        ));
        assert!(matches!(parse_command("capture"), Some(AppEvent::TriggerCapture)));
        assert!(matches!(parse_command("dismiss"), Some(AppEvent::DismissOverlay)));
        assert!(matches!(parse_command("quit"), Some(AppEvent::Close)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_command("").is_none());
        assert!(parse_command("capture now").is_none());
        assert!(parse_command("translate").is_none());
    }
}
