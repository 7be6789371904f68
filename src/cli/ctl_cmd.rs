//! Ctl command handler - sends commands to the running service

use super::args::CtlAction;
use super::presenter::Presenter;
use super::socket::{ControlSocketClient, SocketPath};

/// Handle ctl subcommand
pub async fn handle_ctl_command(
    action: CtlAction,
    presenter: &mut Presenter,
) -> Result<(), String> {
    let client = ControlSocketClient::new(SocketPath::new());

    // Check if the service is running
    if !client.is_service_running() {
        return Err("No service running. Start with: screenrec".to_string());
    }

    let cmd = match action {
        CtlAction::Expand => "expand",
        CtlAction::Start => "start",
        CtlAction::Back => "back",
        CtlAction::Close => "close",
        CtlAction::Status => "status",
    };

    presenter.start_spinner("Contacting service...");
    let result = client.send_command(cmd).await;
    presenter.stop_spinner();

    let response = result.map_err(|e| format!("Failed to communicate with service: {}", e))?;

    let response = response.trim();

    match action {
        CtlAction::Status => {
            presenter.output(response);
        }
        _ => {
            if let Some(stripped) = response.strip_prefix("error:") {
                return Err(stripped.trim().to_string());
            }
            presenter.info(&format!("Command sent: {}", cmd));
        }
    }

    Ok(())
}
