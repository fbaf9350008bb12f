use tabled::Table;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    config::{self, DataPaths},
    error, info,
    login::{LoginSession, LoginState, poll_timer},
    netease::ApiClient,
    success,
    types::LoginTableRow,
    utils, warning,
};

enum PollOutcome {
    Finished,
    Cancelled,
    Aborted,
}

/// Logs in by scanning a QR code with the NetEase Cloud Music app.
///
/// Drives a [`LoginSession`] on a fixed 4-second timer. The first tick
/// requests a QR code, writes it to `qr.png` in the data directory and opens
/// it with the system viewer; every following tick checks the code's status.
/// Ctrl-C cancels the login at any point, including while a request is in
/// flight or while waiting for an answer to the restart prompt. Once the login succeeded or failed, the
/// session details are printed and the user decides whether to restart.
///
/// On success the session cookies are written to the cookie jar, where the
/// collection commands pick them up.
pub async fn login() {
    let paths = DataPaths::from_env();
    let client = match ApiClient::open(&config::api_url(), &paths).await {
        Ok(client) => client,
        Err(e) => error!("Cannot load cookies. Err: {}", e),
    };

    let mut session = LoginSession::new();

    loop {
        match poll(&client, &paths, &mut session).await {
            PollOutcome::Cancelled => {
                warning!("Login cancelled.");
                return;
            }
            PollOutcome::Aborted => {}
            PollOutcome::Finished => print_session(&session),
        }

        match session.state {
            LoginState::Success => {
                if let Err(e) = client.cookies().persist().await {
                    error!("Cannot save cookies. Err: {}", e);
                }
                success!("Login successful!");
            }
            LoginState::Failed => warning!(
                "Login failed with code {}.",
                utils::option_text(&session.check_code)
            ),
            _ => {}
        }

        match ask_restart().await {
            Some(true) => {}
            Some(false) => return,
            None => {
                warning!("Login cancelled.");
                // the stdin read runs on a blocking thread that would hold
                // up runtime shutdown
                std::process::exit(130);
            }
        }
        session.restart();
    }
}

async fn poll(client: &ApiClient, paths: &DataPaths, session: &mut LoginSession) -> PollOutcome {
    let mut ticker = poll_timer();

    loop {
        if utils::interruptible(ticker.tick(), tokio::signal::ctrl_c())
            .await
            .is_none()
        {
            return PollOutcome::Cancelled;
        }

        let previous = session.state;
        let Some(result) =
            utils::interruptible(session.step(client), tokio::signal::ctrl_c()).await
        else {
            return PollOutcome::Cancelled;
        };

        match result {
            Ok(state) => {
                if previous == LoginState::Init && state == LoginState::Pending {
                    show_qr(paths, session).await;
                }

                info!(
                    "login_status: {} | check_code: {} | check_count: {}",
                    state,
                    utils::option_text(&session.check_code),
                    session.check_count
                );

                if session.is_terminal() {
                    return PollOutcome::Finished;
                }
            }
            Err(e) => {
                warning!("Login request failed: {}", e);
                return PollOutcome::Aborted;
            }
        }
    }
}

async fn show_qr(paths: &DataPaths, session: &LoginSession) {
    let Some(image) = &session.qr_image else {
        return;
    };

    let bytes = match utils::decode_data_url(image) {
        Ok(bytes) => bytes,
        Err(e) => {
            warning!("Cannot decode QR image: {}", e);
            return;
        }
    };

    let path = paths.qr_image();
    if let Some(parent) = path.parent() {
        if let Err(e) = async_fs::create_dir_all(parent).await {
            warning!("Cannot create {}: {}", parent.display(), e);
            return;
        }
    }
    if let Err(e) = async_fs::write(&path, bytes).await {
        warning!("Cannot write QR image to {}: {}", path.display(), e);
        return;
    }

    if webbrowser::open(&path.to_string_lossy()).is_err() {
        warning!(
            "Failed to open the QR image. Please open it manually:\n{}",
            path.display()
        );
    } else {
        info!("Scan the QR code with the NetEase Cloud Music app.");
    }
}

fn print_session(session: &LoginSession) {
    let row = LoginTableRow {
        login_status: session.state.to_string(),
        qr_key: utils::option_text(&session.qr_key),
        check_code: utils::option_text(&session.check_code),
        check_cookie: session
            .check_cookie
            .as_ref()
            .map_or_else(|| "-".to_string(), |c| format!("{} bytes", c.len())),
        check_count: session.check_count,
    };
    println!("{}", Table::new(vec![row]));
}

/// Returns `None` when Ctrl-C interrupts the prompt.
async fn ask_restart() -> Option<bool> {
    info!("Restart login? [y/N]");

    let mut line = String::new();
    let mut reader = BufReader::new(tokio::io::stdin());
    let read = utils::interruptible(reader.read_line(&mut line), tokio::signal::ctrl_c()).await?;

    Some(match read {
        Ok(_) => matches!(line.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    })
}
