//! Terminal presentation layer
//!
//! A line-based login screen and the welcome screen it navigates to. The
//! screen is generic over its input and output so it can run on stdin/stdout
//! or on in-memory buffers.

use log::{info, warn};
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::flow::{LoginFlowController, LoginFlowState, Navigator, SubmitOutcome};
use crate::validation::FieldErrors;

/// Screens the login screen can navigate to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Welcome { username: String },
}

/// Forwards navigation requests to the screen loop
pub struct ChannelNavigator {
    routes: mpsc::UnboundedSender<Route>,
}

impl ChannelNavigator {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (routes, rx) = mpsc::unbounded_channel();
        (Self { routes }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn show_welcome(&self, username: &str) {
        let route = Route::Welcome {
            username: username.to_string(),
        };
        if self.routes.send(route).is_err() {
            warn!("Welcome screen for '{}' dropped: screen closed", username);
        }
    }
}

/// Runs the login screen until a login succeeds or input ends.
///
/// Returns the signed-in username, or `None` at end of input.
pub async fn run_login_screen<R, W>(
    controller: &LoginFlowController,
    routes: &mut mpsc::UnboundedReceiver<Route>,
    mut reader: R,
    writer: &mut W,
) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut notices = controller.notices();
    let mut states = controller.subscribe();

    writer.write_all(b"== Sign in ==\n").await?;

    loop {
        let Some(username) = prompt(&mut reader, writer, "Username: ").await? else {
            return Ok(None);
        };
        let Some(password) = prompt(&mut reader, writer, "Password: ").await? else {
            return Ok(None);
        };

        match controller.submit(&username, &password) {
            SubmitOutcome::Rejected(errors) => render_field_errors(writer, &errors).await?,
            SubmitOutcome::Ignored(err) => {
                writer.write_all(format!("  {err}\n").as_bytes()).await?;
            }
            SubmitOutcome::Started => {
                writer.write_all(b"Signing in...\n").await?;
                writer.flush().await?;

                let finished = match states.wait_for(|s| !s.is_submitting()).await {
                    Ok(state) => state.clone(),
                    Err(_) => return Ok(None),
                };

                if let LoginFlowState::Succeeded(_) = finished {
                    if let Some(Route::Welcome { username }) = routes.recv().await {
                        render_welcome(writer, &username).await?;
                        return Ok(Some(username));
                    }
                    return Ok(None);
                }

                if notices.changed().await.is_err() {
                    return Ok(None);
                }
                let notice = notices.borrow_and_update().clone();
                if let Some(message) = notice {
                    writer.write_all(format!("! {message}\n").as_bytes()).await?;
                }
            }
        }
    }
}

async fn prompt<R, W>(reader: &mut R, writer: &mut W, label: &str) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    writer.write_all(label.as_bytes()).await?;
    writer.flush().await?;

    let mut line = String::new();
    if reader.read_line(&mut line).await? == 0 {
        info!("Input closed");
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

async fn render_field_errors<W>(writer: &mut W, errors: &FieldErrors) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    if let Some(err) = &errors.username {
        writer.write_all(format!("  username: {err}\n").as_bytes()).await?;
    }
    if let Some(err) = &errors.password {
        writer.write_all(format!("  password: {err}\n").as_bytes()).await?;
    }
    Ok(())
}

async fn render_welcome<W>(writer: &mut W, username: &str) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(b"== Welcome ==\n").await?;
    writer
        .write_all(format!("Welcome, {username}!\n").as_bytes())
        .await?;
    writer.flush().await
}
