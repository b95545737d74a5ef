use std::io;

use models::User;
use service::{storage::CollectionStorage, RecordStore, ServiceError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{error, info};

/// What the caller of a menu should do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Return to the enclosing menu.
    Back,
    /// Input is exhausted; unwind and end the session.
    Quit,
}

/// One interactive session: menus read from `input`, write to `output`, and
/// act on the borrowed store one command at a time.
pub struct Session<'a, S: CollectionStorage, R, W> {
    pub(crate) store: &'a mut RecordStore<S>,
    input: R,
    output: W,
}

impl<'a, S, R, W> Session<'a, S, R, W>
where
    S: CollectionStorage,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(store: &'a mut RecordStore<S>, input: R, output: W) -> Self {
        Self { store, input, output }
    }

    /// Main menu loop. Ends on `Exit` or end of input.
    pub async fn run(mut self) -> io::Result<()> {
        loop {
            self.say("\n--- DLFS Main Menu ---").await?;
            self.say("1. Login").await?;
            self.say("2. Exit").await?;
            let Some(choice) = self.prompt("Choose an option: ").await? else { break };

            match choice.trim() {
                "1" => {
                    if self.login().await? == Flow::Quit {
                        break;
                    }
                }
                "2" => break,
                _ => self.say("Invalid option.").await?,
            }
        }
        self.output.flush().await?;
        info!(event = "session_end", "console session finished");
        Ok(())
    }

    async fn login(&mut self) -> io::Result<Flow> {
        let Some(email) = self.prompt("Email: ").await? else { return Ok(Flow::Quit) };
        let Some(password) = self.prompt("Password: ").await? else { return Ok(Flow::Quit) };

        let Some(user) = self.store.authenticate(&email, &password) else {
            self.say("Invalid credentials.").await?;
            return Ok(Flow::Back);
        };
        self.enter_menu(user).await
    }

    async fn enter_menu(&mut self, user: User) -> io::Result<Flow> {
        if user.is_admin() {
            self.admin_menu(&user).await
        } else {
            self.user_menu(&user).await
        }
    }

    pub(crate) async fn say(&mut self, line: &str) -> io::Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await
    }

    /// Print `label`, then read one line without its terminator.
    /// `None` means the input is exhausted.
    pub(crate) async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        self.output.write_all(label.as_bytes()).await?;
        self.output.flush().await?;
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(len);
        Ok(Some(line))
    }

    pub(crate) async fn report_failure(&mut self, err: ServiceError) -> io::Result<()> {
        error!(event = "operation_failed", error = %err, "store operation failed");
        self.say(&format!("Operation failed: {err}")).await
    }
}
