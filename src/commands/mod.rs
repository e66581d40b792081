/*!
Command handlers for the chat front-end

This module provides the interactive chat loop invoked by the binary
entrypoint, the terminal [`Renderer`](crate::controller::Renderer), and the
special command parser.
*/

use crate::controller::{Notice, NoticeLevel, Renderer};
use crate::error::ChatkeepError;
use crate::session::Session;
use crate::store::TranscriptRef;
use crate::transcript::{Role, Turn};
use colored::Colorize;
use prettytable::{format, Table};

// Special commands parser
pub mod special_commands;

/// Resolve a user-supplied chat reference
///
/// A number is a 1-based index into `listing`; anything else must be a
/// transcript file name.
///
/// # Errors
///
/// Returns [`ChatkeepError::NotFound`] for an out-of-range index or a name
/// that does not follow the transcript naming convention.
///
/// # Examples
///
/// ```
/// use chatkeep::commands::resolve_reference;
/// use chatkeep::store::TranscriptRef;
///
/// let listing = vec![
///     TranscriptRef::parse("chat_b.json").unwrap(),
///     TranscriptRef::parse("chat_a.json").unwrap(),
/// ];
/// assert_eq!(resolve_reference("2", &listing).unwrap(), listing[1]);
/// assert!(resolve_reference("3", &listing).is_err());
/// ```
pub fn resolve_reference(
    arg: &str,
    listing: &[TranscriptRef],
) -> Result<TranscriptRef, ChatkeepError> {
    match arg.parse::<usize>() {
        Ok(index) => index
            .checked_sub(1)
            .and_then(|i| listing.get(i))
            .cloned()
            .ok_or_else(|| ChatkeepError::NotFound(format!("#{}", index))),
        Err(_) => TranscriptRef::parse(arg),
    }
}

/// Build the `/list` table: index, title, file name
pub fn listing_table(listing: &[TranscriptRef]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row!["#".bold(), "Title".bold(), "File".bold()]);

    for (index, reference) in listing.iter().enumerate() {
        table.add_row(prettytable::row![
            (index + 1).to_string().cyan(),
            reference.display_title(),
            reference.file_name()
        ]);
    }

    table
}

/// Print the saved chats listing
pub fn print_listing(listing: &[TranscriptRef]) {
    if listing.is_empty() {
        println!("{}", "No saved chats found.".yellow());
        return;
    }

    println!("\nPrevious Chats:");
    listing_table(listing).printstd();
    println!();
    println!("Use {} to open a chat.", "/open <#>".cyan());
    println!();
}

/// Terminal renderer for the chat session
///
/// Prints only the turns added since the previous render, unless the
/// session switched to another conversation, in which case the whole
/// conversation is redrawn.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    shown: usize,
    viewing: Option<TranscriptRef>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the next render to redraw the whole conversation
    pub fn invalidate(&mut self) {
        self.shown = 0;
    }

    fn print_turn(turn: &Turn) {
        let tag = match &turn.role {
            Role::User => turn.role.as_str().cyan().bold(),
            Role::Assistant => turn.role.as_str().green().bold(),
            Role::Other(role) => role.as_str().yellow().bold(),
        };
        println!("{} {}", tag, format!("[{}]", turn.time_caption()).dimmed());
        println!("{}\n", turn.content);
    }

    fn print_notice(notice: &Notice) {
        match notice.level {
            NoticeLevel::Success => println!("{}", notice.message.as_str().green()),
            NoticeLevel::Error => eprintln!("{}", notice.message.as_str().red()),
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, session: &Session, notices: &[Notice]) {
        for notice in notices {
            Self::print_notice(notice);
        }

        let turns = session.transcript().turns();
        let switched = session.current_ref() != self.viewing.as_ref();
        if switched || turns.len() < self.shown {
            self.shown = 0;
            self.viewing = session.current_ref().cloned();
        }

        if self.shown == 0 {
            if let Some(reference) = session.current_ref() {
                println!(
                    "{}\n",
                    format!("Currently viewing: {}", reference).dimmed()
                );
            }
        }

        for turn in &turns[self.shown..] {
            Self::print_turn(turn);
        }
        self.shown = turns.len();
    }
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Opens the transcript store, creates the completion client, and runs a
    //! readline-based loop that turns each line into an
    //! [`Action`](crate::controller::Action) for the controller.

    use super::special_commands::{parse_special_command, print_help, SpecialCommand};
    use super::*;
    use crate::config::Config;
    use crate::controller::{Action, ChatController};
    use crate::error::Result;
    use crate::providers::{create_client, CompletionClient};
    use crate::store::TranscriptStore;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    const PROMPT: &str = "you> ";

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `open` - Optional chat to load first (file name or 1-based index)
    ///
    /// # Errors
    ///
    /// Returns error if the history directory cannot be created, the
    /// completion client cannot be built, or the terminal cannot be read.
    /// Errors raised by individual actions are shown and never end the loop.
    pub async fn run_chat(config: Config, open: Option<String>) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let store = TranscriptStore::open(&config.history.dir)?;
        let client = create_client(&config.provider)?;
        let controller = ChatController::new(store, client);

        let mut session = Session::new();
        let mut renderer = TerminalRenderer::new();
        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&controller);

        if let Some(arg) = open {
            select(&controller, &mut session, &mut renderer, &arg).await;
        }

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    remember_line(&mut rl, trimmed)?;

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}", e.to_string().red());
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::NewChat => {
                            controller
                                .handle(&mut session, Action::StartNewChat, &mut renderer)
                                .await;
                            println!("{}", "Started a new chat.".cyan());
                        }
                        SpecialCommand::List => match controller.store().list() {
                            Ok(listing) => print_listing(&listing),
                            Err(e) => {
                                renderer.render(&session, &[Notice::error(e.to_string())])
                            }
                        },
                        SpecialCommand::Open(arg) => {
                            select(&controller, &mut session, &mut renderer, &arg).await;
                        }
                        SpecialCommand::Delete(arg) => {
                            match reference_from_listing(&controller, &arg) {
                                Ok(reference) => {
                                    controller
                                        .handle(
                                            &mut session,
                                            Action::DeleteChat(reference),
                                            &mut renderer,
                                        )
                                        .await;
                                }
                                Err(e) => renderer
                                    .render(&session, &[Notice::error(format!("Error: {}", e))]),
                            }
                        }
                        SpecialCommand::Show => {
                            renderer.invalidate();
                            renderer.render(&session, &[]);
                        }
                        SpecialCommand::Help => print_help(),
                        SpecialCommand::Exit => break,
                        SpecialCommand::None => {
                            println!("{}", "Thinking...".dimmed());
                            controller
                                .handle(
                                    &mut session,
                                    Action::SubmitMessage(trimmed.to_string()),
                                    &mut renderer,
                                )
                                .await;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        if !session.is_empty() {
            println!(
                "{}",
                "The current chat was not saved (use /new to save it before exiting).".yellow()
            );
        }
        println!("Goodbye!");
        Ok(())
    }

    async fn select(
        controller: &ChatController,
        session: &mut Session,
        renderer: &mut TerminalRenderer,
        arg: &str,
    ) {
        match reference_from_listing(controller, arg) {
            Ok(reference) => {
                controller
                    .handle(session, Action::SelectChat(reference), renderer)
                    .await;
            }
            Err(e) => renderer.render(session, &[Notice::error(format!("Error: {}", e))]),
        }
    }

    /// Add a submitted line to the editor's recall history
    pub(super) fn remember_line(rl: &mut DefaultEditor, line: &str) -> Result<()> {
        rl.add_history_entry(line)?;
        Ok(())
    }

    fn reference_from_listing(
        controller: &ChatController,
        arg: &str,
    ) -> std::result::Result<TranscriptRef, ChatkeepError> {
        let listing = controller.store().list()?;
        resolve_reference(arg, &listing)
    }

    /// Display welcome banner at the start of interactive chat mode
    fn print_welcome_banner(controller: &ChatController) {
        let client: &dyn CompletionClient = controller.client();

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║               Chatkeep Interactive Chat - Welcome!           ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!(
            "Model:   {} ({})",
            client.model().cyan(),
            client.name()
        );
        println!(
            "History: {}\n",
            controller.store().dir().display().to_string().cyan()
        );
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }
}
