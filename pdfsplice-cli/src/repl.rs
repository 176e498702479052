//! Interactive merge session.
//!
//! Reads one command per line from stdin and applies it to a [`Session`].
//! A failing command reports its error and leaves the session as it was,
//! so the user can fix the problem and try again.

use std::io::Write;
use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::position_to_index;
use crate::upload_paths;
use pdfsplice::config::{OverwriteMode, output_file_name};
use pdfsplice::error::{PdfSpliceError, Result};
use pdfsplice::io::PdfWriter;
use pdfsplice::merge::MergeEngine;
use pdfsplice::ordering::OrderCommand;
use pdfsplice::output::{OutputFormatter, display_merge_statistics};
use pdfsplice::password::is_valid_password;
use pdfsplice::session::Session;
use pdfsplice::utils::collect_paths_for_patterns;

const HELP: &str = "\
Commands (positions start at 1):
  list                 show the merge order
  add <FILE|GLOB>...   upload files
  remove <NAME>        delete an upload
  drop <NAME>          leave an upload out of the merge
  pick <NAME>          put a dropped upload back (at the end)
  up <POS>             move a file up one place
  down <POS>           move a file down one place
  swap <POS> <POS>     swap two files
  order <NAME,...>     set the whole order
  password [TEXT]      set or clear the output password
  merge [NAME]         merge into NAME (merge! overwrites)
  help                 show this list
  quit                 leave";

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the current order.
    List,
    /// Upload the files matching these patterns.
    Add(Vec<String>),
    /// Delete an upload.
    Remove(String),
    /// Deselect an upload.
    Drop(String),
    /// Reselect an upload.
    Pick(String),
    /// Change the order.
    Reorder(OrderCommand),
    /// Set (`Some`) or clear (`None`) the password.
    Password(Option<String>),
    /// Merge and write the result.
    Merge {
        /// Output file name; the session default when absent.
        name: Option<String>,
        /// Overwrite an existing file.
        force: bool,
    },
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
}

/// Whether the loop keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,
    /// Stop.
    Quit,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> std::result::Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "add" => {
            if rest.is_empty() {
                return Err("Usage: add <FILE|GLOB>...".to_string());
            }
            Command::Add(rest.split_whitespace().map(str::to_string).collect())
        }
        "remove" | "rm" => Command::Remove(required_name(rest, "remove")?),
        "drop" => Command::Drop(required_name(rest, "drop")?),
        "pick" => Command::Pick(required_name(rest, "pick")?),
        "up" => Command::Reorder(OrderCommand::MoveUp(parse_position(rest)?)),
        "down" => Command::Reorder(OrderCommand::MoveDown(parse_position(rest)?)),
        "swap" => {
            let positions: Vec<&str> = rest.split_whitespace().collect();
            let &[a, b] = positions.as_slice() else {
                return Err("Usage: swap <POS> <POS>".to_string());
            };
            Command::Reorder(OrderCommand::Swap(parse_position(a)?, parse_position(b)?))
        }
        "order" => {
            let names: Vec<String> = rest
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
            Command::Reorder(OrderCommand::SetOrder(names))
        }
        "password" | "pw" => Command::Password((!rest.is_empty()).then(|| rest.to_string())),
        "merge" | "merge!" => Command::Merge {
            name: (!rest.is_empty()).then(|| rest.to_string()),
            force: word.ends_with('!'),
        },
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("Unknown command '{other}'. Type 'help' for a list.")),
    };

    Ok(Some(command))
}

fn required_name(rest: &str, command: &str) -> std::result::Result<String, String> {
    if rest.is_empty() {
        Err(format!("Usage: {command} <NAME>"))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_position(text: &str) -> std::result::Result<usize, String> {
    let position: usize = text
        .trim()
        .parse()
        .map_err(|_| format!("'{text}' is not a position"))?;
    position_to_index(position).map_err(|e| e.to_string())
}

/// Interactive front end over one [`Session`].
pub struct Repl {
    session: Session,
    engine: MergeEngine,
    formatter: OutputFormatter,
    output: PathBuf,
    password: Option<String>,
    overwrite_mode: OverwriteMode,
}

impl Repl {
    /// Create a session front end writing to `output` by default.
    pub fn new(
        session: Session,
        engine: MergeEngine,
        formatter: OutputFormatter,
        output: PathBuf,
        password: Option<String>,
        overwrite_mode: OverwriteMode,
    ) -> Self {
        Self {
            session,
            engine,
            formatter,
            output,
            password,
            overwrite_mode,
        }
    }

    /// Read and execute commands until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Only fails if stdin cannot be read; command errors are reported and
    /// the loop continues.
    pub async fn run(&mut self) -> Result<()> {
        self.formatter.info("Interactive session. Type 'help' for commands.");
        self.show_order();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("pdfsplice> ");
            std::io::stdout().flush().ok();

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    self.formatter.error(&message);
                    continue;
                }
            };

            match self.execute(command).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(err) => self.formatter.error(&err.to_string()),
            }
        }

        Ok(())
    }

    /// Apply one command to the session.
    ///
    /// # Errors
    ///
    /// Whatever the session, the file system or the merge reports.
    pub async fn execute(&mut self, command: Command) -> Result<Flow> {
        if !matches!(command, Command::Password(_)) {
            tracing::debug!(?command, "session command");
        }

        match command {
            Command::List => self.show_order(),
            Command::Add(patterns) => {
                let paths = collect_paths_for_patterns(&patterns)?;
                let names = upload_paths(&mut self.session, &paths).await?;
                self.formatter
                    .success(&format!("Added {} file(s): {}", names.len(), names.join(", ")));
            }
            Command::Remove(name) => {
                self.session.remove(&name)?;
                self.formatter.success(&format!("Removed {name}"));
            }
            Command::Drop(name) => {
                self.session.deselect(&name)?;
                self.show_order();
            }
            Command::Pick(name) => {
                self.session.select(&name)?;
                self.show_order();
            }
            Command::Reorder(order_command) => {
                self.session.apply(order_command)?;
                self.show_order();
            }
            Command::Password(password) => {
                match &password {
                    Some(p) if !is_valid_password(p) => self.formatter.warning(
                        "Password needs an upper-case letter and a digit; merging will fail",
                    ),
                    Some(_) => self.formatter.success("Password set"),
                    None => self.formatter.success("Password cleared"),
                }
                self.password = password;
            }
            Command::Merge { name, force } => self.merge(name.as_deref(), force)?,
            Command::Help => self.formatter.info(HELP),
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn merge(&self, name: Option<&str>, force: bool) -> Result<()> {
        let file_name = match name {
            Some(name) => output_file_name(name),
            None => self
                .output
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        let output = self.output.with_file_name(output_file_name(&file_name));

        if output.exists() && !force && self.overwrite_mode != OverwriteMode::Force {
            return Err(PdfSpliceError::output_exists(output));
        }

        let download = self
            .session
            .merge(&self.engine, self.password.as_deref(), &file_name)?;
        let stats = PdfWriter::new().save(download.merged.bytes(), &output)?;

        display_merge_statistics(&self.formatter, download.merged.statistics());
        self.formatter.success(&format!(
            "Wrote {} ({})",
            stats.output_path.display(),
            stats.format_file_size()
        ));
        Ok(())
    }

    fn show_order(&self) {
        self.formatter.section("Merge order");
        self.formatter.order(self.session.order());

        let dropped: Vec<&str> = self
            .session
            .sources()
            .names()
            .filter(|name| self.session.is_deselected(name))
            .collect();
        if !dropped.is_empty() {
            self.formatter.info(&format!("  left out: {}", dropped.join(", ")));
        }
    }

    /// The session being edited.
    pub fn session(&self) -> &Session {
        &self.session
    }
}
