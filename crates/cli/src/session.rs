//! Line-oriented watchlist session.
//!
//! A `Session` owns exactly one `Watchlist` for its whole lifetime. Commands
//! are parsed from text one line at a time and applied in order.

use clap::ValueEnum;
use colored::Colorize;
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::{debug, warn};
use watchlist::{Movie, MovieId, Watchlist, WatchlistError};

pub const HELP: &str = "\
Commands:
  add <id> [title...]   add a movie (duplicates are ignored)
  add-json <object>     add a movie from a JSON object, e.g. {\"id\": 1, \"title\": \"Alien\"}
  remove <id>           remove a movie
  has <id>              print whether a movie is in the watchlist
  list                  print the watchlist in insertion order
  count                 print the number of movies
  help                  show this message
  quit | exit           end the session";

/// Errors raised while parsing or running session commands
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Unknown command: {0} (try `help`)")]
    UnknownCommand(String),

    #[error("Missing {argument} for `{command}`")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Invalid movie id: {0}")]
    InvalidId(String),

    #[error(transparent)]
    Watchlist(#[from] WatchlistError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    /// Errors the session reports and then carries on from
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SessionError::Io(_))
    }
}

/// Output format for `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// A parsed session command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add { id: MovieId, title: Option<String> },
    AddJson(Movie),
    Remove(MovieId),
    Has(MovieId),
    List,
    Count,
    Help,
    Quit,
}

/// Whether the session should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

fn parse_id(command: &'static str, arg: &str) -> Result<MovieId, SessionError> {
    if arg.is_empty() {
        return Err(SessionError::MissingArgument {
            command,
            argument: "movie id",
        });
    }
    arg.parse()
        .map_err(|_| SessionError::InvalidId(arg.to_string()))
}

/// Parse one input line.
///
/// Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse_command(line: &str) -> Result<Option<Command>, SessionError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = split_word(line);
    let command = match word.to_ascii_lowercase().as_str() {
        "add" => {
            let (id, title) = split_word(rest);
            Command::Add {
                id: parse_id("add", id)?,
                title: (!title.is_empty()).then(|| title.to_string()),
            }
        }
        "add-json" => {
            if rest.is_empty() {
                return Err(SessionError::MissingArgument {
                    command: "add-json",
                    argument: "JSON object",
                });
            }
            Command::AddJson(Movie::from_json_str(rest)?)
        }
        "remove" | "rm" => Command::Remove(parse_id("remove", split_word(rest).0)?),
        "has" => Command::Has(parse_id("has", split_word(rest).0)?),
        "list" | "ls" => Command::List,
        "count" => Command::Count,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(SessionError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

/// One interactive or scripted run owning a single watchlist
pub struct Session {
    watchlist: Watchlist,
    format: OutputFormat,
    quiet: bool,
}

impl Session {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        let mut watchlist = Watchlist::new();
        watchlist.subscribe(|event, contents| {
            debug!(?event, len = contents.len(), "watchlist changed");
        });

        Self {
            watchlist,
            format,
            quiet,
        }
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    /// Apply a single command, writing any output to `out`
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<Flow, SessionError> {
        match command {
            Command::Add { id, title } => {
                let movie = match title {
                    Some(title) => Movie::new(id).with_title(title),
                    None => Movie::new(id),
                };
                self.add(movie, out)?;
            }
            Command::AddJson(movie) => self.add(movie, out)?,
            Command::Remove(id) => {
                let present = self.watchlist.is_in_watchlist(id);
                self.watchlist.remove_movie(id);
                if !self.quiet {
                    if present {
                        writeln!(out, "{} Removed #{}", "✓".green(), id)?;
                    } else {
                        writeln!(out, "{} #{} is not in the watchlist", "·".yellow(), id)?;
                    }
                }
            }
            Command::Has(id) => writeln!(out, "{}", self.watchlist.is_in_watchlist(id))?,
            Command::List => self.list(out)?,
            Command::Count => writeln!(out, "{}", self.watchlist.len())?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self, movie: Movie, out: &mut impl Write) -> Result<(), SessionError> {
        let id = movie.id;
        let label = movie.to_string();
        let duplicate = self.watchlist.is_in_watchlist(id);
        self.watchlist.add_movie(movie);

        if !self.quiet {
            if duplicate {
                writeln!(out, "{} #{} is already in the watchlist", "·".yellow(), id)?;
            } else {
                writeln!(out, "{} Added {}", "✓".green(), label)?;
            }
        }
        Ok(())
    }

    fn list(&self, out: &mut impl Write) -> Result<(), SessionError> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.watchlist.movies())
                    .map_err(WatchlistError::from)?;
                writeln!(out, "{json}")?;
            }
            OutputFormat::Text => {
                if self.watchlist.is_empty() {
                    writeln!(out, "{}", "(watchlist is empty)".dimmed())?;
                }
                for (rank, movie) in self.watchlist.iter().enumerate() {
                    writeln!(out, "{}. {}", (rank + 1).to_string().green(), movie)?;
                }
            }
        }
        Ok(())
    }

    /// Read commands from `input` until EOF or `quit`.
    ///
    /// Bad commands are reported on `out` and skipped; I/O errors abort.
    pub fn run(
        &mut self,
        input: impl BufRead,
        out: &mut impl Write,
        prompt: bool,
    ) -> Result<(), SessionError> {
        if prompt {
            write!(out, "{} ", ">".bold().blue())?;
            out.flush()?;
        }

        for (idx, line) in input.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;

            let flow = match parse_command(&line).and_then(|command| match command {
                Some(command) => self.execute(command, out),
                None => Ok(Flow::Continue),
            }) {
                Ok(flow) => flow,
                Err(err) if err.is_recoverable() => {
                    warn!(line = line_no, error = %err, "skipping command");
                    writeln!(out, "{} line {}: {}", "✗".red(), line_no, err)?;
                    Flow::Continue
                }
                Err(err) => return Err(err),
            };

            if flow == Flow::Quit {
                break;
            }
            if prompt {
                write!(out, "{} ", ">".bold().blue())?;
                out.flush()?;
            }
        }
        Ok(())
    }
}
