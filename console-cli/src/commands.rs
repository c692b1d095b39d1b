//! Console command parsing.

use std::str::FromStr;

use crate::screens::BulkAction;

/// Help text listing every command.
pub const HELP: &str = "\
users             show the users screen
orgs              show the organizations screen
sort <column>     sort by a column, again to reverse
page <n>          go to page n
next / prev       next or previous page
size <n>          rows per page
filter [text]     filter rows, no text clears the filter
toggle <id>       select or deselect a row
all / none        select every eligible row / clear the selection
open <id>         show a record
delete / remind   run the action on the selection
reset [all]       forget saved sort and page size, of this or every screen
help              show this help
quit              exit";

/// Which screen a command switches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Users,
    Organizations,
}

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show(ScreenKind),
    Sort(String),
    /// 1-based page number.
    Page(usize),
    Next,
    Previous,
    Size(usize),
    Filter(String),
    Toggle(u64),
    SelectAll,
    ClearSelection,
    Open(u64),
    Action(BulkAction),
    /// Forget saved preferences: `true` for every screen.
    Reset { all: bool },
    Help,
    Quit,
}

/// Input that does not parse as a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{command}` needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
}

fn number<T: FromStr>(command: &'static str, what: &'static str, arg: &str) -> Result<T, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument { command, what });
    }
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "" => return Err(CommandError::Empty),
            "users" => Command::Show(ScreenKind::Users),
            "orgs" | "organizations" => Command::Show(ScreenKind::Organizations),
            "sort" if arg.is_empty() => {
                return Err(CommandError::MissingArgument {
                    command: "sort",
                    what: "a column",
                });
            }
            "sort" => Command::Sort(arg.to_string()),
            "page" => {
                let page: usize = number("page", "a page number", arg)?;
                if page == 0 {
                    return Err(CommandError::InvalidNumber(arg.to_string()));
                }
                Command::Page(page)
            }
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Previous,
            "size" => Command::Size(number("size", "a page size", arg)?),
            "filter" | "f" => Command::Filter(arg.to_string()),
            "toggle" | "t" => Command::Toggle(number("toggle", "a row id", arg)?),
            "all" => Command::SelectAll,
            "none" => Command::ClearSelection,
            "open" | "o" => Command::Open(number("open", "a row id", arg)?),
            "delete" => Command::Action(BulkAction::Delete),
            "remind" => Command::Action(BulkAction::Remind),
            "reset" => match arg.to_ascii_lowercase().as_str() {
                "" => Command::Reset { all: false },
                "all" => Command::Reset { all: true },
                _ => return Err(CommandError::Unknown(line.to_string())),
            },
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}
