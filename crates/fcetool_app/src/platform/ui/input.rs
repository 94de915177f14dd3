use fcetool_core::Msg;
use thiserror::Error;

use super::constants::*;
use super::display_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetUrl(String),
    SelectPartition(Option<String>),
    Submit,
    SubmitWith { url: String, partition: String },
    NewExtraction,
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command `{0}`; type `help` for a list")]
    UnknownCommand(String),
    #[error("`{0}` is not a supported partition image; type `list` to see them")]
    UnknownPartition(String),
    #[error("there is no partition number {0}; type `list` to see them")]
    IndexOutOfRange(usize),
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl Command {
    /// Core messages for state-changing commands. Presentation commands map to nothing.
    pub fn into_msgs(self) -> Vec<Msg> {
        match self {
            Command::SetUrl(url) => vec![Msg::UrlEdited(url)],
            Command::SelectPartition(partition) => vec![Msg::PartitionSelected(partition)],
            Command::Submit => vec![Msg::SubmitClicked],
            Command::SubmitWith { url, partition } => vec![
                Msg::UrlEdited(url),
                Msg::PartitionSelected(Some(partition)),
                Msg::SubmitClicked,
            ],
            Command::NewExtraction => vec![Msg::NewExtractionClicked],
            Command::List | Command::Help | Command::Quit => Vec::new(),
        }
    }
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str, partitions: &[String]) -> Result<Option<Command>, InputError> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match keyword.to_ascii_lowercase().as_str() {
        CMD_URL => match args.as_slice() {
            [url] => Command::SetUrl((*url).to_string()),
            [] => Command::SetUrl(String::new()),
            _ => return Err(InputError::Usage("url <URL>")),
        },
        CMD_IMAGE => match args.as_slice() {
            [] => Command::SelectPartition(None),
            [choice] => Command::SelectPartition(Some(resolve_partition(choice, partitions)?)),
            _ => return Err(InputError::Usage("image <NAME|NUMBER>")),
        },
        CMD_EXTRACT => match args.as_slice() {
            [] => Command::Submit,
            [url, choice] => Command::SubmitWith {
                url: (*url).to_string(),
                partition: resolve_partition(choice, partitions)?,
            },
            _ => return Err(InputError::Usage("extract [URL IMAGE]")),
        },
        CMD_NEW => Command::NewExtraction,
        CMD_LIST => Command::List,
        CMD_HELP | "?" => Command::Help,
        CMD_QUIT | "exit" => Command::Quit,
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

/// Accepts a 1-based index or a configured name, with or without trailing bidi marks.
fn resolve_partition(choice: &str, partitions: &[String]) -> Result<String, InputError> {
    if let Ok(index) = choice.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| partitions.get(i))
            .cloned()
            .ok_or(InputError::IndexOutOfRange(index));
    }
    partitions
        .iter()
        .find(|name| name.as_str() == choice || display_name(name) == choice)
        .cloned()
        .ok_or_else(|| InputError::UnknownPartition(choice.to_string()))
}
