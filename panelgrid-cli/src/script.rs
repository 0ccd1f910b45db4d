//! Layout script parsing.
//!
//! A script holds one command per line. Blank lines and `#` comments are
//! ignored, arguments are separated by whitespace and may be wrapped in
//! double quotes to carry spaces.

use panelgrid_core::drag_drop::{Point, Size};
use panelgrid_core::layout::LayoutZone;

use crate::error::CliError;

/// A parsed script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add NAME [ZONE] [ANCHOR]`
    Add {
        name: String,
        zone: Option<LayoutZone>,
        anchor: Option<String>,
    },
    /// `remove NAME`
    Remove { name: String },
    /// `detach NAME`
    Detach { name: String },
    /// `close NAME`
    Close { name: String },
    /// `move NAME TARGET INDEX`
    Move {
        name: String,
        target: String,
        index: usize,
    },
    /// `split NAME TARGET ZONE`
    Split {
        name: String,
        target: String,
        zone: LayoutZone,
    },
    /// `drag NAME TARGET W H X Y`
    Drag {
        name: String,
        target: String,
        size: Size,
        point: Point,
    },
    /// `pin NAME`
    Pin { name: String },
    /// `unpin NAME`
    Unpin { name: String },
    /// `focus NAME`
    Focus { name: String },
    /// `clear-unpinned`
    ClearUnpinned,
    /// `reset`
    Reset,
}

/// A command together with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub number: usize,
    pub command: Command,
}

/// Parses a single line; `Ok(None)` for blank and comment-only lines.
pub fn parse_line(number: usize, text: &str) -> Result<Option<ScriptLine>, CliError> {
    let tokens = tokenize(text).map_err(|message| CliError::Script {
        line: number,
        message,
    })?;
    let Some((keyword, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = parse_command(keyword, args).map_err(|message| CliError::Script {
        line: number,
        message,
    })?;
    Ok(Some(ScriptLine { number, command }))
}

fn parse_command(keyword: &str, args: &[String]) -> Result<Command, String> {
    let command = match keyword {
        "add" => {
            arity(keyword, args, 1, 3)?;
            Command::Add {
                name: args[0].clone(),
                zone: args.get(1).map(|z| parse_zone(z)),
                anchor: args.get(2).cloned(),
            }
        }
        "remove" => Command::Remove {
            name: single(keyword, args)?,
        },
        "detach" => Command::Detach {
            name: single(keyword, args)?,
        },
        "close" => Command::Close {
            name: single(keyword, args)?,
        },
        "move" => {
            arity(keyword, args, 3, 3)?;
            Command::Move {
                name: args[0].clone(),
                target: args[1].clone(),
                index: parse_index(&args[2])?,
            }
        }
        "split" => {
            arity(keyword, args, 3, 3)?;
            Command::Split {
                name: args[0].clone(),
                target: args[1].clone(),
                zone: parse_zone(&args[2]),
            }
        }
        "drag" => {
            arity(keyword, args, 6, 6)?;
            Command::Drag {
                name: args[0].clone(),
                target: args[1].clone(),
                size: Size::new(parse_int(&args[2])?, parse_int(&args[3])?),
                point: Point::new(parse_int(&args[4])?, parse_int(&args[5])?),
            }
        }
        "pin" => Command::Pin {
            name: single(keyword, args)?,
        },
        "unpin" => Command::Unpin {
            name: single(keyword, args)?,
        },
        "focus" => Command::Focus {
            name: single(keyword, args)?,
        },
        "clear-unpinned" => {
            arity(keyword, args, 0, 0)?;
            Command::ClearUnpinned
        }
        "reset" => {
            arity(keyword, args, 0, 0)?;
            Command::Reset
        }
        other => return Err(format!("unknown command `{other}`")),
    };
    Ok(command)
}

fn arity(keyword: &str, args: &[String], min: usize, max: usize) -> Result<(), String> {
    if (min..=max).contains(&args.len()) {
        return Ok(());
    }
    if min == max {
        Err(format!(
            "`{keyword}` takes {min} argument(s), got {}",
            args.len()
        ))
    } else {
        Err(format!(
            "`{keyword}` takes {min} to {max} arguments, got {}",
            args.len()
        ))
    }
}

fn single(keyword: &str, args: &[String]) -> Result<String, String> {
    arity(keyword, args, 1, 1)?;
    Ok(args[0].clone())
}

/// Unknown zone words fall back to tab insertion.
fn parse_zone(word: &str) -> LayoutZone {
    word.parse().unwrap_or_else(|e| {
        tracing::warn!(zone = %word, error = %e, "unknown zone, adding as tab");
        LayoutZone::Default
    })
}

/// Tab index; `end` appends.
fn parse_index(word: &str) -> Result<usize, String> {
    if word.eq_ignore_ascii_case("end") {
        return Ok(usize::MAX);
    }
    word.parse()
        .map_err(|_| format!("invalid tab index `{word}`"))
}

fn parse_int(word: &str) -> Result<i32, String> {
    word.parse()
        .map_err(|_| format!("invalid number `{word}`"))
}

fn tokenize(text: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for ch in text.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            '#' if !quoted => break,
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quoted {
        return Err("unterminated quote".to_string());
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
