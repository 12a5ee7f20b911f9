//! Line-oriented command scripts replayed against a [`DynamicArray`].
//!
//! One command per line, fields separated by whitespace:
//!
//! ```text
//! insert <value> <index>
//! append <value>
//! remove <value>
//! read <index>
//! print
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. A value wrapped in
//! double quotes may contain whitespace or be empty (`append "two words"`,
//! `remove ""`). There are no escapes, so a value cannot contain `"`.
use std::io::Write;

use tracing::{debug, warn};

use crate::array::DynamicArray;
use crate::error::ArrayError;

/// The demonstration sequence the `arrays` binary runs by default.
pub const REFERENCE_SCENARIO: &str = "\
insert STRING1 0
append STRING4
insert STRING2 0
insert STRING3 1
print
remove STRING3
print
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert { value: String, index: i64 },
    Append(String),
    Remove(String),
    Read(i64),
    Print,
}

/// Parses one line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line: usize, text: &str) -> Result<Option<Command>, ArrayError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let parse_error = |message: String| ArrayError::Parse { line, message };
    let owned = split_fields(text).map_err(&parse_error)?;
    let fields: Vec<&str> = owned.iter().map(String::as_str).collect();
    let parse_index = |field: &str| {
        field
            .parse::<i64>()
            .map_err(|_| parse_error(format!("invalid index {field:?}")))
    };

    let command = match fields.as_slice() {
        ["insert", value, index] => Command::Insert {
            value: value.to_string(),
            index: parse_index(index)?,
        },
        ["append", value] => Command::Append(value.to_string()),
        ["remove", value] => Command::Remove(value.to_string()),
        ["read", index] => Command::Read(parse_index(index)?),
        ["print"] => Command::Print,
        [name @ ("insert" | "append" | "remove" | "read" | "print"), ..] => {
            return Err(parse_error(format!(
                "wrong number of arguments for {name:?}"
            )));
        }
        [name, ..] => return Err(parse_error(format!("unknown command {name:?}"))),
        [] => return Ok(None),
    };
    Ok(Some(command))
}

/// Splits on whitespace, keeping `"..."` together as one field.
fn split_fields(text: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut field = String::new();
        if c == '"' {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(ch) => field.push(ch),
                    None => return Err("unterminated quoted value".to_string()),
                }
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                field.push(ch);
                chars.next();
            }
        }
        fields.push(field);
    }
    Ok(fields)
}

/// Parses a whole script. Line numbers in errors start at 1.
pub fn parse_script(text: &str) -> Result<Vec<Command>, ArrayError> {
    let mut commands = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(command) = parse_line(i + 1, line)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

fn to_index(index: i64, len: usize) -> Result<usize, ArrayError> {
    usize::try_from(index).map_err(|_| ArrayError::IndexOutOfRange {
        index: i128::from(index),
        len,
    })
}

fn report<W: Write>(out: &mut W, command: &Command, error: &ArrayError) -> Result<(), ArrayError> {
    warn!(?command, %error, "command failed, continuing");
    writeln!(out, "error: {error}")?;
    Ok(())
}

/// Executes `commands` in order against `array`, writing `read` and `print`
/// output to `out`.
///
/// A `remove` that finds nothing and a `read` out of range are reported to
/// `out` and skipped. Any other failure stops the run and is returned.
pub fn run<W: Write>(
    commands: &[Command],
    array: &mut DynamicArray,
    out: &mut W,
) -> Result<(), ArrayError> {
    for command in commands {
        debug!(?command, "executing");
        match command {
            Command::Insert { value, index } => {
                let index = to_index(*index, array.len())?;
                array.insert(value, index)?;
            }
            Command::Append(value) => array.append(value)?,
            Command::Remove(value) => {
                if let Err(error) = array.remove(value) {
                    report(out, command, &error)?;
                }
            }
            Command::Read(index) => {
                let result = match to_index(*index, array.len()) {
                    Ok(index) => array.read(index),
                    Err(error) => Err(error),
                };
                match result {
                    Ok(value) => writeln!(out, "{value}")?,
                    Err(error) => report(out, command, &error)?,
                }
            }
            Command::Print => array.print_to(out)?,
        }
    }
    Ok(())
}

/// Parses and runs `text` in one step.
pub fn run_script<W: Write>(
    text: &str,
    array: &mut DynamicArray,
    out: &mut W,
) -> Result<(), ArrayError> {
    let commands = parse_script(text)?;
    run(&commands, array, out)
}
