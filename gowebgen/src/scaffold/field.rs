//! Field specification parser for table mode
//!
//! Fields are typed one per line at the prompt:
//!
//! ```text
//! name type [tag] [comment]
//! ```
//!
//! A blank line ends the list. The tag may be a Go struct tag in backticks,
//! which can contain spaces; everything after the tag is the comment.
//!
//! # Examples
//!
//! ```text
//! amount float64
//! title string `gorm:"size:100" json:"title"` Display title
//! status int8 - Order status, see constants
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{BufRead, Write};

use super::helpers::TemplateHelpers;
use crate::error::{GenerateError, Result};

/// One column of a generated model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Column name as typed (`amount`, `created_at`)
    pub name: String,
    /// Go type, not validated (`float64`, `time.Time`)
    #[serde(rename = "type")]
    pub field_type: String,
    /// Go struct tag, empty when not given
    pub tag: String,
    /// Trailing comment, empty when not given
    pub comment: String,
}

impl Field {
    /// Parse a field from one input line
    ///
    /// # Examples
    ///
    /// ```
    /// # use gowebgen::scaffold::field::Field;
    /// let field = Field::parse("amount float64").unwrap();
    /// assert_eq!(field.name, "amount");
    /// assert_eq!(field.field_type, "float64");
    /// assert!(field.tag.is_empty());
    ///
    /// let line = "title string `json:\"title\" gorm:\"size:100\"` Title text";
    /// let field = Field::parse(line).unwrap();
    /// assert_eq!(field.tag, "`json:\"title\" gorm:\"size:100\"`");
    /// assert_eq!(field.comment, "Title text");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a validation error if the line has fewer than two tokens or a
    /// backtick tag is never closed.
    pub fn parse(line: &str) -> Result<Self> {
        let (name, rest) = next_token(line);
        let (field_type, rest) = next_token(rest);

        if name.is_empty() || field_type.is_empty() {
            return Err(GenerateError::InvalidField {
                line: line.trim().to_string(),
                reason: "expected at least a name and a type".to_string(),
            });
        }

        let rest = rest.trim_start();
        let (tag, rest) = if let Some(quoted) = rest.strip_prefix('`') {
            let end = quoted.find('`').ok_or_else(|| GenerateError::InvalidField {
                line: line.trim().to_string(),
                reason: "unterminated backtick tag".to_string(),
            })?;
            (&rest[..end + 2], &quoted[end + 1..])
        } else {
            next_token(rest)
        };

        Ok(Self {
            name: name.to_string(),
            field_type: field_type.to_string(),
            tag: tag.to_string(),
            comment: rest.trim().to_string(),
        })
    }

    /// Exported Go identifier for this column
    #[must_use]
    pub fn go_name(&self) -> String {
        TemplateHelpers::to_go_name(&self.name)
    }

    /// The tag as typed, or a json/gorm tag derived from the name
    #[must_use]
    pub fn effective_tag(&self) -> String {
        if self.tag.is_empty() || self.tag == "-" {
            let column = TemplateHelpers::to_snake_case(&self.name);
            format!("`json:\"{column}\" gorm:\"column:{column}\"`")
        } else {
            self.tag.clone()
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.field_type)?;
        if !self.tag.is_empty() {
            write!(f, " {}", self.tag)?;
        }
        if !self.comment.is_empty() {
            write!(f, " {}", self.comment)?;
        }
        Ok(())
    }
}

/// Split off the next whitespace-delimited token
fn next_token(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    input
        .find(char::is_whitespace)
        .map_or((input, ""), |idx| (&input[..idx], &input[idx..]))
}

/// Read field lines until a blank line or end of input
///
/// `prompt` receives a `> ` marker before each line and a notice for every
/// line that is skipped. Malformed lines are logged and dropped, they never
/// abort the list.
///
/// # Errors
///
/// Returns an I/O error if reading the input or writing the prompt fails.
pub fn read_fields<R: BufRead, W: Write>(mut input: R, mut prompt: W) -> Result<Vec<Field>> {
    let read_err = |source| GenerateError::ReadFile {
        path: "<stdin>".into(),
        source,
    };
    let write_err = |source| GenerateError::WriteFile {
        path: "<prompt>".into(),
        source,
    };

    let mut fields = Vec::new();
    let mut line = String::new();

    loop {
        write!(prompt, "> ").and_then(|()| prompt.flush()).map_err(write_err)?;

        line.clear();
        if input.read_line(&mut line).map_err(read_err)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            break;
        }

        match Field::parse(&line) {
            Ok(field) => fields.push(field),
            Err(err) => {
                tracing::warn!(error = %err, "skipping field line");
                writeln!(prompt, "  skipped: {err}").map_err(write_err)?;
            }
        }
    }

    Ok(fields)
}

/// Parse field definitions passed on the command line
///
/// # Errors
///
/// Unlike [`read_fields`], the first malformed definition is an error.
pub fn parse_fields<S: AsRef<str>>(specs: &[S]) -> Result<Vec<Field>> {
    specs.iter().map(|spec| Field::parse(spec.as_ref())).collect()
}
