//! Parsers shared by the plain text formats.

use std::str::FromStr;

use nom::{
    IResult,
    bytes::complete::{take_till1, take_while},
    character::complete::char,
    error::ErrorKind,
    sequence::tuple,
};

/// A `# title` line, with surrounding whitespace removed.
pub fn parse_title(input: &str) -> IResult<&str, &str> {
    let (input, _) = tuple((blank, char('#'), inline_blank))(input)?;
    let (input, title) = take_till1(is_line_break)(input)?;
    Ok((input, title.trim()))
}

/// Whitespace without line breaks.
pub fn inline_blank(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_whitespace() && !is_line_break(c))(input)
}

/// Whitespace including line breaks.
pub fn blank(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_whitespace())(input)
}

/// A whitespace-delimited token, converted with [`FromStr`].
///
/// A token that does not convert is a [`Failure`](nom::Err::Failure) of kind [`ErrorKind::MapRes`].
pub fn parse_value<Value: FromStr>(input: &str) -> IResult<&str, Value> {
    let (remaining, token) = take_till1(|c: char| c.is_whitespace())(input)?;
    match Value::from_str(token) {
        Ok(value) => Ok((remaining, value)),
        Err(_) => Err(nom::Err::Failure(nom::error::Error {
            input,
            code: ErrorKind::MapRes,
        })),
    }
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}
