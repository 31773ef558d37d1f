use std::{
    fmt::Display,
    io::{Read, Write},
    str::FromStr,
};

use log::trace;
use nom::{
    IResult,
    bytes::complete::tag,
    character::complete::satisfy,
    combinator::opt,
    multi::{count, many1},
    sequence::{preceded, tuple},
};

use super::{ScoreMatrix, ScoreTable};
use crate::{
    alphabet::Alphabet,
    error::{Error, Result},
    io::{blank, inline_blank, parse_title, parse_value},
    recurrence::GapCosts,
};

#[cfg(test)]
mod tests;

const GAP_COST_NAMES: [&str; 4] = [
    "open_deletion",
    "extend_deletion",
    "open_insertion",
    "extend_insertion",
];

impl<Element: FromStr + Display> ScoreTable<Element> {
    pub fn read_plain(mut reader: impl Read) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;

        let (input, table) = Self::parse_plain(&input)?;
        let (input, _) = blank(input)?;
        if !input.is_empty() {
            return Err(Error::Parser {
                input: input.to_string(),
                kind: nom::error::ErrorKind::Eof,
            });
        }

        Ok(table)
    }

    pub fn write_plain(&self, mut writer: impl Write) -> Result<()> {
        if !self.name.is_empty() {
            writeln!(writer, "# {}", self.name)?;
            writeln!(writer)?;
        }

        writeln!(writer, "ScoreTable")?;

        let alphabet = self.matrix.alphabet();
        let column_width = self
            .matrix
            .entries()
            .iter()
            .map(|score| format!("{score}").len())
            .max()
            .unwrap_or(1);

        write!(writer, "  |")?;
        for &character in alphabet.characters() {
            write!(writer, " {: >column_width$}", char::from(character))?;
        }
        writeln!(writer)?;

        write!(writer, "--+")?;
        for _ in 0..(alphabet.size() * (column_width + 1)) {
            write!(writer, "-")?;
        }
        writeln!(writer)?;

        for (row, &character) in alphabet.characters().iter().enumerate() {
            write!(writer, "{} |", char::from(character))?;
            for column in 0..alphabet.size() {
                let score = self.matrix.score(row as u8, column as u8);
                write!(writer, " {score: >column_width$}")?;
            }
            writeln!(writer)?;
        }

        if let Some(gap_costs) = &self.gap_costs {
            writeln!(writer)?;
            writeln!(writer, "GapCosts")?;
            for (name, cost) in GAP_COST_NAMES.iter().zip(gap_costs.iter()) {
                writeln!(writer, "{name} = {cost}")?;
            }
        }

        Ok(())
    }

    pub(crate) fn parse_plain(input: &str) -> IResult<&str, Self> {
        let (input, name) = opt(parse_title)(input)?;
        let (input, matrix) = parse_score_matrix(input)?;
        let (input, gap_costs) = opt(parse_gap_costs)(input)?;

        let name = name.unwrap_or("").to_string();
        trace!(
            "Parsed score table '{name}' over {} characters",
            matrix.alphabet().size()
        );

        Ok((
            input,
            Self {
                name,
                matrix,
                gap_costs,
            },
        ))
    }
}

fn parse_score_matrix<Element: FromStr>(input: &str) -> IResult<&str, ScoreMatrix<Element>> {
    // Identifier
    let input = blank(input)?.0;
    let input = tag("ScoreTable")(input)?.0;

    // First row gives the alphabet and the order of the characters in the columns
    let (input, alphabet) = parse_score_matrix_first_row(input)?;

    // A line of dashes, with a `+` below the header bar
    let input = tuple((
        blank,
        many1(tag("-")),
        tag("+"),
        many1(tag("-")),
    ))(input)?
    .0;

    // Then we have the rows, in any order
    let (input, mut rows) = count(
        |input| parse_score_matrix_row(input, &alphabet),
        alphabet.size(),
    )(input)?;
    rows.sort_by_key(|(character, _)| *character);
    if rows
        .windows(2)
        .any(|window| window[0].0 == window[1].0)
    {
        return Err(nom::Err::Failure(nom::error::Error {
            input,
            code: nom::error::ErrorKind::Verify,
        }));
    }

    let entries = rows.into_iter().flat_map(|(_, row)| row).collect();
    let matrix = ScoreMatrix { alphabet, entries };
    Ok((input, matrix))
}

fn parse_score_matrix_first_row(input: &str) -> IResult<&str, Alphabet> {
    let input = blank(input)?.0;
    let input = tag("|")(input)?.0;
    let (input, characters) =
        many1(preceded(inline_blank, satisfy(is_alphabet_character)))(input)?;
    trace!("Parsed score table header {characters:?}");

    let characters: Vec<_> = characters
        .into_iter()
        .map(|character| u8::try_from(character).ok())
        .collect::<Option<_>>()
        .ok_or(nom::Err::Failure(nom::error::Error {
            input,
            code: nom::error::ErrorKind::Char,
        }))?;

    let alphabet = Alphabet::new(&characters).map_err(|_| {
        nom::Err::Failure(nom::error::Error {
            input,
            code: nom::error::ErrorKind::Verify,
        })
    })?;
    Ok((input, alphabet))
}

fn parse_score_matrix_row<'input, Element: FromStr>(
    input: &'input str,
    alphabet: &Alphabet,
) -> IResult<&'input str, (u8, Vec<Element>)> {
    let input = blank(input)?.0;
    let (input, character) = satisfy(is_alphabet_character)(input)?;
    let index = u8::try_from(character)
        .ok()
        .and_then(|character| alphabet.index_of(character))
        .ok_or(nom::Err::Failure(nom::error::Error {
            input,
            code: nom::error::ErrorKind::Char,
        }))?;

    let input = inline_blank(input)?.0;
    let input = tag("|")(input)?.0;
    let (input, row) = count(preceded(inline_blank, parse_value), alphabet.size())(input)?;

    Ok((input, (index, row)))
}

fn parse_gap_costs<Element: FromStr>(input: &str) -> IResult<&str, GapCosts<Element>> {
    let input = blank(input)?.0;
    let input = tag("GapCosts")(input)?.0;

    let (input, open_deletion) = parse_named_value(input, GAP_COST_NAMES[0])?;
    let (input, extend_deletion) = parse_named_value(input, GAP_COST_NAMES[1])?;
    let (input, open_insertion) = parse_named_value(input, GAP_COST_NAMES[2])?;
    let (input, extend_insertion) = parse_named_value(input, GAP_COST_NAMES[3])?;

    Ok((
        input,
        GapCosts {
            open_deletion,
            extend_deletion,
            open_insertion,
            extend_insertion,
        },
    ))
}

fn parse_named_value<'input, Element: FromStr>(
    input: &'input str,
    name: &str,
) -> IResult<&'input str, Element> {
    let input = blank(input)?.0;
    let input = tag(name)(input)?.0;
    let input = inline_blank(input)?.0;
    let input = tag("=")(input)?.0;
    let input = inline_blank(input)?.0;
    parse_value(input)
}

fn is_alphabet_character(c: char) -> bool {
    !c.is_whitespace() && c != '|'
}
