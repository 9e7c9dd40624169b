use std::{
    io::{BufRead, Write},
    sync::OnceLock,
};

use nom::{
    character::complete::digit1,
    combinator::{all_consuming, map_res},
    IResult,
};
use regex::Regex;

use crate::{
    error::{Error, Result},
    language::Language,
};

fn number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

/// A strictly positive decimal integer, surrounding whitespace allowed.
pub fn parse_positive(s: &str) -> Option<usize> {
    all_consuming(number)(s.trim())
        .ok()
        .map(|(_, n)| n)
        .filter(|&n| n > 0)
}

pub fn parse_pumping_length(s: &str) -> Result<usize> {
    parse_positive(s).ok_or_else(|| Error::InvalidPumpingLength(s.to_string()))
}

pub fn validate_word(s: &str) -> Result<String> {
    static WORD: OnceLock<Regex> = OnceLock::new();
    let word = WORD.get_or_init(|| Regex::new(r"^[a-z]+$").expect("Invalid regex"));
    if word.is_match(s) {
        Ok(s.to_string())
    } else {
        Err(Error::InvalidWord(s.to_string()))
    }
}

/// Console dialogue that keeps asking until it gets a usable value.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R, W> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    // first whitespace separated token, blank lines are skipped
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::InputClosed);
            }
            if let Some(token) = line.split_whitespace().next() {
                return Ok(token.to_string());
            }
        }
    }

    pub fn choose_language(&mut self) -> Result<Language> {
        loop {
            writeln!(self.output, "\nChoose a language:")?;
            for lang in Language::ALL {
                writeln!(self.output, "{}. {}", lang.id(), lang)?;
            }
            let token = self.ask("Enter choice (1 - 5): ")?;
            match token.parse::<Language>() {
                Ok(lang) => return Ok(lang),
                Err(e) => {
                    log::warn!("{}", e);
                    writeln!(
                        self.output,
                        "Invalid input. Please enter a number between 1 and 5."
                    )?;
                }
            }
        }
    }

    pub fn read_word(&mut self) -> Result<String> {
        loop {
            let token = self.ask("\nEnter a word from the language: ")?;
            match validate_word(&token) {
                Ok(word) => return Ok(word),
                Err(e) => {
                    log::warn!("{}", e);
                    writeln!(self.output, "Invalid word. Use only lowercase letters a-z.")?;
                }
            }
        }
    }

    pub fn read_pumping_length(&mut self) -> Result<usize> {
        loop {
            let token = self.ask("Enter pumping length p (positive integer): ")?;
            match parse_pumping_length(&token) {
                Ok(p) => return Ok(p),
                Err(e) => {
                    log::warn!("{}", e);
                    writeln!(self.output, "Invalid input. Please enter a positive number.")?;
                }
            }
        }
    }

    /// Blocks until any line is entered. End of input also counts.
    pub fn wait_for_exit(&mut self) -> Result<()> {
        match self.ask("Enter any input to exit") {
            Ok(_) | Err(Error::InputClosed) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
fn prompter(input: &str) -> Prompter<std::io::Cursor<Vec<u8>>, Vec<u8>> {
    Prompter::new(std::io::Cursor::new(input.as_bytes().to_vec()), vec![])
}

#[cfg(test)]
fn printed<R>(p: &Prompter<R, Vec<u8>>) -> String {
    String::from_utf8_lossy(p.output()).into_owned()
}

#[test]
fn test_parse_positive() {
    assert_eq!(parse_positive("3"), Some(3));
    assert_eq!(parse_positive(" 12 \n"), Some(12));
    assert_eq!(parse_positive("0"), None);
    assert_eq!(parse_positive("-2"), None);
    assert_eq!(parse_positive("2x"), None);
    assert_eq!(parse_positive(""), None);
    assert_eq!(parse_positive("99999999999999999999999999"), None);
}

#[test]
fn test_validate_word() {
    assert_eq!(validate_word("aabb").unwrap(), "aabb");
    assert!(validate_word("").is_err());
    assert!(validate_word("aAb").is_err());
    assert!(validate_word("ab1").is_err());
    assert!(validate_word("äb").is_err());
}

#[test]
fn test_choose_language_reprompts() {
    let mut p = prompter("x\n7\n\n2\n");
    assert_eq!(p.choose_language().unwrap(), Language::AnBmCn);
    let out = printed(&p);
    assert_eq!(out.matches("Choose a language:").count(), 3);
    assert_eq!(
        out.matches("Invalid input. Please enter a number between 1 and 5.")
            .count(),
        2
    );
    assert!(out.contains("5. L = { a^m b^n | m, n >= 0 and m is even }"));
}

#[test]
fn test_read_word_and_p() {
    let mut p = prompter("AB\nab2\naabb\n0\nabc\n2\n");
    assert_eq!(p.read_word().unwrap(), "aabb");
    assert_eq!(p.read_pumping_length().unwrap(), 2);
    let out = printed(&p);
    assert_eq!(out.matches("Invalid word.").count(), 2);
    assert_eq!(out.matches("Please enter a positive number.").count(), 2);
}

#[test]
fn test_end_of_input() {
    let mut p = prompter("9\n");
    assert!(matches!(p.choose_language(), Err(Error::InputClosed)));
    let mut p = prompter("");
    assert!(matches!(p.read_word(), Err(Error::InputClosed)));
    assert!(p.wait_for_exit().is_ok());
}
