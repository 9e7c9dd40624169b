use std::{
    io::{self, Write},
    process::exit,
};

use clap::Parser;
use pumping_lemma::{
    error::Result,
    language::Language,
    prompt::{parse_pumping_length, validate_word, Prompter},
    pumping::demonstrate,
    render::render,
};

/// Pumping lemma demonstrator for five fixed languages over {a, b, c}.
///
/// Values not given on the command line are asked for interactively.
#[derive(Parser)]
#[command(name = "pumping-lemma")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Language number (1 - 5)
    #[arg(short, long)]
    language: Option<Language>,

    /// Word to decompose, lowercase letters only
    #[arg(short, long, value_parser = validate_word)]
    word: Option<String>,

    /// Pumping length p
    #[arg(short, long = "pumping-length", value_parser = parse_pumping_length)]
    p: Option<usize>,

    /// Wait for a final input before exiting
    #[arg(long)]
    pause: bool,
}

fn run(cli: Cli) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let language = match cli.language {
        Some(l) => l,
        None => prompter.choose_language()?,
    };
    let word = match cli.word {
        Some(w) => w,
        None => prompter.read_word()?,
    };
    let p = match cli.p {
        Some(p) => p,
        None => prompter.read_pumping_length()?,
    };
    log::debug!("language={} word={:?} p={}", language.id(), word, p);

    let mut out = io::stdout().lock();
    render(&demonstrate(&word, p, language), &mut out)?;
    out.flush()?;
    drop(out);

    if cli.pause {
        prompter.wait_for_exit()?;
    }
    Ok(())
}

// help and version go to stdout with status 0, rejected values exit with 1
fn exit_code(e: &clap::Error) -> i32 {
    if e.use_stderr() {
        1
    } else {
        0
    }
}

fn main() {
    env_logger::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            exit(exit_code(&e));
        }
    };
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        exit(1);
    }
}

#[cfg(test)]
fn parse_args(args: &[&str]) -> std::result::Result<Cli, i32> {
    Cli::try_parse_from(std::iter::once("pumping-lemma").chain(args.iter().copied()))
        .map_err(|e| exit_code(&e))
}

#[test]
fn test_cli_values() {
    let cli = parse_args(&["-l", "2", "-w", "aabbcc", "-p", "3"]).unwrap();
    assert_eq!(cli.language, Some(Language::AnBmCn));
    assert_eq!(cli.word.as_deref(), Some("aabbcc"));
    assert_eq!(cli.p, Some(3));
    assert!(!cli.pause);

    let cli = parse_args(&["--pause"]).unwrap();
    assert!(cli.language.is_none() && cli.word.is_none() && cli.p.is_none());
}

#[test]
fn test_cli_rejected_values_exit_with_one() {
    for args in [
        &["-w", "AB", "-l", "1", "-p", "2"][..],
        &["-l", "9", "-w", "ab", "-p", "1"][..],
        &["-p", "0"][..],
        &["--pumping-length", "x"][..],
        &["--unknown"][..],
    ] {
        assert_eq!(parse_args(args).err(), Some(1), "{:?}", args);
    }
}

#[test]
fn test_cli_help_and_version_exit_with_zero() {
    assert_eq!(parse_args(&["--help"]).err(), Some(0));
    assert_eq!(parse_args(&["--version"]).err(), Some(0));
}
