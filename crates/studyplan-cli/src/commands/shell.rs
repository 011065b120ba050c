//! Interactive read-eval-print loop over the same command set.

use std::io::{self, BufRead, Write};

use clap::{CommandFactory, Parser};

use super::{dispatch, Commands};
use crate::session::Session;

const PROMPT: &str = "studyplan> ";

#[derive(Parser, Debug)]
#[command(
    name = "studyplan",
    no_binary_name = true,
    disable_version_flag = true,
    override_usage = "<COMMAND> [ARGS]...",
    after_help = "Type `exit` or `quit` to leave."
)]
struct ShellLine {
    #[command(subcommand)]
    command: Commands,
}

/// Split a line on whitespace, keeping double-quoted runs together.
fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
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

    if in_quotes {
        return Err("unterminated quote".into());
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn confirm(input: &mut impl BufRead, question: &str) -> io::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

pub fn run(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let catalog = session.catalog_or(|e| {
        eprintln!("error: {e}");
        confirm(&mut input, "Start with an empty collection?")
    })?;
    println!(
        "{} subjects loaded. Type `help` for commands, `exit` to quit.",
        catalog.len()
    );

    let mut line = String::new();
    loop {
        print!("{PROMPT}");
        io::stdout().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            println!();
            break;
        }

        let tokens = match tokenize(&line) {
            Ok(tokens) => tokens,
            Err(e) => {
                eprintln!("error: {e}");
                continue;
            }
        };
        match tokens.first().map(String::as_str) {
            None => continue,
            Some("exit" | "quit") => break,
            Some("help") if tokens.len() == 1 => {
                ShellLine::command().print_help()?;
                continue;
            }
            Some(_) => {}
        }

        let parsed = match ShellLine::try_parse_from(&tokens) {
            Ok(parsed) => parsed,
            Err(e) => {
                e.print()?;
                continue;
            }
        };
        if let Commands::Shell = parsed.command {
            eprintln!("error: already in the shell");
            continue;
        }
        if let Err(e) = dispatch(parsed.command, session) {
            eprintln!("error: {e}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(
            tokenize("  subject   list \n").unwrap(),
            vec!["subject", "list"]
        );
    }

    #[test]
    fn quotes_group_words() {
        assert_eq!(
            tokenize(r#"topic add "Computer Science" "Data Structures" --hours 3"#).unwrap(),
            vec!["topic", "add", "Computer Science", "Data Structures", "--hours", "3"]
        );
    }

    #[test]
    fn empty_quotes_make_an_empty_token() {
        assert_eq!(tokenize(r#"subject add """#).unwrap(), vec!["subject", "add", ""]);
    }

    #[test]
    fn quotes_join_adjacent_text() {
        assert_eq!(tokenize(r#"a"b c"d"#).unwrap(), vec!["ab cd"]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert!(tokenize(r#"subject add "Physics"#).is_err());
    }

    #[test]
    fn blank_line_has_no_tokens() {
        assert!(tokenize("   \t\n").unwrap().is_empty());
    }

    #[test]
    fn shell_lines_parse_without_program_name() {
        let line = ShellLine::try_parse_from(["subject", "add", "Physics", "--exam-date", "2025-06-15"])
            .unwrap();
        assert!(matches!(line.command, Commands::Subject { .. }));
        assert!(ShellLine::try_parse_from(["bogus"]).is_err());
    }
}
