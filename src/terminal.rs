use crate::practice_session::{Feedback, PracticeSession};
use colored::Colorize;
use rand::Rng;
use std::io::{self, BufRead, Write};

const HELP: &str = "Type an answer, #N to pick option N, n for a new problem, \
o to switch operation, q to quit.";

#[derive(Debug, PartialEq)]
enum Command {
    Answer(String),
    Pick(usize),
    BadPick(String),
    NewProblem,
    NextOperation,
    Help,
    Quit,
    Empty,
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line {
        "" => Command::Empty,
        "q" | "quit" => Command::Quit,
        "n" | "new" => Command::NewProblem,
        "o" | "op" => Command::NextOperation,
        "h" | "help" | "?" => Command::Help,
        _ => match line.strip_prefix('#').map(|n| n.trim().parse::<usize>()) {
            Some(Ok(n)) => Command::Pick(n),
            Some(Err(_)) => Command::BadPick(line.to_string()),
            None => Command::Answer(line.to_string()),
        },
    }
}

fn print_round<R: Rng, W: Write>(session: &PracticeSession<R>, output: &mut W) -> io::Result<()> {
    let round = session.round();
    writeln!(output)?;
    writeln!(output, "{}", round.problem.question().bold())?;
    let options: Vec<String> = round
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| format!("[{}] {}", i + 1, option))
        .collect();
    writeln!(output, "  {}", options.join("   "))?;
    Ok(())
}

fn print_feedback<W: Write>(feedback: Feedback, output: &mut W) -> io::Result<()> {
    match feedback {
        Feedback::Correct => writeln!(output, "{}", "Correct!".green().bold()),
        Feedback::TryAgain => writeln!(output, "{}", "Try again".red().bold()),
    }
}

/// Runs the interactive practice loop until `q` or end of input.
pub fn run<R: Rng, I: BufRead, W: Write>(
    session: &mut PracticeSession<R>,
    input: I,
    mut output: W,
) -> io::Result<()> {
    writeln!(output, "{}", HELP.dimmed())?;
    print_round(session, &mut output)?;

    let mut lines = input.lines();
    loop {
        write!(output, "> ")?;
        output.flush()?;
        let Some(line) = lines.next() else {
            break;
        };

        match parse_command(&line?) {
            Command::Quit => break,
            Command::Empty => continue,
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::NewProblem => {
                session.new_round();
                print_round(session, &mut output)?;
            }
            Command::NextOperation => {
                let operation = session.cycle_operation();
                writeln!(output, "Operation: {}", operation)?;
                print_round(session, &mut output)?;
            }
            Command::Answer(text) => {
                let feedback = session.submit_text(&text);
                print_feedback(feedback, &mut output)?;
                if feedback == Feedback::Correct {
                    print_round(session, &mut output)?;
                }
            }
            Command::Pick(number) => match number
                .checked_sub(1)
                .and_then(|index| session.choose_option(index))
            {
                Some(feedback) => {
                    print_feedback(feedback, &mut output)?;
                    if feedback == Feedback::Correct {
                        print_round(session, &mut output)?;
                    }
                }
                None => writeln!(output, "No option {}", number)?,
            },
            Command::BadPick(text) => {
                writeln!(output, "'{}' is not an option number, try #1", text)?
            }
        }
    }
    writeln!(output)?;
    Ok(())
}
