use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use mata::{Env, Error, Object};

const PROMPT: &str = ">> ";

fn cli() -> Command<'static> {
    Command::new("mata")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tree-walking interpreter for the Mata language")
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("Script to evaluate; starts the REPL when omitted")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("eval")
                .short('e')
                .long("eval")
                .value_name("SOURCE")
                .help("Evaluate SOURCE instead of a file")
                .takes_value(true)
                .value_parser(value_parser!(String))
                .conflicts_with("file"),
        )
        .arg(
            Arg::new("ast")
                .long("ast")
                .help("Print the parsed program instead of evaluating it")
                .action(ArgAction::SetTrue),
        )
}

fn read_source(matches: &ArgMatches) -> Result<Option<String>, Error> {
    if let Some(source) = matches.get_one::<String>("eval") {
        return Ok(Some(source.clone()));
    }

    match matches.get_one::<PathBuf>("file") {
        Some(path) => fs::read_to_string(path)
            .map(Some)
            .map_err(|source| Error::Io {
                path: path.clone(),
                source,
            }),
        None => Ok(None),
    }
}

fn run_source(source: &str, print_ast: bool) -> Result<(), Error> {
    if print_ast {
        println!("{}", mata::parse(source)?);
        return Ok(());
    }

    let env = Env::new().shared();
    let result = mata::run(source, &env)?;
    if !matches!(result, Object::Null) {
        println!("{}", result);
    }

    Ok(())
}

fn repl(print_ast: bool) -> io::Result<()> {
    let user = std::env::var("USER").unwrap_or_else(|_| "there".to_owned());
    println!("Hello {}! This is the Mata programming language", user);
    println!("Session started {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!("Feel free to type in commands");
    println!("Enter \"quit\" to quit");

    let env = Env::new().shared();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let input = line.trim_end();
        if input == "quit" {
            return Ok(());
        }

        match mata::parse(input) {
            Ok(program) if print_ast => writeln!(stdout, "{}", program)?,
            Ok(program) => {
                let result = mata::evaluate(&program, env.clone());
                if !matches!(result, Object::Null) {
                    writeln!(stdout, "{}", result)?;
                }
            }
            Err(Error::Parse(errors)) => writeln!(stdout, "{}", errors)?,
            Err(err) => writeln!(stdout, "{}", err)?,
        }
    }
}

fn main() -> ExitCode {
    mata::init_tracing();

    let matches = cli().get_matches();
    let print_ast = matches.get_one::<bool>("ast").copied().unwrap_or(false);

    let outcome = match read_source(&matches) {
        Ok(Some(source)) => run_source(&source, print_ast),
        Ok(None) => repl(print_ast).map_err(Error::Repl),
        Err(err) => Err(err),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
