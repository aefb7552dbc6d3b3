//! Command line driver.
//!
//! `moonbite parse` prints the AST of one source file as JSON;
//! `moonbite build` typechecks it and writes the bytecode module. Both read
//! standard input when no file is given. Compiler diagnostics go to
//! standard output as JSON so surrounding tools can consume them; driver
//! failures such as unreadable files go to standard error.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use moonbite_codegen::bytecode::emit;
use moonbite_parser::{parse, Ast, Error, Typechecker};

#[derive(Parser)]
#[command(name = "moonbite", version, about = "The Moonbite compiler")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a source file and print its AST as JSON.
    Parse {
        /// Source file; standard input when absent.
        file: Option<PathBuf>,
    },
    /// Compile a source file to a bytecode module.
    Build {
        /// Source file; standard input when absent.
        file: Option<PathBuf>,
        /// Output path; defaults to the source name with the `.mbb`
        /// extension, or `out.mbb` when reading standard input.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, thiserror::Error)]
enum DriverError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Parse { file } => run_parse(file.as_deref()),
        Command::Build { file, output } => run_build(file.as_deref(), output),
    };
    match outcome {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::from(2)
        }
    }
}

fn run_parse(file: Option<&Path>) -> Result<ExitCode, DriverError> {
    let (source, path) = read_source(file)?;
    match parse(&source, &path) {
        Ok(ast) => {
            println!("{}", ast.to_json()?);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => report(&error),
    }
}

fn run_build(file: Option<&Path>, output: Option<PathBuf>) -> Result<ExitCode, DriverError> {
    let (source, path) = read_source(file)?;
    let ast = match parse(&source, &path) {
        Ok(ast) => ast,
        Err(error) => return report(&error),
    };
    if let Err(error) = typecheck(&ast) {
        return report(&error);
    }
    let module = match moonbite_codegen::compile(&ast) {
        Ok(module) => module,
        Err(error) => return report(&error),
    };

    let target = output.unwrap_or_else(|| default_output(file));
    let stream = emit(std::slice::from_ref(&module));
    std::fs::write(&target, stream).map_err(|source| DriverError::Write {
        path: target.display().to_string(),
        source,
    })?;
    // an empty object signals success to consuming tools
    println!("{{}}");
    Ok(ExitCode::SUCCESS)
}

fn typecheck(ast: &Ast) -> Result<(), Box<Error>> {
    let mut checker = Typechecker::new();
    checker.set_runtime_builtins();
    checker.check(ast)
}

fn read_source(file: Option<&Path>) -> Result<(String, String), DriverError> {
    match file {
        Some(path) => {
            let source = std::fs::read_to_string(path).map_err(|source| DriverError::Read {
                path: path.display().to_string(),
                source,
            })?;
            Ok((source, path.display().to_string()))
        }
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .map_err(|source| DriverError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok((source, "<stdin>".to_string()))
        }
    }
}

fn default_output(file: Option<&Path>) -> PathBuf {
    match file {
        Some(path) => path.with_extension("mbb"),
        None => PathBuf::from("out.mbb"),
    }
}

fn report(error: &Error) -> Result<ExitCode, DriverError> {
    let mut stdout = std::io::stdout().lock();
    let line = serde_json::to_string(error)?;
    // ignore a closed pipe on the way out
    let _ = writeln!(stdout, "{line}");
    Ok(ExitCode::FAILURE)
}
