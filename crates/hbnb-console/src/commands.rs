use std::io::{self, IsTerminal};

use anyhow::Context;
use colored::Colorize;
use hbnb_console::clean::{self, SshExecutor};
use hbnb_console::tokenize::quote_if_needed;
use hbnb_console::{session, ConsoleConfig, Interpreter, Reply};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut config = ConsoleConfig::discover(cli.config.as_deref())?;
    if let Some(file) = cli.file {
        config.snapshot_path = file;
    }

    match cli.command.unwrap_or(Command::Console(ConsoleArgs::default())) {
        Command::Console(_) => cmd_console(&config),
        Command::Exec(args) => cmd_exec(&config, args),
        Command::Clean(args) => cmd_clean(config, args),
    }
}

fn open_interpreter(config: &ConsoleConfig) -> anyhow::Result<Interpreter<hbnb_store::FileStorage>> {
    let storage = session::open_storage(config).with_context(|| {
        format!("cannot load snapshot {}", config.snapshot_path.display())
    })?;
    Ok(Interpreter::new(storage))
}

fn cmd_console(config: &ConsoleConfig) -> anyhow::Result<()> {
    let mut interpreter = open_interpreter(config)?;
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    session::run(
        &mut interpreter,
        stdin.lock(),
        &mut io::stdout().lock(),
        &config.prompt,
        interactive,
    )?;
    Ok(())
}

fn cmd_exec(config: &ConsoleConfig, args: ExecArgs) -> anyhow::Result<()> {
    let mut interpreter = open_interpreter(config)?;
    if let Reply::Output(text) = interpreter.execute(&exec_line(&args.words)) {
        println!("{text}");
    }
    Ok(())
}

/// Rebuild a command line from shell words.
///
/// A single word is taken as the whole line. Otherwise the verb is kept as
/// is, brace literals stay verbatim, and every other word is re-quoted so
/// spaces the shell preserved survive tokenizing.
fn exec_line(words: &[String]) -> String {
    match words {
        [line] => line.clone(),
        [verb, rest @ ..] => {
            let mut line = verb.clone();
            for word in rest {
                line.push(' ');
                if word.starts_with('{') && word.ends_with('}') {
                    line.push_str(word);
                } else {
                    line.push_str(&quote_if_needed(word));
                }
            }
            line
        }
        [] => String::new(),
    }
}

fn cmd_clean(mut config: ConsoleConfig, args: CleanArgs) -> anyhow::Result<()> {
    if let Some(dir) = args.versions {
        config.clean.versions_dir = dir;
    }
    if let Some(dir) = args.releases {
        config.clean.releases_dir = dir;
    }
    if !args.hosts.is_empty() {
        config.clean.hosts = args.hosts;
    }

    let report = clean::do_clean(&config.clean, args.number, &mut SshExecutor)?;
    println!(
        "{} Kept {} newest, removed {} local archive(s)",
        "✓".green().bold(),
        report.keep,
        report.local_removed.len()
    );
    for path in &report.local_removed {
        println!("  {} {}", "removed:".red(), path.display());
    }

    let mut failures = 0;
    for (host, result) in &report.remote {
        match result {
            Ok(removed) => println!("  {} {} release(s) removed", host.bold(), removed.len()),
            Err(err) => {
                failures += 1;
                println!("  {} {}", host.bold(), err.to_string().red());
            }
        }
    }
    if failures > 0 {
        anyhow::bail!("{failures} host(s) failed");
    }
    Ok(())
}
