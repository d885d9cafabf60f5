use std::process::ExitCode;

use clap::Parser;
use note_refactor::{logging, Cli, Command, PlaceholderValues};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _logger = match logging::init_logging(cli.verbose) {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> note_refactor::Result<()> {
    let host = || cmd::host::Host::open(&cli.vault, cli.config.as_deref(), cli.dry_run);

    match cli.command {
        Command::Extract { note, from, to, name_from, name } => {
            cmd::extract::run(&host()?, &note, from, to, name_from.naming(name))
        }
        Command::SplitHere { note, line, name_from, name } => {
            cmd::extract::run_split_here(&host()?, &note, line, name_from.naming(name))
        }
        Command::SplitHeading { note, level } => cmd::split::run_heading(&host()?, &note, level),
        Command::SplitBullets { note, from, to, name_from } => {
            cmd::split::run_bullets(&host()?, &note, from, to, name_from.naming(None))
        }
        Command::Render {
            template,
            input,
            title,
            link,
            new_note_title,
            new_note_link,
            new_note_content,
            new_note_path,
        } => {
            let values = PlaceholderValues {
                title,
                link,
                new_note_title,
                new_note_link,
                new_note_content,
                new_note_path,
            };
            cmd::render::run(&template, &input, &values)
        }
    }
}

mod cmd {
    pub mod host;
    pub mod extract;
    pub mod split;
    pub mod render;
}
