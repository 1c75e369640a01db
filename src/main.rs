use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use pdf_sigfield::{ExitCode, SignFieldError, SignFieldRequest};
use std::panic::{self, AssertUnwindSafe};

#[derive(Parser)]
#[command(name = "pdf-sigfield", version)]
#[command(about = "Add an unsigned signature placeholder field to page 1 of a PDF")]
struct Cli {
    #[arg(help = "Input PDF file")]
    input: String,
    #[arg(help = "Output PDF file")]
    output: String,
    #[arg(help = "Name of the signature field", allow_hyphen_values = true)]
    field_name: String,
    #[arg(help = "X of the first corner (points)", allow_hyphen_values = true)]
    x1: String,
    #[arg(help = "Y of the first corner (points)", allow_hyphen_values = true)]
    y1: String,
    #[arg(help = "X of the opposite corner (points)", allow_hyphen_values = true)]
    x2: String,
    #[arg(help = "Y of the opposite corner (points)", allow_hyphen_values = true)]
    y2: String,
    #[arg(hide = true, allow_negative_numbers = true)]
    extra: Vec<String>,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v info, -vv debug)")]
    verbose: u8,
    #[arg(short, long, help = "Do not print the summary line")]
    quiet: bool,
    #[arg(long, help = "Print a JSON report instead of the summary line")]
    json: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success,
                _ => ExitCode::InvalidArguments,
            };
            let _ = err.print();
            std::process::exit(code.code());
        }
    };

    init_logging(cli.verbose);
    install_panic_hook();

    let code = match panic::catch_unwind(AssertUnwindSafe(|| run(&cli))) {
        Ok(Ok(())) => ExitCode::Success,
        Ok(Err(err)) => {
            eprintln!("Error: {}", one_line(&format!("{:#}", err)));
            exit_code_for(&err)
        }
        // the panic hook has already printed the message
        Err(_) => ExitCode::UnknownError,
    };
    std::process::exit(code.code());
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Report panics as a single `Error:` line like every other failure.
fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unexpected panic".to_string());
        let location = info
            .location()
            .map(|loc| format!(" ({}:{})", loc.file(), loc.line()))
            .unwrap_or_default();
        eprintln!("Error: internal error: {}{}", one_line(&message), location);
    }));
}

fn one_line(message: &str) -> String {
    message.lines().map(str::trim).collect::<Vec<_>>().join(" ")
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if !cli.extra.is_empty() {
        log::warn!(
            "ignoring {} extra argument(s): {}",
            cli.extra.len(),
            cli.extra.join(" ")
        );
    }

    let request = SignFieldRequest::from_args(
        &cli.input,
        &cli.output,
        &cli.field_name,
        [
            cli.x1.as_str(),
            cli.y1.as_str(),
            cli.x2.as_str(),
            cli.y2.as_str(),
        ],
    )?;
    let report = request.run()?;

    if cli.json {
        let json = report.to_json().context("failed to encode report")?;
        println!("{}", json);
    } else if !cli.quiet {
        println!("{}", report.to_text());
    }
    Ok(())
}

fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.downcast_ref::<SignFieldError>()
        .map(SignFieldError::exit_code)
        .unwrap_or(ExitCode::UnknownError)
}
