use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod session;

use session::{GlobalArgs, Session};

#[derive(Parser)]
#[command(name = "studyplan", version, about = "Exam preparation planner")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: commands::Commands,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors exit 1 like every other failure; help and version exit 0.
            let code = i32::from(e.use_stderr());
            let _ = e.print();
            std::process::exit(code);
        }
    };
    init_logging(cli.global.verbose);

    let result =
        Session::open(&cli.global).and_then(|mut session| commands::dispatch(cli.command, &mut session));

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
