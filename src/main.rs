use clap::Parser;
use coarsefine::cli::{Cli, run};
use coarsefine::logging::setup_logging;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.log_level, cli.json_logs);
    run(cli)
}
