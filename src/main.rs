use cachette::cli::{init_logging, Action, Cli};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.action() {
        Action::List => cachette::cli::commands::list::execute(&cli),
        Action::Get { key, exact } => cachette::cli::commands::get::execute(&cli, key, exact),
        Action::Set { key, value } => cachette::cli::commands::set::execute(&cli, key, value),
        Action::Delete { key } => cachette::cli::commands::delete::execute(&cli, key),
        Action::DeleteMatching { pattern } => {
            cachette::cli::commands::delete::execute_matching(&cli, pattern)
        }
    };

    if let Err(e) = result {
        cachette::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
