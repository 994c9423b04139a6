use anyhow::Result;
use clap::Parser;

mod cli;
mod cmd_add;
mod cmd_frag;
mod cmd_get;
mod cmd_list;
mod cmd_status;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Add { path, file, namespace, vars } =>
            cmd_add::exec(path, file, namespace, vars),

        cli::Cmd::List { path } =>
            cmd_list::exec(path),

        cli::Cmd::Get { path, name, namespace, query_only } =>
            cmd_get::exec(path, name, namespace, query_only),

        cli::Cmd::Frag { path, name, namespace } =>
            cmd_frag::exec(path, name, namespace),

        cli::Cmd::Status { path } =>
            cmd_status::exec(path),
    }
}
