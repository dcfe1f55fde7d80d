use std::{env, process};

use budget_tracker::{
    cli::{run_cli, CliMode},
    init,
    utils::{build_info, paths::HOME_ENV},
};

const SCRIPT_ENV: &str = "BUDGET_TRACKER_CLI_SCRIPT";

fn main() {
    init();

    let mut mode = if env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--script" => mode = CliMode::Script,
            "--version" | "-V" => {
                println!("{}", build_info::current().summary());
                return;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument `{other}`");
                print_usage();
                process::exit(2);
            }
        }
    }

    if let Err(err) = run_cli(mode) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "Usage: budget_tracker [--script]\n\
         \n\
         Without flags an interactive shell starts; type `help` inside it.\n\
         --script reads commands from stdin (also enabled by {SCRIPT_ENV}).\n\
         Data lives in ${HOME_ENV} or ~/.budget_tracker."
    );
}
