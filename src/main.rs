use std::{env, process::ExitCode};
use choropleth::{Config, Palette};
use tracing::error;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: choropleth [CONFIG.json]\n       choropleth --palettes";

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CHOROPLETH_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn list_palettes() {
    for p in Palette::all() {
        println!("{:<10} {:<11} {} colors", p.name(), p.typ(), p.len());
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args: Vec<String> = env::args().skip(1).collect();
    let config = match args.as_slice() {
        [] => Config::default(),
        [flag] if flag == "--palettes" => {
            list_palettes();
            return ExitCode::SUCCESS
        }
        [flag] if flag == "-h" || flag == "--help" => {
            println!("{USAGE}");
            return ExitCode::SUCCESS
        }
        [path] => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE
            }
        },
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2)
        }
    };
    match choropleth::run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
