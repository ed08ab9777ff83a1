use clap::Parser;
use mtg_prob::cli::{execute, Cli};

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json = cli.json;

    let request = match cli.into_request() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };
    log::debug!("Request: {:?}", request);

    match execute(&request, json) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}
