//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init();
    if let Err(err) = ptcanon_cli::run() {
        eprintln!("ptcanon: {err}");
        std::process::exit(1);
    }
}
