//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = reviewrank_cli::run() {
        eprintln!("reviewrank: {err}");
        std::process::exit(1);
    }
}
