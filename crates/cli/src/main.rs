//! langbench CLI entry point.

fn main() {
    if let Err(e) = langbench_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
