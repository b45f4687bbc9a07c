#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = runseg_cli::run_from_env() {
        eprintln!("runseg: {error}");
        std::process::exit(error.exit_code());
    }
}
