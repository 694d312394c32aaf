use std::io::Write;

use quince_chess::uci::uci_top::run_stdio_loop;

fn main() {
    // stdout carries UCI traffic only; logs go to stderr.
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"))
        .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run_stdio_loop() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
