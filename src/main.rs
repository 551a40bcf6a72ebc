use anyhow::Result;
use env_logger::Env;
use log::info;

fn main() -> Result<()> {
    // Initialize logging with custom format
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    let mut args = std::env::args().skip(1);
    if let Some(flag) = args.next() {
        match flag.as_str() {
            "--version" | "-v" => {
                println!("datebook {}", datebook::version::get_display_version());
                return Ok(());
            }
            "--help" | "-h" => {
                println!("Usage: datebook");
                println!("Starts the interactive shell. Type 'help' inside it for commands.");
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument '{}'. Run with --help for usage.", other);
                std::process::exit(2);
            }
        }
    }

    info!("Starting Datebook Terminal");
    datebook::run()
}
