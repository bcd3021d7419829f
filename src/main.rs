use clap::Parser;

use wikiquiz::api::ApiClient;
use wikiquiz::cli::Cli;
use wikiquiz::config::Config;
use wikiquiz::state::AppState;
use wikiquiz::timefmt::format_local;
use wikiquiz::tui;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let config = Config::resolve(cli.server.as_deref());
    let client = ApiClient::new(&config.server_url)?;

    if cli.history {
        return print_history(&client);
    }

    let state = AppState::new(cli.url);
    tui::run_tui(state, client)
}

fn print_history(client: &ApiClient) -> Result<(), String> {
    let rows = client.history()?;
    if rows.is_empty() {
        println!("No history found.");
        return Ok(());
    }
    println!("{:>5}  {:<17}  {:<40}  URL", "ID", "Date", "Title");
    for row in rows {
        println!(
            "{:>5}  {:<17}  {:<40}  {}",
            row.id,
            format_local(row.date_generated.as_deref()),
            row.title.as_deref().unwrap_or("-"),
            row.url
        );
    }
    Ok(())
}
