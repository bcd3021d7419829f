use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "wikiquiz", version, about = "Generate and take quizzes from Wikipedia articles")]
pub struct Cli {
    /// Wikipedia article URL to prefill the generate form
    #[arg(value_name = "url")]
    pub url: Option<String>,

    /// Quiz service origin [default: $WIKIQUIZ_SERVER, then built-in]
    #[arg(long, value_name = "url")]
    pub server: Option<String>,

    /// Print past quizzes without entering the TUI
    #[arg(long)]
    pub history: bool,
}
