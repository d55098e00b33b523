use ChemSchool::cli::cli_main::run_interactive_menu;
use ChemSchool::settings::{ChemContext, Settings};
use simplelog::{ColorChoice, Config, LevelFilter, TerminalMode, TermLogger};

const SETTINGS_FILE: &str = "chemschool.json";

pub fn main() {
    if let Err(e) = TermLogger::init(
        LevelFilter::Warn,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger is not installed: {}", e);
    }
    let settings = match Settings::load_or_default(SETTINGS_FILE) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}: {}", e.user_message(), e);
            Settings::default()
        }
    };
    run_interactive_menu(&ChemContext::new(settings));
}
