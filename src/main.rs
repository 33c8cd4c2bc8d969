use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;

use clap::Parser;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn};

use wxcity::api::WeatherApi;
use wxcity::app::{run_app, App};
use wxcity::cli::Args;
use wxcity::config::Config;
use wxcity::error::AppError;
use wxcity::logging;
use wxcity::lookup::WeatherLookup;

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // logging and the saved config are optional; the lookup works without them
    let log_path = match &args.log_file {
        Some(path) => Ok(path.clone()),
        None => Config::default_log_path(),
    };
    if let Err(err) = log_path.and_then(|path| logging::init(&path)) {
        eprintln!("wxcity: running without logs ({err})");
    }

    let mut stored = Config::load_or_default();
    let mut config = stored.clone();
    args.apply(&mut config);
    info!(base_url = %config.base_url, "configuration loaded");

    let api = WeatherApi::new(&config.base_url, config.timeout())?;
    let mut app = App::new(WeatherLookup::new(api), config.presentation());
    if let Some(city) = args.initial_city(&config) {
        app.start_with(&city);
    }

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "terminal loop failed");
        println!("{err:?}");
    }

    if !args.no_save {
        if let Some(city) = app.last_city() {
            stored.last_city = Some(city.to_string());
            if let Err(err) = stored.save() {
                warn!(error = %err, "could not save config");
            }
        }
    }

    Ok(())
}
