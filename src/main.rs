use clap::{error::ErrorKind, CommandFactory, Parser};
use codetype::{
    app::{App, Control},
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore, Theme},
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    snippets::SnippetLibrary,
    ui,
};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::File,
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use tracing::{info, warn, Level};

const TICK_RATE_MS: u64 = 100;

/// typing practice for code snippets with live speed and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type real code snippets and watch live WPM, total WPM, CPM, accuracy and your most frequent mistake update as you go."
)]
pub struct Cli {
    /// snippet to open (see --list)
    #[clap(short = 's', long)]
    snippet: Option<String>,

    /// colour theme for this run; toggling with ctrl+t is remembered
    #[clap(short = 't', long, value_enum)]
    theme: Option<Theme>,

    /// number of spaces the tab key inserts
    #[clap(short = 'i', long)]
    indent: Option<usize>,

    /// JSON snippet catalog to use instead of the built-in one
    #[clap(long)]
    snippets: Option<PathBuf>,

    /// print the available snippets and exit
    #[clap(long)]
    list: bool,

    /// write logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// log at debug level
    #[clap(long)]
    debug: bool,
}

impl Cli {
    /// Layer the command line over the stored config
    fn resolve_config(&self, stored: Config, library: &SnippetLibrary) -> codetype::Result<Config> {
        let snippet = match &self.snippet {
            Some(id) => library.get(id)?.id.clone(),
            None if library.get(&stored.snippet).is_ok() => stored.snippet.clone(),
            None => {
                warn!(snippet = %stored.snippet, "stored snippet not in catalog, using the first");
                library.first().id.clone()
            }
        };
        Ok(Config {
            theme: self.theme.unwrap_or(stored.theme),
            snippet,
            indent_width: self.indent.unwrap_or(stored.indent_width),
        })
    }
}

fn init_logging(path: &Path, debug: bool) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(if debug { Level::DEBUG } else { Level::INFO })
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path, cli.debug)?;
    }

    let library = match &cli.snippets {
        Some(path) => SnippetLibrary::load(path)?,
        None => SnippetLibrary::embedded()?,
    };

    if cli.list {
        for s in library.iter() {
            println!("{}\t{}", s.id, s.title);
        }
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = cli.resolve_config(store.load(), &library)?;
    info!(snippet = %config.snippet, theme = %config.theme, "starting");
    let mut app = App::new(library, config, Box::new(store), SystemClock)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    app.set_frame_requester(Box::new(runner.frame_requester()));

    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        match runner.step() {
            AppEvent::Tick => {
                if app.session().started_at().is_some() {
                    app.on_tick();
                    terminal.draw(|f| ui::draw(app, f))?;
                }
            }
            AppEvent::Frame => {
                if app.on_frame() {
                    terminal.draw(|f| ui::draw(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui::draw(app, f))?;
            }
            AppEvent::Key(key) => {
                if app.on_key(key) == Control::Quit {
                    break;
                }
                // typed edits redraw on their frame event
                if !app.session().has_pending_render() {
                    terminal.draw(|f| ui::draw(app, f))?;
                }
            }
        }
    }

    Ok(())
}
