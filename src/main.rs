use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use term_desk::apps::AppId;
use term_desk::content::{LoggingHost, SharedHost};
use term_desk::event_loop::{ControlFlow, EventLoop};
use term_desk::shell::{DesktopShell, ShellConfig};
use term_desk::tracing_sub;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OverlayMode {
    /// No overlay compositor; bridge-view apps fall back to static content.
    None,
    /// Log overlay show/hide/resize calls through tracing (F12 to inspect).
    Log,
}

#[derive(Debug, Parser)]
#[command(name = "term-desk", about = "A simulated desktop environment for terminal shells.")]
struct Args {
    /// Event poll interval in milliseconds; one tick per interval.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Directory notes are saved into.
    #[arg(long, default_value = ".term-desk/notes")]
    notes_dir: PathBuf,

    /// Seed for window spawn placement (useful for reproducing layouts).
    #[arg(long)]
    seed: Option<u64>,

    /// Overlay compositor channel for bridge-view apps.
    #[arg(long, value_enum, default_value_t = OverlayMode::None)]
    overlay: OverlayMode,

    /// Apps to open at startup, by name (e.g. --open notes --open browser).
    #[arg(long = "open")]
    open: Vec<String>,

    /// Start without capturing mouse events.
    #[arg(long)]
    no_mouse_capture: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    tracing_sub::init_default();

    let open_at_start: Vec<AppId> = args
        .open
        .iter()
        .filter_map(|name| {
            let app = AppId::from_name(name);
            if app.is_none() {
                eprintln!("unknown app: {name}");
            }
            app
        })
        .collect();

    let overlay: Option<SharedHost> = match args.overlay {
        OverlayMode::None => None,
        OverlayMode::Log => Some(std::rc::Rc::new(std::cell::RefCell::new(LoggingHost))),
    };

    let user_name = std::env::var("USER").unwrap_or_else(|_| "user".to_string());
    let mut shell = DesktopShell::new(ShellConfig {
        user_name,
        notes_dir: args.notes_dir,
        overlay,
        spawn_seed: args.seed,
        open_at_start,
    });
    if args.no_mouse_capture {
        shell.set_mouse_capture(false);
        // consumed here; the startup path below decides whether to capture
        shell.take_mouse_capture_change();
    }

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    if !args.no_mouse_capture {
        execute!(io::stdout(), EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    if let Ok((cols, rows)) = terminal::size() {
        shell.set_viewport(cols, rows);
    }

    let result = run(&mut terminal, &mut shell, Duration::from_millis(args.tick_ms));

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    shell: &mut DesktopShell,
    tick: Duration,
) -> io::Result<()> {
    let mut event_loop = EventLoop::new(tick);
    event_loop.run(|event| {
        match event {
            Some(evt) => {
                if matches!(evt, Event::Mouse(_)) && !shell.mouse_capture_enabled() {
                    return Ok(ControlFlow::Continue);
                }
                if let ControlFlow::Quit = shell.handle_event(&evt) {
                    return Ok(ControlFlow::Quit);
                }
            }
            None => {
                shell.tick(Instant::now());
                terminal
                    .draw(|frame| shell.render(frame))
                    .map_err(io::Error::other)?;
                if let Some(enabled) = shell.take_mouse_capture_change() {
                    if enabled {
                        execute!(io::stdout(), EnableMouseCapture)?;
                    } else {
                        execute!(io::stdout(), DisableMouseCapture)?;
                    }
                }
            }
        }
        Ok(ControlFlow::Continue)
    })
}
