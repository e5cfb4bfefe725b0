//! Slot Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlImageElement, KeyboardEvent};

    use slot_runner::render::canvas::{CanvasSurface, load_sprites};
    use slot_runner::render::{Sprites, StartupError};
    use slot_runner::{Game, GameConfig};

    struct App {
        game: Game,
        surface: CanvasSurface,
        sprites: Sprites<HtmlImageElement>,
        last_time: f64,
    }

    pub fn run() -> Result<(), StartupError> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Slot Runner starting...");

        let surface = CanvasSurface::from_element_id("gameCanvas")?;

        let sprites = load_sprites();
        sprites.report_missing();

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(GameConfig::default(), seed),
            surface,
            sprites,
            last_time: 0.0,
        }));

        setup_input_handlers(app.clone());
        request_animation_frame(app);

        log::info!("Slot Runner running!");
        Ok(())
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.code() == "Space" {
                // Keep the page from scrolling
                event.prevent_default();
                app.borrow_mut().game.request_jump();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut guard = app.borrow_mut();
            let App {
                game,
                surface,
                sprites,
                last_time,
            } = &mut *guard;

            let dt = if *last_time > 0.0 {
                ((time - *last_time) / 1000.0) as f32
            } else {
                0.0
            };
            *last_time = time;

            game.update(dt);
            game.render(surface, sprites);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native_game {
    use std::io::{Stdout, Write, stdout};
    use std::path::PathBuf;
    use std::sync::mpsc::{self, Receiver, TryRecvError};
    use std::thread;
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use clap::Parser;
    use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
    use crossterm::{cursor, execute, queue, style, terminal};
    use glam::Vec2;

    use slot_runner::render::terminal::{Glyph, TerminalSurface};
    use slot_runner::render::{Color, Sprites, StartupError};
    use slot_runner::{Game, GameConfig};

    /// Jump the slot machines in your terminal
    #[derive(Parser, Debug)]
    #[command(
        name = "slot-runner",
        version,
        about,
        after_help = "Logs are written to stderr, which shares the game screen. \
                      Set RUST_LOG for the level and redirect stderr to keep them \
                      out of the frame, e.g. `slot-runner 2>slot-runner.log`."
    )]
    pub struct Args {
        /// JSON file overriding the default field and physics settings
        #[arg(long)]
        pub config: Option<PathBuf>,
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        pub seed: Option<u64>,
    }

    /// Commands from the input thread
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Command {
        Jump,
        Quit,
    }

    /// Raw mode + alternate screen for as long as it lives
    struct TerminalGuard {
        out: Stdout,
    }

    impl TerminalGuard {
        fn enter() -> Result<Self, StartupError> {
            let mut out = stdout();
            terminal::enable_raw_mode()?;
            execute!(
                out,
                terminal::EnterAlternateScreen,
                terminal::Clear(terminal::ClearType::All),
                cursor::Hide
            )?;
            Ok(Self { out })
        }
    }

    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }

    pub fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
        let config = match &args.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        let seed = args.seed.unwrap_or_else(clock_seed);
        let field = Vec2::new(config.field_width, config.field_height);
        let tick_duration = config.tick_duration();

        let mut game = Game::new(config, seed);
        let sprites = Sprites {
            player: Some(Glyph::new('@', Color::White)),
            defeated: Some(Glyph::new('_', Color::Red)),
            obstacle: Some(Glyph::new('$', Color::Green)),
        };

        let mut guard = TerminalGuard::enter()?;
        let mut surface = TerminalSurface::fit_terminal(field)?;
        let commands = spawn_input_thread();

        let mut last = Instant::now();
        loop {
            let frame_start = Instant::now();

            // Drain input gathered since the last frame
            loop {
                match commands.try_recv() {
                    Ok(Command::Jump) => game.request_jump(),
                    Ok(Command::Quit) | Err(TryRecvError::Disconnected) => {
                        log::info!("Quit requested, final score {}", game.state().score);
                        return Ok(());
                    }
                    Err(TryRecvError::Empty) => break,
                }
            }

            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;
            game.update(dt);

            game.render(&mut surface, &sprites);
            surface.present(&mut guard.out)?;
            draw_status(&mut guard.out, &game, surface.size().1)?;

            if let Some(wait) = tick_duration.checked_sub(frame_start.elapsed()) {
                thread::sleep(wait);
            }
        }
    }

    fn draw_status(out: &mut impl Write, game: &Game, row: u16) -> std::io::Result<()> {
        let text = if game.state().is_game_over() {
            "Game over. q / Esc to quit"
        } else {
            "Space / Up to jump, q / Esc to quit"
        };
        queue!(
            out,
            cursor::MoveTo(0, row),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(text)
        )?;
        out.flush()
    }

    /// Reads key events on a background thread and forwards them as commands
    fn spawn_input_thread() -> Receiver<Command> {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            loop {
                let command = match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') => Some(Command::Jump),
                        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            Some(Command::Quit)
                        }
                        _ => None,
                    },
                    Ok(_) => None,
                    Err(e) => {
                        log::error!("Input error: {}", e);
                        Some(Command::Quit)
                    }
                };
                if let Some(command) = command {
                    let quit = command == Command::Quit;
                    if tx.send(command).is_err() || quit {
                        break;
                    }
                }
            }
        });
        rx
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use clap::CommandFactory;

        #[test]
        fn test_cli_definition() {
            Args::command().debug_assert();
        }

        #[test]
        fn test_help_documents_log_redirect() {
            let help = Args::command().render_help().to_string();
            assert!(help.contains("2>slot-runner.log"), "{}", help);
            assert!(help.contains("RUST_LOG"));
        }

        #[test]
        fn test_parse_seed_and_config() {
            let args = Args::try_parse_from(["slot-runner", "--seed", "7", "--config", "a.json"]).unwrap();
            assert_eq!(args.seed, Some(7));
            assert_eq!(args.config, Some(PathBuf::from("a.json")));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use clap::Parser;

    // Stderr shares the game screen; see the --help text
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("Slot Runner (native) starting...");

    let args = native_game::Args::parse();
    native_game::run(args)
}
