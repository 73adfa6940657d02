use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing::info;

use minelab::app::{App, View};
use minelab::cli::{self, Args, Command};
use minelab::config::Config;
use minelab::logging;
use minelab::ui::ui;
use minelab_sdk::HttpTransport;

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(&args)?;
    logging::init(&config.log_file)?;
    info!(api_url = %config.api_url, "Starting minelab");

    if let Some(Command::Submit { analysis }) = &args.command {
        return run_headless(analysis, &config);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run main loop
    let res = App::new(config).and_then(|mut app| run_app(&mut terminal, &mut app));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_headless(analysis: &cli::SubmitCommand, config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let transport = HttpTransport::new(config.api_url.clone(), config.timeout)
        .context("Failed to build HTTP client")?;

    let lines = runtime.block_on(cli::run_submit(
        analysis,
        &transport,
        &config.endpoints,
        &config.api_url,
    ))?;
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Apply finished requests and expire the banner
        app.tick();

        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    // Close confirmation dialog
                    if app.show_close_confirmation {
                        match key.code {
                            KeyCode::Char('y') | KeyCode::Char('Y') => {
                                app.close_tab_confirmed();
                            }
                            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                                app.cancel_close_tab();
                            }
                            _ => {}
                        }
                    }
                    // History dropdown
                    else if app.show_dropdown {
                        match key.code {
                            KeyCode::Down | KeyCode::Tab => app.dropdown_next(),
                            KeyCode::Up | KeyCode::BackTab => app.dropdown_previous(),
                            KeyCode::Enter => app.dropdown_select(),
                            KeyCode::Esc => app.close_dropdown(),
                            _ => {}
                        }
                    }
                    // File browser mode
                    else if app.show_file_browser {
                        match key.code {
                            KeyCode::Down => app.file_browser_next(),
                            KeyCode::Up => app.file_browser_previous(),
                            KeyCode::Enter => app.file_browser_select(),
                            KeyCode::Esc => app.close_file_browser(),
                            KeyCode::Char(c) => app.file_browser_search_push(c),
                            KeyCode::Backspace => app.file_browser_search_pop(),
                            _ => {}
                        }
                    }
                    // Handle text input mode
                    else if app.is_editing {
                        match key.code {
                            KeyCode::Char(c) => app.edit_buffer.push(c),
                            KeyCode::Backspace => {
                                app.edit_buffer.pop();
                            }
                            KeyCode::Enter => app.save_edited_field(),
                            KeyCode::Esc => app.cancel_editing(),
                            KeyCode::Tab => app.show_history_dropdown(),
                            _ => {}
                        }
                    } else {
                        handle_normal_key(app, key.code, key.modifiers);
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_normal_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (app.current_view, code) {
        (_, KeyCode::Char('q')) | (_, KeyCode::Char('Q')) => app.should_quit = true,
        (_, KeyCode::Char('d')) => app.banner.dismiss(),
        (_, KeyCode::Tab) => app.next_tab(),
        (_, KeyCode::BackTab) => app.previous_tab(),

        (View::Home, KeyCode::Down) | (View::Home, KeyCode::Char('j')) => app.home_next(),
        (View::Home, KeyCode::Up) | (View::Home, KeyCode::Char('k')) => app.home_previous(),
        (View::Home, KeyCode::Enter) => app.open_selected_screen(),

        (View::Tabs, KeyCode::Down) | (View::Tabs, KeyCode::Char('j')) => app.next_field(),
        (View::Tabs, KeyCode::Up) | (View::Tabs, KeyCode::Char('k')) => app.previous_field(),
        (View::Tabs, KeyCode::Right) => app.cycle_field(true),
        (View::Tabs, KeyCode::Left) => app.cycle_field(false),
        (View::Tabs, KeyCode::Enter) => app.activate_field(),
        (View::Tabs, KeyCode::Char('s')) => app.submit_current_tab(),
        (View::Tabs, KeyCode::Char('e')) => app.export_tree_images(),
        (View::Tabs, KeyCode::PageDown) => app.scroll_result_down(),
        (View::Tabs, KeyCode::PageUp) => app.scroll_result_up(),
        (View::Tabs, KeyCode::Char('c')) => app.close_current_tab(),
        (View::Tabs, KeyCode::Char('w')) if modifiers.contains(KeyModifiers::CONTROL) => {
            app.close_current_tab()
        }
        (View::Tabs, KeyCode::Esc) | (View::Tabs, KeyCode::Char('h')) => app.go_home(),
        _ => {}
    }
}
