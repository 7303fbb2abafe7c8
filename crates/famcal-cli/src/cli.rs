//! Interactive REPL
//!
//! Slash commands drive the calendar, lists and session; anything else
//! typed at the prompt goes to the assistant, which turns it into
//! events, shopping items and to-dos.

use nu_ansi_term::{Color, Style};
use reedline::{
    ColumnarMenu, Completer, DefaultHinter, Emacs, KeyCode, KeyModifiers, Keybindings,
    MenuBuilder, Prompt, Reedline, ReedlineEvent, ReedlineMenu, Signal, Suggestion,
};

use crate::commands::{self, App};

/// Available commands for autocomplete display
const COMMANDS: &[(&str, &str)] = &[
    ("/help", "Show this help"),
    ("/exit", "Quit"),
    ("/quit", "Quit"),
    ("/events", "List this month's events (/events all for everything)"),
    ("/day", "Family swim-lane view for today"),
    ("/find", "Ask the assistant for event ideas: /find <query>"),
    ("/shopping", "Show the shopping list"),
    ("/shop", "Add a shopping item: /shop <name> [category]"),
    ("/buy", "Toggle an item bought: /buy <id>"),
    ("/todos", "Show todos"),
    ("/todo", "Add a todo: /todo <title>"),
    ("/done", "Complete a todo: /done <id>"),
    ("/locate", "Search a location: /locate <query>"),
    ("/voice", "Process a recording: /voice <path>"),
    ("/login", "Log in: /login <email> <password>"),
    ("/dev", "Dev login: /dev <email>"),
    ("/logout", "Log out"),
    ("/whoami", "Show the active member"),
];

/// Command completer for reedline
#[derive(Clone)]
pub struct CommandCompleter {
    commands: Vec<(&'static str, &'static str)>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.to_vec(),
        }
    }
}

impl Default for CommandCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for CommandCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        if !line.starts_with('/') {
            return Vec::new();
        }

        self.commands
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(line))
            .map(|(cmd, desc)| Suggestion {
                value: cmd.to_string(),
                description: Some(desc.to_string()),
                extra: None,
                span: reedline::Span::new(0, pos),
                append_whitespace: true,
                style: None,
            })
            .collect()
    }
}

/// Custom prompt with colored styling
struct ColoredPrompt {
    style: Style,
}

impl ColoredPrompt {
    fn new() -> Self {
        Self {
            style: Color::Cyan.bold(),
        }
    }
}

impl Prompt for ColoredPrompt {
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Owned(self.style.paint("famcal> ").to_string())
    }

    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn render_prompt_indicator(
        &self,
        _prompt_mode: reedline::PromptEditMode,
    ) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: reedline::PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }
}

/// Run the interactive REPL.
pub async fn run_repl(mut app: App) -> anyhow::Result<()> {
    print_welcome();

    let mut keybindings = default_keybindings();

    // Trigger completion on '/' key
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Char('/'),
        ReedlineEvent::Edit(vec![reedline::EditCommand::Complete]),
    );

    let menu = Box::new(
        ColumnarMenu::default()
            .with_name("command_menu")
            .with_columns(1)
            .with_column_width(Some(40))
            .with_only_buffer_difference(false),
    );

    let hinter = DefaultHinter::default().with_style(Style::new().dimmed());

    let mut line_editor = Reedline::create()
        .with_completer(Box::new(CommandCompleter::new()))
        .with_menu(ReedlineMenu::EngineCompleter(menu))
        .with_hinter(Box::new(hinter))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    let prompt = ColoredPrompt::new();

    loop {
        let signal = line_editor.read_line(&prompt);

        match signal {
            Ok(Signal::Success(line)) => {
                let input = line.trim();

                if input.is_empty() {
                    continue;
                }

                if matches!(input, "/exit" | "/quit" | "/q") {
                    println!("\nBye!\n");
                    break;
                }

                if let Err(e) = handle_input(&mut app, input).await {
                    eprintln!("\n{}\n", Color::Red.paint(format!("Error: {}", e)));
                }
            }
            Ok(Signal::CtrlC) => {
                println!("^C");
                continue;
            }
            Ok(Signal::CtrlD) => {
                println!("\nBye!\n");
                break;
            }
            Err(err) => {
                eprintln!("\n{}\n", Color::Red.paint(format!("Error: {}", err)));
                break;
            }
        }
    }

    Ok(())
}

/// Default keybindings for reedline
fn default_keybindings() -> Keybindings {
    let mut keybindings = Keybindings::new();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::Edit(vec![reedline::EditCommand::Complete]),
    );
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Enter, ReedlineEvent::Submit);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Esc, ReedlineEvent::Esc);
    keybindings.add_binding(
        KeyModifiers::CONTROL,
        KeyCode::Char('c'),
        ReedlineEvent::CtrlC,
    );
    keybindings.add_binding(
        KeyModifiers::CONTROL,
        KeyCode::Char('d'),
        ReedlineEvent::CtrlD,
    );
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Up, ReedlineEvent::Up);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Down, ReedlineEvent::Down);
    keybindings
}

/// Route one line of input: slash commands, otherwise the assistant.
async fn handle_input(app: &mut App, input: &str) -> crate::error::Result<()> {
    if !input.starts_with('/') {
        return commands::interact(app, input).await;
    }

    let mut parts = input.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();

    match command {
        "/help" | "/?" => {
            print_help();
            Ok(())
        }
        "/events" => commands::list_events(app, rest.first() == Some(&"all")).await,
        "/day" => commands::family_day(app).await,
        "/find" => {
            let query = rest.join(" ");
            if query.is_empty() {
                println!("Usage: /find <query>");
                return Ok(());
            }
            commands::find(app, &query).await
        }
        "/shopping" => commands::shopping_list(app).await,
        "/shop" => match rest.split_first() {
            Some((name, extra)) => {
                let category = extra.first().copied();
                commands::add_shopping(app, name, category).await
            }
            None => {
                println!("Usage: /shop <name> [category]");
                Ok(())
            }
        },
        "/buy" => match rest.first().and_then(|s| s.parse().ok()) {
            Some(id) => commands::toggle_bought(app, id).await,
            None => {
                println!("Usage: /buy <id>");
                Ok(())
            }
        },
        "/todos" => commands::list_todos(app).await,
        "/todo" => {
            let title = rest.join(" ");
            if title.is_empty() {
                println!("Usage: /todo <title>");
                return Ok(());
            }
            commands::add_todo(app, &title).await
        }
        "/done" => match rest.first().and_then(|s| s.parse().ok()) {
            Some(id) => commands::complete_todo(app, id).await,
            None => {
                println!("Usage: /done <id>");
                Ok(())
            }
        },
        "/locate" => {
            let query = rest.join(" ");
            if query.is_empty() {
                println!("Usage: /locate <query>");
                return Ok(());
            }
            commands::locate(app, &query).await
        }
        "/voice" => match rest.first() {
            Some(path) => commands::voice(app, path).await,
            None => {
                println!("Usage: /voice <path>");
                Ok(())
            }
        },
        "/login" => match rest.as_slice() {
            [email, password] => commands::login(app, email, password).await,
            _ => {
                println!("Usage: /login <email> <password>");
                Ok(())
            }
        },
        "/dev" => match rest.first() {
            Some(email) => commands::dev_login(app, email).await,
            None => {
                println!("Usage: /dev <email>");
                Ok(())
            }
        },
        "/logout" => commands::logout(app).await,
        "/whoami" => commands::whoami(app).await,
        _ => {
            eprintln!("Unknown command: {}. See /help for the list.", command);
            Ok(())
        }
    }
}

/// One-shot mode: run a single utterance through the assistant and exit.
pub async fn run_ask(app: App, prompt: &str) -> anyhow::Result<()> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        eprintln!("Error: empty prompt");
        std::process::exit(1);
    }

    match commands::interact(&app, prompt).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print welcome message
fn print_welcome() {
    println!();
    println!("famcal - family calendar");
    println!("Type what needs to happen (\"soccer Tuesday 5pm, buy milk\") and Enter.");
    println!("Commands: /help, /events, /day, /shopping, /todos, /exit");
    println!("Typing / shows the command menu.");
    println!();
}

/// Print help message
fn print_help() {
    println!();
    println!("Available commands:");
    for (cmd, desc) in COMMANDS {
        println!("  {:<10} {}", cmd, desc);
    }
    println!();
    println!("Anything that is not a command is sent to the assistant.");
    println!();
}
