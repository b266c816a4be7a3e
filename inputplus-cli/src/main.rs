use std::time::Duration;

use inputplus::{
    Prompt, PromptError, Response,
    asynchronous::AsyncTerminal,
    kinds::{Bounds, Date, Int, Menu, MenuStyle, Url, YesNo},
    utils::Terminal,
};
use clap::Parser;
use log::info;

#[derive(Parser)]
#[command(version, about = "Interactive tour of the inputplus prompts", long_about = None)]
struct Cli {
    /// Ask through the tokio driver, where timeouts cancel the pending read
    #[arg(long = "async")]
    use_async: bool,

    /// Stop waiting for stdin at each prompt's timeout (blocking mode)
    #[arg(long, conflicts_with = "use_async")]
    interruptible: bool,
}

fn banner() {
    println!("---------------------------------------------------------------");
    println!("  ██ ███    ██ ██████  ██    ██ ████████ ██████  ██      ██    ██");
    println!("  ██ ████   ██ ██   ██ ██    ██    ██    ██   ██ ██      ██    ██");
    println!("  ██ ██ ██  ██ ██████  ██    ██    ██    ██████  ██      ██    ██");
    println!("  ██ ██  ██ ██ ██      ██    ██    ██    ██      ██      ██    ██");
    println!("  ██ ██   ████ ██       ██████     ██    ██      ███████  ██████ ");
    println!("                      VERSION: {}", env!("CARGO_PKG_VERSION"));
    println!("---------------------------------------------------------------");
}

fn show<T: std::fmt::Display>(label: &str, answer: Result<Response<T>, PromptError>) {
    match answer {
        Ok(Response::Default(value)) => println!("{}: {} (default)", label, value),
        Ok(response) => println!("{}: {}", label, response),
        Err(e) => eprintln!("{}: {}", label, e),
    }
}

fn blocking(interruptible: bool) -> Result<(), PromptError> {
    let mut terminal = if interruptible {
        Terminal::stdin_interruptible()
    } else {
        Terminal::stdin()
    };

    let name = terminal
        .input_str(Prompt::new("What is your name? ").block_with(r"\d", "Names have no digits."));
    show("Name", name);

    let age = terminal.ask(
        Prompt::new("How old are you? ").limit(3).default_value(30),
        Int::new(Bounds::new().min(0).less_than(150)),
    );
    show("Age", age);

    let pet = terminal.ask(
        Prompt::default(),
        Menu::new(["dog", "cat", "moose"]).style(MenuStyle::Numbered),
    )?;
    show("Pet", Ok(pet));

    let birthday = terminal.ask(
        Prompt::new("Birthday (mm/dd/yyyy): ").blank(true),
        Date::default(),
    );
    show("Birthday", birthday);

    let url = terminal.ask(Prompt::new("Favorite website: ").allow("none"), Url);
    show("Website", url);

    let state = terminal.input_us_state(Prompt::new("Home state: ").limit(3), true);
    show("State", state);

    match terminal.input_password(Prompt::new("Choose a password: ").limit(2), Some('*')) {
        Ok(password) => {
            let typed = password.value().map(String::as_str).or(password.text());
            println!("Password: {} characters", typed.map_or(0, |p| p.chars().count()));
        }
        Err(e) => eprintln!("Password: {}", e),
    }

    let again = terminal.ask(
        Prompt::new("Finished? (yes/no, 10s) ")
            .timeout(Duration::from_secs(10))
            .default_value("yes".to_string()),
        YesNo::default(),
    );
    show("Finished", again);
    Ok(())
}

async fn asynchronous() -> Result<(), PromptError> {
    let mut terminal = AsyncTerminal::stdin();

    let threads = terminal
        .ask(
            Prompt::new("Worker threads (1-16, 15s): ")
                .timeout(Duration::from_secs(15))
                .default_value(4),
            Int::new(Bounds::new().min(1).max(16)),
        )
        .await;
    show("Threads", threads);

    let again = terminal
        .ask(
            Prompt::new("Start? ").limit(2).default_value("no".to_string()),
            YesNo::default(),
        )
        .await?;
    show("Start", Ok(again));
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    banner();
    info!("async: {}, interruptible: {}", cli.use_async, cli.interruptible);

    let result = if cli.use_async {
        asynchronous().await
    } else {
        tokio::task::block_in_place(|| blocking(cli.interruptible))
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
