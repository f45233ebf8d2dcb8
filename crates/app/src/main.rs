mod commands;
mod render;

use std::path::PathBuf;

use clap::Parser;
use services::{AppServices, Clock, ReplyOutcome, TutorConfig};
use storage::repository::Storage;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use ui::{AppContext, Route, build_app_context};

use crate::commands::{Command, HELP};
use crate::render::{render_chat, render_view};

#[derive(Parser, Debug)]
#[command(
    name = "np-tutor",
    about = "Nurse Practitioner exam practice with an AI tutor"
)]
struct Args {
    /// JSON question file; the bundled sample set is used when omitted
    #[arg(long, env = "NP_TUTOR_QUESTIONS")]
    questions: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // .env must be loaded before clap reads `env = ...` defaults.
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_tracing(args.verbose);

    let storage = match &args.questions {
        Some(path) => Storage::json_file(path),
        None => Storage::bundled(),
    };
    let config = TutorConfig::from_env();
    if config.api.is_none() {
        tracing::warn!("NP_TUTOR_API_KEY is not set; AI tutor disabled");
    }

    let services = AppServices::new(&storage, &config, Clock::default()).await?;
    let mut ctx = build_app_context(&services);

    println!("{}", render_view(&ctx));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        handle(&mut ctx, command).await;
    }

    tracing::info!("session ended");
    Ok(())
}

async fn handle(ctx: &mut AppContext, command: Command) {
    match command {
        Command::Login(email) => {
            ctx.login(&email);
            tracing::info!(route = %ctx.route(), "logged in");
            println!("{}", render_view(ctx));
        }
        Command::Logout => {
            ctx.logout();
            println!("{}", render_view(ctx));
        }
        Command::Go(route) => {
            let landed = ctx.navigate(route);
            if landed != route && route != Route::Root {
                println!("(redirected to {landed})");
            }
            println!("{}", render_view(ctx));
        }
        Command::Show => println!("{}", render_view(ctx)),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
        other => {
            if ctx.route() != Route::Exams {
                println!("Open the question page first with `go exams`.");
                return;
            }
            handle_exam(ctx, other).await;
        }
    }
}

async fn handle_exam(ctx: &mut AppContext, command: Command) {
    match command {
        Command::Next => {
            ctx.next_question();
            println!("{}", render_view(ctx));
        }
        Command::Prev => {
            ctx.previous_question();
            println!("{}", render_view(ctx));
        }
        Command::Select(key) => match ctx.select_answer(&key) {
            Ok(()) => println!("{}", render_view(ctx)),
            Err(err) => println!("{err}"),
        },
        Command::Explain => {
            println!("Asking the tutor...");
            let result = ctx.explain().await;
            report_reply(ctx, result);
        }
        Command::Ask(text) => {
            if !ctx.session().is_chat_open() {
                ctx.session_mut().toggle_chat();
            }
            let result = ctx.ask(&text).await;
            report_reply(ctx, result);
        }
        Command::ToggleChat => {
            ctx.session_mut().toggle_chat();
            println!("{}", render_view(ctx));
        }
        Command::ClearChat => {
            ctx.session_mut().clear_chat();
            println!("Chat cleared.");
        }
        _ => {}
    }
}

fn report_reply(ctx: &AppContext, result: Result<ReplyOutcome, services::TutorError>) {
    match result {
        Ok(ReplyOutcome::Applied(_)) => println!("{}", render_chat(&ctx.chat_vm())),
        Ok(ReplyOutcome::Stale) => {
            println!("(reply arrived for a previous question and was dropped)");
        }
        Err(err) => println!("Sorry: {err}. Please try again."),
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
