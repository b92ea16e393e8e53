//! Interactive chat loop.

use std::io::Write;

use argus_ai::{Session, SessionConfigPatch};
use argus_common::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::{display_model, print_chunk};

const HELP: &str = "commands: /clear /history /status /model <id> /quit";

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Message(&'a str),
    Clear,
    History,
    Status,
    Model(&'a str),
    Quit,
    Empty,
    Unknown(&'a str),
}

pub fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Input::Message(line);
    };

    let (command, arg) = rest
        .split_once(char::is_whitespace)
        .map(|(c, a)| (c, a.trim()))
        .unwrap_or((rest, ""));

    match command {
        "clear" => Input::Clear,
        "history" => Input::History,
        "status" => Input::Status,
        "model" if !arg.is_empty() => Input::Model(arg),
        "quit" | "exit" => Input::Quit,
        _ => Input::Unknown(line),
    }
}

pub async fn run(mut session: Session, stream: bool) -> Result<()> {
    println!(
        "Argus chat (model: {}). {HELP}",
        display_model(&session.config().model)
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_input(&line) {
            Input::Empty => {}
            Input::Quit => break,
            Input::Clear => {
                session.clear_history();
                println!("history cleared");
            }
            Input::History => println!("{} messages", session.history_len()),
            Input::Status => {
                let available = session.check_status().await;
                println!(
                    "AI service: {}",
                    if available { "available" } else { "unavailable" }
                );
            }
            Input::Model(model) => {
                session.update_config(SessionConfigPatch::model(model));
                println!("model set to {model}; history cleared");
            }
            Input::Unknown(command) => println!("unknown command {command}; {HELP}"),
            Input::Message(text) => {
                let result = if stream {
                    let result = session.send_streaming(text, print_chunk).await;
                    println!();
                    result
                } else {
                    session.send(text).await.map(|reply| {
                        println!("{reply}");
                        reply
                    })
                };
                if let Err(e) = result {
                    println!("error: {e}");
                }
            }
        }
    }

    tracing::debug!(session = session.id().short(), "chat loop finished");
    Ok(())
}
