//! SafeSpace terminal chat client.
//!
//! Keeps the session transcript in memory and re-renders it after every
//! exchange. The backend holds no history; this transcript is the only
//! record of the conversation and dies with the process.

use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct AskRequest {
    message: String,
}

#[derive(Debug, Deserialize)]
struct AskResponse {
    response: String,
    tool_called: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    User,
    Assistant,
}

struct TranscriptEntry {
    role: Role,
    content: String,
}

fn main() -> anyhow::Result<()> {
    let backend_url = std::env::var("SAFESPACE_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8000/ask".to_string());

    let client = reqwest::blocking::Client::new();
    let mut transcript: Vec<TranscriptEntry> = Vec::new();

    println!("SafeSpace - what's on your mind today? (Ctrl-D to quit)");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }

        transcript.push(TranscriptEntry {
            role: Role::User,
            content: message.to_string(),
        });

        let reply = client
            .post(&backend_url)
            .json(&AskRequest {
                message: message.to_string(),
            })
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json::<AskResponse>());

        match reply {
            Ok(reply) => {
                transcript.push(TranscriptEntry {
                    role: Role::Assistant,
                    content: annotate(&reply.response, &reply.tool_called),
                });
            }
            Err(e) => {
                eprintln!("request failed: {}", e);
            }
        }

        render(&transcript);
    }

    Ok(())
}

/// Assistant entries carry a visible annotation of the tool that fired.
fn annotate(response: &str, tool_called: &str) -> String {
    format!("{} WITH TOOL: [{}]", response, tool_called)
}

/// Render the full transcript, oldest entry first.
fn render(transcript: &[TranscriptEntry]) {
    println!();
    for entry in transcript {
        let label = match entry.role {
            Role::User => "you",
            Role::Assistant => "safespace",
        };
        println!("[{}] {}", label, entry.content);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_format_is_stable() {
        assert_eq!(
            annotate("You are not alone.", "emergency_call_tool"),
            "You are not alone. WITH TOOL: [emergency_call_tool]"
        );
        assert_eq!(annotate("Hi.", "None"), "Hi. WITH TOOL: [None]");
    }
}
