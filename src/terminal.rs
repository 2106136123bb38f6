//! Line-oriented front end that drives a [`ChatWidget`].
//!
//! Each input line is one event: plain text is typed into the field and
//! sent, `/quick N` sends a suggested reply, `/clear` asks before clearing,
//! `/help` lists the suggestions and `/quit` leaves.

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::widget::{
    CharCounter, ChatWidget, Confirmation, QUICK_REPLIES, Sender, Severity, render_transcript,
};

const CLEAR_PROMPT: &str = "¿Estás seguro de que quieres limpiar el chat? [s/N] ";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Text(String),
    Quick(usize),
    Clear,
    Help,
    Quit,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.split_once(' ').map_or((trimmed, ""), |(c, rest)| (c, rest.trim())) {
            ("/quit" | "/salir", _) => Self::Quit,
            ("/clear" | "/limpiar", _) => Self::Clear,
            ("/help" | "/ayuda", _) => Self::Help,
            ("/quick", arg) => arg
                .parse()
                .map_or(Self::Help, Self::Quick),
            _ => Self::Text(line.to_string()),
        }
    }
}

/// Whether a prompt answer accepts.
pub fn parse_confirmation(answer: Option<&str>) -> Confirmation {
    match answer.map(|a| a.trim().to_lowercase()).as_deref() {
        Some("s" | "si" | "sí" | "y" | "yes") => Confirmation::Accepted,
        _ => Confirmation::Declined,
    }
}

/// Run the console until `/quit` or end of input.
pub async fn run_console<R, W>(widget: &mut ChatWidget, input: R, mut output: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut shown = 0;

    print_new_messages(widget, &mut shown, &mut output).await?;
    print_quick_replies(&mut output).await?;

    while let Some(line) = lines.next_line().await? {
        match ConsoleCommand::parse(&line) {
            ConsoleCommand::Quit => break,
            ConsoleCommand::Help => print_quick_replies(&mut output).await?,
            ConsoleCommand::Clear => {
                output.write_all(CLEAR_PROMPT.as_bytes()).await?;
                output.flush().await?;
                let answer = lines.next_line().await?;
                let confirmation = parse_confirmation(answer.as_deref());
                widget.clear_transcript(confirmation);
                if confirmation == Confirmation::Accepted {
                    shown = widget.transcript().len();
                    output.write_all(b"Chat limpiado.\n").await?;
                }
            }
            ConsoleCommand::Quick(n) => match n.checked_sub(1).and_then(|i| QUICK_REPLIES.get(i)) {
                Some(preset) => {
                    widget.quick_submit(preset).await;
                }
                None => print_quick_replies(&mut output).await?,
            },
            ConsoleCommand::Text(text) => {
                widget.set_input(text);
                output.write_all(counter_line(widget.counter()).as_bytes()).await?;
                widget.send_input().await;
            }
        }

        print_new_messages(widget, &mut shown, &mut output).await?;
    }

    output.flush().await
}

/// Run the console on stdin/stdout.
pub async fn run_stdio(widget: &mut ChatWidget) -> io::Result<()> {
    let stdin = io::BufReader::new(io::stdin());
    run_console(widget, stdin, io::stdout()).await
}

async fn print_new_messages<W>(widget: &ChatWidget, shown: &mut usize, output: &mut W) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let bubbles = render_transcript(widget.transcript());
    for bubble in bubbles.iter().skip(*shown) {
        let who = match bubble.sender {
            Sender::User => "tú",
            Sender::Bot => "guía",
        };
        output
            .write_all(format!("[{who}] {}\n", bubble.text).as_bytes())
            .await?;
    }
    *shown = bubbles.len();
    output.flush().await
}

/// Counter of a typed line, marked once it nears or passes the limit.
fn counter_line(counter: CharCounter) -> String {
    match counter.severity {
        Severity::Normal => format!("({} caracteres)\n", counter.count),
        Severity::Warning => format!("({} caracteres, cerca del límite)\n", counter.count),
        Severity::Critical => format!("({} caracteres, límite superado)\n", counter.count),
    }
}

async fn print_quick_replies<W>(output: &mut W) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut text = String::from("Sugerencias (/quick N):\n");
    for (i, preset) in QUICK_REPLIES.iter().enumerate() {
        text.push_str(&format!("  {}. {preset}\n", i + 1));
    }
    output.write_all(text.as_bytes()).await
}
