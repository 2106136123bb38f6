use async_trait::async_trait;
use std::sync::Arc;
use tourist_chat::collaborator::ChatCollaborator;
use tourist_chat::error::ExchangeFailed;
use tourist_chat::terminal::run_console;
use tourist_chat::widget::{ChatWidget, GREETING, QUICK_REPLIES};

struct Echo;

#[async_trait]
impl ChatCollaborator for Echo {
    async fn exchange(&self, message: &str) -> Result<String, ExchangeFailed> {
        Ok(format!("eco: {message}"))
    }
}

async fn run(script: &str) -> (ChatWidget, String) {
    let mut widget = ChatWidget::new(Arc::new(Echo));
    let mut output = Vec::new();
    run_console(&mut widget, script.as_bytes(), &mut output)
        .await
        .unwrap();
    (widget, String::from_utf8(output).unwrap())
}

#[tokio::test]
async fn test_console_turns() {
    let (widget, output) = run("hola\n   \n/quit\nignored\n").await;

    assert!(output.starts_with(&format!("[guía] {GREETING}\n")));
    assert!(output.contains("[tú] hola\n[guía] eco: hola\n"));
    assert!(!output.contains("ignored"));
    assert_eq!(widget.transcript().len(), 3);
}

#[tokio::test]
async fn test_console_quick_reply() {
    let (widget, output) = run("/quick 1\n").await;

    let expected = format!("[guía] eco: {}\n", QUICK_REPLIES[0]);
    assert!(output.contains(&expected));
    assert_eq!(widget.transcript().len(), 3);
}

#[tokio::test]
async fn test_console_clear_needs_confirmation() {
    let (widget, output) = run("hola\n/clear\nn\n").await;
    assert_eq!(widget.transcript().len(), 3);
    assert!(!output.contains("Chat limpiado."));

    let (widget, output) = run("hola\n/clear\ns\nadiós\n").await;
    assert!(output.contains("Chat limpiado."));
    assert_eq!(widget.transcript().len(), 3);
    assert_eq!(widget.transcript().messages()[1].text(), "adiós");
    assert!(output.ends_with("[tú] adiós\n[guía] eco: adiós\n"));
}

#[tokio::test]
async fn test_console_reports_counter_for_every_line() {
    let (_, output) = run("hola\n").await;
    assert!(output.contains("(4 caracteres)\n[tú] hola\n"));

    let long = "a".repeat(420);
    let (_, output) = run(&format!("{long}\n")).await;
    assert!(output.contains("(420 caracteres, cerca del límite)\n"));

    let longer = "a".repeat(460);
    let (widget, output) = run(&format!("{longer}\n")).await;
    assert!(output.contains("(460 caracteres, límite superado)\n"));
    // Long input is still sent.
    assert_eq!(widget.transcript().len(), 3);
}
