use personal_finance_advisor::advisor::{AdvisorSession, NEXT_QUESTION_DELAY};
use personal_finance_advisor::conversation::Sender;
use std::io::{self, BufRead, Write};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    info!("Personal Finance Advisor starting");

    println!("Personal Finance Advisor — ask about saving, budgeting, investing,");
    println!("debt, retirement, or type 'quiz'. 'reset' clears the chat, 'exit' quits.\n");

    let mut session = AdvisorSession::new();
    let stdin = io::stdin();

    loop {
        print!("you> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        match input {
            "" => continue,
            "exit" | "quit" => break,
            "reset" => {
                session.reset();
                println!("(chat reset)\n");
                continue;
            }
            _ => {}
        }

        let reply = session.handle_message(input);
        for message in &reply.messages {
            if message.sender == Sender::Advisor {
                println!("advisor> {}\n", message.text);
            }
        }

        // The next quiz question appears after the same fixed delay the
        // dashboard uses.
        if let Some(question) = reply.delayed_question {
            tokio::time::sleep(NEXT_QUESTION_DELAY).await;
            let message = session.append_advisor(&question);
            println!("advisor> {}\n", message.text);
        }
    }

    Ok(())
}
