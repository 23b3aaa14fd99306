//! Terminal front-end: one readline per turn, and a field-by-field prompt
//! while the booking form is open.

use std::sync::Arc;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::models::{BookingForm, Session};
use crate::services::calendar::GoogleCalendar;
use crate::services::conversation;
use crate::state::AppState;

const FAREWELLS: &[&str] = &["bye", "quit", "stop", "exit"];
const CANCEL: &str = "cancel";

pub fn is_farewell(text: &str) -> bool {
    let normalized = text.trim().trim_end_matches(['!', '.']).to_lowercase();
    FAREWELLS.contains(&normalized.as_str())
}

pub async fn run_chat(state: Arc<AppState>) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;
    let (session_id, handle) = state.sessions.get_or_create(None);
    let mut session = handle.lock().await;
    tracing::debug!(session = %session_id, "terminal chat started");

    println!("Agent: {}\n", state.brand.welcome);

    loop {
        match rl.readline("You: ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                if is_farewell(trimmed) {
                    println!("Agent: Take care! See you soon!");
                    break;
                }

                let outcome = conversation::process_message(&state, &mut session, trimmed).await;
                println!("Agent: {}\n", outcome.reply);

                if session.show_schedule_form() {
                    collect_form(&mut rl, &state, &mut session).await?;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Agent: Take care! See you soon!");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    state.sessions.remove(&session_id);
    Ok(())
}

enum FieldInput {
    Value(Option<String>),
    Cancel,
}

fn read_field(rl: &mut DefaultEditor, label: &str, current: Option<&str>) -> anyhow::Result<FieldInput> {
    let prompt = match current.filter(|c| !c.is_empty()) {
        Some(c) => format!("  {label} [{c}]: "),
        None => format!("  {label}: "),
    };
    match rl.readline(&prompt) {
        Ok(line) => {
            let value = line.trim();
            if value.eq_ignore_ascii_case(CANCEL) {
                Ok(FieldInput::Cancel)
            } else if value.is_empty() {
                Ok(FieldInput::Value(None))
            } else {
                Ok(FieldInput::Value(Some(value.to_string())))
            }
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(FieldInput::Cancel),
        Err(e) => Err(e.into()),
    }
}

async fn collect_form(
    rl: &mut DefaultEditor,
    state: &AppState,
    session: &mut Session,
) -> anyhow::Result<()> {
    println!("  (press Enter to keep the value in brackets, type '{CANCEL}' to close the form)");

    while session.show_schedule_form() {
        let current = session.form.clone();
        let fields: [(&str, Option<&str>); 9] = [
            ("Name", current.name.as_deref()),
            ("Email", current.email.as_deref()),
            ("Preferred date (YYYY-MM-DD)", current.date.as_deref()),
            ("Preferred time (HH:MM)", current.time.as_deref()),
            ("Timezone", Some(current.timezone())),
            ("GMT offset", Some(current.gmt_offset())),
            (
                "Location (inPerson, online, phone)",
                current.location.as_deref().or(Some("inPerson")),
            ),
            ("Meeting title", Some(current.title(&state.brand.meeting_title))),
            ("Description", current.description.as_deref()),
        ];

        let mut answers = Vec::with_capacity(fields.len());
        for (label, shown) in fields {
            match read_field(rl, label, shown)? {
                FieldInput::Value(v) => answers.push(v),
                FieldInput::Cancel => {
                    let outcome = conversation::dismiss_form(state, session)?;
                    println!("Agent: {}\n", outcome.reply);
                    return Ok(());
                }
            }
        }

        let mut answers = answers.into_iter();
        let mut next = || answers.next().flatten();
        let update = BookingForm {
            name: next(),
            email: next(),
            date: next(),
            time: next(),
            timezone: next(),
            gmt_offset: next(),
            location: next(),
            title: next(),
            description: next(),
        };

        println!("Agent: Scheduling your appointment...");
        let outcome = conversation::submit_form(state, session, update).await?;
        println!("Agent: {}\n", outcome.reply);
    }

    Ok(())
}

pub async fn print_upcoming(calendar: &GoogleCalendar) -> anyhow::Result<()> {
    let events = calendar.upcoming_events().await?;
    if events.is_empty() {
        println!("No upcoming events found");
        return Ok(());
    }
    for event in events {
        println!("{} {}", event.start, event.summary);
    }
    Ok(())
}
