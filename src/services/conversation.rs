use crate::errors::AppError;
use crate::models::{
    BookingForm, BookingRequest, ConversationState, Route, Session, TurnOutcome,
};
use crate::services::ai::intent::{classify, is_affirmative};
use crate::services::{faq, responder};
use crate::state::AppState;

const EMPTY_INPUT_REPLY: &str = "I didn't catch that. How can we assist you today?";
const MISSING_FIELDS_REPLY: &str = "Please fill in all required fields to schedule the appointment.";
const BOOKING_FAILED_REPLY: &str = "Failed to schedule the appointment. Please try again.";
const FORM_CLOSED_REPLY: &str =
    "No problem, the booking form has been closed. Let us know if there's anything else we can assist you with.";

/// Runs one free-text turn against the session and returns the reply.
pub async fn process_message(state: &AppState, session: &mut Session, message: &str) -> TurnOutcome {
    session.push_user(message);
    let previous = session.state;

    let (reply, route) = match session.state {
        ConversationState::AwaitingConfirmation => {
            if is_affirmative(message) {
                session.state = ConversationState::CollectingForm;
                session.form = BookingForm::default();
                (state.brand.form_prompt(), None)
            } else {
                session.state = ConversationState::Idle;
                (state.brand.decline.clone(), None)
            }
        }

        // Free text while the form is open: the form itself is how fields arrive.
        ConversationState::CollectingForm => (
            format!(
                "The booking form is still open. {}",
                state.brand.form_prompt()
            ),
            None,
        ),

        ConversationState::Idle => {
            let route = classify(message);
            let reply = match route {
                Route::Schedule => {
                    session.state = ConversationState::AwaitingConfirmation;
                    state.brand.schedule_offer.clone()
                }
                Route::Services => faq::answer(&state.brand, message).to_string(),
                Route::Conversation if message.trim().is_empty() => EMPTY_INPUT_REPLY.to_string(),
                Route::Conversation => {
                    responder::respond(state.llm.as_ref(), &state.brand.persona, message).await
                }
            };
            (reply, Some(route))
        }
    };

    tracing::info!(
        session = %session.id,
        route = route.map(|r| r.as_str()).unwrap_or("-"),
        from = previous.as_str(),
        to = session.state.as_str(),
        "processed message"
    );

    finish_turn(state, session, reply, route, None)
}

/// Applies a booking-form submission. Only valid while the form is open.
pub async fn submit_form(
    state: &AppState,
    session: &mut Session,
    update: BookingForm,
) -> Result<TurnOutcome, AppError> {
    if session.state != ConversationState::CollectingForm {
        return Err(AppError::FormNotOpen);
    }

    session.form.merge(update);

    let missing = session.form.missing_required();
    if !missing.is_empty() {
        tracing::info!(session = %session.id, missing = ?missing, "booking form incomplete");
        let reply = format!("{MISSING_FIELDS_REPLY} Missing: {}.", missing.join(", "));
        return Ok(finish_turn(state, session, reply, None, None));
    }

    let prepared = session.form.start_iso().and_then(|start| {
        let location = session.form.meeting_location()?;
        Ok((start, location))
    });
    let (start, location) = match prepared {
        Ok(prepared) => prepared,
        Err(e) => {
            tracing::info!(session = %session.id, error = %e, "booking form invalid");
            let reply = format!("There's a problem with the form: {e}.");
            return Ok(finish_turn(state, session, reply, None, None));
        }
    };

    let form = &session.form;
    let name = form.name.clone().unwrap_or_default();
    let email = form.email.clone().unwrap_or_default();
    let title = form.title(&state.brand.meeting_title).to_string();

    let request = match BookingRequest::new(
        state.event_type_id(),
        &name,
        &email,
        &start,
        location,
        &title,
        form.description(),
        form.timezone(),
    ) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(session = %session.id, error = %e, "could not build booking request");
            let reply = format!("There's a problem with the form: {e}.");
            return Ok(finish_turn(state, session, reply, None, None));
        }
    };

    tracing::info!(
        session = %session.id,
        event_type = request.event_type_id,
        start = %request.start_iso(),
        end = %request.end_iso(),
        "creating booking"
    );

    let (reply, booking) = match state.booking.create_booking(&request).await {
        Ok(confirmation) => {
            tracing::info!(session = %session.id, uid = ?confirmation.uid(), "booking created");
            let date = request.start.format("%Y-%m-%d");
            let time = request.start.format("%H:%M:%S");
            let reply = format!(
                "Appointment scheduled successfully!\n\n\
                 Details:\n\
                 - Name: {name}\n\
                 - Date: {date}\n\
                 - Time: {time} GMT{offset}\n\
                 - Location: {location}\n\
                 - Title: {title}\n\n\
                 Please check your email ({email}) for confirmation details.",
                offset = request.start.format("%:z"),
                location = location.as_str(),
            );
            (reply, Some(confirmation.payload))
        }
        Err(e) => {
            tracing::warn!(session = %session.id, error = %e, "booking failed");
            let reply = match e.provider_message() {
                Some(message) => format!("{BOOKING_FAILED_REPLY} ({message})"),
                None => BOOKING_FAILED_REPLY.to_string(),
            };
            (reply, None)
        }
    };

    session.reset();
    Ok(finish_turn(state, session, reply, None, booking))
}

/// Closes an open booking form without booking anything.
pub fn dismiss_form(state: &AppState, session: &mut Session) -> Result<TurnOutcome, AppError> {
    if session.state != ConversationState::CollectingForm {
        return Err(AppError::FormNotOpen);
    }
    session.reset();
    tracing::info!(session = %session.id, "booking form dismissed");
    Ok(finish_turn(state, session, FORM_CLOSED_REPLY.to_string(), None, None))
}

fn finish_turn(
    state: &AppState,
    session: &mut Session,
    reply: String,
    route: Option<Route>,
    booking: Option<serde_json::Value>,
) -> TurnOutcome {
    session.push_assistant(&reply);
    session.touch(state.sessions.ttl());
    TurnOutcome {
        reply,
        route,
        state: session.state,
        booking,
    }
}
