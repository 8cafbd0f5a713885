use crate::dtos::HelloResponse;
use crate::startup::AppState;
use axum::{extract::State, Json};
use secrecy::ExposeSecret;

const KEY_PREFIX_LEN: usize = 5;

/// Liveness greeting used by the frontend's connectivity check.
///
/// Clients of the previous backend saw `Hello from FastAPI! OpenAI Key: <5 chars>`.
/// The greeting now names this service and the key suffix is opt-in.
///
/// With `hello.expose_key_prefix` enabled the message ends with
/// ` OpenAI Key: ` and the first five characters of the model API key. That
/// leaks part of a secret and is kept only until existing smoke checks stop
/// depending on it.
pub async fn hello(State(state): State<AppState>) -> Json<HelloResponse> {
    let mut message = "Hello from visit-summary-service!".to_string();

    if state.config.hello.expose_key_prefix {
        let key = state.config.openai.api_key.expose_secret();
        message.push_str(" OpenAI Key: ");
        message.extend(key.chars().take(KEY_PREFIX_LEN));
    }

    Json(HelloResponse { message })
}
