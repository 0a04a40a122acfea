//! Supported token listing

use axum::{extract::State, Json};

use crate::dto::{TokenDto, TokensResponse};
use crate::AppState;

/// GET /tokens - List every token the gateway can swap
pub async fn list_tokens(State(state): State<AppState>) -> Json<TokensResponse> {
    let tokens: Vec<TokenDto> = state.registry().list_all().iter().map(Into::into).collect();
    let count = tokens.len();

    Json(TokensResponse { tokens, count })
}
