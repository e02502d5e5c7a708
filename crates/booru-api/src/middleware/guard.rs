//! Route guards.
//!
//! A guard runs before the handler and either admits the caller, leaving an
//! [`Identity`] in the request extensions, or answers `401 Unauthorized`.

use axum::Router;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;
use tracing::debug;

use booru_auth::{Identity, Requirement};

use crate::error::ApiError;
use crate::state::AppState;

/// Middleware enforcing one [`Requirement`].
pub async fn guard(
    State((state, requirement)): State<(AppState, Requirement)>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let identity: Identity = match state.guard.authorize(header, requirement).await {
        Ok(identity) => identity,
        Err(err) => {
            debug!(
                path = %request.uri().path(),
                requirement = %requirement,
                reason = %err,
                "Guard rejected request"
            );
            return Err(err.into());
        }
    };

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Wraps every route of `router` in a guard for `requirement`.
pub fn guarded(router: Router<AppState>, state: &AppState, requirement: Requirement) -> Router<AppState> {
    router.route_layer(from_fn_with_state((state.clone(), requirement), guard))
}
