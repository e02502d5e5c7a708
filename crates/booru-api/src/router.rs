//! Route definitions for the booru HTTP API.
//!
//! All routes are mounted under `/api/v1`. Guarded groups are wrapped with
//! [`guarded`], so the guard runs before extraction and handlers.

use axum::Router;
use axum::routing::{delete, get, post, put};

use booru_auth::Requirement;
use booru_entity::permission::PermissionLevel;

use crate::handlers;
use crate::middleware::guarded;
use crate::state::AppState;

/// Prefix every route is nested under.
pub const API_PREFIX: &str = "/api/v1";

/// Build the router with all routes, threading `state` through them.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(account_routes(&state))
        .merge(directory_routes())
        .merge(admin_routes(&state))
        .merge(settings_routes())
        .merge(taxonomy_routes(&state))
        .merge(heartbeat_routes(&state));

    Router::new()
        .nest(API_PREFIX, api_routes)
        .with_state(state)
}

/// Sign-up, sign-in, bootstrap and self-service.
fn account_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/user/sign-up", post(handlers::user::sign_up))
        .route("/user/sign-in", post(handlers::user::sign_in))
        .route("/user/init-admin-create", post(handlers::user::init_admin_create));

    let own = Router::new()
        .route("/user/change-password", put(handlers::user::change_password))
        .route(
            "/user",
            get(handlers::user::get_self)
                .put(handlers::user::update_self)
                .delete(handlers::user::delete_self),
        );

    public.merge(guarded(own, state, Requirement::Authenticated))
}

/// Public user directory.
fn directory_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::list_users))
        .route("/users/{id}", get(handlers::user::get_user))
}

/// Admin management and administrative user edits.
fn admin_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route(
            "/admin/manage",
            post(handlers::admin::create_admin).get(handlers::admin::list_admins),
        )
        .route(
            "/admin/manage/{id}",
            put(handlers::admin::assign_admin).delete(handlers::admin::remove_admin),
        )
        .route("/admin/user/{id}", put(handlers::admin::update_user))
        .route(
            "/admin/user/permission",
            put(handlers::admin::set_permission),
        )
        .route(
            "/admin/user/permission/{id}",
            get(handlers::admin::get_permission),
        );

    guarded(routes, state, Requirement::Admin)
}

fn settings_routes() -> Router<AppState> {
    Router::new().route("/settings", get(handlers::settings::get_settings))
}

/// Tag categories and tags: public reads, admin writes.
fn taxonomy_routes(state: &AppState) -> Router<AppState> {
    let reads = Router::new()
        .route("/tag-categories", get(handlers::tag::list_categories))
        .route("/tag-categories/{id}", get(handlers::tag::get_category))
        .route("/tags", get(handlers::tag::list_tags))
        .route("/tags/{id}", get(handlers::tag::get_tag))
        .route("/tags/name/{slug}", get(handlers::tag::get_tags_by_slug));

    let writes = Router::new()
        .route(
            "/tag-categories",
            post(handlers::tag::create_category).put(handlers::tag::update_category),
        )
        .route(
            "/tag-categories/{id}",
            delete(handlers::tag::delete_category),
        )
        .route(
            "/tags",
            post(handlers::tag::create_tag).put(handlers::tag::update_tag),
        )
        .route("/tags/{id}", delete(handlers::tag::delete_tag));

    reads.merge(guarded(writes, state, Requirement::Admin))
}

/// Liveness plus one probe per guard.
fn heartbeat_routes(state: &AppState) -> Router<AppState> {
    let probe = |path: &str, requirement| {
        guarded(
            Router::new().route(path, get(handlers::heartbeat::heartbeat)),
            state,
            requirement,
        )
    };

    Router::new()
        .route("/heartbeat", get(handlers::heartbeat::heartbeat))
        .merge(probe("/heartbeat/admin-only", Requirement::Admin))
        .merge(probe(
            "/heartbeat/moderator",
            Requirement::Permission(PermissionLevel::MODERATE),
        ))
        .merge(probe(
            "/heartbeat/approver",
            Requirement::Permission(PermissionLevel::APPROVE),
        ))
        .merge(probe(
            "/heartbeat/read-write",
            Requirement::Permission(PermissionLevel::READ | PermissionLevel::WRITE),
        ))
        .merge(probe(
            "/heartbeat/write-only",
            Requirement::Permission(PermissionLevel::WRITE),
        ))
        .merge(probe(
            "/heartbeat/read-only",
            Requirement::Permission(PermissionLevel::READ),
        ))
}
