use axum::{
    routing::{get, MethodRouter},
    Extension, Router,
};

use crate::api::rest::handlers::{self, UsersState};

pub fn register_routes(router: Router, state: UsersState) -> Router {
    // GET /users - list, POST /users - create; PUT/DELETE need an id
    let collection: MethodRouter = get(handlers::list_users)
        .post(handlers::create_user)
        .put(handlers::missing_user_id)
        .delete(handlers::missing_user_id)
        .fallback(handlers::method_not_allowed);

    // Everything below /users/ is one id segment; `1/2` or `1/x` fail id parsing.
    // POST ignores the path and creates.
    let item: MethodRouter = get(handlers::get_user)
        .post(handlers::create_user)
        .put(handlers::update_user)
        .delete(handlers::delete_user)
        .fallback(handlers::method_not_allowed);

    let users = Router::new()
        .route("/users", collection)
        .route("/users/{*id}", item)
        .layer(Extension(state));

    router.merge(users)
}
