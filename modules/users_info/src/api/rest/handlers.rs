use axum::{
    body::Bytes,
    extract::Path,
    http::{Method, StatusCode},
    response::Json,
    Extension,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::api::rest::dto::{UserDto, UserReq};
use crate::api::rest::error::UsersApiError;
use crate::contract::{UserId, UserPayload};
use crate::domain::repo::UsersRepository;

/// Per-router state shared by all users handlers.
#[derive(Clone)]
pub struct UsersState {
    pub repo: Arc<dyn UsersRepository>,
    pub read_timeout: Duration,
}

/// Run a blocking repository read on its own task and wait at most `deadline`.
///
/// On timeout the task is detached, not aborted: the read still runs to
/// completion and its result is dropped. A timed-out response therefore does
/// not mean the read did not happen.
pub async fn bounded_read<T, F>(deadline: Duration, op: F) -> Result<T, UsersApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let task = tokio::task::spawn_blocking(op);
    match tokio::time::timeout(deadline, task).await {
        Ok(Ok(out)) => Ok(out),
        Ok(Err(join_err)) => Err(UsersApiError::Internal(join_err.to_string())),
        Err(_elapsed) => {
            warn!(deadline_ms = deadline.as_millis() as u64, "read deadline elapsed");
            Err(UsersApiError::Timeout(deadline))
        }
    }
}

/// The `{id}` path segment must be a non-negative integer.
pub fn parse_user_id(raw: &str) -> Result<UserId, UsersApiError> {
    raw.trim_matches('/')
        .parse::<UserId>()
        .map_err(|_| UsersApiError::InvalidId(raw.to_owned()))
}

fn parse_body(body: &Bytes) -> Result<UserPayload, UsersApiError> {
    serde_json::from_slice::<UserReq>(body)
        .map(UserPayload::from)
        .map_err(UsersApiError::InvalidBody)
}

/// List all users
#[instrument(name = "users_info.rest.list_users", skip_all)]
pub async fn list_users(
    Extension(state): Extension<UsersState>,
) -> Result<Json<Vec<UserDto>>, UsersApiError> {
    let repo = state.repo.clone();
    let users = bounded_read(state.read_timeout, move || repo.get_all()).await?;

    info!(count = users.len(), "Listed users");
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// Get a specific user by ID
#[instrument(name = "users_info.rest.get_user", skip_all, fields(id = %raw_id))]
pub async fn get_user(
    Extension(state): Extension<UsersState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserDto>, UsersApiError> {
    let id = parse_user_id(&raw_id)?;

    let repo = state.repo.clone();
    let user = bounded_read(state.read_timeout, move || repo.get_by_id(id)).await??;

    debug!("Found user");
    Ok(Json(UserDto::from(user)))
}

/// Create a new user; any client-supplied id is ignored
#[instrument(name = "users_info.rest.create_user", skip_all)]
pub async fn create_user(
    Extension(state): Extension<UsersState>,
    body: Bytes,
) -> Result<(StatusCode, Json<UserDto>), UsersApiError> {
    let payload = parse_body(&body)?;

    let user = state.repo.create(payload);

    info!(user_id = user.id, "Created user");
    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

/// Replace a user's fields; the id always comes from the path
#[instrument(name = "users_info.rest.update_user", skip_all, fields(id = %raw_id))]
pub async fn update_user(
    Extension(state): Extension<UsersState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<UserDto>, UsersApiError> {
    let id = parse_user_id(&raw_id)?;
    let payload = parse_body(&body)?;

    let user = state.repo.update(id, payload)?;

    info!("Updated user");
    Ok(Json(UserDto::from(user)))
}

/// Delete a user by ID
#[instrument(name = "users_info.rest.delete_user", skip_all, fields(id = %raw_id))]
pub async fn delete_user(
    Extension(state): Extension<UsersState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, UsersApiError> {
    let id = parse_user_id(&raw_id)?;

    state.repo.delete(id)?;

    info!("Deleted user");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT/DELETE on the collection: the id is empty, so it cannot parse.
pub async fn missing_user_id() -> UsersApiError {
    UsersApiError::InvalidId(String::new())
}

/// Fallback for verbs the users resource does not support.
pub async fn method_not_allowed(method: Method) -> UsersApiError {
    UsersApiError::MethodNotAllowed(method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn parse_user_id_accepts_non_negative_integers() {
        assert_eq!(parse_user_id("0").unwrap(), 0);
        assert_eq!(parse_user_id("42").unwrap(), 42);
        assert_eq!(parse_user_id("/7/").unwrap(), 7);
    }

    #[test]
    fn parse_user_id_rejects_everything_else() {
        for raw in ["", "abc", "-1", "1.5", "1/2", " 3"] {
            let err = parse_user_id(raw).unwrap_err();
            assert!(
                matches!(err, UsersApiError::InvalidId(ref r) if r == raw),
                "{raw:?} -> {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn bounded_read_returns_fast_results() {
        let out = bounded_read(Duration::from_secs(1), || 5).await.unwrap();
        assert_eq!(out, 5);
    }

    #[tokio::test]
    async fn bounded_read_times_out_but_lets_the_read_finish() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();

        let res = bounded_read(Duration::from_millis(20), move || {
            std::thread::sleep(Duration::from_millis(150));
            flag.store(true, Ordering::SeqCst);
        })
        .await;

        assert!(matches!(res, Err(UsersApiError::Timeout(d)) if d == Duration::from_millis(20)));
        assert!(!finished.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(finished.load(Ordering::SeqCst), "detached read must complete");
    }

    #[tokio::test]
    async fn bounded_read_reports_panics_as_internal() {
        let res: Result<(), _> = bounded_read(Duration::from_secs(1), || panic!("bad read")).await;
        assert!(matches!(res, Err(UsersApiError::Internal(_))));
    }
}
