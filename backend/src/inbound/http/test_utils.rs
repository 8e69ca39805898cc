//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, test::TestRequest, web};

use crate::domain::Error;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::validation::{FieldName, parse_user_id};

const LOGIN_PATH: &str = "/__test/login";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

async fn login(session: SessionContext, path: web::Path<String>) -> Result<HttpResponse, Error> {
    let user_id = parse_user_id(&path.into_inner(), FieldName::new("id"))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Register a route that stores the path's user id in the session.
///
/// Authentication lives outside this service, so handler tests sign in
/// through this route instead.
pub fn with_test_login(cfg: &mut web::ServiceConfig) {
    cfg.route(&format!("{LOGIN_PATH}/{{id}}"), web::post().to(login));
}

/// Request that signs in as `user_id` via [`with_test_login`].
pub fn login_request(user_id: &str) -> TestRequest {
    TestRequest::post().uri(&format!("{LOGIN_PATH}/{user_id}"))
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}
