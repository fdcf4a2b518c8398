//! Session helpers keeping HTTP handlers free of framework-specific logic.
//!
//! A thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as persisting or requiring a profile id.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, ProfileId};

pub(crate) const PROFILE_ID_KEY: &str = "profile_id";

/// Newtype wrapper exposing higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the freshly registered profile's id in the session cookie.
    ///
    /// # Errors
    /// Maps cookie-store failures to an internal [`Error`].
    pub fn persist_profile(&self, profile_id: &ProfileId) -> Result<(), Error> {
        self.0
            .insert(PROFILE_ID_KEY, profile_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current profile id from the session, if present.
    ///
    /// A cookie that holds a malformed id is treated as absent rather than
    /// failing the request; the anomaly is logged.
    ///
    /// # Errors
    /// Maps cookie-store failures to an internal [`Error`].
    pub fn profile_id(&self) -> Result<Option<ProfileId>, Error> {
        let raw = self
            .0
            .get::<String>(PROFILE_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match raw {
            Some(raw) => match ProfileId::new(&raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid profile id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require a registered profile id or return `401 Unauthorized`.
    ///
    /// # Errors
    /// [`Error::unauthorized`] when the session carries no profile.
    pub fn require_profile_id(&self) -> Result<ProfileId, Error> {
        self.profile_id()?
            .ok_or_else(|| Error::unauthorized("profile registration required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    #[actix_web::test]
    async fn round_trips_a_profile_id() {
        let app = test::init_service(
            App::new()
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        let id = ProfileId::random();
                        session.persist_profile(&id).map_err(
                            crate::inbound::http::error::ApiError::from,
                        )?;
                        Ok::<_, crate::inbound::http::error::ApiError>(
                            HttpResponse::Ok().body(id.to_string()),
                        )
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let id = session
                            .require_profile_id()
                            .map_err(crate::inbound::http::error::ApiError::from)?;
                        Ok::<_, crate::inbound::http::error::ApiError>(
                            HttpResponse::Ok().body(id.to_string()),
                        )
                    }),
                ),
        )
        .await;

        let set_response =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert!(set_response.status().is_success());
        let cookie = set_response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned();
        let expected = test::read_body(set_response).await;

        let get_response = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert!(get_response.status().is_success());
        assert_eq!(test::read_body(get_response).await, expected);
    }

    #[actix_web::test]
    async fn missing_session_is_unauthorised() {
        let app = test::init_service(
            App::new()
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        session
                            .require_profile_id()
                            .map(|id| HttpResponse::Ok().body(id.to_string()))
                            .map_err(crate::inbound::http::error::ApiError::from)
                    }),
                ),
        )
        .await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/get").to_request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
