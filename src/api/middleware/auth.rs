use crate::config::AppConfig;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpResponse,
};
use std::{
    future::{ready, Future, Ready},
    pin::Pin,
    rc::Rc,
};
use tracing::warn;

/// Guards the transcript endpoints with a single static bearer token.
///
/// Rejected requests never reach the inner service, so no store access
/// happens on the unauthorized path.
pub struct AdminTokenAuth;

impl<S, B> Transform<S, ServiceRequest> for AdminTokenAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminTokenAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminTokenAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct AdminTokenAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminTokenAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        let expected = match req.app_data::<web::Data<AppConfig>>() {
            Some(config) => config.admin.api_key.clone(),
            None => {
                warn!("AppConfig missing in app_data");
                let response = HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "Configuration error" }))
                    .map_into_right_body();
                let (request, _) = req.into_parts();
                return Box::pin(async move { Ok(ServiceResponse::new(request, response)) });
            }
        };

        let supplied = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.to_string());

        let valid = matches!(supplied, Some(ref token) if *token == expected);

        if !valid {
            warn!("Rejected transcript request: invalid or missing bearer token");
            let response = HttpResponse::Unauthorized()
                .json(serde_json::json!({ "error": "Unauthorized: Invalid or missing API key" }))
                .map_into_right_body();
            let (request, _) = req.into_parts();
            return Box::pin(async move { Ok(ServiceResponse::new(request, response)) });
        }

        Box::pin(async move {
            let res = srv.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
