//! Optional Prometheus metrics for the storefront server.
//!
//! [`MetricsLayer`] erases the difference between the Prometheus middleware
//! and a pass-through so `create_server` can wrap the app unconditionally.

use std::collections::HashMap;

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use std::sync::Arc;

const METRICS_NAMESPACE: &str = "storefront";
const METRICS_ENDPOINT: &str = "/metrics";

/// Build request metrics served at `/metrics`.
///
/// # Errors
/// Returns [`std::io::Error`] when the Prometheus registry rejects the
/// request collectors.
pub(crate) fn prometheus_metrics() -> std::io::Result<PrometheusMetrics> {
    let labels = HashMap::from([("service".to_owned(), METRICS_NAMESPACE.to_owned())]);
    PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
        .endpoint(METRICS_ENDPOINT)
        .const_labels(labels)
        .build()
        .map_err(|err| std::io::Error::other(format!("metrics registration failed: {err}")))
}

#[derive(Clone)]
pub(crate) enum MetricsLayer {
    Prometheus(Arc<PrometheusMetrics>),
    PassThrough,
}

impl MetricsLayer {
    #[must_use]
    pub(crate) fn from_option(metrics: Option<PrometheusMetrics>) -> Self {
        metrics.map_or(Self::PassThrough, |metrics| {
            Self::Prometheus(Arc::new(metrics))
        })
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self.clone() {
            Self::Prometheus(metrics) => {
                let pending = Compat::new((*metrics).clone()).new_transform(service);
                Box::pin(async move { Ok(boxed::service(pending.await?)) })
            }
            Self::PassThrough => Box::pin(async move {
                let svc = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Ok(boxed::service(svc))
            }),
        }
    }
}
