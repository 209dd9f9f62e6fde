//! Tower middleware attaching a [`Localizer`] to every request
//!
//! ```rust,ignore
//! use lingo_http::{L10n, LocalizationLayer, RequestLocalizerExt};
//! use tower::ServiceBuilder;
//!
//! let service = ServiceBuilder::new()
//!     .layer(LocalizationLayer::new(l10n))
//!     .service_fn(|req: http::Request<Body>| async move {
//!         let title = req.localizer().map(|l| l.t("page-title"));
//!         // ...
//!     });
//! ```

use crate::{AcceptLanguage, L10n};
use http::Request;
use lingo_i18n::Localizer;
use std::task::{Context, Poll};
use tower::Layer;
use tower_service::Service;

/// Layer resolving the request locale from `Accept-Language`.
#[derive(Debug, Clone)]
pub struct LocalizationLayer {
    l10n: L10n,
}

impl LocalizationLayer {
    /// Create a layer over a shared localization.
    pub fn new(l10n: impl Into<L10n>) -> Self {
        Self { l10n: l10n.into() }
    }
}

impl<S> Layer<S> for LocalizationLayer {
    type Service = LocalizationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LocalizationService {
            inner,
            l10n: self.l10n.clone(),
        }
    }
}

/// Service created by [`LocalizationLayer`].
#[derive(Debug, Clone)]
pub struct LocalizationService<S> {
    inner: S,
    l10n: L10n,
}

impl<S, ReqBody> Service<Request<ReqBody>> for LocalizationService<S>
where
    S: Service<Request<ReqBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let localizer = self.l10n.localizer_for(&req);
        req.extensions_mut().insert(localizer);
        self.inner.call(req)
    }
}

/// Access the [`Localizer`] attached by [`LocalizationLayer`].
pub trait RequestLocalizerExt {
    /// Get the request's localizer, if the layer ran.
    fn localizer(&self) -> Option<&Localizer>;
}

impl<B> RequestLocalizerExt for Request<B> {
    fn localizer(&self) -> Option<&Localizer> {
        self.extensions().get::<Localizer>()
    }
}
