use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use hyper::{
    header::CONTENT_TYPE,
    service::{make_service_fn, service_fn},
    Body, Method, Request, Response, Server, StatusCode,
};
use serde_json::Value;
use tokio::{sync::oneshot, task::JoinHandle};

use jwt_bench_config::Scheme;

use crate::error::HarnessError;
use crate::token::{issue_token, TokenSigner};

pub const LOG_TARGET: &str = "jwt-bench::server";

/// Response header carrying the nanoseconds spent issuing the token.
pub const GENERATE_NS_HEADER: &str = "x-generate-ns";

/// Issues a freshly signed token per request, one route per scheme.
#[derive(Clone)]
pub struct TokenService {
    signers: Arc<Vec<(Scheme, Box<dyn TokenSigner>)>>,
    claims: Arc<Value>,
}

impl TokenService {
    pub fn new(signers: Vec<(Scheme, Box<dyn TokenSigner>)>, claims: Value) -> Self {
        Self {
            signers: Arc::new(signers),
            claims: Arc::new(claims),
        }
    }

    pub fn signer(&self, scheme: Scheme) -> Option<&dyn TokenSigner> {
        self.signers
            .iter()
            .find(|(s, _)| *s == scheme)
            .map(|(_, signer)| signer.as_ref())
    }

    fn issue(&self, scheme: Scheme) -> Result<Response<Body>, HarnessError> {
        let signer = match self.signer(scheme) {
            Some(signer) => signer,
            None => return Ok(r404()),
        };

        let start = Instant::now();
        let token = issue_token(signer, &self.claims)?;
        let elapsed = start.elapsed();

        tracing::trace!(
            target: LOG_TARGET,
            %scheme,
            elapsed = ?elapsed,
            size = token.len(),
            "issued token",
        );

        Ok(Response::builder()
            .header(CONTENT_TYPE, "application/json")
            .header(GENERATE_NS_HEADER, elapsed.as_nanos().to_string())
            .body(serde_json::to_vec(&token)?.into())?)
    }
}

fn r404() -> Response<Body> {
    let mut response = Response::new(Body::from("not found"));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

async fn router(service: TokenService, req: Request<Body>) -> Result<Response<Body>, Infallible> {
    let scheme = match (req.method(), Scheme::from_route(req.uri().path())) {
        (&Method::GET, Some(scheme)) => scheme,
        _ => return Ok(r404()),
    };

    Ok(service.issue(scheme).unwrap_or_else(|err| {
        tracing::error!(
            target: LOG_TARGET,
            %scheme,
            "failed to issue token: {err}",
        );
        let mut response = Response::new(Body::from(err.to_string()));
        *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        response
    }))
}

/// A running token service.
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<Result<(), hyper::Error>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting connections and wait for the server task to finish.
    pub async fn shutdown(self) -> Result<(), HarnessError> {
        // the server may already be gone, in which case the task reports why.
        let _ = self.shutdown.send(());
        self.task.await??;
        Ok(())
    }
}

/// Bind `addr` and serve `service` on a background task.
pub fn spawn(service: TokenService, addr: SocketAddr) -> Result<ServerHandle, HarnessError> {
    let new_service = make_service_fn(move |_| {
        let service = service.clone();
        async move {
            let f = service_fn(move |req| router(service.clone(), req));
            Ok::<_, Infallible>(f)
        }
    });

    let server = Server::try_bind(&addr)?
        .tcp_nodelay(true)
        .serve(new_service);
    let addr = server.local_addr();

    let (shutdown, rx) = oneshot::channel::<()>();
    let task = tokio::spawn(server.with_graceful_shutdown(async {
        rx.await.ok();
    }));

    tracing::info!(
        target: LOG_TARGET,
        "Listening on http://{}",
        addr,
    );

    Ok(ServerHandle {
        addr,
        shutdown,
        task,
    })
}
