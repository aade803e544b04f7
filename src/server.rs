use crate::{
    config::Config,
    feed::Feed,
    file::MediaFile,
    index::MediaIndex,
    query::percent_decode,
    sampler::{SampleRequest, sample, sample_items},
};
use anyhow::{Error, Result, anyhow};
use rand::rng;
use serde_json::json;
use std::{net::SocketAddr, sync::Arc, thread};
use tiny_http::{Header, Method, Request, Response, Server};
use tracing::{debug, info, warn};

pub const API_PATH: &str = "api/videos";

pub(crate) fn header(field: &str, value: &str) -> Result<Header> {
    Header::from_bytes(field, value).map_err(|_| Error::msg("Could not create header"))
}

pub enum Reply {
    Json(u16, String),
    Html(String),
    File(MediaFile),
}

impl Reply {
    fn error<T: Into<String>>(status: u16, message: T) -> Self {
        Self::Json(status, json!({ "error": message.into() }).to_string())
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Json(status, _) => *status,
            Self::Html(_) | Self::File(_) => 200,
        }
    }
}

/// Maps a request line to a reply. Holds the only state shared between workers.
pub struct Router {
    config: Config,
    index: MediaIndex,
}

impl Router {
    pub fn new(config: Config, index: MediaIndex) -> Self {
        Self { config, index }
    }

    pub fn route(&self, method: &Method, url: &str) -> Reply {
        if !matches!(method, Method::Get | Method::Head) {
            return Reply::error(405, "Method not allowed");
        }

        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let path = path.trim_matches('/');

        if path == API_PATH {
            return self.videos(query);
        }

        if let Some(name) = path
            .strip_prefix(self.config.route.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
        {
            return self.file(name);
        }

        if self.config.feed_path.as_deref() == Some(path) {
            return self.feed(query);
        }

        Reply::error(404, "Not found")
    }

    fn videos(&self, query: &str) -> Reply {
        let request = match SampleRequest::from_query(query, self.config.default_limit) {
            Ok(request) => request,
            Err(error) => return Reply::error(400, error.to_string()),
        };

        let result = sample(&self.index, request, &self.config.route, &mut rng());

        match serde_json::to_string(&result) {
            Ok(body) => Reply::Json(200, body),
            Err(error) => Reply::error(500, error.to_string()),
        }
    }

    fn file(&self, name: &str) -> Reply {
        let name = percent_decode(name);

        let Some(item) = self.index.get(&name) else {
            return Reply::error(404, "File not found");
        };

        match MediaFile::open(self.index.path_of(item)) {
            Ok(file) => Reply::File(file),
            Err(error) => {
                warn!("Indexed file is no longer readable: {error:#}");
                Reply::error(404, "File not found")
            }
        }
    }

    fn feed(&self, query: &str) -> Reply {
        let request = match SampleRequest::from_query(query, self.config.default_limit) {
            Ok(request) => request,
            Err(error) => return Reply::error(400, error.to_string()),
        };

        let items = sample_items(&self.index, request.limit, &mut rng());
        let feed = Feed::new(items, &self.config.route, self.index.len(), request.limit);

        Reply::Html(feed.render())
    }
}

pub struct MediaServer {
    server: Arc<Server>,
    router: Arc<Router>,
}

impl MediaServer {
    pub fn bind(config: Config, index: MediaIndex) -> Result<Self> {
        let addr = SocketAddr::new(config.host, config.port);
        let server = Server::http(addr)
            .map_err(|error| anyhow!("Could not create server on {addr}: {error}"))?;

        Ok(Self {
            server: Arc::new(server),
            router: Arc::new(Router::new(config, index)),
        })
    }

    pub fn addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serves requests on the configured number of worker threads until they all exit.
    pub fn run(self) -> Result<()> {
        let config = &self.router.config;

        info!(
            addr = ?self.addr(),
            media_dir = %self.router.index.dir().display(),
            route = %format!("/{}", config.route),
            files = self.router.index.len(),
            workers = config.workers,
            feed = %config
                .feed_path
                .as_ref()
                .map_or_else(|| "Disabled".into(), |feed_path| format!("/{feed_path}")),
            "Random Media Server started!"
        );

        let mut workers = vec![];

        for worker in 0..config.workers {
            let server = Arc::clone(&self.server);
            let router = Arc::clone(&self.router);

            workers.push(
                thread::Builder::new()
                    .name(format!("worker-{worker}"))
                    .spawn(move || serve(&server, &router))?,
            );
        }

        for worker in workers {
            worker
                .join()
                .map_err(|_| Error::msg("Worker thread panicked"))?;
        }

        Ok(())
    }
}

fn serve(server: &Server, router: &Router) {
    for request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();
        let reply = router.route(&method, &url);

        debug!(%method, %url, status = reply.status(), "Handled request");

        if let Err(error) = respond(request, reply) {
            warn!("Error while responding to {method} {url}: {error}");
        }
    }
}

fn respond(request: Request, reply: Reply) -> Result<()> {
    let cors = header("access-control-allow-origin", "*")?;

    match reply {
        Reply::Json(status, body) => {
            let response = Response::from_string(body)
                .with_status_code(status)
                .with_header(header("content-type", "application/json")?)
                .with_header(cors);
            request.respond(response)?;
        }
        Reply::Html(body) => {
            let response = Response::from_string(body)
                .with_header(header("content-type", "text/html; charset=utf-8")?)
                .with_header(cors);
            request.respond(response)?;
        }
        Reply::File(file) => {
            let response = file.into_response()?.with_header(cors);
            request.respond(response)?;
        }
    }

    Ok(())
}
