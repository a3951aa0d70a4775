//! Running remote calls off the UI thread.
//!
//! Each [`Request`] runs detached and delivers exactly one [`Response`] over a
//! channel. The UI drains the channel once per frame and applies the results
//! itself, so editor and gallery state are only ever touched on the UI thread.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use log::debug;
#[cfg(not(target_arch = "wasm32"))]
use log::error;

use crate::api::{Artwork, HttpStore, NewArtwork, Page};
use crate::catalog::{Catalog, CatalogContents};
use crate::error::{AppError, AppResult};
use crate::gallery::{self, Gallery};
use crate::save;

#[derive(Debug, Clone)]
pub enum Request {
    Catalog { category: Option<String> },
    OpenPage { id: String },
    Save(NewArtwork),
    Gallery,
    Delete { id: String },
}

#[derive(Debug)]
pub enum Response {
    Catalog(AppResult<CatalogContents>),
    PageOpened(AppResult<Arc<Page>>),
    Saved(AppResult<Artwork>),
    Gallery(AppResult<Vec<Artwork>>),
    Deleted { id: String, result: AppResult<()> },
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Request::Catalog { .. } => "catalog",
            Request::OpenPage { .. } => "open-page",
            Request::Save(_) => "save",
            Request::Gallery => "gallery",
            Request::Delete { .. } => "delete",
        }
    }

    async fn execute(self, store: &HttpStore) -> Response {
        match self {
            Request::Catalog { category } => Response::Catalog(Catalog::fetch(store, category).await),
            Request::OpenPage { id } => Response::PageOpened(Catalog::open_page(store, &id).await),
            Request::Save(artwork) => Response::Saved(save::submit(store, artwork).await),
            Request::Gallery => Response::Gallery(Gallery::fetch(store).await),
            Request::Delete { id } => {
                let result = gallery::delete_remote(store, &id).await;
                Response::Deleted { id, result }
            }
        }
    }

    /// What is needed to report a failure without keeping the payload around.
    pub fn kind(&self) -> RequestKind {
        match self {
            Request::Catalog { .. } => RequestKind::Catalog,
            Request::OpenPage { .. } => RequestKind::OpenPage,
            Request::Save(_) => RequestKind::Save,
            Request::Gallery => RequestKind::Gallery,
            Request::Delete { id } => RequestKind::Delete { id: id.clone() },
        }
    }
}

/// A [`Request`] stripped of its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    Catalog,
    OpenPage,
    Save,
    Gallery,
    Delete { id: String },
}

impl RequestKind {
    /// The response reported when the request could not even be started.
    pub fn failed(self, err: AppError) -> Response {
        match self {
            RequestKind::Catalog => Response::Catalog(Err(err)),
            RequestKind::OpenPage => Response::PageOpened(Err(err)),
            RequestKind::Save => Response::Saved(Err(err)),
            RequestKind::Gallery => Response::Gallery(Err(err)),
            RequestKind::Delete { id } => Response::Deleted {
                id,
                result: Err(err),
            },
        }
    }
}

/// Hands responses back to the UI thread and wakes it up.
#[derive(Clone)]
pub struct Delivery {
    tx: Sender<Response>,
    ctx: egui::Context,
}

impl Delivery {
    pub fn deliver(&self, response: Response) {
        // the receiver only disappears when the app shuts down
        let _ = self.tx.send(response);
        self.ctx.request_repaint();
    }

    /// Reports `kind` as failed so the UI can drop its pending state.
    pub fn fail(&self, kind: RequestKind, err: AppError) {
        self.deliver(kind.failed(err));
    }
}

pub struct Requests {
    store: HttpStore,
    ctx: egui::Context,
    tx: Sender<Response>,
    rx: Receiver<Response>,
}

impl Requests {
    pub fn new(store: HttpStore, ctx: egui::Context) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { store, ctx, tx, rx }
    }

    pub fn base_url(&self) -> &str {
        self.store.base_url()
    }

    /// Starts `request`; its response shows up in a later [`Requests::poll`].
    pub fn send(&self, request: Request) {
        debug!("starting {} request", request.name());
        spawn(request, self.store.clone(), self.delivery());
    }

    fn delivery(&self) -> Delivery {
        Delivery {
            tx: self.tx.clone(),
            ctx: self.ctx.clone(),
        }
    }

    /// Responses that arrived since the last call.
    pub fn poll(&self) -> Vec<Response> {
        self.rx.try_iter().collect()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn(request: Request, store: HttpStore, delivery: Delivery) {
    let name = request.name();
    let kind = request.kind();
    let worker = delivery.clone();
    let spawned = std::thread::Builder::new()
        .name(format!("request-{name}"))
        .spawn(move || {
            let response = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime.block_on(request.execute(&store)),
                Err(err) => {
                    error!("could not start a runtime for the {name} request: {err}");
                    request.kind().failed(AppError::Network(err.to_string()))
                }
            };
            worker.deliver(response);
        });
    if let Err(err) = spawned {
        error!("could not spawn the {name} request thread: {err}");
        delivery.fail(kind, AppError::Network(err.to_string()));
    }
}

#[cfg(target_arch = "wasm32")]
fn spawn(request: Request, store: HttpStore, delivery: Delivery) {
    wasm_bindgen_futures::spawn_local(async move {
        let response = request.execute(&store).await;
        delivery.deliver(response);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requests() -> Requests {
        Requests::new(HttpStore::new("http://localhost:1/api".to_owned()), egui::Context::default())
    }

    fn save_request() -> Request {
        Request::Save(NewArtwork {
            page_id: "owl".to_owned(),
            image_data: "AAAA".to_owned(),
            title: "Owl".to_owned(),
        })
    }

    #[test]
    fn a_request_that_cannot_start_still_reports_back() {
        let requests = requests();
        requests
            .delivery()
            .fail(save_request().kind(), AppError::Network("no threads left".to_owned()));

        let responses = requests.poll();
        assert_eq!(responses.len(), 1);
        assert!(matches!(&responses[0], Response::Saved(Err(AppError::Network(_)))));
        assert!(requests.poll().is_empty());
    }

    #[test]
    fn failed_deletes_keep_their_id() {
        let request = Request::Delete { id: "a42".to_owned() };
        assert_eq!(request.kind(), RequestKind::Delete { id: "a42".to_owned() });

        match request.kind().failed(AppError::Rejected(500)) {
            Response::Deleted { id, result } => {
                assert_eq!(id, "a42");
                assert!(matches!(result, Err(AppError::Rejected(500))));
            }
            other => panic!("unexpected response {other:?}"),
        }
    }
}
