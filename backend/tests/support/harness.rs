//! Server harness and shared world for storefront behaviour tests.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use async_trait::async_trait;
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use storefront::Trace;
use storefront::domain::Catalog;
use storefront::domain::ports::{CatalogRepository, CatalogRepositoryError};
use storefront::inbound::http::cart::{
    add_cart_item, apply_coupon, clear_coupon, decrement_cart_item, get_cart, get_offers,
    increment_cart_item, remove_cart_item,
};
use storefront::inbound::http::menu::get_menu;
use storefront::inbound::http::state::HttpState;
use storefront::inbound::http::validation::json_error_handler;
use storefront::outbound::menu::StaticMenuRepository;

/// Built-in menu that can be switched off mid-scenario.
#[derive(Clone, Default)]
pub(crate) struct SwitchableMenu {
    offline: Arc<AtomicBool>,
}

impl SwitchableMenu {
    pub(crate) fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogRepository for SwitchableMenu {
    async fn menu(&self) -> Result<Catalog, CatalogRepositoryError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CatalogRepositoryError::connection("menu source offline"));
        }
        StaticMenuRepository.menu().await
    }
}

pub(crate) struct StorefrontWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) menu: SwitchableMenu,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_cache_control: Option<String>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) session_cookie: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<StorefrontWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we lock the world
    // while calling `block_on`. The future must not try to lock the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn test_session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::days(7)))
        .build()
}

async fn spawn_storefront_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .wrap(test_session_middleware(key.clone()))
            .service(get_menu)
            .service(get_cart)
            .service(add_cart_item)
            .service(increment_cart_item)
            .service(decrement_cart_item)
            .service(remove_cart_item)
            .service(apply_coupon)
            .service(clear_coupon)
            .service(get_offers);

        App::new()
            .app_data(http_data.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(Trace)
            .service(api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    (runtime, local)
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let menu = SwitchableMenu::default();
    let http_state = HttpState::new(Arc::new(menu.clone()));

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_storefront_server(http_state).await })
        .expect("server should start");

    let world = Rc::new(RefCell::new(StorefrontWorld {
        runtime,
        local,
        base_url,
        server,
        menu,
        last_status: None,
        last_body: None,
        last_cache_control: None,
        last_trace_id: None,
        session_cookie: None,
    }));

    WorldFixture { world }
}
