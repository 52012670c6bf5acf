//! Builds a small route tree and dispatches a few requests against it.
//!
//! Run with:
//!
//! ```sh
//! cargo run -p oxide-trie-router --example dispatch
//! ```

use oxide_trie_router::{
    HandlerResult, LoggingMiddleware, RequestContext, Response, Router, RouterConfig, shared,
};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

fn require_token(ctx: &mut RequestContext) -> HandlerResult {
    if ctx.contains("token") {
        ctx.insert("user", "admin");
    } else {
        ctx.respond(Response::new(401).body("Unauthorized"));
    }
    Ok(())
}

fn home(ctx: &mut RequestContext) -> HandlerResult {
    ctx.respond(Response::text("welcome"));
    Ok(())
}

fn list_users(ctx: &mut RequestContext) -> HandlerResult {
    if !ctx.is_responded() {
        ctx.respond(Response::json(&serde_json::json!(["alice", "bob"])));
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut router: Router = Router::with_config(RouterConfig::default());
    router.use_middleware("/", [shared(LoggingMiddleware)])?;
    router.route("/", home)?;
    router.register("/admin/users", [shared(require_token)], list_users)?;

    info!("route tree: {router}");
    let router = router.freeze();

    for path in ["/", "/admin/users", "/admin", "/nope"] {
        let mut ctx = RequestContext::new(path);
        let response = match router.dispatch(&mut ctx) {
            Ok(()) => ctx.take_response().unwrap_or_default(),
            Err(err) => {
                warn!(%err, "dispatch failed");
                Response::from_error(&err)
            }
        };
        info!(
            path,
            status = response.status,
            body = %response.body_string().unwrap_or_default(),
            "handled"
        );
    }

    Ok(())
}
