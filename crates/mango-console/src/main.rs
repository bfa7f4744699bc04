#![allow(non_snake_case)]

#[cfg(feature = "ssr")]
mod config;

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use mango_bff::middleware::auth::{require_page_auth, AppState};
    use mango_bff::CookiePolicy;
    use mango_gateway::GatewayClient;
    use mango_ui::{shell, App};
    use tower_http::trace::TraceLayer;
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let configPath = if let Some(idx) = args.iter().position(|a| a == "--config") {
        args.get(idx + 1)
            .cloned()
            .unwrap_or_else(|| "config.example.toml".into())
    } else {
        "config.example.toml".into()
    };

    let mut appConfig = config::load(&configPath);
    appConfig.apply_env(|key| std::env::var(key).ok());
    let gatewayUrl = appConfig.gateway_url();
    tracing::info!(
        "loaded config from {configPath}: bind={}:{} gateway={gatewayUrl} secure_cookies={}",
        appConfig.server.bind,
        appConfig.server.port,
        appConfig.cookies.secure
    );

    let gateway = GatewayClient::new(gatewayUrl);
    let cookies = CookiePolicy {
        secure: appConfig.cookies.secure,
    };
    let appState = AppState {
        gateway: gateway.clone(),
        cookies,
    };

    let conf = get_configuration(None).expect("failed to load Leptos configuration");
    let leptosOptions = conf.leptos_options;
    let addr = appConfig
        .server
        .socket_addr()
        .unwrap_or(leptosOptions.site_addr);

    let routes = generate_route_list(App);
    let bffRouter = mango_bff::bff_router(appState);

    // Pages get the page-auth redirect; the BFF answers 401 on its own.
    let app = Router::new()
        .leptos_routes_with_context(
            &leptosOptions,
            routes,
            move || {
                provide_context(gateway.clone());
                provide_context(cookies);
            },
            {
                let leptosOptions = leptosOptions.clone();
                move || shell(leptosOptions.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptosOptions)
        .layer(axum::middleware::from_fn(require_page_auth))
        .merge(bffRouter)
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server exited with error");
}

#[cfg(not(feature = "ssr"))]
fn main() {}
