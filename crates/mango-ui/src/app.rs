use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    ParamSegment, StaticSegment,
};

use crate::components::model_viewer::MODEL_VIEWER_SCRIPT;
use crate::components::nav::Nav;
use crate::components::toast::ToastProvider;
use crate::hooks::{use_auth, AuthProvider, LOGIN_PAGE};
use crate::pages::about::AboutPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::patients::{PatientAddPage, PatientAddSuccessPage, PatientsListPage};
use crate::pages::profile::ProfilePage;
use crate::pages::register::{RegisterPage, RegisterSuccessPage};
use crate::pages::session_detail::SessionDetailPage;
use crate::pages::sessions::{SessionCreatedPage, SessionNewPage, SessionsListPage};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <link rel="icon" href="/favicon.svg" type="image/svg+xml" />
                <script type="module" src=MODEL_VIEWER_SCRIPT></script>
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/mango-console.css" />
        <Title text="MANGO" />
        <ToastProvider>
            <AuthProvider>
                <Router>
                    <Routes fallback=|| view! { <p class="not-found">"Página não encontrada."</p> }.into_any()>
                        <Route path=StaticSegment("") view=HomePage />
                        <Route path=StaticSegment("about") view=AboutPage />
                        <Route
                            path=(StaticSegment("scientist"), StaticSegment("login"))
                            view=LoginPage
                        />
                        <Route
                            path=(StaticSegment("scientist"), StaticSegment("register"))
                            view=RegisterPage
                        />
                        <Route
                            path=(
                                StaticSegment("scientist"),
                                StaticSegment("register"),
                                StaticSegment("success"),
                            )
                            view=RegisterSuccessPage
                        />
                        <Route
                            path=StaticSegment("dashboard")
                            view=|| view! { <Layout><DashboardPage /></Layout> }
                        />
                        <Route
                            path=(StaticSegment("scientist"), StaticSegment("me"))
                            view=|| view! { <Layout><ProfilePage /></Layout> }
                        />
                        <Route
                            path=(StaticSegment("patients"), StaticSegment("list"))
                            view=|| view! { <Layout><PatientsListPage /></Layout> }
                        />
                        <Route
                            path=(StaticSegment("patients"), StaticSegment("add"))
                            view=|| view! { <Layout><PatientAddPage /></Layout> }
                        />
                        <Route
                            path=(
                                StaticSegment("patients"),
                                StaticSegment("add"),
                                StaticSegment("success"),
                            )
                            view=PatientAddSuccessPage
                        />
                        <Route
                            path=(StaticSegment("sessions"), StaticSegment("list"))
                            view=|| view! { <Layout><SessionsListPage /></Layout> }
                        />
                        <Route
                            path=(StaticSegment("sessions"), StaticSegment("new"))
                            view=|| view! { <Layout><SessionNewPage /></Layout> }
                        />
                        <Route
                            path=(
                                StaticSegment("sessions"),
                                StaticSegment("new"),
                                StaticSegment("success"),
                            )
                            view=SessionCreatedPage
                        />
                        <Route
                            path=(
                                StaticSegment("sessions"),
                                StaticSegment("show"),
                                ParamSegment("file_id"),
                            )
                            view=|| view! { <Layout><SessionDetailPage /></Layout> }
                        />
                    </Routes>
                </Router>
            </AuthProvider>
        </ToastProvider>
    }
}

/// Sidebar plus content area for every signed-in page. The session is
/// re-read on each mount so an expired cookie sends the scientist to login.
#[component]
fn Layout(children: Children) -> impl IntoView {
    let auth = use_auth();
    auth.require_auth(LOGIN_PAGE);

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;
        spawn_local(async move { auth.refresh().await });
    }

    view! {
        <div class="app-layout">
            <Nav />
            <main class="main-content">{children()}</main>
        </div>
    }
}
