use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <p class="home-kicker">"Powered by UTFPR"</p>
            <h1 class="home-title">"MANGO"</h1>
            <p class="home-tagline">"Mindwave Analysis for Neurofeedback & Graphical Observation"</p>
            <div class="home-actions">
                <a href="/scientist/login" class="btn btn-primary">
                    "Login"
                </a>
                <a href="/scientist/register" class="btn btn-primary">
                    "Cadastre-se"
                </a>
            </div>
            <a href="/about" class="home-about">
                "Sobre o projeto"
            </a>
        </div>
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;

    #[test]
    fn renders_title_and_login_link() {
        let owner = Owner::new();
        let html = owner.with(|| view! { <HomePage /> }.to_html());
        assert!(html.contains("MANGO"));
        assert!(html.contains("Login"));
        assert!(html.contains("href=\"/scientist/login\""));
        assert!(html.contains("href=\"/about\""));
    }
}
