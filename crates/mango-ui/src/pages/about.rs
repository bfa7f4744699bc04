use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AboutSection {
    Overview,
    Technology,
    Applications,
    Team,
}

impl AboutSection {
    pub const ALL: [AboutSection; 4] = [
        AboutSection::Overview,
        AboutSection::Technology,
        AboutSection::Applications,
        AboutSection::Team,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AboutSection::Overview => "Visão Geral",
            AboutSection::Technology => "Tecnologia",
            AboutSection::Applications => "Aplicações",
            AboutSection::Team => "Equipe",
        }
    }
}

const GOALS: [(&str, &str); 4] = [
    ("Análise de EEG", "Processar sinais cerebrais para identificar padrões emocionais"),
    ("Visualização 3D", "Representar áreas cerebrais ativadas em modelos interativos"),
    ("Pesquisa Científica", "Contribuir para estudos em neurociência e psicologia"),
    ("Aplicações Práticas", "Oferecer ferramentas para marketing, saúde e educação"),
];

const PIPELINE: [(&str, &str); 5] = [
    ("Captura de EEG", "Coleta de sinais cerebrais brutos"),
    ("Pré-processamento", "Filtragem e limpeza dos dados"),
    ("Análise de Features", "Extração de características relevantes"),
    ("Classificação", "Identificação de padrões emocionais"),
    ("Visualização 3D", "Mapeamento para modelo interativo"),
];

const APPLICATIONS: [(&str, &str); 6] = [
    (
        "Pesquisa Científica",
        "Análise das respostas neurais em estudos de neurociência para compreensão dos mecanismos emocionais.",
    ),
    (
        "Neuromarketing",
        "Avaliação de estímulos emocionais de consumidores a campanhas, produtos e contextos comerciais.",
    ),
    (
        "Saúde Mental",
        "Monitoramento de respostas emocionais em terapias e tratamentos psicológicos.",
    ),
    (
        "Educação",
        "Estudo de engajamento e atenção em ambientes educacionais e de aprendizagem.",
    ),
    (
        "Entretenimento",
        "Desenvolvimento de experiências interativas baseadas em respostas emocionais.",
    ),
    (
        "Recursos Humanos",
        "Análise de compatibilidade e respostas emocionais em contextos organizacionais.",
    ),
];

const TEAM: [(&str, &str); 4] = [
    ("Gabriel Neves", "Dados e sessões EEG"),
    ("Maria Gabriela", "Documentação geral"),
    ("Henrique Bittencourt", "Frontend"),
    ("Matheus Dalla", "Backend"),
];

fn initials(name: &str) -> String {
    name.split_whitespace().filter_map(|w| w.chars().next()).collect()
}

/// Public project page, one section visible at a time.
#[component]
pub fn AboutPage() -> impl IntoView {
    let (section, setSection) = signal(AboutSection::Overview);

    let tabs = AboutSection::ALL
        .into_iter()
        .map(|s| {
            view! {
                <button
                    class="tab"
                    class:active=move || section.get() == s
                    on:click=move |_| setSection.set(s)
                >
                    {s.label()}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="about-page">
            <header class="about-header">
                <a href="/" class="nav-brand">
                    <div class="brand-icon">"M"</div>
                    <span class="brand-text">"MANGO"</span>
                </a>
                <a href="/" class="btn btn-secondary">
                    "Voltar ao Início"
                </a>
            </header>
            <div class="about-hero">
                <h1 class="home-title">"MANGO"</h1>
                <p class="home-tagline">"Mindwave Analysis for Neurofeedback & Graphical Observation"</p>
                <p class="subtitle">
                    "Conectando dados de EEG a representações visuais interativas em 3D para revolucionar a compreensão das respostas cerebrais humanas."
                </p>
            </div>
            <div class="tabs">{tabs}</div>
            {move || match section.get() {
                AboutSection::Overview => view! { <OverviewSection /> }.into_any(),
                AboutSection::Technology => view! { <TechnologySection /> }.into_any(),
                AboutSection::Applications => view! { <ApplicationsSection /> }.into_any(),
                AboutSection::Team => view! { <TeamSection /> }.into_any(),
            }}
            <footer class="about-footer">
                <p>"Projeto Integrador • Ciência da Computação • UTFPR"</p>
            </footer>
        </div>
    }
}

#[component]
fn OverviewSection() -> impl IntoView {
    view! {
        <div class="detail-grid">
            <div class="card">
                <div class="card-title">"Sobre o Projeto"</div>
                <p>
                    "O MANGO é uma interface cérebro-computador que utiliza a base de dados EmoEEG-MC para reproduzir em modelos 3D as áreas do cérebro estimuladas por diferentes contextos emocionais."
                </p>
                <p>
                    "Desenvolvido como projeto integrador do curso de Ciência da Computação da UTFPR, cria uma ponte entre dados complexos de EEG e representações visuais interativas."
                </p>
            </div>
            <div class="card">
                <div class="card-title">"Objetivos Principais"</div>
                {GOALS
                    .into_iter()
                    .map(|(title, text)| {
                        view! {
                            <div class="field">
                                <span class="field-value">{title}</span>
                                <span class="field-label">{text}</span>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn TechnologySection() -> impl IntoView {
    view! {
        <div class="detail-grid">
            <div class="card">
                <div class="card-title">"Base de Dados EmoEEG-MC"</div>
                <p>
                    "EmoEEG-MC: A Multi-Context Emotional EEG Dataset for Cross-Context Emotion Decoding. Sinais de EEG capturados em múltiplos contextos emocionais, usados para treinar modelos de reconhecimento de padrões emocionais."
                </p>
            </div>
            <div class="card">
                <div class="card-title">"Fluxo de Processamento"</div>
                <ol class="pipeline">
                    {PIPELINE
                        .into_iter()
                        .map(|(title, text)| {
                            view! {
                                <li>
                                    <strong>{title}</strong>
                                    " · "
                                    {text}
                                </li>
                            }
                        })
                        .collect_view()}
                </ol>
            </div>
        </div>
    }
}

#[component]
fn ApplicationsSection() -> impl IntoView {
    view! {
        <div class="card-grid">
            {APPLICATIONS
                .into_iter()
                .map(|(title, text)| {
                    view! {
                        <div class="card">
                            <div class="card-title">{title}</div>
                            <p class="subtitle">{text}</p>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn TeamSection() -> impl IntoView {
    view! {
        <p class="subtitle">
            "Desenvolvido por estudantes de Ciência da Computação da UTFPR como parte da disciplina de Projeto Integrador."
        </p>
        <div class="card-grid">
            {TEAM
                .into_iter()
                .map(|(name, role)| {
                    view! {
                        <div class="card profile-summary">
                            <div class="avatar">{initials(name)}</div>
                            <div class="patient-name">{name}</div>
                            <div class="patient-handle">{role}</div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_initials() {
        assert_eq!(initials("Henrique Bittencourt"), "HB");
        assert_eq!(initials("Matheus  Dalla"), "MD");
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn opens_on_the_overview() {
        let owner = Owner::new();
        let html = owner.with(|| view! { <AboutPage /> }.to_html());
        assert!(html.contains("Sobre o Projeto"));
        for section in AboutSection::ALL {
            assert!(html.contains(section.label()), "{section:?}");
        }
        assert!(!html.contains("Neuromarketing"));
    }
}
