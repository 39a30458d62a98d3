use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, KeyboardEvent, MouseEvent, Window};
use yew::prelude::*;

use crate::{
    config::{SiteConfig, SITE_CONFIG_ELEMENT_ID},
    dom::{
        apply_body_theme, apply_body_theme_with_transition, body_classes, browser_window,
        document, element_text, now_ms, prefers_reduced_motion, scroll_to_section, scroll_y,
        section_exists, section_offsets, viewport_width, EventSubscription, RevealObserver,
    },
    error::PageError,
    menu::is_narrow_viewport,
    navigation::{follow_link, link_is_active, LinkFollow, NavigationTracker},
    page::{PageAction, PageState},
    parallax::{translate_y, ParallaxEffect},
    projects::{ModalInput, Project, PROJECTS},
    storage::{KeyValueStore, LocalStore, MemoryStore},
    theme::{ThemeController, ThemeMode},
};

const MOUNT_POINT_ID: &str = "app";
const CARD_SELECTOR: &str = ".skill-card, .project-card";
const RESUME_HREF: &str = "/resume.pdf";

struct Section {
    id: &'static str,
    label: &'static str,
}

const SECTIONS: &[Section] = &[
    Section { id: "home", label: "Home" },
    Section { id: "about", label: "About" },
    Section { id: "skills", label: "Skills" },
    Section { id: "projects", label: "Projects" },
    Section { id: "contact", label: "Contact" },
];

struct Skill {
    slug: &'static str,
    name: &'static str,
    detail: &'static str,
}

const SKILLS: &[Skill] = &[
    Skill { slug: "rust", name: "Rust", detail: "Services, CLIs and WebAssembly front ends." },
    Skill { slug: "typescript", name: "TypeScript", detail: "React apps and tooling." },
    Skill { slug: "sql", name: "SQL", detail: "PostgreSQL and SQLite schema design." },
    Skill { slug: "devops", name: "DevOps", detail: "Docker, CI pipelines, static hosting." },
];

type ThemeStore = Rc<dyn KeyValueStore>;

impl Reducible for PageState {
    type Action = PageAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        next.into()
    }
}

fn skill_card_id(slug: &str) -> String {
    format!("skill-{slug}")
}

fn card_ids() -> Vec<String> {
    SKILLS
        .iter()
        .map(|skill| skill_card_id(skill.slug))
        .chain(PROJECTS.iter().map(|project| project.id.to_string()))
        .collect()
}

fn browser_store() -> ThemeStore {
    match LocalStore::open() {
        Some(store) => Rc::new(store),
        None => {
            log::warn!("localStorage unavailable; theme preference will not persist");
            Rc::new(MemoryStore::default())
        }
    }
}

fn follow_nav_link(event: &MouseEvent, href: &str) {
    let follow = follow_link(href, section_exists);
    if follow.prevents_default() {
        event.prevent_default();
    }
    if let LinkFollow::Scroll(id) = follow {
        if let Err(err) = scroll_to_section(id) {
            log::warn!("navigation skipped: {err}");
        }
    }
}

fn wire_parallax(
    window: &Window,
    config: &SiteConfig,
    hero_background: &NodeRef,
) -> Result<Option<EventSubscription>, PageError> {
    if prefers_reduced_motion() {
        log::debug!("reduced motion requested; parallax disabled");
        return Ok(None);
    }

    let background = hero_background
        .cast::<HtmlElement>()
        .ok_or_else(|| PageError::MissingElement(".hero-background".to_string()))?;
    let mut effect = ParallaxEffect::new(config.parallax_speed, config.parallax_throttle_ms);

    let subscription = EventSubscription::listen(window, "scroll", move |_| {
        if let Some(offset) = effect.on_scroll(now_ms(), scroll_y()) {
            let _ = background
                .style()
                .set_property("transform", &translate_y(offset));
        }
    })?;
    Ok(Some(subscription))
}

fn wire_navigation(
    window: &Window,
    config: &SiteConfig,
    dispatcher: UseReducerDispatcher<PageState>,
) -> Result<EventSubscription, PageError> {
    let section_ids: Vec<&'static str> = SECTIONS.iter().map(|section| section.id).collect();
    let mut tracker = NavigationTracker::new(config.nav_lookahead_px, config.nav_throttle_ms);

    let mut sync = move || {
        let offsets = section_offsets(&section_ids);
        if let Some(active) = tracker.on_scroll(now_ms(), scroll_y(), &offsets) {
            dispatcher.dispatch(PageAction::SetActiveSection(active));
        }
    };
    sync();

    EventSubscription::listen(window, "scroll", move |_| sync())
}

fn wire_scroll_effects(
    config: &SiteConfig,
    hero_background: &NodeRef,
    dispatcher: UseReducerDispatcher<PageState>,
) -> Vec<EventSubscription> {
    let window = match browser_window() {
        Ok(window) => window,
        Err(err) => {
            log::error!("scroll effects disabled: {err}");
            return Vec::new();
        }
    };

    let mut subscriptions = Vec::new();
    match wire_parallax(&window, config, hero_background) {
        Ok(Some(subscription)) => subscriptions.push(subscription),
        Ok(None) => {}
        Err(err) => log::warn!("parallax disabled: {err}"),
    }
    match wire_navigation(&window, config, dispatcher) {
        Ok(subscription) => subscriptions.push(subscription),
        Err(err) => log::warn!("active link tracking disabled: {err}"),
    }
    subscriptions
}

fn wire_reveal(
    config: &SiteConfig,
    dispatcher: UseReducerDispatcher<PageState>,
) -> Option<RevealObserver> {
    if prefers_reduced_motion() {
        dispatcher.dispatch(PageAction::RevealAll);
        return None;
    }

    let reveal_dispatcher = dispatcher.clone();
    let observer = RevealObserver::observe_all(
        CARD_SELECTOR,
        config.reveal_threshold,
        &config.reveal_root_margin(),
        move |id| reveal_dispatcher.dispatch(PageAction::Reveal(id)),
    );

    match observer {
        Ok(observer) => Some(observer),
        Err(err) => {
            log::warn!("card animations disabled: {err}");
            dispatcher.dispatch(PageAction::RevealAll);
            None
        }
    }
}

#[derive(Properties, PartialEq)]
struct ExternalLinkProps {
    href: AttrValue,
    label: AttrValue,
}

#[function_component(ExternalLink)]
fn external_link(props: &ExternalLinkProps) -> Html {
    html! {
        <a class="link" href={props.href.clone()} target="_blank" rel="noopener noreferrer">
            {props.label.clone()}
            <span class="external-mark" aria-hidden="true">{"↗"}</span>
            <span class="sr-only">{" (opens in a new tab)"}</span>
        </a>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectModalProps {
    visible: bool,
    project: Option<&'static Project>,
    on_input: Callback<ModalInput>,
}

#[function_component(ProjectModal)]
fn project_modal(props: &ProjectModalProps) -> Html {
    {
        let on_input = props.on_input.clone();
        use_effect_with(props.visible, move |visible| {
            let subscription = if *visible {
                document()
                    .and_then(|document| {
                        EventSubscription::listen(&document, "keydown", move |event: Event| {
                            let escape = event
                                .dyn_ref::<KeyboardEvent>()
                                .is_some_and(|key| key.key() == "Escape");
                            if escape {
                                on_input.emit(ModalInput::Escape);
                            }
                        })
                    })
                    .map_err(|err| log::warn!("modal escape key unavailable: {err}"))
                    .ok()
            } else {
                None
            };
            move || drop(subscription)
        });
    }

    // Yew delegates every listener to the app root, so the content handlers
    // stop propagation to keep the backdrop handler from seeing their clicks.
    let modal_click = |input: ModalInput| {
        let on_input = props.on_input.clone();
        Callback::from(move |event: MouseEvent| {
            if input != ModalInput::BackdropClick {
                event.stop_propagation();
            }
            on_input.emit(input);
        })
    };

    let display = if props.visible {
        "display: block;"
    } else {
        "display: none;"
    };

    let (title, description, link) = props
        .project
        .map(|project| (project.title, project.description, project.link))
        .unwrap_or_default();
    let technologies = props.project.map(|project| project.technologies).unwrap_or_default();
    let features = props.project.map(|project| project.features).unwrap_or_default();

    html! {
        <div
            id="projectModal"
            class="modal"
            style={display}
            role="dialog"
            aria-modal="true"
            aria-labelledby="modalTitle"
            onclick={modal_click(ModalInput::BackdropClick)}
        >
            <div class="modal-content" onclick={modal_click(ModalInput::ContentClick)}>
                <button class="close" type="button" aria-label="Close project details" onclick={modal_click(ModalInput::CloseClick)}>
                    {"×"}
                </button>
                <h2 id="modalTitle">{title}</h2>
                <p id="modalDescription">{description}</p>
                <ul id="modalTech" class="tag-list">
                    { for technologies.iter().map(|tech| html! { <li class="tag">{*tech}</li> }) }
                </ul>
                <ul id="modalFeatures" class="feature-list">
                    { for features.iter().map(|feature| html! { <li>{*feature}</li> }) }
                </ul>
                <a id="modalLink" class="link" href={link} target="_blank" rel="noopener noreferrer">
                    {"View project"}
                    <span class="external-mark" aria-hidden="true">{"↗"}</span>
                </a>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: SiteConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let config = props.config.clone();
    let themes = use_memo(config.theme_storage_key.clone(), |key| {
        ThemeController::new(browser_store(), key.clone())
    });
    let state = use_reducer({
        let themes = themes.clone();
        move || {
            let classes = body_classes();
            let theme = themes.load(classes.iter().map(String::as_str));
            PageState::new(theme, card_ids())
        }
    });
    let hero_background = use_node_ref();

    {
        let initial = state.theme;
        use_effect_with((), move |_| {
            apply_body_theme(initial);
            || ()
        });
    }

    {
        let config = config.clone();
        let hero_background = hero_background.clone();
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            let subscriptions = wire_scroll_effects(&config, &hero_background, dispatcher);
            move || drop(subscriptions)
        });
    }

    {
        let config = config.clone();
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            let observer = wire_reveal(&config, dispatcher);
            move || drop(observer)
        });
    }

    let on_toggle_theme = {
        let themes = themes.clone();
        let state = state.clone();
        Callback::from(move |_| {
            let next: ThemeMode = themes.toggle(state.theme);
            apply_body_theme_with_transition(next);
            state.dispatch(PageAction::SetTheme(next));
        })
    };

    let on_toggle_menu = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(PageAction::ToggleMenu))
    };

    let nav_click = |href: String| {
        let state = state.clone();
        let breakpoint = config.mobile_breakpoint_px;
        Callback::from(move |event: MouseEvent| {
            follow_nav_link(&event, &href);
            state.dispatch(PageAction::NavLinkClicked {
                narrow_viewport: is_narrow_viewport(viewport_width(), breakpoint),
            });
        })
    };

    let open_project = |id: &'static str| {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(PageAction::OpenProject(id.to_string())))
    };

    let on_modal_input = {
        let state = state.clone();
        Callback::from(move |input: ModalInput| state.dispatch(PageAction::Modal(input)))
    };

    let menu_open = state.menu.is_open();
    let active = state.active_section.as_deref();

    html! {
        <>
            <a class="skip-link" href="#about">{"Skip to main content"}</a>
            <header class="site-header">
                <nav class="navbar" aria-label="Primary">
                    <a class="nav-logo" href="#home" onclick={nav_click("#home".to_string())}>{"Portfolio"}</a>
                    <ul class={classes!("nav-menu", menu_open.then_some("active"))}>
                        { for SECTIONS.iter().map(|section| {
                            let href = format!("#{}", section.id);
                            html! {
                                <li class="nav-item">
                                    <a
                                        class={classes!("nav-link", link_is_active(&href, active).then_some("active"))}
                                        href={href.clone()}
                                        onclick={nav_click(href.clone())}
                                    >
                                        {section.label}
                                    </a>
                                </li>
                            }
                        }) }
                        <li class="nav-item">
                            <a class="nav-link" href={RESUME_HREF} target="_blank" rel="noopener noreferrer" onclick={nav_click(RESUME_HREF.to_string())}>
                                {"Resume"}
                            </a>
                        </li>
                    </ul>
                    <button
                        class="nav-toggle-btn"
                        type="button"
                        aria-label={state.theme.toggle_label()}
                        aria-pressed={state.theme.pressed().to_string()}
                        onclick={on_toggle_theme}
                    >
                        <span aria-hidden="true">{state.theme.icon()}</span>
                    </button>
                    <button
                        class={classes!("hamburger", menu_open.then_some("active"))}
                        type="button"
                        aria-label="Toggle navigation"
                        aria-expanded={menu_open.to_string()}
                        onclick={on_toggle_menu}
                    >
                        <span class="bar"></span>
                        <span class="bar"></span>
                        <span class="bar"></span>
                    </button>
                </nav>
            </header>

            <main>
                <section id="home" class="hero">
                    <div
                        ref={hero_background}
                        class={classes!("hero-background", state.theme.background_class())}
                        aria-hidden="true"
                    ></div>
                    <div class="hero-content">
                        <h1 class="hero-title">{"Hi, I build dependable software."}</h1>
                        <p class="hero-subtitle">{"Backend services, developer tools and the occasional web app."}</p>
                        <a class="hero-cta" href="#projects" onclick={nav_click("#projects".to_string())}>{"See my work"}</a>
                    </div>
                </section>

                <section id="about" class="section-block">
                    <h2>{"About"}</h2>
                    <p>
                        {"I am a software engineer who enjoys small, sharp tools and systems that stay up. \
                          Most of my recent work is in Rust and TypeScript."}
                    </p>
                </section>

                <section id="skills" class="section-block">
                    <h2>{"Skills"}</h2>
                    <div class="card-grid">
                        { for SKILLS.iter().map(|skill| {
                            let id = skill_card_id(skill.slug);
                            let revealed = state.reveal.is_revealed(&id);
                            html! {
                                <article
                                    class={classes!("skill-card", "reveal", revealed.then_some("animate-in"))}
                                    data-reveal-id={id}
                                >
                                    <h3>{skill.name}</h3>
                                    <p class="muted">{skill.detail}</p>
                                </article>
                            }
                        }) }
                    </div>
                </section>

                <section id="projects" class="section-block">
                    <h2>{"Projects"}</h2>
                    <div class="card-grid">
                        { for PROJECTS.iter().map(|project| {
                            let revealed = state.reveal.is_revealed(project.id);
                            html! {
                                <article
                                    class={classes!("project-card", "reveal", revealed.then_some("animate-in"))}
                                    data-reveal-id={project.id}
                                >
                                    <h3>{project.title}</h3>
                                    <p class="muted">{project.summary}</p>
                                    <button class="project-details" type="button" onclick={open_project(project.id)}>
                                        {"View details"}
                                    </button>
                                </article>
                            }
                        }) }
                    </div>
                </section>

                <section id="contact" class="section-block">
                    <h2>{"Contact"}</h2>
                    <ul class="row-list">
                        <li>
                            <ExternalLink href="https://github.com/portfolio-owner" label="GitHub" />
                            <span class="muted">{" — Code and experiments"}</span>
                        </li>
                        <li>
                            <ExternalLink href="https://www.linkedin.com/in/portfolio-owner" label="LinkedIn" />
                            <span class="muted">{" — Professional profile"}</span>
                        </li>
                        <li>
                            <ExternalLink href={RESUME_HREF} label="Resume" />
                            <span class="muted">{" — Current PDF"}</span>
                        </li>
                    </ul>
                </section>
            </main>

            <ProjectModal
                visible={state.modal.visible}
                project={state.modal.shown}
                on_input={on_modal_input}
            />
        </>
    }
}

fn mount(config: SiteConfig) -> Result<(), PageError> {
    let root = document()?
        .get_element_by_id(MOUNT_POINT_ID)
        .ok_or_else(|| PageError::MissingElement(format!("#{MOUNT_POINT_ID}")))?;

    yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
    Ok(())
}

pub fn run() {
    console_error_panic_hook::set_once();

    let parsed = SiteConfig::from_json(&element_text(SITE_CONFIG_ELEMENT_ID));
    let log_level = parsed
        .as_ref()
        .map(|config| config.log_level)
        .unwrap_or_else(|_| SiteConfig::default().log_level);
    let _ = console_log::init_with_level(log_level);

    let config = parsed.unwrap_or_else(|err| {
        log::warn!("{err}; falling back to defaults");
        SiteConfig::default()
    });

    if let Err(err) = mount(config) {
        log::error!("portfolio failed to start: {err}");
    }
}
