//! Demo page carrying every hook the controllers wire up.
//!
//! `site-motion demo` writes this page next to the wasm bundle produced by
//! `wasm-pack build --target web`, so the whole behaviour can be tried in a
//! browser: counters, reveals, timeline, process steps, both modals, the
//! mobile menu and the scroll-aware bar.
//!
//! HTML is generated with [maud](https://maud.lambda.xyz/), auto-escaped.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;

const CSS: &str = include_str!("../static/demo.css");

const MENU_ICON: &str =
    r#"<path stroke-linecap="round" stroke-linejoin="round" d="M4 6h16M4 12h16M4 18h16" />"#;

/// Stats shown in the counter section, as authored.
pub const DEMO_STATS: [(&str, &str); 4] = [
    ("12,9 Mio.", "Einwohner im Einzugsgebiet"),
    ("57%", "Weiterempfehlungsquote"),
    ("1.234", "Projekte"),
    ("N/A", "Kein Zahlenwert, bleibt stehen"),
];

/// Cards opening the shared card modal: (title, modal title, modal HTML).
const DEMO_CARDS: [(&str, &str, &str); 2] = [
    (
        "Analyse",
        "Analyse im Detail",
        "<p>Wir werten Ihre Zahlen aus und zeigen Potenziale auf.</p>",
    ),
    (
        "Umsetzung",
        "Umsetzung im Detail",
        "<p>Schritt für Schritt, mit festen Ansprechpartnern.</p>",
    ),
];

const TIMELINE_WEEKS: usize = 12;
const PROCESS_STEPS: [&str; 3] = ["Erstgespräch", "Konzept", "Start"];

fn topbar_and_nav() -> Markup {
    html! {
        div id="topbar" class="topbar" { "Rufen Sie uns an: 0123 456789" }
        nav class="nav" {
            a href="#" { "KRS" }
            button class="nav__toggle" aria-expanded="false" aria-label="Menu oeffnen" {
                svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" {
                    (PreEscaped(MENU_ICON))
                }
            }
            div class="nav__mobile" aria-hidden="true" {
                a class="nav__mobile-link" href="#problem" { "Problem" }
                a class="nav__mobile-link" href="#zahlen" { "Zahlen" }
                a class="nav__mobile-cta" href="#kontakt" { "Kontakt" }
            }
        }
    }
}

fn hero() -> Markup {
    html! {
        section class="hero" {
            h1 {
                "Wachstum, "
                span class="hero__title-highlight" { "messbar" }
            }
            button class="hero__scroll-indicator" aria-label="Weiter" { "↓" }
        }
    }
}

fn stats() -> Markup {
    html! {
        section id="problem" class="reveal" {
            h2 class="reveal-left" { "Das Problem" }
            p class="reveal-right" { "Sichtbarkeit kostet Zeit." }
        }
        section id="zahlen" {
            @for (value, label) in DEMO_STATS {
                div class="reveal-scale" {
                    p class="stat" data-counter="" { (value) }
                    p { (label) }
                }
            }
        }
    }
}

fn timeline_and_steps() -> Markup {
    html! {
        section {
            div class="timeline-weeks" {
                @for _ in 0..TIMELINE_WEEKS {
                    span class="timeline-week" {}
                }
            }
            ol {
                @for step in PROCESS_STEPS {
                    li class="process-step" { (step) }
                }
            }
        }
    }
}

fn cards_and_modals() -> Markup {
    html! {
        section {
            @for (title, modal_title, modal_content) in DEMO_CARDS {
                article class="card card--has-modal"
                    data-modal-title=(modal_title)
                    data-modal-content=(modal_content) {
                    h3 { (title) }
                    button class="card__toggle" { "Mehr erfahren" }
                }
            }
        }
        div id="cardModal" class="modal-overlay" aria-hidden="true" {
            div class="modal" role="dialog" {
                h3 class="modal__title" {}
                div class="modal__content" {}
                button class="modal__close" aria-label="Schliessen" { "×" }
            }
        }
        section id="kontakt" {
            button id="openContactModal" { "Anrufen" }
            button id="openContactModalEmail" { "E-Mail schreiben" }
        }
        div id="contactModal" class="contact-modal" {
            div class="contact-modal__backdrop" {}
            div class="contact-modal__dialog" role="dialog" {
                p { "Wir melden uns innerhalb eines Werktags." }
                button class="contact-modal__close" aria-label="Schliessen" { "×" }
            }
        }
    }
}

/// Render the demo page. `script_src` is the wasm-bindgen JS glue module.
pub fn render_demo_page(script_src: &str) -> Markup {
    let loader = format!("import init from \"{script_src}\";\ninit();");
    html! {
        (DOCTYPE)
        html lang="de" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "site-motion demo" }
                style { (PreEscaped(CSS)) }
            }
            body {
                (topbar_and_nav())
                main {
                    (hero())
                    (stats())
                    (timeline_and_steps())
                    (cards_and_modals())
                }
                script type="module" { (PreEscaped(loader)) }
            }
        }
    }
}

/// Write the demo page to `path`, creating parent directories.
pub fn write_demo_page(path: &Path, script_src: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_demo_page(script_src).into_string())
}
