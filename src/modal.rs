//! Card and contact modals.
//!
//! The card modal is a single shared overlay: each `.card--has-modal` card
//! carries its own title and HTML body in `data-modal-title` /
//! `data-modal-content`, copied into the overlay when the card's toggle is
//! clicked. The contact modal is a fixed dialog opened from two buttons.
//! Both close on Escape.

use crate::dom::{Event, EventKind, Host, ListenTarget, NodeId};
use crate::nav::OPEN_CLASS;

pub const CARD_MODAL_SELECTOR: &str = "#cardModal";
pub const CARD_SELECTOR: &str = ".card--has-modal";
pub const CARD_TOGGLE_SELECTOR: &str = ".card--has-modal .card__toggle";
pub const BODY_MODAL_CLASS: &str = "modal-open";

pub const CONTACT_MODAL_SELECTOR: &str = "#contactModal";
pub const CONTACT_OPENER_SELECTORS: [&str; 2] = ["#openContactModal", "#openContactModalEmail"];

const ESCAPE: &str = "Escape";

fn first_within<H: Host>(host: &H, root: NodeId, selector: &str) -> Option<NodeId> {
    host.query_within(root, selector).first().copied()
}

/// Overlay showing the details of one card at a time.
#[derive(Debug, Clone)]
pub struct CardModal {
    overlay: NodeId,
    title: NodeId,
    content: NodeId,
    close: NodeId,
    toggles: Vec<NodeId>,
}

impl CardModal {
    pub fn init<H: Host>(host: &mut H) -> Option<Self> {
        let overlay = host.query(CARD_MODAL_SELECTOR)?;
        let title = first_within(host, overlay, ".modal__title")?;
        let content = first_within(host, overlay, ".modal__content")?;
        let close = first_within(host, overlay, ".modal__close")?;
        let toggles = host.query_all(CARD_TOGGLE_SELECTOR);

        for toggle in &toggles {
            host.listen(ListenTarget::Node(*toggle), EventKind::Click);
        }
        host.listen(ListenTarget::Node(close), EventKind::Click);
        host.listen(ListenTarget::Node(overlay), EventKind::Click);
        host.listen(ListenTarget::Document, EventKind::Keydown);

        Some(Self {
            overlay,
            title,
            content,
            close,
            toggles,
        })
    }

    pub fn is_open<H: Host>(&self, host: &H) -> bool {
        host.has_class(self.overlay, OPEN_CLASS)
    }

    pub fn handle<H: Host>(&mut self, host: &mut H, event: &Event) {
        match event {
            Event::Click { listener, .. } if self.toggles.contains(listener) => {
                let Some(card) = host.closest(*listener, CARD_SELECTOR) else {
                    return;
                };
                let title = host.attribute(card, "data-modal-title").unwrap_or_default();
                let content = host.attribute(card, "data-modal-content").unwrap_or_default();
                host.set_text(self.title, &title);
                host.set_inner_html(self.content, &content);
                self.open(host);
            }
            Event::Click { listener, .. } if *listener == self.close => self.close(host),
            // Only the backdrop itself, not clicks bubbling up from the dialog.
            Event::Click { listener, target }
                if *listener == self.overlay && *target == Some(self.overlay) =>
            {
                self.close(host)
            }
            Event::Keydown { key } if key == ESCAPE && self.is_open(host) => self.close(host),
            _ => {}
        }
    }

    fn open<H: Host>(&self, host: &mut H) {
        host.add_class(self.overlay, OPEN_CLASS);
        host.set_attribute(self.overlay, "aria-hidden", "false");
        if let Some(body) = host.body() {
            host.add_class(body, BODY_MODAL_CLASS);
        }
        host.focus(self.close);
    }

    fn close<H: Host>(&self, host: &mut H) {
        host.remove_class(self.overlay, OPEN_CLASS);
        host.set_attribute(self.overlay, "aria-hidden", "true");
        if let Some(body) = host.body() {
            host.remove_class(body, BODY_MODAL_CLASS);
        }
    }
}

/// Contact dialog reachable from the phone and e-mail buttons.
#[derive(Debug, Clone)]
pub struct ContactModal {
    modal: NodeId,
    openers: Vec<NodeId>,
    close: NodeId,
    backdrop: NodeId,
}

impl ContactModal {
    pub fn init<H: Host>(host: &mut H) -> Option<Self> {
        let modal = host.query(CONTACT_MODAL_SELECTOR)?;
        let close = first_within(host, modal, ".contact-modal__close")?;
        let backdrop = first_within(host, modal, ".contact-modal__backdrop")?;
        let openers: Vec<NodeId> = CONTACT_OPENER_SELECTORS
            .iter()
            .filter_map(|s| host.query(s))
            .collect();

        for node in openers.iter().chain([&close, &backdrop]) {
            host.listen(ListenTarget::Node(*node), EventKind::Click);
        }
        host.listen(ListenTarget::Document, EventKind::Keydown);

        Some(Self {
            modal,
            openers,
            close,
            backdrop,
        })
    }

    pub fn is_open<H: Host>(&self, host: &H) -> bool {
        host.has_class(self.modal, OPEN_CLASS)
    }

    pub fn handle<H: Host>(&mut self, host: &mut H, event: &Event) {
        match event {
            Event::Click { listener, .. } if self.openers.contains(listener) => self.open(host),
            Event::Click { listener, .. }
                if *listener == self.close || *listener == self.backdrop =>
            {
                self.close(host)
            }
            Event::Keydown { key } if key == ESCAPE && self.is_open(host) => self.close(host),
            _ => {}
        }
    }

    fn open<H: Host>(&self, host: &mut H) {
        host.add_class(self.modal, OPEN_CLASS);
        if let Some(body) = host.body() {
            host.set_style(body, "overflow", "hidden");
        }
    }

    fn close<H: Host>(&self, host: &mut H) {
        host.remove_class(self.modal, OPEN_CLASS);
        if let Some(body) = host.body() {
            host.set_style(body, "overflow", "");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{El, MemoryDom};

    fn click(listener: NodeId, target: NodeId) -> Event {
        Event::Click {
            listener,
            target: Some(target),
        }
    }

    fn escape() -> Event {
        Event::Keydown {
            key: "Escape".to_string(),
        }
    }

    fn card_dom() -> MemoryDom {
        let mut dom = MemoryDom::new();
        dom.append_to_body(
            El::new("article")
                .class("card card--has-modal")
                .attr("data-modal-title", "Förderung")
                .attr("data-modal-content", "<p>Bis zu 80%</p>")
                .child(El::new("button").class("card__toggle")),
        );
        dom.append_to_body(
            El::new("div")
                .id("cardModal")
                .child(
                    El::new("div")
                        .class("modal")
                        .child(El::new("h3").class("modal__title"))
                        .child(El::new("div").class("modal__content"))
                        .child(El::new("button").class("modal__close")),
                ),
        );
        dom
    }

    #[test]
    fn toggle_fills_and_opens_card_modal() {
        let mut dom = card_dom();
        let mut modal = CardModal::init(&mut dom).unwrap();
        let toggle = dom.query(".card__toggle").unwrap();
        modal.handle(&mut dom, &click(toggle, toggle));

        let title = dom.query(".modal__title").unwrap();
        let content = dom.query(".modal__content").unwrap();
        let close = dom.query(".modal__close").unwrap();
        let overlay = dom.query("#cardModal").unwrap();
        let body = dom.body().unwrap();
        assert_eq!(dom.text(title).as_deref(), Some("Förderung"));
        assert_eq!(dom.inner_html(content), Some("<p>Bis zu 80%</p>"));
        assert!(modal.is_open(&dom));
        assert_eq!(dom.attribute(overlay, "aria-hidden").as_deref(), Some("false"));
        assert!(dom.has_class(body, BODY_MODAL_CLASS));
        assert_eq!(dom.focused(), Some(close));
    }

    #[test]
    fn clicks_inside_dialog_do_not_close() {
        let mut dom = card_dom();
        let mut modal = CardModal::init(&mut dom).unwrap();
        let toggle = dom.query(".card__toggle").unwrap();
        let overlay = dom.query("#cardModal").unwrap();
        let title = dom.query(".modal__title").unwrap();
        modal.handle(&mut dom, &click(toggle, toggle));
        modal.handle(&mut dom, &click(overlay, title));
        assert!(modal.is_open(&dom));
        modal.handle(&mut dom, &click(overlay, overlay));
        assert!(!modal.is_open(&dom));
        assert!(!dom.has_class(dom.body().unwrap(), BODY_MODAL_CLASS));
    }

    #[test]
    fn clicks_on_unknown_descendants_do_not_close() {
        let mut dom = card_dom();
        let mut modal = CardModal::init(&mut dom).unwrap();
        let toggle = dom.query(".card__toggle").unwrap();
        let overlay = dom.query("#cardModal").unwrap();
        modal.handle(&mut dom, &click(toggle, toggle));
        modal.handle(
            &mut dom,
            &Event::Click {
                listener: overlay,
                target: None,
            },
        );
        assert!(modal.is_open(&dom));
    }

    #[test]
    fn escape_closes_only_when_open() {
        let mut dom = card_dom();
        let mut modal = CardModal::init(&mut dom).unwrap();
        let overlay = dom.query("#cardModal").unwrap();
        modal.handle(&mut dom, &escape());
        assert!(dom.attribute(overlay, "aria-hidden").is_none());

        let close = dom.query(".modal__close").unwrap();
        let toggle = dom.query(".card__toggle").unwrap();
        modal.handle(&mut dom, &click(toggle, toggle));
        modal.handle(&mut dom, &escape());
        assert!(!modal.is_open(&dom));
        modal.handle(&mut dom, &click(toggle, toggle));
        modal.handle(&mut dom, &click(close, close));
        assert_eq!(dom.attribute(overlay, "aria-hidden").as_deref(), Some("true"));
    }

    #[test]
    fn card_modal_without_close_button_is_skipped() {
        let mut dom = MemoryDom::new();
        dom.append_to_body(El::new("div").id("cardModal").child(El::new("h3").class("modal__title")));
        assert!(CardModal::init(&mut dom).is_none());
        assert!(!dom.is_listening(ListenTarget::Document, EventKind::Keydown));
    }

    fn contact_dom(with_email_button: bool) -> MemoryDom {
        let mut dom = MemoryDom::new();
        dom.append_to_body(El::new("button").id("openContactModal"));
        if with_email_button {
            dom.append_to_body(El::new("button").id("openContactModalEmail"));
        }
        dom.append_to_body(
            El::new("div")
                .id("contactModal")
                .child(El::new("div").class("contact-modal__backdrop"))
                .child(El::new("button").class("contact-modal__close")),
        );
        dom
    }

    #[test]
    fn either_button_opens_contact_modal() {
        for opener in ["#openContactModal", "#openContactModalEmail"] {
            let mut dom = contact_dom(true);
            let mut modal = ContactModal::init(&mut dom).unwrap();
            let button = dom.query(opener).unwrap();
            modal.handle(&mut dom, &click(button, button));
            assert!(modal.is_open(&dom));
            assert_eq!(dom.style(dom.body().unwrap(), "overflow"), Some("hidden"));
        }
    }

    #[test]
    fn backdrop_close_and_escape_all_close() {
        let mut dom = contact_dom(false);
        let mut modal = ContactModal::init(&mut dom).unwrap();
        let phone = dom.query("#openContactModal").unwrap();
        let backdrop = dom.query(".contact-modal__backdrop").unwrap();
        let close = dom.query(".contact-modal__close").unwrap();
        let body = dom.body().unwrap();

        for closer in [click(backdrop, backdrop), click(close, close), escape()] {
            modal.handle(&mut dom, &click(phone, phone));
            assert!(modal.is_open(&dom));
            modal.handle(&mut dom, &closer);
            assert!(!modal.is_open(&dom));
            assert_eq!(dom.style(body, "overflow"), None);
        }
    }
}
