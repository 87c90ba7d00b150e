//! Navigation: the mobile menu and the scroll-aware top bar.

use crate::config::NavConfig;
use crate::dom::{Event, EventKind, Host, ListenTarget, NodeId};

pub const TOGGLE_SELECTOR: &str = ".nav__toggle";
pub const MOBILE_MENU_SELECTOR: &str = ".nav__mobile";
pub const MOBILE_LINK_SELECTOR: &str = ".nav__mobile-link, .nav__mobile-cta";
pub const OPEN_CLASS: &str = "is-open";

pub const TOPBAR_SELECTOR: &str = "#topbar";
pub const NAV_SELECTOR: &str = ".nav";
pub const TOPBAR_HIDDEN_CLASS: &str = "topbar--hidden";
pub const NAV_VISIBLE_CLASS: &str = "nav--visible";

const CLOSE_ICON: &str =
    r#"<path stroke-linecap="round" stroke-linejoin="round" d="M6 18L18 6M6 6l12 12" />"#;
const MENU_ICON: &str =
    r#"<path stroke-linecap="round" stroke-linejoin="round" d="M4 6h16M4 12h16M4 18h16" />"#;
const CLOSE_LABEL: &str = "Menu schliessen";
const OPEN_LABEL: &str = "Menu oeffnen";

/// Hamburger menu for narrow viewports.
#[derive(Debug, Clone)]
pub struct MobileMenu {
    toggle: NodeId,
    menu: NodeId,
    links: Vec<NodeId>,
    breakpoint: f64,
}

impl MobileMenu {
    pub fn init<H: Host>(host: &mut H, config: &NavConfig) -> Option<Self> {
        let toggle = host.query(TOGGLE_SELECTOR)?;
        let menu = host.query(MOBILE_MENU_SELECTOR)?;
        let links = host.query_all(MOBILE_LINK_SELECTOR);
        host.listen(ListenTarget::Node(toggle), EventKind::Click);
        for link in &links {
            host.listen(ListenTarget::Node(*link), EventKind::Click);
        }
        host.listen(ListenTarget::Window, EventKind::Resize);
        Some(Self {
            toggle,
            menu,
            links,
            breakpoint: config.mobile_breakpoint,
        })
    }

    pub fn is_open<H: Host>(&self, host: &H) -> bool {
        host.has_class(self.menu, OPEN_CLASS)
    }

    pub fn handle<H: Host>(&mut self, host: &mut H, event: &Event) {
        match event {
            Event::Click { listener, .. } if *listener == self.toggle => {
                let open = host.toggle_class(self.menu, OPEN_CLASS);
                self.sync(host, open);
            }
            Event::Click { listener, .. } if self.links.contains(listener) => {
                self.close(host);
            }
            Event::Resize { width } if *width >= self.breakpoint && self.is_open(host) => {
                self.close(host);
            }
            _ => {}
        }
    }

    fn close<H: Host>(&self, host: &mut H) {
        host.remove_class(self.menu, OPEN_CLASS);
        self.sync(host, false);
    }

    fn sync<H: Host>(&self, host: &mut H, open: bool) {
        host.set_attribute(self.toggle, "aria-expanded", if open { "true" } else { "false" });
        host.set_attribute(self.menu, "aria-hidden", if open { "false" } else { "true" });
        if let Some(icon) = host.query_within(self.toggle, "svg").first().copied() {
            host.set_inner_html(icon, if open { CLOSE_ICON } else { MENU_ICON });
        }
        host.set_attribute(
            self.toggle,
            "aria-label",
            if open { CLOSE_LABEL } else { OPEN_LABEL },
        );
    }
}

/// Swaps the top bar for the sticky nav once the page is scrolled.
#[derive(Debug, Clone)]
pub struct ScrollNav {
    topbar: NodeId,
    nav: NodeId,
    threshold: f64,
}

impl ScrollNav {
    pub fn init<H: Host>(host: &mut H, config: &NavConfig) -> Option<Self> {
        let topbar = host.query(TOPBAR_SELECTOR)?;
        let nav = host.query(NAV_SELECTOR)?;
        host.listen(ListenTarget::Window, EventKind::Scroll);
        Some(Self {
            topbar,
            nav,
            threshold: config.scroll_threshold,
        })
    }

    pub fn handle<H: Host>(&mut self, host: &mut H, event: &Event) {
        let Event::Scroll { y } = event else {
            return;
        };
        if *y > self.threshold {
            host.add_class(self.topbar, TOPBAR_HIDDEN_CLASS);
            host.add_class(self.nav, NAV_VISIBLE_CLASS);
        } else {
            host.remove_class(self.topbar, TOPBAR_HIDDEN_CLASS);
            host.remove_class(self.nav, NAV_VISIBLE_CLASS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{El, MemoryDom};

    struct MenuFixture {
        dom: MemoryDom,
        toggle: NodeId,
        menu: NodeId,
        link: NodeId,
        icon: NodeId,
    }

    fn menu_fixture() -> MenuFixture {
        let mut dom = MemoryDom::new();
        let toggle = dom.append_to_body(El::new("button").class("nav__toggle").child(El::new("svg")));
        let menu = dom.append_to_body(
            El::new("div")
                .class("nav__mobile")
                .child(El::new("a").class("nav__mobile-link").text("Leistungen"))
                .child(El::new("a").class("nav__mobile-cta").text("Kontakt")),
        );
        let link = dom.query(".nav__mobile-link").unwrap();
        let icon = dom.query("svg").unwrap();
        MenuFixture {
            dom,
            toggle,
            menu,
            link,
            icon,
        }
    }

    fn click(node: NodeId) -> Event {
        Event::Click {
            listener: node,
            target: Some(node),
        }
    }

    #[test]
    fn missing_toggle_skips_menu() {
        let mut dom = MemoryDom::new();
        dom.append_to_body(El::new("div").class("nav__mobile"));
        assert!(MobileMenu::init(&mut dom, &NavConfig::default()).is_none());
    }

    #[test]
    fn toggle_opens_and_syncs_attributes() {
        let mut f = menu_fixture();
        let mut menu = MobileMenu::init(&mut f.dom, &NavConfig::default()).unwrap();
        menu.handle(&mut f.dom, &click(f.toggle));
        assert!(f.dom.has_class(f.menu, OPEN_CLASS));
        assert_eq!(f.dom.attribute(f.toggle, "aria-expanded").as_deref(), Some("true"));
        assert_eq!(f.dom.attribute(f.menu, "aria-hidden").as_deref(), Some("false"));
        assert_eq!(f.dom.attribute(f.toggle, "aria-label").as_deref(), Some(CLOSE_LABEL));
        assert_eq!(f.dom.inner_html(f.icon), Some(CLOSE_ICON));

        menu.handle(&mut f.dom, &click(f.toggle));
        assert!(!f.dom.has_class(f.menu, OPEN_CLASS));
        assert_eq!(f.dom.attribute(f.toggle, "aria-label").as_deref(), Some(OPEN_LABEL));
        assert_eq!(f.dom.inner_html(f.icon), Some(MENU_ICON));
    }

    #[test]
    fn link_click_closes() {
        let mut f = menu_fixture();
        let mut menu = MobileMenu::init(&mut f.dom, &NavConfig::default()).unwrap();
        menu.handle(&mut f.dom, &click(f.toggle));
        menu.handle(&mut f.dom, &click(f.link));
        assert!(!menu.is_open(&f.dom));
        assert_eq!(f.dom.attribute(f.toggle, "aria-expanded").as_deref(), Some("false"));
    }

    #[test]
    fn resize_past_breakpoint_closes() {
        let mut f = menu_fixture();
        let mut menu = MobileMenu::init(&mut f.dom, &NavConfig::default()).unwrap();
        menu.handle(&mut f.dom, &click(f.toggle));
        menu.handle(&mut f.dom, &Event::Resize { width: 500.0 });
        assert!(menu.is_open(&f.dom));
        menu.handle(&mut f.dom, &Event::Resize { width: 768.0 });
        assert!(!menu.is_open(&f.dom));
        assert_eq!(f.dom.attribute(f.menu, "aria-hidden").as_deref(), Some("true"));
    }

    #[test]
    fn scroll_nav_swaps_bars_at_threshold() {
        let mut dom = MemoryDom::new();
        let topbar = dom.append_to_body(El::new("div").id("topbar"));
        let nav = dom.append_to_body(El::new("nav").class("nav"));
        let mut scroll_nav = ScrollNav::init(&mut dom, &NavConfig::default()).unwrap();
        assert!(dom.is_listening(ListenTarget::Window, EventKind::Scroll));

        scroll_nav.handle(&mut dom, &Event::Scroll { y: 100.0 });
        assert!(!dom.has_class(nav, NAV_VISIBLE_CLASS));
        scroll_nav.handle(&mut dom, &Event::Scroll { y: 101.0 });
        assert!(dom.has_class(topbar, TOPBAR_HIDDEN_CLASS));
        assert!(dom.has_class(nav, NAV_VISIBLE_CLASS));
        scroll_nav.handle(&mut dom, &Event::Scroll { y: 0.0 });
        assert!(!dom.has_class(topbar, TOPBAR_HIDDEN_CLASS));
        assert!(!dom.has_class(nav, NAV_VISIBLE_CLASS));
    }
}
