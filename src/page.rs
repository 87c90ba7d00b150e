//! Page wiring: one controller per feature, initialised once.
//!
//! [`Page::init`] runs every initializer against the host in a fixed order.
//! Initializers whose elements are missing simply drop out. After that the
//! host forwards input with [`Page::handle`] and due work with
//! [`Page::run`].

use crate::config::MotionConfig;
use crate::counter::{COUNTER_ATTR, CounterState, Counters};
use crate::dom::{Event, Host, NodeId, Task};
use crate::hero::Hero;
use crate::modal::{CardModal, ContactModal};
use crate::nav::{MobileMenu, ScrollNav};
use crate::reveal::Reveal;
use crate::stagger::{self, ProcessSteps, TIMELINE_CLASS};

#[derive(Debug, Clone)]
pub struct Page {
    stagger_delay_ms: u32,
    menu: Option<MobileMenu>,
    reveal: Reveal,
    counters: Counters,
    hero: Option<Hero>,
    steps: Option<ProcessSteps>,
    scroll_nav: Option<ScrollNav>,
    card_modal: Option<CardModal>,
    contact_modal: Option<ContactModal>,
}

impl Page {
    pub fn init<H: Host>(host: &mut H, config: &MotionConfig) -> Self {
        let page = Self {
            stagger_delay_ms: config.stagger.delay_ms,
            menu: MobileMenu::init(host, &config.nav),
            reveal: Reveal::init(host, &config.observer),
            counters: Counters::new(config.counter.duration_ms),
            hero: Hero::init(host, &config.hero),
            steps: ProcessSteps::init(host, config),
            scroll_nav: ScrollNav::init(host, &config.nav),
            card_modal: CardModal::init(host),
            contact_modal: ContactModal::init(host),
        };
        log::debug!(
            "page wired: menu={} hero={} steps={} scroll_nav={} card_modal={} contact_modal={}",
            page.menu.is_some(),
            page.hero.is_some(),
            page.steps.is_some(),
            page.scroll_nav.is_some(),
            page.card_modal.is_some(),
            page.contact_modal.is_some(),
        );
        page
    }

    /// Counter state of `node`.
    pub fn counter_state(&self, node: NodeId) -> CounterState {
        self.counters.state(node)
    }

    /// React to user input or a viewport notification.
    pub fn handle<H: Host>(&mut self, host: &mut H, event: &Event) {
        if let Event::Intersect(node) = event {
            self.on_intersect(host, *node);
            return;
        }
        if let Some(menu) = &mut self.menu {
            menu.handle(host, event);
        }
        if let Some(hero) = &mut self.hero {
            hero.handle(host, event);
        }
        if let Some(scroll_nav) = &mut self.scroll_nav {
            scroll_nav.handle(host, event);
        }
        if let Some(card_modal) = &mut self.card_modal {
            card_modal.handle(host, event);
        }
        if let Some(contact_modal) = &mut self.contact_modal {
            contact_modal.handle(host, event);
        }
    }

    /// Run a task the host scheduled earlier. `now` is the frame or timer
    /// timestamp in host milliseconds.
    pub fn run<H: Host>(&mut self, host: &mut H, task: Task, now: f64) {
        match task {
            Task::CounterFrame(node) => self.counters.frame(host, node, now),
            Task::AddClass(node, class) => {
                if host.is_connected(node) {
                    host.add_class(node, class);
                }
            }
        }
    }

    fn on_intersect<H: Host>(&mut self, host: &mut H, node: NodeId) {
        if self.reveal.on_intersect(host, node) {
            if host.has_attribute(node, COUNTER_ATTR) {
                self.counters.start(host, node);
            }
            if host.has_class(node, TIMELINE_CLASS) {
                stagger::animate_timeline(host, node, self.stagger_delay_ms);
            }
        }
        if let Some(steps) = &mut self.steps {
            steps.on_intersect(host, node);
        }
    }
}
