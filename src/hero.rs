//! Hero section: delayed highlight, scroll indicator.

use crate::config::HeroConfig;
use crate::dom::{Event, EventKind, Host, ListenTarget, NodeId, Task};
use crate::reveal::VISIBLE_CLASS;

pub const HIGHLIGHT_SELECTOR: &str = ".hero__title-highlight";
pub const INDICATOR_SELECTOR: &str = ".hero__scroll-indicator";
/// Section the indicator scrolls to.
pub const NEXT_SECTION_SELECTOR: &str = "#problem";

#[derive(Debug, Clone)]
pub struct Hero {
    indicator: NodeId,
    indicator_hidden: bool,
    hide_after: f64,
}

impl Hero {
    /// Schedule the fade-ins. Returns a controller only when there is a
    /// scroll indicator to react to.
    pub fn init<H: Host>(host: &mut H, config: &HeroConfig) -> Option<Self> {
        if let Some(highlight) = host.query(HIGHLIGHT_SELECTOR) {
            host.set_timeout(
                config.highlight_delay_ms,
                Task::AddClass(highlight, VISIBLE_CLASS),
            );
        }
        let indicator = host.query(INDICATOR_SELECTOR)?;
        host.set_timeout(
            config.indicator_delay_ms,
            Task::AddClass(indicator, VISIBLE_CLASS),
        );
        host.listen(ListenTarget::Node(indicator), EventKind::Click);
        host.listen(ListenTarget::Window, EventKind::Scroll);
        Some(Self {
            indicator,
            indicator_hidden: false,
            hide_after: config.indicator_hide_after,
        })
    }

    pub fn handle<H: Host>(&mut self, host: &mut H, event: &Event) {
        match event {
            Event::Click { listener, .. } if *listener == self.indicator => {
                if let Some(next) = host.query(NEXT_SECTION_SELECTOR) {
                    host.scroll_into_view(next);
                }
            }
            Event::Scroll { y } if !self.indicator_hidden && *y > self.hide_after => {
                host.set_style(self.indicator, "opacity", "0");
                self.indicator_hidden = true;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{El, MemoryDom};

    fn hero_dom() -> (MemoryDom, NodeId) {
        let mut dom = MemoryDom::new();
        dom.append_to_body(El::new("span").class("hero__title-highlight"));
        let indicator = dom.append_to_body(El::new("button").class("hero__scroll-indicator"));
        dom.append_to_body(El::new("section").id("problem"));
        (dom, indicator)
    }

    #[test]
    fn schedules_both_fade_ins() {
        let (mut dom, indicator) = hero_dom();
        Hero::init(&mut dom, &HeroConfig::default()).unwrap();
        assert_eq!(dom.pending_timers(), 2);
        assert_eq!(dom.next_timer_due(), Some(500.0));
        assert!(dom.is_listening(ListenTarget::Node(indicator), EventKind::Click));
    }

    #[test]
    fn indicator_click_scrolls_to_next_section() {
        let (mut dom, indicator) = hero_dom();
        let mut hero = Hero::init(&mut dom, &HeroConfig::default()).unwrap();
        hero.handle(
            &mut dom,
            &Event::Click {
                listener: indicator,
                target: Some(indicator),
            },
        );
        let problem = dom.query("#problem").unwrap();
        assert_eq!(dom.scrolled_into_view(), &[problem]);
    }

    #[test]
    fn indicator_fades_once_past_threshold() {
        let (mut dom, indicator) = hero_dom();
        let mut hero = Hero::init(&mut dom, &HeroConfig::default()).unwrap();
        hero.handle(&mut dom, &Event::Scroll { y: 80.0 });
        assert_eq!(dom.style(indicator, "opacity"), None);
        hero.handle(&mut dom, &Event::Scroll { y: 120.0 });
        assert_eq!(dom.style(indicator, "opacity"), Some("0"));
        dom.set_style(indicator, "opacity", "");
        hero.handle(&mut dom, &Event::Scroll { y: 400.0 });
        assert_eq!(dom.style(indicator, "opacity"), None);
    }

    #[test]
    fn missing_indicator_still_schedules_highlight() {
        let mut dom = MemoryDom::new();
        dom.append_to_body(El::new("span").class("hero__title-highlight"));
        assert!(Hero::init(&mut dom, &HeroConfig::default()).is_none());
        assert_eq!(dom.pending_timers(), 1);
    }
}
