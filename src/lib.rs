//! # Site Motion
//!
//! Client-side motion for a marketing website: stat counters that count up
//! when scrolled into view, scroll reveals, a staggered timeline, process
//! steps, a sticky navigation, the mobile menu and two modals.
//!
//! # Architecture: Controllers Over a Host
//!
//! Controllers never touch a browser API directly. They are written against
//! the [`dom::Host`] trait, which has two implementations:
//!
//! ```text
//! browser   WebHost     (web-sys, wasm32 only)
//! tests     MemoryDom   (in-memory tree + virtual clock)
//! ```
//!
//! [`page::Page::init`] wires every controller once. From then on the host
//! delivers input and viewport notifications as [`dom::Event`]s and due
//! work as [`dom::Task`]s. The same controllers therefore run unchanged in
//! the browser, in unit tests and in the `site-motion simulate` command.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`stat`] | Splits a stat string like `"12,9 Mio."` into value, suffix and precision |
//! | [`easing`] | Quartic ease-out curve |
//! | [`locale`] | German number formatting (`1.234,5`) |
//! | [`counter`] | Per-element count-up animation and its `idle → counting → counted` state |
//! | [`reveal`] | One-shot scroll reveals, reduced-motion fallback |
//! | [`stagger`] | Timeline weeks and process steps revealed one after another |
//! | [`hero`] | Delayed hero highlight and the scroll indicator |
//! | [`nav`] | Mobile menu and the scroll-aware top bar |
//! | [`modal`] | Card detail overlay and contact dialog |
//! | [`page`] | Wires all controllers and routes events and tasks |
//! | [`dom`] | The `Host` trait and its in-memory and browser implementations |
//! | [`sim`] | Virtual-clock driver for a page on a `MemoryDom` |
//! | [`config`] | `motion.toml` loading, merging over stock defaults, validation |
//! | [`demo`] | Demo page carrying every hook, rendered with Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Original Text Always Wins
//!
//! A counter's last frame writes back the exact text it started from, not a
//! re-formatted number. `"1.234"` may format differently than it was
//! authored, and the page must end up showing what the author wrote.
//!
//! ## Reduced Motion Shows, It Does Not Skip
//!
//! With `prefers-reduced-motion: reduce`, nothing is observed and nothing
//! counts. Every reveal target, counter, timeline and process step gets its
//! final state immediately so no content stays hidden.

pub mod config;
pub mod counter;
pub mod demo;
pub mod dom;
pub mod easing;
pub mod hero;
pub mod locale;
pub mod modal;
pub mod nav;
pub mod output;
pub mod page;
pub mod reveal;
pub mod sim;
pub mod stagger;
pub mod stat;
