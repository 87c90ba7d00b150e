//! The CSS selector subset understood by [`MemoryDom`](super::MemoryDom).
//!
//! Supported: selector lists (`a, b`), the descendant combinator (`a b`),
//! and compound selectors built from a tag name, `#id`, `.class` and
//! `[attr]`. That covers every selector the controllers use.

/// Read access to an element tree, enough to match selectors.
pub(crate) trait ElementTree {
    type Node: Copy;
    fn tag(&self, node: Self::Node) -> &str;
    fn element_id(&self, node: Self::Node) -> Option<&str>;
    fn has_class(&self, node: Self::Node, class: &str) -> bool;
    fn has_attr(&self, node: Self::Node, name: &str) -> bool;
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<String>,
}

impl Compound {
    fn parse(s: &str) -> Compound {
        let mut compound = Compound::default();
        let mut rest = s;
        let take_ident = |rest: &str| -> usize {
            rest.find(['.', '#', '[']).unwrap_or(rest.len())
        };
        let tag_end = take_ident(rest);
        if tag_end > 0 && &rest[..tag_end] != "*" {
            compound.tag = Some(rest[..tag_end].to_ascii_lowercase());
        }
        rest = &rest[tag_end..];
        while let Some(c) = rest.chars().next() {
            match c {
                '.' | '#' => {
                    let body = &rest[1..];
                    let end = take_ident(body);
                    if c == '.' {
                        compound.classes.push(body[..end].to_string());
                    } else {
                        compound.id = Some(body[..end].to_string());
                    }
                    rest = &body[end..];
                }
                '[' => {
                    let end = rest.find(']').unwrap_or(rest.len());
                    compound.attrs.push(rest[1..end].trim().to_string());
                    rest = rest.get(end + 1..).unwrap_or("");
                }
                _ => break,
            }
        }
        compound
    }

    fn matches<T: ElementTree>(&self, tree: &T, node: T::Node) -> bool {
        if let Some(tag) = &self.tag {
            if !tree.tag(node).eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if tree.element_id(node) != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| tree.has_class(node, c))
            && self.attrs.iter().all(|a| tree.has_attr(node, a))
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Selector {
    /// Each alternative is a descendant chain, outermost first.
    alternatives: Vec<Vec<Compound>>,
}

impl Selector {
    pub(crate) fn parse(s: &str) -> Selector {
        let alternatives = s
            .split(',')
            .map(|alt| alt.split_whitespace().map(Compound::parse).collect::<Vec<_>>())
            .filter(|chain| !chain.is_empty())
            .collect();
        Selector { alternatives }
    }

    pub(crate) fn matches<T: ElementTree>(&self, tree: &T, node: T::Node) -> bool {
        self.alternatives
            .iter()
            .any(|chain| chain_matches(tree, node, chain))
    }
}

fn chain_matches<T: ElementTree>(tree: &T, node: T::Node, chain: &[Compound]) -> bool {
    let Some((last, ancestors)) = chain.split_last() else {
        return false;
    };
    if !last.matches(tree, node) {
        return false;
    }
    // Greedy right-to-left walk; sufficient without child/sibling combinators.
    let mut remaining = ancestors;
    let mut current = tree.parent(node);
    while let Some((wanted, rest)) = remaining.split_last() {
        match current {
            Some(n) if wanted.matches(tree, n) => {
                remaining = rest;
                current = tree.parent(n);
            }
            Some(n) => current = tree.parent(n),
            None => return false,
        }
    }
    true
}
