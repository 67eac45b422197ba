//! Mutable document tree built from pulldown-cmark events.
//!
//! pulldown-cmark produces a flat event stream. Extensions that need to
//! replace or insert nodes at a stable position work on this tree instead:
//! every `Start`/`End` pair becomes a [`NodeKind::Container`] with children,
//! images collapse into a childless [`NodeKind::Image`], and every other event
//! is a [`NodeKind::Leaf`].

use pulldown_cmark::{Event, Tag, TagEnd};

/// An image-style link as written in the source document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkReference {
    /// Destination URL, exactly as written.
    pub destination: String,
    /// Title attribute, empty when absent.
    pub title: String,
    /// Plain text of the image description.
    pub alt: String,
}

/// Kind of a document tree node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind<'a, X> {
    /// A container tag (paragraph, list, emphasis, ...) owning its children.
    Container(Tag<'a>),
    /// A non-container event (text, code, raw HTML, breaks, ...).
    Leaf(Event<'a>),
    /// An image-style link. Images never have children.
    Image(LinkReference),
    /// A node owned by an extension, rendered through [`Extension::render_node`].
    ///
    /// [`Extension::render_node`]: crate::Extension::render_node
    Custom(X),
}

/// A node in the document tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<'a, X> {
    pub kind: NodeKind<'a, X>,
    pub children: Vec<Node<'a, X>>,
    /// Presentation classes. Rendered on paragraphs.
    pub classes: Vec<String>,
}

impl<'a, X> Node<'a, X> {
    /// Create a node without children.
    pub fn new(kind: NodeKind<'a, X>) -> Self {
        Self {
            kind,
            children: Vec::new(),
            classes: Vec::new(),
        }
    }

    /// Create an extension node.
    pub fn custom(node: X) -> Self {
        Self::new(NodeKind::Custom(node))
    }

    /// The link reference if this node is an image.
    pub fn as_image(&self) -> Option<&LinkReference> {
        match &self.kind {
            NodeKind::Image(link) => Some(link),
            _ => None,
        }
    }

    /// The extension node if this is a custom node.
    pub fn as_custom(&self) -> Option<&X> {
        match &self.kind {
            NodeKind::Custom(node) => Some(node),
            _ => None,
        }
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self.kind, NodeKind::Container(Tag::Paragraph))
    }

    /// Add a presentation class unless already present.
    ///
    /// Only paragraphs render their classes.
    pub fn add_class(&mut self, class: &str) {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_owned());
        }
    }
}

/// A parsed markdown document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document<'a, X> {
    pub children: Vec<Node<'a, X>>,
}

impl<'a, X> Document<'a, X> {
    /// Build a tree from a pulldown-cmark event stream.
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = Event<'a>>,
    {
        let mut builder = TreeBuilder::new();
        for event in events {
            builder.push(event);
        }
        builder.finish()
    }

    /// Visit every node in pre-order, depth-first, left-to-right.
    pub fn for_each(&self, mut f: impl FnMut(&Node<'a, X>)) {
        fn visit<'a, X>(nodes: &[Node<'a, X>], f: &mut impl FnMut(&Node<'a, X>)) {
            for node in nodes {
                f(node);
                visit(&node.children, f);
            }
        }
        visit(&self.children, &mut f);
    }
}

/// Image being collected; nested images only contribute their text.
struct PendingImage {
    link: LinkReference,
    depth: usize,
}

struct TreeBuilder<'a, X> {
    root: Vec<Node<'a, X>>,
    open: Vec<Node<'a, X>>,
    image: Option<PendingImage>,
}

impl<'a, X> TreeBuilder<'a, X> {
    fn new() -> Self {
        Self {
            root: Vec::new(),
            open: Vec::new(),
            image: None,
        }
    }

    fn push(&mut self, event: Event<'a>) {
        if let Some(pending) = self.image.as_mut() {
            match event {
                Event::Start(Tag::Image { .. }) => pending.depth += 1,
                Event::End(TagEnd::Image) if pending.depth > 0 => pending.depth -= 1,
                Event::End(TagEnd::Image) => {
                    if let Some(done) = self.image.take() {
                        self.append(Node::new(NodeKind::Image(done.link)));
                    }
                }
                Event::Text(text) | Event::Code(text) => pending.link.alt.push_str(&text),
                _ => {}
            }
            return;
        }

        match event {
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => {
                self.image = Some(PendingImage {
                    link: LinkReference {
                        destination: dest_url.into_string(),
                        title: title.into_string(),
                        alt: String::new(),
                    },
                    depth: 0,
                });
            }
            Event::Start(tag) => self.open.push(Node::new(NodeKind::Container(tag))),
            Event::End(_) => {
                if let Some(node) = self.open.pop() {
                    self.append(node);
                }
            }
            other => self.append(Node::new(NodeKind::Leaf(other))),
        }
    }

    fn append(&mut self, node: Node<'a, X>) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root.push(node),
        }
    }

    fn finish(mut self) -> Document<'a, X> {
        if let Some(pending) = self.image.take() {
            self.append(Node::new(NodeKind::Image(pending.link)));
        }
        while let Some(node) = self.open.pop() {
            self.append(node);
        }
        Document {
            children: self.root,
        }
    }
}
