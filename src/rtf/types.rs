//! RTF document tree and content-item definitions.

/// A brace-delimited scope, mapped to one tree node.
///
/// Groups own their children outright; the tree is strictly shaped, with no
/// shared or back references, and a group's lifetime is bounded by its
/// parent's.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    children: Vec<Node>,
}

impl Group {
    /// Create an empty group.
    #[inline]
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// Append a child node.
    #[inline]
    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Get the ordered children of this group.
    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Number of direct children.
    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the group has no children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A classified element of a group.
///
/// `Text` and `CmdParam` carry identical merged literal content; the tree
/// builder tags a run `Text` when it sits directly inside the outermost
/// group and `CmdParam` when it sits deeper. Deeply nested runs carry
/// command payloads (hex-encoded image bytes), not prose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested group
    Group(Group),
    /// Command word, kept at any depth
    Cmd(String),
    /// Merged literal run directly inside the outermost group
    Text(String),
    /// Merged literal run inside a nested group
    CmdParam(String),
}

impl Node {
    /// Get the command word if this node is a command.
    #[inline]
    pub fn as_cmd(&self) -> Option<&str> {
        match self {
            Node::Cmd(word) => Some(word),
            _ => None,
        }
    }

    /// Get the text content if this node is a document text run.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Get the payload content if this node is a command parameter run.
    #[inline]
    pub fn as_cmd_param(&self) -> Option<&str> {
        match self {
            Node::CmdParam(payload) => Some(payload),
            _ => None,
        }
    }

    /// Get the nested group if this node is one.
    #[inline]
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(group) => Some(group),
            _ => None,
        }
    }
}

/// One item of document content, as consumed and produced by the codec.
///
/// An ordered `ContentItem` sequence is the input of the serializer and the
/// output of [`RtfDocument::items`](super::RtfDocument::items), so a decoded
/// document can be handed straight back to [`encode`](super::encode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentItem {
    /// A text run; line breaks inside it are paragraph breaks
    Text(String),
    /// An embedded PNG image
    Image {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
        /// Raw PNG bytes
        data: Vec<u8>,
    },
}
