//! Document walker replacing provider links with embed nodes.

use embedmark_renderer::{Document, LinkReference, Node};
use tracing::{debug, warn};

use crate::classifier::classify;
use crate::node::{Diagnostic, EmbedNode, EmbedmarkNode};
use crate::options::EmbedOptions;

/// Classify every image in `document` once and substitute embeds in place.
///
/// Images with malformed destinations stay in the tree and get a diagnostic
/// node inserted right after them; each one also adds a warning. Running the
/// pass again on its own output changes nothing.
pub fn transform(
    document: &mut Document<'_, EmbedmarkNode>,
    options: &EmbedOptions,
    warnings: &mut Vec<String>,
) {
    walk(&mut document.children, options, warnings);
}

/// Walk `nodes` in pre-order. Returns true if an embed was substituted
/// directly among them.
fn walk(
    nodes: &mut Vec<Node<'_, EmbedmarkNode>>,
    options: &EmbedOptions,
    warnings: &mut Vec<String>,
) -> bool {
    let mut embedded = false;
    let mut index = 0;

    while index < nodes.len() {
        let Some(link) = nodes[index].as_image().cloned() else {
            let node = &mut nodes[index];
            if walk(&mut node.children, options, warnings)
                && node.is_paragraph()
                && let Some(class) = &options.container_class
            {
                node.add_class(class);
            }
            index += 1;
            continue;
        };

        match classify(&link.destination) {
            Ok(Some(classification)) => {
                if let Some(embed) =
                    EmbedNode::from_classification(classification, options.default_theme, &link)
                {
                    debug!(
                        provider = %embed.provider(),
                        identifier = embed.identifier(),
                        "Substituted embed"
                    );
                    nodes[index] = Node::custom(EmbedmarkNode::Embed(embed));
                    embedded = true;
                }
                index += 1;
            }
            Ok(None) => index += 1,
            Err(err) => {
                if !has_diagnostic(nodes.get(index + 1), &link) {
                    warn!(destination = %link.destination, error = %err, "Malformed embed URL");
                    let message = err.to_string();
                    warnings.push(message.clone());
                    nodes.insert(
                        index + 1,
                        Node::custom(EmbedmarkNode::Diagnostic(Diagnostic {
                            destination: link.destination,
                            message,
                        })),
                    );
                }
                // Skip the image and its diagnostic
                index += 2;
            }
        }
    }

    embedded
}

/// Whether `next` is the diagnostic already inserted for `link`.
fn has_diagnostic(next: Option<&Node<'_, EmbedmarkNode>>, link: &LinkReference) -> bool {
    matches!(
        next.and_then(Node::as_custom),
        Some(EmbedmarkNode::Diagnostic(diagnostic)) if diagnostic.destination == link.destination
    )
}
