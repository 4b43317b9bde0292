use xmledit_document::{NodeId, NodeKind, XmlDocument, XmlNode};

/// Visitor pattern for traversing a document tree immutably
///
/// This trait provides default implementations that walk the entire tree in
/// document order (an element's attributes first, then its children).
/// Override specific visit_* methods to perform custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_element(&mut self, doc: &XmlDocument, id: NodeId) {
        walk_element(self, doc, id);
    }

    fn visit_attribute(&mut self, _doc: &XmlDocument, _id: NodeId) {
        // Leaf node, no children to walk
    }

    fn visit_text(&mut self, _doc: &XmlDocument, _id: NodeId) {
        // Leaf node, no children to walk
    }

    fn visit_cdata(&mut self, _doc: &XmlDocument, _id: NodeId) {
        // Leaf node, no children to walk
    }

    fn visit_comment(&mut self, _doc: &XmlDocument, _id: NodeId) {
        // Leaf node, no children to walk
    }
}

/// Walk a whole document starting at the root element.
pub fn walk_document<V: Visitor>(visitor: &mut V, doc: &XmlDocument) {
    visitor.visit_element(doc, doc.root());
}

/// Walk an element's attributes, then its children.
pub fn walk_element<V: Visitor>(visitor: &mut V, doc: &XmlDocument, id: NodeId) {
    let Some(XmlNode::Element {
        attributes,
        children,
        ..
    }) = doc.get(id)
    else {
        return;
    };

    for attr in attributes {
        visitor.visit_attribute(doc, *attr);
    }

    for child in children {
        match doc.get(*child).map(XmlNode::kind) {
            Some(NodeKind::Element) => visitor.visit_element(doc, *child),
            Some(NodeKind::Text) => visitor.visit_text(doc, *child),
            Some(NodeKind::Cdata) => visitor.visit_cdata(doc, *child),
            Some(NodeKind::Comment) => visitor.visit_comment(doc, *child),
            Some(NodeKind::Attribute) | None => {}
        }
    }
}
