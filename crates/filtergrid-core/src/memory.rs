//! In-memory element tree implementing [`NodeHost`].
//!
//! Used by tests and benchmarks, and by downstream crates that want to exercise a
//! grid without a browser. Elements carry a tag, an optional id, a class list, a
//! size, inline style and a log of emitted lifecycle events. Selectors are limited
//! to a single `.class`, `#id` or `tag`.

use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::error::NodeError;
use crate::events::LifecycleEvent;
use crate::geometry::{Size, StyleProperty};
use crate::host::NodeHost;

pub type MemoryNodeId = u64;

#[derive(Debug, Default)]
struct MemoryElement {
    tag: String,
    element_id: Option<String>,
    classes: SmallVec<[String; 2]>,
    parent: Option<MemoryNodeId>,
    children: Vec<MemoryNodeId>,
    size: Size,
    style: Vec<StyleProperty>,
    emitted: Vec<LifecycleEvent>,
    /// Style writes fail while set.
    detached: bool,
}

impl MemoryElement {
    fn matches(&self, selector: &str) -> bool {
        if let Some(class) = selector.strip_prefix('.') {
            self.classes.iter().any(|c| c == class)
        } else if let Some(id) = selector.strip_prefix('#') {
            self.element_id.as_deref() == Some(id)
        } else {
            self.tag.eq_ignore_ascii_case(selector)
        }
    }
}

#[derive(Debug, Default)]
struct MemoryDocument {
    elements: Vec<MemoryElement>,
}

impl MemoryDocument {
    fn get(&self, id: MemoryNodeId) -> Result<&MemoryElement, NodeError> {
        self.elements
            .get(id as usize)
            .ok_or(NodeError::UnknownNode(id))
    }

    fn get_mut(&mut self, id: MemoryNodeId) -> Result<&mut MemoryElement, NodeError> {
        self.elements
            .get_mut(id as usize)
            .ok_or(NodeError::UnknownNode(id))
    }

    fn is_ancestor(&self, ancestor: MemoryNodeId, node: MemoryNodeId) -> bool {
        let mut current = self.elements.get(node as usize).and_then(|el| el.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.elements.get(id as usize).and_then(|el| el.parent);
        }
        false
    }

    /// Pre-order walk below `root`, excluding `root` itself.
    fn collect_descendants(&self, root: MemoryNodeId, selector: &str, out: &mut Vec<MemoryNodeId>) {
        let Some(element) = self.elements.get(root as usize) else {
            return;
        };
        for &child in &element.children {
            if self.elements[child as usize].matches(selector) {
                out.push(child);
            }
            self.collect_descendants(child, selector, out);
        }
    }
}

/// Shared handle to an in-memory document. Clones see the same tree.
#[derive(Clone, Debug, Default)]
pub struct MemoryHost {
    document: Rc<RefCell<MemoryDocument>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached-from-tree root element and returns its id.
    pub fn create_element(&self, tag: &str, classes: &[&str]) -> MemoryNodeId {
        let mut document = self.document.borrow_mut();
        let id = document.elements.len() as MemoryNodeId;
        document.elements.push(MemoryElement {
            tag: tag.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..MemoryElement::default()
        });
        id
    }

    /// Creates an element with the given size and appends it to `parent`.
    pub fn insert(
        &self,
        parent: MemoryNodeId,
        tag: &str,
        classes: &[&str],
        size: Size,
    ) -> Result<MemoryNodeId, NodeError> {
        let child = self.create_element(tag, classes);
        self.set_size(child, size)?;
        self.append_child(&parent, &child)?;
        Ok(child)
    }

    pub fn set_element_id(&self, node: MemoryNodeId, element_id: &str) -> Result<(), NodeError> {
        self.document.borrow_mut().get_mut(node)?.element_id = Some(element_id.to_string());
        Ok(())
    }

    pub fn set_size(&self, node: MemoryNodeId, size: Size) -> Result<(), NodeError> {
        self.document.borrow_mut().get_mut(node)?.size = size;
        Ok(())
    }

    /// While detached, style writes to `node` fail with [`NodeError::Detached`].
    pub fn set_detached(&self, node: MemoryNodeId, detached: bool) -> Result<(), NodeError> {
        self.document.borrow_mut().get_mut(node)?.detached = detached;
        Ok(())
    }

    /// Inline style currently set on `node`, in first-write order.
    pub fn style(&self, node: MemoryNodeId) -> Result<Vec<StyleProperty>, NodeError> {
        Ok(self.document.borrow().get(node)?.style.clone())
    }

    /// Current inline value of the property named `name` (e.g. `"height"`).
    pub fn style_property(&self, node: MemoryNodeId, name: &str) -> Option<StyleProperty> {
        let document = self.document.borrow();
        let element = document.get(node).ok()?;
        element.style.iter().find(|p| p.name() == name).copied()
    }

    /// Lifecycle events mirrored onto `node`, oldest first.
    pub fn emitted(&self, node: MemoryNodeId) -> Result<Vec<LifecycleEvent>, NodeError> {
        Ok(self.document.borrow().get(node)?.emitted.clone())
    }

    pub fn children(&self, node: MemoryNodeId) -> Result<Vec<MemoryNodeId>, NodeError> {
        Ok(self.document.borrow().get(node)?.children.clone())
    }

    pub fn parent(&self, node: MemoryNodeId) -> Result<Option<MemoryNodeId>, NodeError> {
        Ok(self.document.borrow().get(node)?.parent)
    }
}

impl NodeHost for MemoryHost {
    type Node = MemoryNodeId;

    fn resolve(&self, locator: &str) -> Result<Vec<MemoryNodeId>, NodeError> {
        let document = self.document.borrow();
        let mut found = Vec::new();
        for (id, element) in document.elements.iter().enumerate() {
            if element.parent.is_some() {
                continue;
            }
            let id = id as MemoryNodeId;
            if element.matches(locator) {
                found.push(id);
            }
            document.collect_descendants(id, locator, &mut found);
        }
        Ok(found)
    }

    fn inner_width(&self, node: &MemoryNodeId) -> f32 {
        self.measure(node).width
    }

    fn measure(&self, node: &MemoryNodeId) -> Size {
        self.document
            .borrow()
            .get(*node)
            .map(|element| element.size)
            .unwrap_or(Size::ZERO)
    }

    fn set_style(
        &self,
        node: &MemoryNodeId,
        properties: &[StyleProperty],
    ) -> Result<(), NodeError> {
        let mut document = self.document.borrow_mut();
        let element = document.get_mut(*node)?;
        if element.detached {
            return Err(NodeError::Detached);
        }
        for property in properties {
            match element.style.iter_mut().find(|p| p.same_property(property)) {
                Some(existing) => *existing = *property,
                None => element.style.push(*property),
            }
        }
        Ok(())
    }

    fn clear_style(&self, node: &MemoryNodeId) -> Result<(), NodeError> {
        let mut document = self.document.borrow_mut();
        let element = document.get_mut(*node)?;
        if element.detached {
            return Err(NodeError::Detached);
        }
        element.style.clear();
        Ok(())
    }

    fn append_child(
        &self,
        container: &MemoryNodeId,
        child: &MemoryNodeId,
    ) -> Result<(), NodeError> {
        let (container, child) = (*container, *child);
        let mut document = self.document.borrow_mut();
        document.get(container)?;
        document.get(child)?;
        if container == child || document.is_ancestor(child, container) {
            return Err(NodeError::Host(format!(
                "cannot append #{} inside its own subtree",
                child
            )));
        }

        let old_parent = document.get(child)?.parent;
        if let Some(old_parent) = old_parent {
            document.get_mut(old_parent)?.children.retain(|&id| id != child);
        }
        document.get_mut(container)?.children.push(child);
        document.get_mut(child)?.parent = Some(container);
        Ok(())
    }

    fn find_descendants(
        &self,
        container: &MemoryNodeId,
        selector: &str,
    ) -> Result<Vec<MemoryNodeId>, NodeError> {
        let document = self.document.borrow();
        document.get(*container)?;
        let mut found = Vec::new();
        document.collect_descendants(*container, selector, &mut found);
        Ok(found)
    }

    fn emit(&self, node: &MemoryNodeId, event: LifecycleEvent) -> Result<(), NodeError> {
        self.document.borrow_mut().get_mut(*node)?.emitted.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;

    #[test]
    fn test_resolve_by_class_id_and_tag() {
        let host = MemoryHost::new();
        let root = host.create_element("section", &["filtr-container"]);
        host.set_element_id(root, "gallery").unwrap();
        host.insert(root, "div", &["filtr-item"], Size::ZERO).unwrap();

        assert_eq!(host.resolve(".filtr-container").unwrap(), vec![root]);
        assert_eq!(host.resolve("#gallery").unwrap(), vec![root]);
        assert_eq!(host.resolve("SECTION").unwrap(), vec![root]);
        assert_eq!(host.resolve(".filtr-item").unwrap().len(), 1);
        assert!(host.resolve(".missing").unwrap().is_empty());
    }

    #[test]
    fn test_find_descendants_in_document_order() {
        let host = MemoryHost::new();
        let root = host.create_element("div", &[]);
        let first = host.insert(root, "div", &["item"], Size::ZERO).unwrap();
        let wrapper = host.insert(root, "div", &["row"], Size::ZERO).unwrap();
        let nested = host.insert(wrapper, "div", &["item"], Size::ZERO).unwrap();
        let last = host.insert(root, "div", &["item"], Size::ZERO).unwrap();

        assert_eq!(
            host.find_descendants(&root, ".item").unwrap(),
            vec![first, nested, last]
        );
    }

    #[test]
    fn test_find_descendants_excludes_container() {
        let host = MemoryHost::new();
        let root = host.create_element("div", &["item"]);
        assert!(host.find_descendants(&root, ".item").unwrap().is_empty());
    }

    #[test]
    fn test_append_child_moves_between_parents() {
        let host = MemoryHost::new();
        let a = host.create_element("div", &[]);
        let b = host.create_element("div", &[]);
        let child = host.insert(a, "span", &[], Size::ZERO).unwrap();

        host.append_child(&b, &child).unwrap();

        assert!(host.children(a).unwrap().is_empty());
        assert_eq!(host.children(b).unwrap(), vec![child]);
        assert_eq!(host.parent(child).unwrap(), Some(b));
    }

    #[test]
    fn test_append_child_rejects_cycles() {
        let host = MemoryHost::new();
        let root = host.create_element("div", &[]);
        let child = host.insert(root, "div", &[], Size::ZERO).unwrap();

        assert!(matches!(host.append_child(&child, &root), Err(NodeError::Host(_))));
        assert!(matches!(host.append_child(&root, &root), Err(NodeError::Host(_))));
    }

    #[test]
    fn test_set_style_replaces_same_property() {
        let host = MemoryHost::new();
        let node = host.create_element("div", &[]);

        host.set_style(&node, &[StyleProperty::Height(10.0), StyleProperty::Padding(0.0)])
            .unwrap();
        host.set_style(&node, &[StyleProperty::Height(20.0)]).unwrap();

        assert_eq!(
            host.style(node).unwrap(),
            vec![StyleProperty::Height(20.0), StyleProperty::Padding(0.0)]
        );
        assert_eq!(host.style_property(node, "position"), None);

        host.set_style(&node, &[StyleProperty::Position(Position::Absolute)]).unwrap();
        host.clear_style(&node).unwrap();
        assert!(host.style(node).unwrap().is_empty());
    }

    #[test]
    fn test_detached_node_rejects_style_writes() {
        let host = MemoryHost::new();
        let node = host.create_element("div", &[]);
        host.set_detached(node, true).unwrap();

        assert_eq!(
            host.set_style(&node, &[StyleProperty::Height(1.0)]),
            Err(NodeError::Detached)
        );
        assert_eq!(host.clear_style(&node), Err(NodeError::Detached));
    }

    #[test]
    fn test_unknown_node() {
        let host = MemoryHost::new();
        assert_eq!(host.clear_style(&42), Err(NodeError::UnknownNode(42)));
        assert_eq!(host.measure(&42), Size::ZERO);
    }
}
