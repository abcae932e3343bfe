use metanord_model::{LocalizedText, Page, PageComponent, PageSection};

/// Visitor pattern for traversing the content tree immutably
///
/// Default implementations walk the whole page: sections in order, then each
/// section's components in order. Override specific visit_* methods to act on
/// nodes.
pub trait Visitor: Sized {
    fn visit_page(&mut self, page: &Page) {
        walk_page(self, page);
    }

    fn visit_section(&mut self, section: &PageSection) {
        walk_section(self, section);
    }

    fn visit_component(&mut self, section: &PageSection, component: &PageComponent) {
        walk_component(self, section, component);
    }

    fn visit_text(&mut self, _field: &str, _text: &LocalizedText) {
        // Leaf node, no children to walk
    }
}

/// Mutable visitor pattern for transforming the content tree
pub trait VisitorMut: Sized {
    fn visit_page_mut(&mut self, page: &mut Page) {
        walk_page_mut(self, page);
    }

    fn visit_section_mut(&mut self, section: &mut PageSection) {
        walk_section_mut(self, section);
    }

    fn visit_component_mut(&mut self, section_id: &str, component: &mut PageComponent) {
        walk_component_mut(self, section_id, component);
    }

    fn visit_text_mut(&mut self, _field: &str, _text: &mut LocalizedText) {
        // Leaf node, no children to walk
    }
}

// Default walk implementations for immutable visitor

pub fn walk_page<V: Visitor>(visitor: &mut V, page: &Page) {
    visitor.visit_text("title", &page.title);
    if let Some(description) = &page.description {
        visitor.visit_text("description", description);
    }
    for section in &page.sections {
        visitor.visit_section(section);
    }
}

pub fn walk_section<V: Visitor>(visitor: &mut V, section: &PageSection) {
    visitor.visit_text("title", &section.title);
    for component in &section.components {
        visitor.visit_component(section, component);
    }
}

pub fn walk_component<V: Visitor>(visitor: &mut V, _section: &PageSection, component: &PageComponent) {
    for (field, text) in &component.content {
        visitor.visit_text(field, text);
    }
}

// Default walk implementations for mutable visitor

pub fn walk_page_mut<V: VisitorMut>(visitor: &mut V, page: &mut Page) {
    visitor.visit_text_mut("title", &mut page.title);
    if let Some(description) = &mut page.description {
        visitor.visit_text_mut("description", description);
    }
    for section in &mut page.sections {
        visitor.visit_section_mut(section);
    }
}

pub fn walk_section_mut<V: VisitorMut>(visitor: &mut V, section: &mut PageSection) {
    visitor.visit_text_mut("title", &mut section.title);
    let section_id = section.id.clone();
    for component in &mut section.components {
        visitor.visit_component_mut(&section_id, component);
    }
}

pub fn walk_component_mut<V: VisitorMut>(visitor: &mut V, _section_id: &str, component: &mut PageComponent) {
    for (field, text) in &mut component.content {
        visitor.visit_text_mut(field, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metanord_model::ComponentKind;

    fn sample_page() -> Page {
        let mut page = Page::new("p", "home", "Home");
        let mut section = PageSection::new("s1", "Intro");
        section
            .components
            .push(PageComponent::new("c1", ComponentKind::Heading, "s1"));
        section
            .components
            .push(PageComponent::new("c2", ComponentKind::Cta, "s1"));
        page.sections.push(section);
        page.sections.push(PageSection::new("s2", "Empty"));
        page
    }

    #[derive(Default)]
    struct OrderRecorder {
        visited: Vec<String>,
    }

    impl Visitor for OrderRecorder {
        fn visit_section(&mut self, section: &PageSection) {
            self.visited.push(section.id.clone());
            walk_section(self, section);
        }

        fn visit_component(&mut self, section: &PageSection, component: &PageComponent) {
            self.visited.push(format!("{}/{}", section.id, component.id));
        }
    }

    #[test]
    fn test_visitor_walks_in_tree_order() {
        let mut recorder = OrderRecorder::default();
        recorder.visit_page(&sample_page());
        assert_eq!(recorder.visited, vec!["s1", "s1/c1", "s1/c2", "s2"]);
    }

    struct TextCounter(usize);

    impl Visitor for TextCounter {
        fn visit_text(&mut self, _field: &str, _text: &LocalizedText) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_visitor_reaches_every_text_field() {
        let mut counter = TextCounter(0);
        counter.visit_page(&sample_page());
        // page title + 2 section titles + heading text + 3 cta fields
        assert_eq!(counter.0, 7);
    }

    struct Uppercase;

    impl VisitorMut for Uppercase {
        fn visit_text_mut(&mut self, _field: &str, text: &mut LocalizedText) {
            text.value = text.value.to_uppercase();
        }
    }

    #[test]
    fn test_visitor_mut_rewrites_text() {
        let mut page = sample_page();
        Uppercase.visit_page_mut(&mut page);
        assert_eq!(page.title.value, "HOME");
        assert_eq!(page.sections[1].title.value, "EMPTY");
    }
}
