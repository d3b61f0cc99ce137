//! View builders: turn domain values into [`markup`](crate::markup) trees.
//!
//! Class names here are part of the contract with the page stylesheet.

use crate::case_studies::CaseStudy;
use crate::markup::{Element, Node};
use crate::validation::ValidationErrors;

/// Class added to toggled elements (menu, hamburger, modal, nav links)
pub const ACTIVE_CLASS: &str = "active";
/// Class added to the navbar once the page has scrolled
pub const SCROLLED_CLASS: &str = "scrolled";
/// Class added to reveal targets when they first become visible
pub const REVEALED_CLASS: &str = "revealed";

pub const FORM_ERRORS_CLASS: &str = "form-errors";
pub const FORM_ERRORS_CLOSE_CLASS: &str = "form-errors-close";
pub const FORM_SUCCESS_CLASS: &str = "form-success";
pub const FIELD_ERROR_CLASS: &str = "field-error";

/// Border colour of a field that failed validation
pub const FIELD_ERROR_BORDER: &str = "#e74c3c";

/// Submit button label while a submission is pending
pub const SUBMIT_BUSY_LABEL: &str = "Enviando...";

pub const SUCCESS_MESSAGE: &str = "¡Mensaje enviado con éxito! Te responderé lo antes posible.";

/// Render a case study for the project dialog.
///
/// Layout: a header (image, title, client, duration, role) followed by
/// objective, problem, process list, solution and results grid.
pub fn case_study(study: &CaseStudy) -> Node {
    let header = Element::new("header")
        .class("case-study-header")
        .child(
            Element::new("img")
                .class("case-study-image")
                .attr("src", &study.image_url)
                .attr("alt", &study.title),
        )
        .child(
            Element::new("div")
                .class("case-study-intro")
                .child(
                    Element::new("h2")
                        .class("case-study-title")
                        .attr("id", "case-study-title")
                        .text(&study.title),
                )
                .child(
                    Element::new("div")
                        .class("case-study-meta")
                        .child(meta_item("Cliente", &study.client))
                        .child(meta_item("Duración", &study.duration))
                        .child(meta_item("Rol", &study.role)),
                ),
        );

    let process = Element::new("ol")
        .class("process-list")
        .children(study.process.iter().map(|step| Element::new("li").text(step)));

    let results = Element::new("div").class("results-grid").children(
        study
            .results
            .iter()
            .map(|r| Element::new("div").class("result-item").text(r)),
    );

    Element::new("article")
        .class("case-study")
        .attr("data-project", &study.id)
        .child(header)
        .child(section("Objetivo", paragraph(&study.objective)))
        .child(section("El problema", paragraph(&study.problem)))
        .child(section("Proceso", process))
        .child(section("La solución", paragraph(&study.solution)))
        .child(section("Resultados", results))
        .into_node()
}

fn meta_item(label: &str, value: &str) -> Element {
    Element::new("p")
        .class("meta-item")
        .child(Element::new("strong").text(format!("{label}:")))
        .text(format!(" {value}"))
}

fn paragraph(text: &str) -> Element {
    Element::new("p").text(text)
}

fn section(heading: &str, body: Element) -> Element {
    Element::new("section")
        .class("case-study-section")
        .child(Element::new("h3").text(heading))
        .child(body)
}

/// Dismissible block listing every validation message.
pub fn form_errors(errors: &ValidationErrors) -> Node {
    Element::new("div")
        .class(FORM_ERRORS_CLASS)
        .attr("role", "alert")
        .child(
            Element::new("button")
                .class(FORM_ERRORS_CLOSE_CLASS)
                .attr("type", "button")
                .attr("aria-label", "Cerrar")
                .text("×"),
        )
        .child(
            Element::new("ul").children(
                errors
                    .iter()
                    .map(|e| Element::new("li").attr("data-field", e.field.control_name()).text(&e.message)),
            ),
        )
        .into_node()
}

/// Inline message placed right after an invalid field.
pub fn field_error(message: &str) -> Node {
    Element::new("span")
        .class(FIELD_ERROR_CLASS)
        .attr("role", "alert")
        .text(message)
        .into_node()
}

/// Banner confirming a (simulated) successful submission.
pub fn success_banner() -> Node {
    Element::new("div")
        .class(FORM_SUCCESS_CLASS)
        .attr("role", "status")
        .text(SUCCESS_MESSAGE)
        .into_node()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case_studies::CaseStudyCatalog;
    use crate::validation::{validate, ContactFormData};

    #[test]
    fn test_case_study_layout() {
        let study = CaseStudyCatalog::builtin().get("ecommerce").unwrap();
        let node = case_study(study);

        let root = node.as_element().unwrap();
        assert_eq!(root.tag, "article");
        assert_eq!(root.get_attr("data-project"), Some("ecommerce"));

        let sections = node.find_by_class("case-study-section");
        let headings: Vec<String> = sections
            .iter()
            .map(|s| s.children[0].text_content())
            .collect();
        assert_eq!(
            headings,
            vec!["Objetivo", "El problema", "Proceso", "La solución", "Resultados"]
        );

        let process = node.find_by_class("process-list");
        assert_eq!(process[0].children.len(), study.process.len());
        assert_eq!(node.find_by_class("result-item").len(), study.results.len());

        let text = node.text_content();
        assert!(text.contains(&study.client));
        assert!(text.contains(&study.duration));
        assert!(text.contains(&study.role));
    }

    #[test]
    fn test_case_study_image() {
        let study = CaseStudyCatalog::builtin().get("salud").unwrap();
        let node = case_study(study);
        let img = &node.find_by_class("case-study-image")[0];
        assert_eq!(img.get_attr("src"), Some(study.image_url.as_str()));
        assert_eq!(img.get_attr("alt"), Some(study.title.as_str()));
        // Built on every open, after startup, with an eager source
        assert_eq!(img.tag, "img");
        assert_eq!(img.get_attr(crate::reveal::LAZY_SOURCE_ATTR), None);
    }

    #[test]
    fn test_form_errors_lists_each_message() {
        let errors = validate(&ContactFormData::new("A1", "bad", "short"));
        let node = form_errors(&errors);
        let list = node
            .as_element()
            .unwrap()
            .children
            .iter()
            .filter_map(Node::as_element)
            .find(|e| e.tag == "ul")
            .unwrap();
        assert_eq!(list.children.len(), 3);
        assert_eq!(node.find_by_class(FORM_ERRORS_CLOSE_CLASS).len(), 1);
    }

    #[test]
    fn test_feedback_nodes() {
        assert!(success_banner().to_html().contains(FORM_SUCCESS_CLASS));
        let inline = field_error("Falta algo");
        assert_eq!(inline.text_content(), "Falta algo");
        assert!(inline.as_element().unwrap().has_class(FIELD_ERROR_CLASS));
    }
}
