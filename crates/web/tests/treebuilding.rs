//! Whole-parser tests: source text in, DOM tree out.

use string_interner::{interned, InternedString};
use web::{
    dom::{DomPtr, Node, NodeKind, NodeType, QuirksMode},
    html::{serialize, IgnoreParseErrors, Parser},
    infra::Namespace,
};

fn parse(source: &str) -> DomPtr {
    web::parse(source)
}

fn quirks_mode(document: &DomPtr) -> QuirksMode {
    document
        .borrow()
        .as_document()
        .expect("root node is a document")
        .quirks_mode()
}

/// First element child with the given name, searching depth-first through
/// the whole subtree.
fn find_element(node: &DomPtr, name: InternedString) -> Option<DomPtr> {
    if node.is_html_element(name) {
        return Some(node.clone());
    }
    let children: Vec<DomPtr> = node.borrow().children().to_vec();
    children
        .iter()
        .find_map(|child| find_element(child, name))
}

/// The concatenated data of every Text descendant.
fn text_content(node: &DomPtr) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &DomPtr, out: &mut String) {
    if let Some(data) = node.borrow().as_character_data() {
        if node.node_type() == NodeType::Text {
            out.push_str(data.content());
        }
        return;
    }
    let children: Vec<DomPtr> = node.borrow().children().to_vec();
    for child in children {
        collect_text(&child, out);
    }
}

fn child_names(node: &DomPtr) -> Vec<String> {
    node.borrow()
        .children()
        .iter()
        .map(|child| match child.borrow().kind() {
            NodeKind::Element(element) => element.local_name().to_string(),
            NodeKind::Text(_) => "#text".to_owned(),
            NodeKind::Comment(_) => "#comment".to_owned(),
            NodeKind::DocumentType(_) => "#doctype".to_owned(),
            _ => "#other".to_owned(),
        })
        .collect()
}

#[test]
fn well_formed_document() {
    // S1
    let document = parse("<!DOCTYPE html><html><head></head><body>hi</body></html>");

    assert_eq!(child_names(&document), ["#doctype", "html"]);

    let doctype = document.first_child().unwrap();
    assert_eq!(
        doctype.borrow().as_doctype().unwrap().name(),
        interned!("html")
    );

    let html = document.last_child().unwrap();
    assert!(html.is_html_element(interned!("html")));
    assert_eq!(
        html.borrow().as_element().unwrap().namespace_uri(),
        "http://www.w3.org/1999/xhtml"
    );
    assert_eq!(child_names(&html), ["head", "body"]);

    let body = html.last_child().unwrap();
    assert_eq!(child_names(&body), ["#text"]);
    assert_eq!(text_content(&body), "hi");

    assert_eq!(quirks_mode(&document), QuirksMode::NoQuirks);
}

#[test]
fn document_accessors() {
    let document = parse("<!DOCTYPE html><title>t</title><body>x</body>");

    let node = document.borrow();
    let document_data = node.as_document().unwrap();
    assert!(document_data
        .head()
        .is_some_and(|head| head.is_html_element(interned!("head"))));
    assert!(document_data
        .body()
        .is_some_and(|body| body.is_html_element(interned!("body"))));
}

#[test]
fn comment_before_html_tag() {
    // S2
    let document = parse("<!-- c --><html></html>");

    let children = child_names(&document);
    assert_eq!(children, ["#comment", "html"]);

    let comment = document.first_child().unwrap();
    assert_eq!(comment.borrow().as_character_data().unwrap().content(), " c ");
}

#[test]
fn eof_while_parsing_last_character() {
    // S3: the tag is discarded but the tree is still fabricated.
    let document = parse("<html");

    let html = find_element(&document, interned!("html")).expect("html root exists");
    assert!(html.borrow().as_element().unwrap().attributes().is_empty());
    assert_eq!(child_names(&html), ["head", "body"]);
}

#[test]
fn adoption_agency_clones_formatting_elements() {
    // S4: <p>a<b>b<i>c</b>d</i>e</p>
    let document = parse("<p>a<b>b<i>c</b>d</i>e</p>");

    let p = find_element(&document, interned!("p")).expect("p exists");
    assert_eq!(child_names(&p), ["#text", "b", "i", "#text"]);

    let b = p.borrow().children()[1].clone();
    assert_eq!(child_names(&b), ["#text", "i"]);
    let inner_i = b.last_child().unwrap();
    assert_eq!(text_content(&inner_i), "c");

    // The cloned <i> holds "d".
    let second_i = p.borrow().children()[2].clone();
    assert_eq!(text_content(&second_i), "d");

    assert_eq!(text_content(&p), "abcde");
}

#[test]
fn foster_parenting_moves_text_before_the_table() {
    // S5
    let document = parse("<table>x<tr><td>y</td></tr></table>");

    let body = find_element(&document, interned!("body")).expect("body exists");
    assert_eq!(child_names(&body), ["#text", "table"]);
    assert_eq!(
        body.first_child()
            .unwrap()
            .borrow()
            .as_character_data()
            .unwrap()
            .content(),
        "x"
    );

    // The tbody is implicit.
    let table = body.last_child().unwrap();
    assert_eq!(child_names(&table), ["tbody"]);
    let tbody = table.first_child().unwrap();
    assert_eq!(child_names(&tbody), ["tr"]);
    let tr = tbody.first_child().unwrap();
    assert_eq!(child_names(&tr), ["td"]);
    assert_eq!(text_content(&tr), "y");
}

#[test]
fn character_reference_inside_rcdata() {
    // S6
    let document = parse("<title>&amp;</title>");

    let title = find_element(&document, interned!("title")).expect("title exists");
    assert_eq!(child_names(&title), ["#text"]);
    assert_eq!(text_content(&title), "&");
}

#[test]
fn tree_invariants_hold() {
    let document = parse(
        "<!DOCTYPE html><body><p>a<b>b<i>c</b>d</i></p>\
         <table>x<tr><td>y</td></tr></table><ul><li>1<li>2</ul>",
    );

    let mut all_nodes = Vec::new();
    verify_subtree(&document, &document, &mut all_nodes);

    // No node appears twice anywhere in the tree.
    for (i, a) in all_nodes.iter().enumerate() {
        for b in &all_nodes[i + 1..] {
            assert!(!a.ptr_eq(b), "node appears twice in the tree");
        }
    }
}

fn verify_subtree(node: &DomPtr, document: &DomPtr, all_nodes: &mut Vec<DomPtr>) {
    all_nodes.push(node.clone());

    // Every node's owning document is the document it sits in.
    let owning = node.borrow().owning_document().expect("node has a document");
    assert!(owning.ptr_eq(document));

    // A document has no Text children.
    if node.is_document() {
        for child in node.borrow().children() {
            assert_ne!(child.node_type(), NodeType::Text);
        }
    }

    let children: Vec<DomPtr> = node.borrow().children().to_vec();
    for (index, child) in children.iter().enumerate() {
        // Parent links point back at us.
        let parent = child.parent().expect("child has a parent");
        assert!(parent.ptr_eq(node));

        // Sibling navigation matches the child order.
        let previous = Node::previous_sibling(child);
        let next = Node::next_sibling(child);
        if index == 0 {
            assert!(previous.is_none());
        } else {
            assert!(previous.unwrap().ptr_eq(&children[index - 1]));
        }
        match children.get(index + 1) {
            Some(expected) => assert!(next.unwrap().ptr_eq(expected)),
            None => assert!(next.is_none()),
        }

        verify_subtree(child, document, all_nodes);
    }
}

#[test]
fn missing_doctype_means_quirks() {
    let document = parse("<html><body>x</body></html>");
    assert_eq!(quirks_mode(&document), QuirksMode::Quirks);
}

#[test]
fn quirky_public_identifier() {
    let document =
        parse("<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 3.2 Final//EN\"><html></html>");
    assert_eq!(quirks_mode(&document), QuirksMode::Quirks);
}

#[test]
fn transitional_without_system_id_is_quirks() {
    let document = parse(
        "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01 Transitional//EN\"><html></html>",
    );
    assert_eq!(quirks_mode(&document), QuirksMode::Quirks);
}

#[test]
fn transitional_with_system_id_is_limited_quirks() {
    let document = parse(
        "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01 Transitional//EN\" \
         \"http://www.w3.org/TR/html4/loose.dtd\"><html></html>",
    );
    assert_eq!(quirks_mode(&document), QuirksMode::LimitedQuirks);
}

#[test]
fn characters_append_to_the_preceding_text_node() {
    let document = parse("<body>a&amp;b</body>");

    let body = find_element(&document, interned!("body")).unwrap();
    // One coalesced Text node, not three.
    assert_eq!(child_names(&body), ["#text"]);
    assert_eq!(text_content(&body), "a&b");
}

#[test]
fn noahs_ark_keeps_at_most_three_clones() {
    let document = parse("<p><b><b><b><b>x</p><p>y</p>");

    // Reconstruction in the second paragraph re-opens at most three b
    // elements.
    let second_p = {
        let body = find_element(&document, interned!("body")).unwrap();
        body.last_child().unwrap()
    };

    let mut depth = 0;
    let mut node = second_p.first_child();
    while let Some(current) = node {
        if !current.is_html_element(interned!("b")) {
            break;
        }
        depth += 1;
        node = current.first_child();
    }
    assert_eq!(depth, 3);
    assert_eq!(text_content(&second_p), "y");
}

#[test]
fn implied_end_tags_for_list_items() {
    let document = parse("<ul><li>1<li>2<li>3</ul>");

    let ul = find_element(&document, interned!("ul")).unwrap();
    assert_eq!(child_names(&ul), ["li", "li", "li"]);
    assert_eq!(text_content(&ul), "123");
}

#[test]
fn block_elements_close_an_open_paragraph() {
    let document = parse("<p>one<div>two</div>");

    let body = find_element(&document, interned!("body")).unwrap();
    assert_eq!(child_names(&body), ["p", "div"]);
}

#[test]
fn rawtext_script_content() {
    let document = parse("<script>if (a < b) { c(); }</script>");

    let script = find_element(&document, interned!("script")).unwrap();
    assert_eq!(text_content(&script), "if (a < b) { c(); }");
}

#[test]
fn textarea_skips_the_first_newline() {
    let document = parse("<body><textarea>\nhello</textarea>");

    let textarea = find_element(&document, interned!("textarea")).unwrap();
    assert_eq!(text_content(&textarea), "hello");
}

#[test]
fn pre_skips_the_first_newline() {
    let document = parse("<body><pre>\ntext</pre>");

    let pre = find_element(&document, interned!("pre")).unwrap();
    assert_eq!(text_content(&pre), "text");
}

#[test]
fn template_contents_are_separate() {
    let document = parse("<template><div>x</div></template>");

    let template = find_element(&document, interned!("template")).unwrap();
    // The div is not a child of the template element itself.
    assert!(template.borrow().children().is_empty());

    let contents = template
        .borrow()
        .as_element()
        .unwrap()
        .template_contents()
        .expect("template has contents");
    assert_eq!(child_names(&contents), ["div"]);
    assert_eq!(text_content(&contents), "x");
}

#[test]
fn svg_subtree_gets_the_svg_namespace() {
    let document = parse("<body><svg><circle r=\"1\"/><foreignObject><div>x</div></foreignObject></svg>");

    let body = find_element(&document, interned!("body")).unwrap();
    let svg = body.first_child().unwrap();
    assert!(svg.is_element_in(Namespace::Svg, interned!("svg")));

    let circle = svg.first_child().unwrap();
    assert!(circle.is_element_in(Namespace::Svg, InternedString::new("circle")));

    // HTML integration point: the div inside foreignObject is an HTML
    // element again.
    let foreign_object = svg.last_child().unwrap();
    assert!(foreign_object.is_element_in(Namespace::Svg, interned!("foreignObject")));
    let div = foreign_object.first_child().unwrap();
    assert!(div.is_html_element(interned!("div")));
}

#[test]
fn math_subtree_gets_the_mathml_namespace() {
    let document = parse("<body><math><mi>x</mi></math>");

    let math = find_element(&document, interned!("body"))
        .unwrap()
        .first_child()
        .unwrap();
    assert!(math.is_element_in(Namespace::MathML, interned!("math")));

    let mi = math.first_child().unwrap();
    assert!(mi.is_element_in(Namespace::MathML, interned!("mi")));
    assert_eq!(text_content(&mi), "x");
}

#[test]
fn html_tag_breaks_out_of_foreign_content() {
    let document = parse("<body><svg><div>x</div></svg>");

    let body = find_element(&document, interned!("body")).unwrap();
    // The <div> closed the svg subtree and became a sibling.
    assert_eq!(child_names(&body), ["svg", "div"]);
    let div = body.last_child().unwrap();
    assert!(div.is_html_element(interned!("div")));
}

#[test]
fn fragment_parsing_uses_the_context_element() {
    let root = Parser::<IgnoreParseErrors>::parse_fragment("<td>x</td><td>y</td>", interned!("tr"));

    assert_eq!(child_names(&root), ["td", "td"]);
    assert_eq!(text_content(&root), "xy");
}

#[test]
fn fragment_parsing_in_body_context() {
    let root = Parser::<IgnoreParseErrors>::parse_fragment("<p>a</p><p>b</p>", interned!("div"));
    assert_eq!(child_names(&root), ["p", "p"]);
}

#[test]
fn serialization_round_trip() {
    let source = "<!DOCTYPE html><html><head><title>t</title></head>\
                  <body><p id=\"x\">a<b>b</b></p><ul><li>1</li><li>2</li></ul></body></html>";

    let first = parse(source);
    let serialized = serialize::serialize(&first);
    let second = parse(&serialized);

    assert!(
        Node::tree_eq(&first, &second),
        "round trip changed the tree:\n{first:?}\nvs\n{second:?}\nserialized: {serialized}"
    );
}

#[test]
fn serializer_escapes_text_and_attributes() {
    let document = parse("<body><p title=\"a&amp;b\">x &lt; y</p>");
    let serialized = serialize::serialize(&document);

    assert!(serialized.contains("title=\"a&amp;b\""));
    assert!(serialized.contains("x &lt; y"));
}

#[test]
fn whole_text_concatenates_adjacent_text_nodes() {
    use web::dom::CharacterData;

    // Built by hand; the parser always coalesces adjacent text.
    let parent = DomPtr::new(Node::new(NodeKind::Element(web::dom::Element::new(
        Namespace::Html,
        None,
        interned!("div"),
        None,
    ))));

    for part in ["a", "b", "c"] {
        let text = DomPtr::new(Node::new(NodeKind::Text(CharacterData::new(
            part.to_owned(),
        ))));
        Node::append_child(parent.clone(), text);
    }

    let middle = parent.borrow().children()[1].clone();
    assert_eq!(Node::whole_text(&middle), "abc");
}

#[test]
fn reinserting_a_node_detaches_it_first() {
    let document = parse("<body><div id=\"a\"></div><div id=\"b\"></div>");
    let body = find_element(&document, interned!("body")).unwrap();
    let first = body.first_child().unwrap();
    let second = body.last_child().unwrap();

    // Moving the first div under the second must remove it from the body.
    Node::append_child(second.clone(), first.clone());

    assert_eq!(body.borrow().children().len(), 1);
    assert!(first.parent().unwrap().ptr_eq(&second));
}

#[test]
fn dropping_a_deep_tree_does_not_overflow_the_stack() {
    let mut source = String::with_capacity(6 * 100_000 + 64);
    for _ in 0..100_000 {
        source.push_str("<div>");
    }

    let document = parse(&source);
    drop(document);
}

#[test]
fn misnested_tags_produce_a_tree() {
    // No panics, and the text survives.
    let document = parse("<b><table><td></b><i></table>x");
    assert!(find_element(&document, interned!("body")).is_some());

    let document = parse("</caption><select><option></optgroup>y");
    assert_eq!(text_content(&document), "y");
}
