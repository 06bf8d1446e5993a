use serde_json::json;

use crate::{Error, FieldNotDefinedError, Query};

mod impls;

use impls::{build_registry, AppContext};

fn run(query: &str) -> serde_json::Value {
    let registry = build_registry();
    let context = AppContext {
        site_name: "Acme Blog".to_owned(),
    };
    Query::new(&registry, query, context).unwrap().as_result().unwrap()
}

#[test]
fn resolves_a_post_by_id_keyed_under_its_stringified_id() {
    assert_eq!(
        run("post(123) { title, content }"),
        json!({"123": {"title": "My great post", "content": "So many great things"}}),
    );
}

#[test]
fn resolves_multiple_comments_in_argument_order() {
    let result = run("comment(444, 445) { content }");
    let object = result.as_object().unwrap();
    assert_eq!(object.keys().collect::<Vec<_>>(), vec!["444", "445"]);
}

#[test]
fn chains_off_a_node_typed_field_rather_than_a_bare_scalar() {
    assert_eq!(
        run("post(123) { publishedAt.minusDays(200) { year } }"),
        json!({"123": {"publishedAt": {"year": 2009}}}),
    );
}

#[test]
fn alias_renames_the_result_key_and_drops_the_original() {
    let result = run("post(123) { title as headline }");
    let post = &result["123"];
    assert_eq!(post["headline"], json!("My great post"));
    assert!(post.get("title").is_none());
}

#[test]
fn first_one_on_a_connection_yields_a_single_edge() {
    let result = run("post(123) { comments.first(1) { edges { cursor, node { content } } } }");
    let edges = result["123"]["comments"]["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0]["cursor"], json!("444"));
    assert_eq!(edges[0]["node"]["content"], json!("I agree"));
}

#[test]
fn chained_scalar_calls_slice_a_string_left_to_right() {
    let result = run("comment(444) { letters.from(3).for(2) as snippet }");
    let comment = &result["444"];
    assert_eq!(comment["snippet"], json!("gr"));
    assert!(comment.get("letters").is_none());
}

#[test]
fn syntax_error_reports_the_offending_excerpt() {
    let registry = build_registry();
    let context = AppContext {
        site_name: "Acme Blog".to_owned(),
    };

    match Query::new(&registry, "\n\n<< bogus >>", context) {
        Err(Error::Syntax(err)) => {
            assert!(err.text_snippet.contains("<<"));
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn unknown_field_aborts_with_a_typed_error_and_no_side_effect() {
    let registry = build_registry();
    let context = AppContext {
        site_name: "Acme Blog".to_owned(),
    };
    let query = Query::new(&registry, "post(123) { nonexistent }", context).unwrap();

    match query.result() {
        Err(Error::FieldNotDefined(FieldNotDefinedError { type_name, field_name })) => {
            assert_eq!(type_name, "Post");
            assert_eq!(field_name, "nonexistent");
        }
        other => panic!("expected FieldNotDefinedError, got {other:?}"),
    }
}

#[test]
fn context_root_call_returns_the_context_handle_verbatim() {
    assert_eq!(run("context { siteName }"), json!({"context": {"siteName": "Acme Blog"}}));
}

#[test]
fn a_fragment_definition_is_accessible_by_identifier_with_its_field_count() {
    let registry = build_registry();
    let context = AppContext {
        site_name: "Acme Blog".to_owned(),
    };
    let query = Query::new(&registry, "post(123) { $summary }\n$summary: { title, content }", context).unwrap();

    let (identifier, fragment) = query.fragments().next().expect("one fragment definition");
    assert_eq!(identifier, "$summary");
    assert_eq!(fragment.fields.len(), 2);
}

#[test]
fn a_referenced_fragment_splices_its_fields_into_the_result() {
    let result = run("post(123) { $summary }\n$summary: { title, content }");
    assert_eq!(
        result,
        json!({"123": {"title": "My great post", "content": "So many great things"}}),
    );
}

#[test]
fn a_struct_derived_node_type_resolves_its_fields_directly_off_self() {
    let result = run("post(123) { author { name, handle } }");
    assert_eq!(result["123"]["author"], json!({"name": "Dana Voss", "handle": "dvoss"}));
}
