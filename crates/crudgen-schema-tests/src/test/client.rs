use crate::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

const WORKFLOW_FIELDS: &str = "\
_id
anauditfield
category {anauditfield
refOneName}
name
steps {assignee {_id
anauditfield
refTwoName}
stepName}";

#[derive(Serialize)]
struct WorkflowDoc {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    category: String,
}

#[test]
fn full_field_list() {
    let fx = super::fixtures();

    assert_eq!(get_field_list_for_query(&fx.workflow, &[]), WORKFLOW_FIELDS);
}

#[test]
fn excluding_a_branch_keeps_siblings_in_order() {
    let fx = super::fixtures();

    assert_eq!(
        get_field_list_for_query(&fx.workflow, &["steps"]),
        "_id\nanauditfield\ncategory {anauditfield\nrefOneName}\nname"
    );
}

#[test]
fn excluding_a_nested_leaf_keeps_its_block() {
    let fx = super::fixtures();

    let list = get_field_list_for_query(&fx.workflow, &["category.anauditfield"]);
    assert!(list.contains("category {refOneName}\nname"));
    assert!(list.starts_with("_id\nanauditfield\n"));
    assert!(list.ends_with("stepName}"));
}

#[test]
fn delete_sends_only_the_id() {
    let fx = super::fixtures();
    let doc = WorkflowDoc {
        id: "abc123".to_string(),
        name: "review".to_string(),
        category: "ref1".to_string(),
    };

    let request = build_delete_mutation(&fx.workflow, &doc).unwrap();

    assert_eq!(request.query, "mutation($id:String!){deleteWorkflow(id: $id)}");
    assert_eq!(request.variables, json!({ "id": "abc123" }));
}

#[test]
fn insert_sends_the_whole_document() {
    let fx = super::fixtures();
    let doc = WorkflowDoc {
        id: "abc123".to_string(),
        name: "review".to_string(),
        category: "ref1".to_string(),
    };

    let request = build_insert_mutation(&fx.workflow, &doc).unwrap();

    assert_eq!(
        request.query,
        "mutation($doc:WorkflowInput){insertWorkflow(doc: $doc)}"
    );
    assert_eq!(
        request.variables,
        json!({ "doc": { "_id": "abc123", "name": "review", "category": "ref1" } })
    );
}

#[test]
fn find_request_posts_as_json() {
    let fx = super::fixtures();
    let modifier = QueryModifier::new().top(10).sort_by("name");

    let request = build_find_query(&fx.ref_two, &modifier, &["anauditfield"]).unwrap();

    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "query": "query($q:QueryModifier){findRefTwos(q: $q){data {_id\nrefTwoName}\ncount\ntotalCount}}",
            "variables": { "q": { "top": 10, "skip": 0, "sortBy": "name", "populate": true } },
        })
    );
}
