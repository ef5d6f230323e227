//! Organizational hierarchy lifecycle tests:
//! create → query descendants → move subtree → delete

use hrms_authz::{AuthzError, Hierarchy};

#[test]
fn test_department_tree_lifecycle() {
    let tree = Hierarchy::new();

    let company = tree.create("Company", None).unwrap();
    let engineering = tree.create("Engineering", Some(company.id)).unwrap();
    let sales = tree.create("Sales", Some(company.id)).unwrap();
    let backend = tree.create("Backend", Some(engineering.id)).unwrap();

    // materialized paths encode the full ancestor chain
    assert_eq!(company.path.as_str(), format!("/{}/", company.id));
    assert_eq!(
        backend.path.as_str(),
        format!("/{}/{}/{}/", company.id, engineering.id, backend.id)
    );

    // descendants exclude the node itself and unrelated siblings
    let eng_desc = tree.descendants_of(engineering.id).unwrap();
    assert_eq!(eng_desc.len(), 1);
    assert_eq!(eng_desc[0].id, backend.id);

    let sales_desc = tree.descendants_of(sales.id).unwrap();
    assert!(sales_desc.is_empty());

    // deleting a department with children is blocked
    let err = tree.delete(engineering.id);
    assert!(matches!(err, Err(AuthzError::HasChildren(_))));

    // after reparenting the child elsewhere the delete succeeds
    tree.move_node(backend.id, Some(sales.id)).unwrap();
    tree.delete(engineering.id).unwrap();

    let moved = tree.get(backend.id).unwrap();
    assert_eq!(
        moved.path.as_str(),
        format!("/{}/{}/{}/", company.id, sales.id, backend.id)
    );
}

#[test]
fn test_subtree_move_is_all_or_nothing() {
    let tree = Hierarchy::new();

    let company = tree.create("Company", None).unwrap();
    let engineering = tree.create("Engineering", Some(company.id)).unwrap();
    let backend = tree.create("Backend", Some(engineering.id)).unwrap();
    let platform = tree.create("Platform", Some(backend.id)).unwrap();

    // rejected move leaves every path untouched
    let err = tree.move_node(engineering.id, Some(platform.id));
    assert!(matches!(err, Err(AuthzError::CycleRejected { .. })));
    assert_eq!(
        tree.get(platform.id).unwrap().path.as_str(),
        format!(
            "/{}/{}/{}/{}/",
            company.id, engineering.id, backend.id, platform.id
        )
    );

    // a valid move rewrites the whole subtree
    tree.move_node(engineering.id, None).unwrap();
    assert_eq!(
        tree.get(platform.id).unwrap().path.as_str(),
        format!("/{}/{}/{}/", engineering.id, backend.id, platform.id)
    );
    assert_eq!(tree.descendants_of(company.id).unwrap().len(), 0);
}

#[test]
fn test_move_validations() {
    let tree = Hierarchy::new();
    let root = tree.create("Company", None).unwrap();

    assert!(matches!(
        tree.move_node(root.id, Some(root.id)),
        Err(AuthzError::CycleRejected { .. })
    ));
    assert!(matches!(
        tree.move_node(root.id, Some(404)),
        Err(AuthzError::ScopeNotFound(404))
    ));
    assert!(matches!(
        tree.move_node(404, None),
        Err(AuthzError::ScopeNotFound(404))
    ));
}

#[test]
fn test_branch_flag_does_not_gate_structure() {
    let tree = Hierarchy::new();
    let root = tree.create("Company", None).unwrap();
    let child = tree.create("Engineering", Some(root.id)).unwrap();

    // mark the leaf as a branch; structural operations ignore the flag
    tree.set_branch(child.id, true).unwrap();
    assert!(tree.get(child.id).unwrap().is_branch);
    tree.delete(child.id).unwrap();

    // root was never flagged, children are what block deletion
    assert!(!tree.get(root.id).unwrap().is_branch);
    tree.delete(root.id).unwrap();
    assert!(tree.is_empty());
}
